//! Maps the loosely structured JSON a hosted workflow returns into
//! [`Prediction`]s, so nothing past this module sees raw payloads.

use crate::image_classifier::interface::{BoundingBox, Prediction};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("workflow returned an error: {0}")]
    Api(String),
    #[error("workflow response has no outputs")]
    MissingOutputs,
    #[error("workflow output has no detections")]
    MissingPredictions,
    #[error("malformed detection: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RawDetection {
    #[serde(alias = "class_name", default)]
    class: String,
    confidence: f32,
    /// Center of the box.
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl From<RawDetection> for Prediction {
    fn from(raw: RawDetection) -> Self {
        Prediction {
            class_name: raw.class,
            confidence: raw.confidence,
            bounding_box: BoundingBox::from_center(raw.x, raw.y, raw.width, raw.height),
        }
    }
}

pub fn parse_workflow_response(body: &Value) -> Result<Vec<Prediction>, PayloadError> {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        if body.get("outputs").is_none() {
            return Err(PayloadError::Api(message.to_string()));
        }
    }

    let output = body
        .get("outputs")
        .and_then(Value::as_array)
        .and_then(|outputs| outputs.first())
        .ok_or(PayloadError::MissingOutputs)?;

    let detections = find_detections(output).ok_or(PayloadError::MissingPredictions)?;

    detections
        .iter()
        .map(|detection| {
            let raw = RawDetection::deserialize(detection)?;
            Ok::<_, PayloadError>(Prediction::from(raw))
        })
        .collect()
}

/// `predictions` is either the list itself or an object wrapping it; some
/// workflows name the output differently, so any wrapped list is accepted.
fn find_detections(output: &Value) -> Option<&Vec<Value>> {
    if let Some(list) = output.get("predictions").and_then(detection_list) {
        return Some(list);
    }
    output
        .as_object()?
        .values()
        .filter(|value| value.is_object())
        .find_map(detection_list)
}

fn detection_list(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(list) => Some(list),
        Value::Object(map) => map.get("predictions").and_then(Value::as_array),
        _ => None,
    }
}
