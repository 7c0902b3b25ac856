use crate::config::InferConfig;
use crate::image_classifier::hosted_payload::parse_workflow_response;
use crate::image_classifier::interface::{InferencePipeline, Prediction};
use crate::library::logger::interface::Logger;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use serde_json::{json, Value};
use std::sync::Arc;

const UPLOAD_JPEG_QUALITY: u8 = 80;

/// Runs a hosted detect-and-classify workflow over HTTP, one request per
/// frame.
pub struct InferencePipelineHosted {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl InferencePipelineHosted {
    pub fn new(
        config: &InferConfig,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or("missing API key (set ROBOFLOW_API_KEY or pass --api-key)")?;

        let agent = ureq::AgentBuilder::new()
            .timeout(config.request_timeout)
            .build();

        Ok(Self {
            agent,
            endpoint: workflow_endpoint(config),
            api_key,
            logger: logger.with_namespace("hosted"),
        })
    }
}

pub fn workflow_endpoint(config: &InferConfig) -> String {
    format!(
        "{}/infer/workflows/{}/{}",
        config.api_url.trim_end_matches('/'),
        config.workspace_name,
        config.workflow_id
    )
}

fn encode_jpeg_base64(
    image: &DynamicImage,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, UPLOAD_JPEG_QUALITY)
        .encode_image(&image.to_rgb8())?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

impl InferencePipeline for InferencePipelineHosted {
    fn infer(
        &mut self,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let body = json!({
            "api_key": self.api_key,
            "inputs": {
                "image": {"type": "base64", "value": encode_jpeg_base64(image)?}
            }
        });

        let response = match self.agent.post(&self.endpoint).send_json(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let detail = response.into_string().unwrap_or_default();
                self.logger
                    .error(&format!("Workflow request failed ({}): {}", code, detail));
                return Err(format!("workflow request failed with status {}", code).into());
            }
            Err(e) => return Err(e.into()),
        };

        let payload: Value = response.into_json()?;
        Ok(parse_workflow_response(&payload)?)
    }
}
