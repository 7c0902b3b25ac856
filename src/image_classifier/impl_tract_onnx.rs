use crate::config::ModelConfig;
use crate::image_classifier::coco::class_name;
use crate::image_classifier::interface::{BoundingBox, ObjectDetector, Prediction};
use crate::image_classifier::tract::image::{letterbox, rgb_to_tensor};
use crate::image_classifier::tract::yolo::{decode_v5, decode_v8, non_max_suppression};
use image::DynamicImage;
use tract_onnx::prelude::*;

pub struct ObjectDetectorTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
    min_confidence: f32,
    iou_threshold: f32,
}

impl ObjectDetectorTractOnnx {
    pub fn new(
        config: ModelConfig,
        min_confidence: f32,
        iou_threshold: f32,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self {
            model,
            config,
            min_confidence,
            iou_threshold,
        })
    }
}

impl ObjectDetector for ObjectDetectorTractOnnx {
    fn detect(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = self.config.input_shape;
        let boxed = letterbox(image, width, height);
        let input = rgb_to_tensor(&boxed.image);

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs[0]
            .to_array_view::<f32>()?
            .into_dimensionality::<tract_ndarray::Ix3>()?;

        // v8 exports put the (few) features before the (many) boxes.
        let candidates = if output.shape()[1] < output.shape()[2] {
            decode_v8(output, self.min_confidence)
        } else {
            decode_v5(output, self.min_confidence)
        };

        let frame_width = image.width() as f32;
        let frame_height = image.height() as f32;
        let predictions = non_max_suppression(candidates, self.iou_threshold)
            .into_iter()
            .map(|candidate| {
                let b = candidate.bounding_box;
                let (x_min, y_min) = boxed.to_frame(b.x_min, b.y_min);
                let (x_max, y_max) = boxed.to_frame(b.x_max, b.y_max);
                Prediction {
                    class_name: class_name(candidate.class_index),
                    confidence: candidate.confidence,
                    bounding_box: BoundingBox {
                        x_min: x_min.clamp(0.0, frame_width),
                        y_min: y_min.clamp(0.0, frame_height),
                        x_max: x_max.clamp(0.0, frame_width),
                        y_max: y_max.clamp(0.0, frame_height),
                    },
                }
            })
            .collect();

        Ok(predictions)
    }
}
