use crate::config::ModelConfig;
use crate::image_classifier::interface::{EmotionClassifier, EmotionScores};
use crate::image_classifier::tract::image::grayscale_to_tensor;
use image::DynamicImage;
use tract_onnx::prelude::*;

/// Runs a FER-style model on the whole frame and reports softmaxed
/// percentages.
pub struct EmotionClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
    labels: Vec<String>,
}

impl EmotionClassifierTractOnnx {
    pub fn new(
        config: ModelConfig,
        labels: Vec<String>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact([1, 1, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self {
            model,
            config,
            labels,
        })
    }
}

impl EmotionClassifier for EmotionClassifierTractOnnx {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<EmotionScores, Box<dyn std::error::Error + Send + Sync>> {
        let (height, width) = self.config.input_shape;
        let input = grayscale_to_tensor(image, width, height);

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let logits: Vec<f32> = outputs[0].to_array_view::<f32>()?.iter().copied().collect();
        if logits.len() != self.labels.len() {
            return Err(format!(
                "emotion model returned {} scores for {} labels",
                logits.len(),
                self.labels.len()
            )
            .into());
        }

        Ok(to_percentages(&self.labels, &logits))
    }
}

pub fn to_percentages(labels: &[String], logits: &[f32]) -> EmotionScores {
    let max = logits.iter().copied().fold(f32::MIN, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    EmotionScores {
        scores: labels
            .iter()
            .zip(exps)
            .map(|(label, e)| (label.clone(), 100.0 * e / sum))
            .collect(),
    }
}
