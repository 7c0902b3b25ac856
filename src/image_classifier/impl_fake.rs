use crate::image_classifier::coco::COCO_CLASSES;
use crate::image_classifier::interface::{
    BoundingBox, EmotionClassifier, EmotionScores, InferencePipeline, ObjectDetector, Prediction,
};
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};

/// Random detections, for running the tools without model files.
pub struct ObjectDetectorFake {}

impl ObjectDetectorFake {
    pub fn new() -> Self {
        Self {}
    }
}

impl ObjectDetector for ObjectDetectorFake {
    fn detect(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let index_dist = Uniform::new(0, COCO_CLASSES.len())?;
        let confidence_dist = Uniform::new(0.0f32, 1.0)?;
        let (width, height) = (image.width() as f32, image.height() as f32);

        let prediction = Prediction {
            class_name: COCO_CLASSES[index_dist.sample(&mut rng)].to_string(),
            confidence: confidence_dist.sample(&mut rng),
            bounding_box: BoundingBox::from_center(width / 2.0, height / 2.0, width / 3.0, height / 3.0),
        };

        Ok(vec![prediction])
    }
}

pub struct EmotionClassifierFake {
    labels: Vec<String>,
}

impl EmotionClassifierFake {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl EmotionClassifier for EmotionClassifierFake {
    fn classify(
        &self,
        _image: &DynamicImage,
    ) -> Result<EmotionScores, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let weight_dist = Uniform::new(0.0f32, 1.0)?;
        let weights: Vec<f32> = self
            .labels
            .iter()
            .map(|_| weight_dist.sample(&mut rng))
            .collect();
        let total: f32 = weights.iter().sum::<f32>().max(f32::EPSILON);

        Ok(EmotionScores {
            scores: self
                .labels
                .iter()
                .zip(weights)
                .map(|(label, weight)| (label.clone(), 100.0 * weight / total))
                .collect(),
        })
    }
}

/// Plays back a fixed list of responses, then repeats the last one.
pub struct InferencePipelineFake {
    responses: Vec<Result<Vec<Prediction>, String>>,
    next: usize,
    pub calls: usize,
}

impl InferencePipelineFake {
    pub fn new(responses: Vec<Result<Vec<Prediction>, String>>) -> Self {
        Self {
            responses,
            next: 0,
            calls: 0,
        }
    }

    /// Always answers with one detection of `class_name`.
    pub fn constant(class_name: &str) -> Self {
        Self::new(vec![Ok(vec![Prediction {
            class_name: class_name.to_string(),
            confidence: 0.9,
            bounding_box: BoundingBox::from_center(50.0, 50.0, 20.0, 20.0),
        }])])
    }
}

impl InferencePipeline for InferencePipelineFake {
    fn infer(
        &mut self,
        _image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls += 1;
        let response = match self.responses.get(self.next) {
            Some(response) => {
                self.next += 1;
                response
            }
            None => match self.responses.last() {
                Some(response) => response,
                None => return Ok(vec![]),
            },
        };
        response.clone().map_err(Into::into)
    }
}
