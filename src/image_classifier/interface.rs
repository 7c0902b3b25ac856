use image::DynamicImage;

/// Axis-aligned box in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub fn from_center(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            x_min: center_x - width / 2.0,
            y_min: center_y - height / 2.0,
            x_max: center_x + width / 2.0,
            y_max: center_y + height / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        (self.x_max - self.x_min).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y_max - self.y_min).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let overlap = BoundingBox {
            x_min: self.x_min.max(other.x_min),
            y_min: self.y_min.max(other.y_min),
            x_max: self.x_max.min(other.x_max),
            y_max: self.y_max.min(other.y_max),
        };
        let intersection = overlap.area();
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            0.0
        } else {
            intersection / union
        }
    }
}

/// One detected object, whatever model or service produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class_name: String,
    pub confidence: f32,
    pub bounding_box: BoundingBox,
}

/// Emotion label to percentage, in model output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionScores {
    pub scores: Vec<(String, f32)>,
}

impl EmotionScores {
    pub fn dominant(&self) -> Option<&(String, f32)> {
        self.scores
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

pub trait ObjectDetector {
    fn detect(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait EmotionClassifier {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<EmotionScores, Box<dyn std::error::Error + Send + Sync>>;
}

/// A remote detect-and-classify workflow.
pub trait InferencePipeline {
    fn infer(
        &mut self,
        image: &DynamicImage,
    ) -> Result<Vec<Prediction>, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iou() {
        let a = BoundingBox::from_center(10.0, 10.0, 10.0, 10.0);
        let b = BoundingBox::from_center(15.0, 10.0, 10.0, 10.0);
        let far = BoundingBox::from_center(100.0, 100.0, 10.0, 10.0);

        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
        assert!((a.iou(&b) - 50.0 / 150.0).abs() < 1e-6);
        assert_eq!(a.iou(&far), 0.0);
    }

    #[test]
    fn test_dominant_emotion() {
        let scores = EmotionScores {
            scores: vec![
                ("neutral".to_string(), 20.0),
                ("happy".to_string(), 75.0),
                ("sad".to_string(), 5.0),
            ],
        };

        assert_eq!(scores.dominant().unwrap().0, "happy");
    }
}
