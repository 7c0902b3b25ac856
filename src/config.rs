use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// (height, width)
    pub input_shape: (u32, u32),
}

#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub base_output_dir: PathBuf,
    pub initial_interval: Duration,
    pub min_interval: Duration,
    pub max_interval: Duration,
    pub interval_step: Duration,
    pub jpeg_quality: u8,
}

#[derive(Debug, Clone)]
pub struct DetectConfig {
    pub detector_model: ModelConfig,
    pub emotion_model: ModelConfig,
    pub emotion_labels: Vec<String>,
    pub min_confidence: f32,
    pub nms_iou_threshold: f32,
    pub box_min_confidence: f32,
}

#[derive(Debug, Clone)]
pub struct InferConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub workspace_name: String,
    pub workflow_id: String,
    pub reference_dir: PathBuf,
    /// (width, height) a reference image is scaled down to fit in.
    pub reference_max_size: (u32, u32),
    /// Process every Nth frame; 1 processes all of them.
    pub frame_skip: u32,
    pub max_fps: u32,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub frame_delay: Duration,
    pub logger_timezone: chrono::FixedOffset,
    pub capture: CaptureConfig,
    pub detect: DetectConfig,
    pub infer: InferConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(1),
            logger_timezone: local_offset(),
            capture: CaptureConfig::default(),
            detect: DetectConfig::default(),
            infer: InferConfig::default(),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            base_output_dir: PathBuf::from("public/training-data"),
            initial_interval: Duration::from_millis(100),
            min_interval: Duration::from_millis(50),
            max_interval: Duration::from_secs(2),
            interval_step: Duration::from_millis(50),
            jpeg_quality: 95,
        }
    }
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            detector_model: ModelConfig {
                onnx_model_path: PathBuf::from("models/yolov8n.onnx"),
                input_shape: (640, 640),
            },
            emotion_model: ModelConfig {
                onnx_model_path: PathBuf::from("models/emotion-ferplus-8.onnx"),
                input_shape: (64, 64),
            },
            emotion_labels: [
                "neutral", "happy", "surprise", "sad", "angry", "disgust", "fear", "contempt",
            ]
            .iter()
            .map(|label| label.to_string())
            .collect(),
            min_confidence: 0.25,
            nms_iou_threshold: 0.45,
            box_min_confidence: 0.5,
        }
    }
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            api_url: "https://detect.roboflow.com".to_string(),
            api_key: None,
            workspace_name: "fashion-vision".to_string(),
            workflow_id: "detect-and-classify-3".to_string(),
            reference_dir: PathBuf::from("public/reference-images"),
            reference_max_size: (320, 240),
            frame_skip: 1,
            max_fps: 30,
            request_timeout: Duration::from_secs(10),
        }
    }
}

fn local_offset() -> chrono::FixedOffset {
    *chrono::Local::now().offset()
}
