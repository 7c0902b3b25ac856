use clap::{Args, Parser, Subcommand, ValueEnum};
use config::Config;
use device_camera::interface::{open_camera, CameraSource};
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::{run_gui, DeviceDisplayGui};
use device_display::interface::DeviceDisplay;
use device_keyboard::impl_stdin::DeviceKeyboardStdin;
use gesture_capture::main::GestureCapture;
use image_classifier::impl_fake::{EmotionClassifierFake, InferencePipelineFake, ObjectDetectorFake};
use image_classifier::impl_hosted::InferencePipelineHosted;
use image_classifier::impl_tract_emotion::EmotionClassifierTractOnnx;
use image_classifier::impl_tract_onnx::ObjectDetectorTractOnnx;
use image_classifier::interface::{EmotionClassifier, InferencePipeline, ObjectDetector};
use image_sink::impl_filesystem::ImageSinkFilesystem;
use library::frame_loop::{run_console, FrameLoop};
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use live_detect::main::LiveDetect;
use live_infer::main::LiveInfer;
use live_infer::reference_panel::ReferencePanel;
use reference_images::cache::ReferenceImages;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod device_camera;
mod device_display;
mod device_keyboard;
mod gesture_capture;
mod image_classifier;
mod image_sink;
mod library;
mod live_detect;
mod live_infer;
mod reference_images;

#[cfg(feature = "webcam")]
const DEFAULT_CAMERA: &str = "v4l:0";
#[cfg(not(feature = "webcam"))]
const DEFAULT_CAMERA: &str = "fake";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DisplayMode {
    Console,
    Gui,
}

/// Webcam tools for building and checking vision datasets.
#[derive(Debug, Parser)]
#[command(name = "vision-capture", version)]
struct Cli {
    #[arg(long, value_enum, default_value_t = DisplayMode::Gui, global = true)]
    display: DisplayMode,

    /// fake, dir:<path> or v4l:<index>
    #[arg(long, default_value = DEFAULT_CAMERA, global = true)]
    camera: CameraSource,

    #[command(subcommand)]
    tool: Tool,
}

#[derive(Debug, Subcommand)]
enum Tool {
    /// Capture labeled training images into per-gesture folders.
    Capture(CaptureArgs),
    /// Live object detection with emotion percentages.
    Detect(DetectArgs),
    /// Live hosted workflow inference with reference images.
    Infer(InferArgs),
}

#[derive(Debug, Args)]
struct CaptureArgs {
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct DetectArgs {
    #[arg(long)]
    detector_model: Option<PathBuf>,

    #[arg(long)]
    emotion_model: Option<PathBuf>,

    /// Random detections instead of loading models.
    #[arg(long)]
    fake_models: bool,
}

#[derive(Debug, Args)]
struct InferArgs {
    #[arg(long, env = "ROBOFLOW_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "ROBOFLOW_API_URL")]
    api_url: Option<String>,

    #[arg(long)]
    workspace: Option<String>,

    #[arg(long)]
    workflow: Option<String>,

    #[arg(long)]
    reference_dir: Option<PathBuf>,

    /// Send every Nth frame to the workflow.
    #[arg(long)]
    frame_skip: Option<u32>,

    #[arg(long)]
    max_fps: Option<u32>,

    /// Answer every frame locally instead of calling the workflow.
    #[arg(long)]
    fake_pipeline: bool,
}

fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let camera = open_camera(&cli.camera, logger.clone())?;

    let gui = DeviceDisplayGui::new();
    let display: Box<dyn DeviceDisplay> = match cli.display {
        DisplayMode::Console => Box::new(DeviceDisplayConsole::new()),
        DisplayMode::Gui => Box::new(gui.clone()),
    };

    let (title, frame_loop): (&str, Box<dyn FrameLoop>) = match cli.tool {
        Tool::Capture(args) => {
            if let Some(output_dir) = args.output_dir {
                config.capture.base_output_dir = output_dir;
            }
            let sink = ImageSinkFilesystem::new(
                config.capture.base_output_dir.clone(),
                config.capture.jpeg_quality,
                logger.clone(),
            );
            let mut capture =
                GestureCapture::new(&config.capture, logger.clone(), camera, Box::new(sink), display);
            start_or_report(capture.start(), &logger)?;
            ("Gesture Capture", Box::new(capture))
        }

        Tool::Detect(args) => {
            if let Some(path) = args.detector_model {
                config.detect.detector_model.onnx_model_path = path;
            }
            if let Some(path) = args.emotion_model {
                config.detect.emotion_model.onnx_model_path = path;
            }
            let (detector, emotion): (Box<dyn ObjectDetector>, Box<dyn EmotionClassifier>) =
                if args.fake_models {
                    (
                        Box::new(ObjectDetectorFake::new()),
                        Box::new(EmotionClassifierFake::new(config.detect.emotion_labels.clone())),
                    )
                } else {
                    logger.info(&format!(
                        "Loading models {} and {}",
                        config.detect.detector_model.onnx_model_path.display(),
                        config.detect.emotion_model.onnx_model_path.display()
                    ));
                    (
                        Box::new(ObjectDetectorTractOnnx::new(
                            config.detect.detector_model.clone(),
                            config.detect.min_confidence,
                            config.detect.nms_iou_threshold,
                        )?),
                        Box::new(EmotionClassifierTractOnnx::new(
                            config.detect.emotion_model.clone(),
                            config.detect.emotion_labels.clone(),
                        )?),
                    )
                };
            let mut detect =
                LiveDetect::new(&config.detect, logger.clone(), camera, detector, emotion, display);
            start_or_report(detect.start(), &logger)?;
            ("Emotion Percentages", Box::new(detect))
        }

        Tool::Infer(args) => {
            let infer_config = &mut config.infer;
            infer_config.api_key = args.api_key.or(infer_config.api_key.take());
            if let Some(api_url) = args.api_url {
                infer_config.api_url = api_url;
            }
            if let Some(workspace) = args.workspace {
                infer_config.workspace_name = workspace;
            }
            if let Some(workflow) = args.workflow {
                infer_config.workflow_id = workflow;
            }
            if let Some(reference_dir) = args.reference_dir {
                infer_config.reference_dir = reference_dir;
            }
            if let Some(frame_skip) = args.frame_skip {
                infer_config.frame_skip = frame_skip;
            }
            if let Some(max_fps) = args.max_fps {
                infer_config.max_fps = max_fps;
            }

            let pipeline: Box<dyn InferencePipeline> = if args.fake_pipeline {
                Box::new(InferencePipelineFake::constant("sneaker"))
            } else {
                Box::new(InferencePipelineHosted::new(&config.infer, logger.clone())?)
            };
            let panel = ReferencePanel::new(
                ReferenceImages::new(
                    config.infer.reference_dir.clone(),
                    config.infer.reference_max_size,
                ),
                logger.clone(),
            );
            let mut infer =
                LiveInfer::new(&config.infer, logger.clone(), camera, pipeline, display, panel);
            start_or_report(infer.start(), &logger)?;
            ("Workflow Image", Box::new(infer))
        }
    };

    match cli.display {
        DisplayMode::Console => {
            let mut frame_loop = frame_loop;
            let mut keyboard = DeviceKeyboardStdin::new();
            run_console(frame_loop.as_mut(), &mut keyboard, config.frame_delay);
            Ok(())
        }
        DisplayMode::Gui => run_gui(title, frame_loop, &gui),
    }
}

fn start_or_report(
    started: Result<(), BoxError>,
    logger: &Arc<dyn Logger + Send + Sync>,
) -> Result<(), BoxError> {
    started.map_err(|e| {
        logger.error(&format!("Could not start: {}", e));
        e
    })
}
