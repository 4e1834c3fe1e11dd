//! Sketch job specification and metadata.
//!
//! Defines the structures describing an offline attractor sketch: the job
//! spec consumed by the runner, the metadata written alongside the output,
//! and the phase-tagged error used to report failures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::lorenz::DEFAULT_FRAMES;

fn default_frames() -> u32 {
    DEFAULT_FRAMES
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

/// Playback rate recorded in metadata; the run itself is not timed.
fn default_fps() -> f32 {
    24.0
}

fn default_initial_state() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_surface_name() -> String {
    "Attractor".to_string()
}

fn default_layer_name() -> String {
    "Trajectory".to_string()
}

fn default_write_frames() -> bool {
    true
}

/// Specification for a single attractor sketch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchJobSpec {
    /// Output directory for PNG frames and metadata.
    pub output_dir: PathBuf,

    /// Number of animation frames to run.
    #[serde(default = "default_frames")]
    pub frames: u32,

    /// Frame width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Frame height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Intended playback rate, recorded in metadata only.
    #[serde(default = "default_fps")]
    pub fps: f32,

    /// Starting point of the integration.
    #[serde(default = "default_initial_state")]
    pub initial_state: [f64; 3],

    /// Name of the drawing surface to create or reuse.
    #[serde(default = "default_surface_name")]
    pub surface_name: String,

    /// Name of the layer holding the animation frames.
    #[serde(default = "default_layer_name")]
    pub layer_name: String,

    /// Optional path for a JSON dump of the finished scene.
    #[serde(default)]
    pub scene_path: Option<PathBuf>,

    /// Whether to rasterize and save PNG frames.
    #[serde(default = "default_write_frames")]
    pub write_frames: bool,
}

impl SketchJobSpec {
    /// Create a spec with defaults for everything but the output directory.
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            frames: default_frames(),
            width: default_width(),
            height: default_height(),
            fps: default_fps(),
            initial_state: default_initial_state(),
            surface_name: default_surface_name(),
            layer_name: default_layer_name(),
            scene_path: None,
            write_frames: default_write_frames(),
        }
    }

    /// Validate the job specification.
    pub fn validate(&self) -> Result<(), String> {
        if self.frames == 0 {
            return Err("Frame count must be positive".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err("Width and height must be positive".to_string());
        }
        if self.fps <= 0.0 {
            return Err("FPS must be positive".to_string());
        }
        if self.surface_name.is_empty() || self.layer_name.is_empty() {
            return Err("Surface and layer names cannot be empty".to_string());
        }
        Ok(())
    }

    /// Load a spec from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read job file {:?}: {}", path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse job file {:?}: {}", path, e))
    }
}

/// Metadata for a completed sketch, written as metadata.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchMetadata {
    /// The job specification used.
    pub job: SketchJobSpec,

    /// Timestamp when the run started.
    pub started_at: DateTime<Utc>,

    /// Timestamp when the run completed.
    pub completed_at: DateTime<Utc>,

    /// Wall-clock duration in seconds.
    pub run_duration_secs: f64,

    /// Frames produced.
    pub frame_count: usize,

    /// Points held by the trajectory buffer at the end of the run.
    pub trajectory_points: usize,

    /// Total strokes across the scene.
    pub stroke_count: usize,

    /// Crate version that produced the output.
    pub version: String,
}

impl SketchMetadata {
    /// Save metadata to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize metadata: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write metadata: {}", e))
    }
}

/// Run phase for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchPhase {
    Setup,
    Draw,
    FrameSave,
    SceneSave,
    MetadataSave,
}

impl std::fmt::Display for SketchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SketchPhase::Setup => write!(f, "Setup"),
            SketchPhase::Draw => write!(f, "Draw"),
            SketchPhase::FrameSave => write!(f, "Frame Save"),
            SketchPhase::SceneSave => write!(f, "Scene Save"),
            SketchPhase::MetadataSave => write!(f, "Metadata Save"),
        }
    }
}

/// Structured error for sketch failures.
#[derive(Debug)]
pub struct SketchError {
    pub phase: SketchPhase,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::fmt::Display for SketchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for SketchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl SketchError {
    pub fn new(phase: SketchPhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        phase: SketchPhase,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            phase,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Progress information for logging.
#[derive(Debug, Clone)]
pub struct SketchProgress {
    /// Current frame number (1-indexed).
    pub current_frame: usize,
    /// Total frames to run.
    pub total_frames: usize,
    /// Elapsed time in seconds.
    pub elapsed_secs: f64,
}

impl SketchProgress {
    /// Get progress as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        if self.total_frames == 0 {
            100.0
        } else {
            (self.current_frame as f64 / self.total_frames as f64) * 100.0
        }
    }
}
