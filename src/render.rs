//! Per-frame trajectory drawing and the offline job runner.
//!
//! Every frame redraws the entire trajectory history, one segment stroke per
//! consecutive pair of buffered points. The total stroke count over a run is
//! therefore quadratic in the frame count; that redundancy is a property of
//! the animation format (each frame is self-contained) and is kept.

use std::time::Instant;

use chrono::Utc;
use glam::Mat4;

use crate::attractor::AttractorState;
use crate::camera::Camera;
use crate::job::{SketchError, SketchJobSpec, SketchMetadata, SketchPhase, SketchProgress};
use crate::lorenz::{LorenzParams, DT};
use crate::raster::{Canvas, INK};
use crate::scene::{Frame, FrameId, InkScene, LayerId};
use crate::sketch;
use crate::trajectory::Trajectory;

/// Line width applied to trajectory strokes.
pub const TRAJECTORY_LINE_WIDTH: u32 = 200;

/// Material slot applied to trajectory strokes.
pub const TRAJECTORY_MATERIAL: u32 = 1;

/// Frames between progress log lines.
const PROGRESS_INTERVAL: usize = 100;

/// Draw the full trajectory history into a frame.
///
/// Returns the number of strokes drawn, or `None` for a stale handle.
pub fn draw_history(
    scene: &mut InkScene,
    frame: FrameId,
    trajectory: &Trajectory,
) -> Option<usize> {
    let mut drawn = 0;
    for (p0, p1) in trajectory.segments() {
        let id = sketch::draw_segment(scene, frame, p0, p1)?;
        let stroke = scene.stroke_mut(id)?;
        stroke.line_width = TRAJECTORY_LINE_WIDTH;
        stroke.material_index = TRAJECTORY_MATERIAL;
        drawn += 1;
    }
    Some(drawn)
}

/// Run the attractor for `frames` steps, drawing each frame into the named
/// surface/layer of the scene. The layer is cleared first.
pub fn sketch_trajectory(
    scene: &mut InkScene,
    sim: &mut AttractorState,
    frames: u32,
    surface_name: &str,
    layer_name: &str,
) -> Result<LayerId, SketchError> {
    let surface = scene.ensure_surface(surface_name);
    let layer = scene
        .ensure_layer(surface, layer_name, true)
        .ok_or_else(|| SketchError::new(SketchPhase::Setup, "stale surface handle"))?;

    for i in 0..frames {
        let frame = scene
            .new_frame(layer, i)
            .ok_or_else(|| SketchError::new(SketchPhase::Draw, "stale layer handle"))?;
        sim.step();
        draw_history(scene, frame, sim.trajectory())
            .ok_or_else(|| SketchError::new(SketchPhase::Draw, "stale frame handle"))?;
    }
    Ok(layer)
}

/// Rasterize one frame's strokes through the camera.
pub fn rasterize_frame(
    frame: &Frame,
    camera: &Camera,
    view_proj: &Mat4,
    width: u32,
    height: u32,
) -> Canvas {
    let mut canvas = Canvas::new(width, height);
    for stroke in &frame.strokes {
        let points = &stroke.points;
        let pairs = points.len().saturating_sub(1) + usize::from(stroke.cyclic && points.len() > 2);
        for i in 0..pairs {
            let p0 = points[i];
            let p1 = points[(i + 1) % points.len()];
            // A segment with either endpoint behind the camera is dropped.
            let a = camera.project(view_proj, p0.into(), width, height);
            let b = camera.project(view_proj, p1.into(), width, height);
            if let (Some(a), Some(b)) = (a, b) {
                canvas.draw_line(a, b, INK);
            }
        }
    }
    canvas
}

/// Run a full sketch job: simulate, draw, rasterize, and write outputs.
pub fn run_job(spec: &SketchJobSpec) -> Result<SketchMetadata, SketchError> {
    spec.validate()
        .map_err(|e| SketchError::new(SketchPhase::Setup, e))?;

    let started_at = Utc::now();
    let start = Instant::now();

    let mut scene = InkScene::new();
    let mut sim = AttractorState::with_initial(
        spec.initial_state.into(),
        LorenzParams::default(),
        DT,
    );

    let layer = sketch_trajectory(
        &mut scene,
        &mut sim,
        spec.frames,
        &spec.surface_name,
        &spec.layer_name,
    )?;
    log::info!(
        "Simulated {} frames, trajectory holds {} points",
        spec.frames,
        sim.trajectory().len()
    );

    if spec.write_frames {
        std::fs::create_dir_all(&spec.output_dir)
            .map_err(|e| SketchError::with_source(SketchPhase::Setup, "creating output dir", e))?;

        let camera = Camera::default();
        let view_proj = camera.view_proj(spec.width as f32 / spec.height as f32);
        let frames = &scene
            .layer(layer)
            .ok_or_else(|| SketchError::new(SketchPhase::FrameSave, "stale layer handle"))?
            .frames;

        for (i, frame) in frames.iter().enumerate() {
            let canvas = rasterize_frame(frame, &camera, &view_proj, spec.width, spec.height);
            let path = spec.output_dir.join(format!("frame_{:05}.png", frame.index));
            canvas
                .save_png(&path)
                .map_err(|e| SketchError::with_source(SketchPhase::FrameSave, "saving frame", e))?;

            if (i + 1) % PROGRESS_INTERVAL == 0 {
                let progress = SketchProgress {
                    current_frame: i + 1,
                    total_frames: frames.len(),
                    elapsed_secs: start.elapsed().as_secs_f64(),
                };
                log::info!(
                    "Saved frame {}/{} ({:.0}%, {:.1}s elapsed)",
                    progress.current_frame,
                    progress.total_frames,
                    progress.percentage(),
                    progress.elapsed_secs
                );
            }
        }
    }

    if let Some(scene_path) = &spec.scene_path {
        let json = serde_json::to_string_pretty(&scene)
            .map_err(|e| SketchError::with_source(SketchPhase::SceneSave, "serializing scene", e))?;
        std::fs::write(scene_path, json)
            .map_err(|e| SketchError::with_source(SketchPhase::SceneSave, "writing scene", e))?;
        log::info!("Wrote scene dump to {:?}", scene_path);
    }

    let completed_at = Utc::now();
    let metadata = SketchMetadata {
        job: spec.clone(),
        started_at,
        completed_at,
        run_duration_secs: start.elapsed().as_secs_f64(),
        frame_count: spec.frames as usize,
        trajectory_points: sim.trajectory().len(),
        stroke_count: scene.stroke_count(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    if spec.write_frames {
        metadata
            .save(&spec.output_dir.join("metadata.json"))
            .map_err(|e| SketchError::new(SketchPhase::MetadataSave, e))?;
    }

    Ok(metadata)
}
