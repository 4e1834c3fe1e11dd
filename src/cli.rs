use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use glam::{DVec3, Vec3};
use std::path::{Path, PathBuf};

use crate::camera::Camera;
use crate::job::SketchJobSpec;
use crate::render;
use crate::scene::InkScene;
use crate::sketch;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate the Lorenz attractor and render the animated trajectory
    Render {
        /// Output directory for frames
        #[arg(long)]
        out: Option<PathBuf>,

        /// Load a full job spec from a JSON file instead of the flags below
        #[arg(long)]
        job: Option<PathBuf>,

        /// Number of animation frames
        #[arg(long, default_value_t = 1000)]
        frames: u32,

        /// Frame width
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Frame height
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Playback rate, recorded in metadata only
        #[arg(long, default_value_t = 24.0)]
        fps: f32,

        /// Also write the finished scene as JSON
        #[arg(long)]
        scene_out: Option<PathBuf>,

        /// Skip PNG frames (scene dump and metadata only)
        #[arg(long)]
        no_frames: bool,
    },
    /// Draw a wireframe sphere of rotated circles to a single PNG
    Sphere {
        /// Output PNG path
        #[arg(long)]
        out: PathBuf,

        /// Number of circles fanned about the X axis
        #[arg(long, default_value_t = 8)]
        circles: usize,

        /// Sphere radius
        #[arg(long, default_value_t = 1.0)]
        radius: f64,

        /// Image width and height
        #[arg(long, default_value_t = 512)]
        size: u32,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            out,
            job,
            frames,
            width,
            height,
            fps,
            scene_out,
            no_frames,
        } => {
            let spec = if let Some(path) = job {
                SketchJobSpec::from_file(&path).map_err(|e| anyhow!(e))?
            } else {
                let out = out.ok_or_else(|| anyhow!("--out is required unless --job is given"))?;
                let mut spec = SketchJobSpec::new(out);
                spec.frames = frames;
                spec.width = width;
                spec.height = height;
                spec.fps = fps;
                spec.scene_path = scene_out;
                spec.write_frames = !no_frames;
                spec
            };

            let metadata = render::run_job(&spec)?;
            println!(
                "Rendered {} frames ({} trajectory points, {} strokes) in {:.1}s",
                metadata.frame_count,
                metadata.trajectory_points,
                metadata.stroke_count,
                metadata.run_duration_secs
            );
        }
        Commands::Sphere {
            out,
            circles,
            radius,
            size,
        } => {
            sphere_demo(&out, circles, radius, size)?;
            println!("Wrote sphere to {:?}", out);
        }
    }
    Ok(())
}

fn sphere_demo(out: &Path, circles: usize, radius: f64, size: u32) -> Result<()> {
    let mut scene = InkScene::new();
    let surface = scene.ensure_surface("Sphere");
    let layer = scene
        .ensure_layer(surface, "Wireframe", true)
        .ok_or_else(|| anyhow!("stale surface handle"))?;
    let frame = scene
        .new_frame(layer, 0)
        .ok_or_else(|| anyhow!("stale layer handle"))?;

    sketch::draw_sphere(&mut scene, frame, DVec3::ZERO, radius, circles)
        .ok_or_else(|| anyhow!("stale frame handle"))?;

    let camera = Camera::framing(Vec3::ZERO, radius as f32 * 4.0);
    let view_proj = camera.view_proj(1.0);
    let frame = scene
        .frame(frame)
        .ok_or_else(|| anyhow!("stale frame handle"))?;
    let canvas = render::rasterize_frame(frame, &camera, &view_proj, size, size);

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    canvas.save_png(out)?;
    Ok(())
}
