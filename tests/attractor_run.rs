//! End-to-end attractor runs over the library API, with no file output.

use std::path::PathBuf;

use attractor_ink::attractor::AttractorState;
use attractor_ink::job::SketchJobSpec;
use attractor_ink::render;
use attractor_ink::scene::InkScene;
use attractor_ink::trajectory::MIN_SEGMENT_LENGTH;

#[test]
fn test_default_run_upholds_buffer_invariants() {
    let mut scene = InkScene::new();
    let mut sim = AttractorState::new();
    let layer =
        render::sketch_trajectory(&mut scene, &mut sim, 1000, "Attractor", "Trajectory").unwrap();

    assert_eq!(sim.frame, 1000);
    assert!(sim.state.is_finite());

    let points = sim.trajectory().points();
    assert!(!points.is_empty() && points.len() <= 1001);

    // Appended pairs keep the minimum segment length; the first pair is
    // exempt because the opening step may have been skipped.
    for pair in points.windows(2).skip(1) {
        assert!(pair[0].distance(pair[1]) >= MIN_SEGMENT_LENGTH - 1e-9);
    }

    let frames = &scene.layer(layer).unwrap().frames;
    assert_eq!(frames.len(), 1000);
    assert_eq!(frames.last().unwrap().strokes.len(), points.len() - 1);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.index, i as u32);
    }
}

#[test]
fn test_rerunning_on_the_same_layer_replaces_frames() {
    let mut scene = InkScene::new();

    let mut sim = AttractorState::new();
    render::sketch_trajectory(&mut scene, &mut sim, 20, "Attractor", "Trajectory").unwrap();

    let mut sim = AttractorState::new();
    let layer =
        render::sketch_trajectory(&mut scene, &mut sim, 5, "Attractor", "Trajectory").unwrap();

    // The layer was cleared on reuse, so only the second run's frames remain.
    assert_eq!(scene.surfaces().len(), 1);
    assert_eq!(scene.layer(layer).unwrap().frames.len(), 5);
}

#[test]
fn test_run_job_without_file_output() {
    let mut spec = SketchJobSpec::new(PathBuf::from("unused"));
    spec.frames = 250;
    spec.write_frames = false;

    let metadata = render::run_job(&spec).unwrap();

    assert_eq!(metadata.frame_count, 250);
    assert!(metadata.trajectory_points >= 1 && metadata.trajectory_points <= 251);
    assert!(metadata.stroke_count > 0);
    assert_eq!(metadata.version, env!("CARGO_PKG_VERSION"));
    assert!(metadata.completed_at >= metadata.started_at);
    // Nothing was written.
    assert!(!PathBuf::from("unused").exists());
}
