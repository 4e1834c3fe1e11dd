//! Stroke construction and point transforms.

use glam::{DMat3, DVec3};

use crate::scene::{FrameId, InkScene, Stroke, StrokeId};

/// Segment count used for the circles of a wireframe sphere.
pub const SPHERE_CIRCLE_SEGMENTS: usize = 32;

/// Rotation axis for [`rotate_stroke`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn rotation(self, angle: f64) -> DMat3 {
        match self {
            Axis::X => DMat3::from_rotation_x(angle),
            Axis::Y => DMat3::from_rotation_y(angle),
            Axis::Z => DMat3::from_rotation_z(angle),
        }
    }
}

/// Draw a two-point line stroke into a frame.
pub fn draw_segment(
    scene: &mut InkScene,
    frame: FrameId,
    p0: DVec3,
    p1: DVec3,
) -> Option<StrokeId> {
    scene.add_stroke(frame, Stroke::new(vec![p0.to_array(), p1.to_array()]))
}

/// Draw a closed circle of `segments` points in the XY plane at `center.z`.
pub fn draw_circle(
    scene: &mut InkScene,
    frame: FrameId,
    center: DVec3,
    radius: f64,
    segments: usize,
) -> Option<StrokeId> {
    let angle = std::f64::consts::TAU / segments as f64;
    let points = (0..segments)
        .map(|i| {
            let theta = angle * i as f64;
            [
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
                center.z,
            ]
        })
        .collect();
    scene.add_stroke(frame, Stroke::new(points).cyclic())
}

/// Rotate every point of a stroke by `angle` radians about a world axis.
///
/// The rotation is applied to absolute coordinates, i.e. about the world
/// origin rather than the stroke center.
pub fn rotate_stroke(stroke: &mut Stroke, angle: f64, axis: Axis) {
    let matrix = axis.rotation(angle);
    for point in &mut stroke.points {
        *point = (matrix * DVec3::from_array(*point)).to_array();
    }
}

/// Draw a wireframe sphere as `circles` circles fanned about the X axis.
///
/// The i-th circle is rotated by `i * PI / circles`. Because rotation is
/// about the world origin, the result is only a true sphere when `center`
/// is the origin.
pub fn draw_sphere(
    scene: &mut InkScene,
    frame: FrameId,
    center: DVec3,
    radius: f64,
    circles: usize,
) -> Option<Vec<StrokeId>> {
    let angle = std::f64::consts::PI / circles as f64;
    let mut ids = Vec::with_capacity(circles);
    for i in 0..circles {
        let id = draw_circle(scene, frame, center, radius, SPHERE_CIRCLE_SEGMENTS)?;
        let stroke = scene.stroke_mut(id)?;
        rotate_stroke(stroke, angle * i as f64, Axis::X);
        ids.push(id);
    }
    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::InkScene;

    fn scene_with_frame() -> (InkScene, FrameId) {
        let mut scene = InkScene::new();
        let surface = scene.ensure_surface("Test");
        let layer = scene.ensure_layer(surface, "Layer", false).unwrap();
        let frame = scene.new_frame(layer, 0).unwrap();
        (scene, frame)
    }

    #[test]
    fn test_draw_segment_has_two_points() {
        let (mut scene, frame) = scene_with_frame();
        let id = draw_segment(
            &mut scene,
            frame,
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(4.0, 5.0, 6.0),
        )
        .unwrap();

        let stroke = scene.stroke(id).unwrap();
        assert_eq!(stroke.points, vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert!(!stroke.cyclic);
    }

    #[test]
    fn test_draw_circle_points_lie_on_the_circle() {
        let (mut scene, frame) = scene_with_frame();
        let center = DVec3::new(1.0, -2.0, 5.0);
        let id = draw_circle(&mut scene, frame, center, 2.0, 16).unwrap();

        let stroke = scene.stroke(id).unwrap();
        assert_eq!(stroke.points.len(), 16);
        assert!(stroke.cyclic);
        for p in &stroke.points {
            let dx = p[0] - center.x;
            let dy = p[1] - center.y;
            assert!(((dx * dx + dy * dy).sqrt() - 2.0).abs() < 1e-9);
            assert!((p[2] - center.z).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let (mut scene, frame) = scene_with_frame();
        let id = draw_circle(&mut scene, frame, DVec3::ZERO, 1.5, 12).unwrap();
        let before = scene.stroke(id).unwrap().points.clone();

        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let stroke = scene.stroke_mut(id).unwrap();
            rotate_stroke(stroke, 0.0, axis);
            assert_eq!(scene.stroke(id).unwrap().points, before);
        }
    }

    #[test]
    fn test_half_turn_about_x_negates_y_and_z() {
        let mut stroke = Stroke::new(vec![[1.0, 2.0, 3.0]]);
        rotate_stroke(&mut stroke, std::f64::consts::PI, Axis::X);

        let p = stroke.points[0];
        assert!((p[0] - 1.0).abs() < 1e-9);
        assert!((p[1] + 2.0).abs() < 1e-9);
        assert!((p[2] + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let mut stroke = Stroke::new(vec![[1.0, 0.0, 0.5]]);
        rotate_stroke(&mut stroke, std::f64::consts::FRAC_PI_2, Axis::Z);

        let p = stroke.points[0];
        assert!(p[0].abs() < 1e-9);
        assert!((p[1] - 1.0).abs() < 1e-9);
        assert!((p[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_draw_sphere_stroke_count() {
        let (mut scene, frame) = scene_with_frame();
        let ids = draw_sphere(&mut scene, frame, DVec3::ZERO, 1.0, 8).unwrap();

        assert_eq!(ids.len(), 8);
        assert_eq!(scene.frame(frame).unwrap().strokes.len(), 8);
        for id in ids {
            assert_eq!(
                scene.stroke(id).unwrap().points.len(),
                SPHERE_CIRCLE_SEGMENTS
            );
        }
    }
}
