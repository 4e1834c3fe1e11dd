//! Minimal look-at camera for headless frame export.
//!
//! The attractor lives roughly in x = -20..20, y = -27..27, z = 0..50, so
//! the default camera sits back on the -Y axis, Z up, looking at the middle
//! of the z range.

use glam::{DVec3, Mat4, Vec3, Vec4Swizzles};

/// Perspective camera described by position, target, and lens settings.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, -80.0, 27.0),
            target: Vec3::new(0.0, 0.0, 27.0),
            up: Vec3::Z,
            fov: 45.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl Camera {
    /// Camera looking at `target` from `distance` along -Y, Z up.
    pub fn framing(target: Vec3, distance: f32) -> Self {
        Self {
            position: target - Vec3::Y * distance,
            target,
            ..Self::default()
        }
    }

    /// Combined view-projection matrix for the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.position, self.target, self.up);
        proj * view
    }

    /// Project a world-space point to pixel coordinates.
    ///
    /// Returns `None` for points at or behind the camera plane.
    pub fn project(
        &self,
        view_proj: &Mat4,
        point: DVec3,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32)> {
        let clip = *view_proj * point.as_vec3().extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        let x = (ndc.x * 0.5 + 0.5) * width as f32;
        let y = (1.0 - (ndc.y * 0.5 + 0.5)) * height as f32;
        Some((x, y))
    }
}
