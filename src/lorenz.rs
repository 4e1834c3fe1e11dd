//! The Lorenz system and its forward-Euler step.

use glam::DVec3;

/// Fixed integration step size.
pub const DT: f64 = 0.01;

/// Number of animation frames in a default run.
pub const DEFAULT_FRAMES: u32 = 1000;

/// Default initial state of the attractor.
pub const INITIAL_STATE: DVec3 = DVec3::ONE;

/// Parameters of the Lorenz system.
///
/// The classical chaotic regime is the default: sigma = 10, beta = 8/3,
/// rho = 28.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzParams {
    pub sigma: f64,
    pub beta: f64,
    pub rho: f64,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            beta: 8.0 / 3.0,
            rho: 28.0,
        }
    }
}

impl LorenzParams {
    /// Compute the forward-Euler increment for one step of size `dt`.
    ///
    /// ```text
    /// dx = sigma * (y - x) * dt
    /// dy = (x * (rho - z) - y) * dt
    /// dz = (x * y - beta * z) * dt
    /// ```
    ///
    /// No stability control is applied; a diverging trajectory propagates
    /// through ordinary float arithmetic.
    pub fn step_delta(&self, state: DVec3, dt: f64) -> DVec3 {
        let DVec3 { x, y, z } = state;
        DVec3::new(
            self.sigma * (y - x) * dt,
            (x * (self.rho - z) - y) * dt,
            (x * y - self.beta * z) * dt,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_matches_equations() {
        let params = LorenzParams::default();
        let state = DVec3::new(2.0, -1.0, 5.0);
        let dt = 0.01;

        let delta = params.step_delta(state, dt);

        assert!((delta.x - 10.0 * (-1.0 - 2.0) * dt).abs() < 1e-12);
        assert!((delta.y - (2.0 * (28.0 - 5.0) + 1.0) * dt).abs() < 1e-12);
        assert!((delta.z - (-2.0 - (8.0 / 3.0) * 5.0) * dt).abs() < 1e-12);
    }

    #[test]
    fn test_origin_is_a_fixed_point() {
        let params = LorenzParams::default();
        let delta = params.step_delta(DVec3::ZERO, DT);
        assert_eq!(delta, DVec3::ZERO);
    }

    #[test]
    fn test_first_step_from_default_state() {
        let params = LorenzParams::default();
        let delta = params.step_delta(INITIAL_STATE, DT);

        // dx = 10 * (1 - 1) * 0.01 = 0
        // dy = (1 * (28 - 1) - 1) * 0.01 = 0.26
        // dz = (1 * 1 - 8/3 * 1) * 0.01 = -1/60
        assert!(delta.x.abs() < 1e-12);
        assert!((delta.y - 0.26).abs() < 1e-12);
        assert!((delta.z + 1.0 / 60.0).abs() < 1e-12);
    }
}
