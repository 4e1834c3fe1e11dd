//! Per-frame attractor run state.

use glam::DVec3;

use crate::lorenz::{LorenzParams, DT, INITIAL_STATE};
use crate::trajectory::Trajectory;

/// Mutable state of an attractor run, advanced once per animation frame.
///
/// Couples the integrator with the trajectory buffer: each step computes the
/// Euler increment from the current state, offers the candidate to the
/// buffer, then commits the candidate as the running state whether or not
/// the buffer kept it.
pub struct AttractorState {
    pub params: LorenzParams,
    pub dt: f64,
    pub state: DVec3,
    pub frame: u32,
    trajectory: Trajectory,
}

impl AttractorState {
    pub fn new() -> Self {
        Self::with_initial(INITIAL_STATE, LorenzParams::default(), DT)
    }

    pub fn with_initial(initial: DVec3, params: LorenzParams, dt: f64) -> Self {
        Self {
            params,
            dt,
            state: initial,
            frame: 0,
            trajectory: Trajectory::new(initial),
        }
    }

    /// Advance by one frame. Returns whether the new point was recorded.
    pub fn step(&mut self) -> bool {
        let delta = self.params.step_delta(self.state, self.dt);
        let candidate = self.state + delta;
        let appended = self.trajectory.record(self.state, candidate);
        self.state = candidate;
        self.frame += 1;
        appended
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }
}

impl Default for AttractorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_from_default_state() {
        let mut sim = AttractorState::new();
        let appended = sim.step();

        assert!(appended);
        assert_eq!(sim.frame, 1);

        let second = sim.trajectory().points()[1];
        assert!((second.x - 1.0).abs() < 1e-9);
        assert!((second.y - 1.26).abs() < 1e-9);
        assert!((second.z - 0.983333).abs() < 1e-6);
    }

    #[test]
    fn test_origin_never_grows_the_buffer() {
        let mut sim = AttractorState::with_initial(DVec3::ZERO, LorenzParams::default(), DT);
        for _ in 0..100 {
            assert!(!sim.step());
        }
        assert_eq!(sim.trajectory().len(), 1);
        assert_eq!(sim.state, DVec3::ZERO);
    }

    #[test]
    fn test_state_advances_even_when_skipped() {
        // Start close enough to the origin that the first moves are tiny.
        let mut sim =
            AttractorState::with_initial(DVec3::new(0.001, 0.001, 0.001), LorenzParams::default(), DT);
        let before = sim.state;
        let appended = sim.step();

        assert!(!appended);
        assert_ne!(sim.state, before);
        assert_eq!(sim.trajectory().len(), 1);
    }

    #[test]
    fn test_long_run_invariants() {
        let mut sim = AttractorState::new();
        for _ in 0..1000 {
            sim.step();
        }

        assert_eq!(sim.frame, 1000);
        assert!(sim.state.is_finite());

        let len = sim.trajectory().len();
        assert!(len >= 1 && len <= 1001);

        // Every appended pair after the first is at least the minimum
        // segment length apart only when no skip intervened, so just check
        // the buffer kept a substantial share of the run.
        assert!(len > 500);
    }
}
