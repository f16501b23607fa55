//! Components, the movement intent and the per-level energy bookkeeping of
//! the platform game.

use bevy::prelude::*;

use crate::constants::PLAYER_BASE_MASS;
use crate::energy::{energy_expended, FrictionWork};

// ── Components ────────────────────────────────────────────────────────────────

/// Marker for the player block.
#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

/// The box that has to be pushed into the goal.
#[derive(Component, Debug, Clone, Copy)]
pub struct TargetBox {
    /// Mass used for the friction-work calculation (kg).
    pub mass: f32,
}

/// Goal sensor.
#[derive(Component, Debug, Clone, Copy)]
pub struct Goal;

/// Sensor pickup worth `mass` kilograms.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bonus {
    pub mass: f32,
}

/// Standable surface.  `half` is the collider's half extents, used by the
/// ground probe.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ground {
    pub half: Vec2,
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// Per-level state of the platform game.  Reset on every level load.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlatformSession {
    /// Current player mass including collected bonuses (kg).
    pub player_mass: f32,
    /// Friction work done on the target box (J).
    pub work: FrictionWork,
    /// Muscle energy spent to deliver `work` (J).
    pub energy: f32,
    /// Set once the target box reached the goal.
    pub completed: bool,
}

impl Default for PlatformSession {
    fn default() -> Self {
        Self::new(PLAYER_BASE_MASS)
    }
}

impl PlatformSession {
    pub fn new(base_mass: f32) -> Self {
        Self {
            player_mass: base_mass,
            work: FrictionWork::default(),
            energy: 0.0,
            completed: false,
        }
    }

    /// Add a bonus to the player and return the new mass.
    pub fn collect_bonus(&mut self, mass: f32) -> f32 {
        self.player_mass += mass;
        self.player_mass
    }

    /// Fold one tick of friction work in and refresh the energy spent.
    #[allow(clippy::too_many_arguments)]
    pub fn add_work(
        &mut self,
        mu: f32,
        box_mass: f32,
        gravity: f32,
        vx: f32,
        speed: f32,
        dt: f32,
        sliding_threshold: f32,
        efficiency: f32,
    ) {
        self.work
            .accumulate(mu, box_mass, gravity, vx, speed, dt, sliding_threshold);
        self.energy = energy_expended(self.work.total(), efficiency);
    }
}

// ── Input Abstraction ──────────────────────────────────────────────────────────

/// Aggregated player intent for the current frame.
///
/// Keyboard input writes here after it is cleared;
/// [`super::control::apply_platform_intent_system`] turns it into forces.
/// Tests populate it directly.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PlatformIntent {
    pub left: bool,
    pub right: bool,
    /// Jump key is held.  Only honoured while [`JumpLatch`] is armed.
    pub jump: bool,
}

/// One jump per key press: disarmed by a jump, re-armed when the key is
/// released.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpLatch {
    pub armed: bool,
}

impl Default for JumpLatch {
    fn default() -> Self {
        Self { armed: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonuses_stack_on_base_mass() {
        let mut session = PlatformSession::new(5.0);
        assert_eq!(session.collect_bonus(3.0), 8.0);
        assert_eq!(session.collect_bonus(7.0), 15.0);
    }

    #[test]
    fn energy_tracks_work_over_efficiency() {
        let mut session = PlatformSession::default();
        for _ in 0..30 {
            session.add_work(0.5, 8.0, 9.8, 2.0, 2.0, 1.0 / 60.0, 0.05, 0.25);
        }
        let work = session.work.total();
        assert!(work > 0.0);
        assert!((session.energy - work * 4.0).abs() < 1e-3);
    }

    #[test]
    fn resting_box_adds_no_work() {
        let mut session = PlatformSession::default();
        session.add_work(0.5, 8.0, 9.8, 0.01, 0.01, 1.0 / 60.0, 0.05, 0.25);
        assert_eq!(session.work.total(), 0.0);
        assert_eq!(session.energy, 0.0);
    }
}
