//! Launch state machine and energy bookkeeping of the slingshot.
//!
//! ```text
//!            begin_drag            release (stretch > min)
//!   Ready ─────────────▶ Dragging ─────────────────────────▶ Launched
//!     ▲                     │ release (too short)              │  │  │
//!     └─────────────────────┘                                  │  │  │ win
//!     ▲              tick_rest expiry, attempts left           │  │  ▼
//!     └────────────────────────────────────────────────────────┘  │ Won
//!                 tick_rest expiry / tick_last_attempt, none left │
//!                                                                 ▼
//!                                                                Lost
//! ```
//!
//! All transitions are guarded on the current phase, so a second release
//! while launched is a no-op.

use bevy::prelude::*;

use crate::constants::MAX_ATTEMPTS;
use crate::energy::{efficiency_percent, kinetic_energy, spring_potential_energy};

// ── Components ────────────────────────────────────────────────────────────────

/// Fixed body the band is tied to.
#[derive(Component, Debug, Clone, Copy)]
pub struct SlingAnchor;

#[derive(Component, Debug, Clone, Copy)]
pub struct SlingProjectile;

/// Tower box (including the goal box).
#[derive(Component, Debug, Clone, Copy)]
pub struct SlingBox;

/// The box that has to fall.
#[derive(Component, Debug, Clone, Copy)]
pub struct GoalBox;

// ── Phase machine ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchPhase {
    /// Projectile rests on the band.
    #[default]
    Ready,
    /// Projectile is held by the mouse.
    Dragging,
    /// Projectile is in flight or rolling.
    Launched,
    Won,
    Lost,
}

/// What a [`SlingshotSession::tick_rest`] call decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestOutcome {
    /// Still moving, or the stopped timer is still counting.
    Waiting,
    /// Projectile came to rest with attempts left; put it back on the band.
    ResetProjectile,
    /// Projectile came to rest on the last attempt.
    GameOver,
}

/// Per-level state of the slingshot game.  Reset on every level load.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SlingshotSession {
    pub phase: LaunchPhase,
    pub attempts_left: u32,
    pub max_attempts: u32,

    /// Current band stretch (m).
    pub stretch: f32,
    /// Elastic energy stored in the band right now (J).
    pub potential: f32,
    /// Largest elastic energy reached during the current drag (J).
    pub max_potential: f32,
    /// Projectile kinetic energy (J).
    pub kinetic: f32,
    /// Projectile speed (m/s).
    pub velocity: f32,
    /// Kinetic energy handed to the projectile at release (J).
    pub launch_kinetic: f32,
    /// Work delivered to the tower on first impact (J).
    pub impact_work: f32,
    /// `impact_work / max_potential` (%).
    pub efficiency: f32,

    /// Counts down while the launched projectile is at rest.
    pub stopped_timer: Option<f32>,
    /// Counts down to detaching the band after a launch.
    pub band_timer: Option<f32>,
    /// Counts down to a forced game over after the last launch.
    pub last_attempt_timer: Option<f32>,
}

impl Default for SlingshotSession {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS)
    }
}

impl SlingshotSession {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            phase: LaunchPhase::Ready,
            attempts_left: max_attempts,
            max_attempts,
            stretch: 0.0,
            potential: 0.0,
            max_potential: 0.0,
            kinetic: 0.0,
            velocity: 0.0,
            launch_kinetic: 0.0,
            impact_work: 0.0,
            efficiency: 0.0,
            stopped_timer: None,
            band_timer: None,
            last_attempt_timer: None,
        }
    }

    pub fn attempts_used(&self) -> u32 {
        self.max_attempts - self.attempts_left
    }

    /// Level buttons are only honoured between shots.
    pub fn allows_level_select(&self) -> bool {
        matches!(
            self.phase,
            LaunchPhase::Ready | LaunchPhase::Won | LaunchPhase::Lost
        )
    }

    fn clear_energies(&mut self) {
        self.stretch = 0.0;
        self.potential = 0.0;
        self.max_potential = 0.0;
        self.kinetic = 0.0;
        self.velocity = 0.0;
        self.launch_kinetic = 0.0;
        self.impact_work = 0.0;
        self.efficiency = 0.0;
    }

    /// Ready → Dragging.  Returns `false` in any other phase.
    pub fn begin_drag(&mut self) -> bool {
        if self.phase != LaunchPhase::Ready {
            return false;
        }
        self.phase = LaunchPhase::Dragging;
        self.kinetic = 0.0;
        self.impact_work = 0.0;
        self.max_potential = 0.0;
        self.launch_kinetic = 0.0;
        self.stopped_timer = None;
        true
    }

    /// Refresh stretch and elastic energy while dragging.
    pub fn update_drag(&mut self, stretch_px: f32, spring_k: f32, px_per_meter: f32) {
        if self.phase != LaunchPhase::Dragging {
            return;
        }
        self.stretch = stretch_px / px_per_meter;
        self.potential = spring_potential_energy(spring_k, self.stretch);
        self.max_potential = self.max_potential.max(self.potential);
        self.kinetic = 0.0;
    }

    /// Dragging → Launched when `stretch_px` exceeds `min_stretch`, otherwise
    /// back to Ready.  Returns `true` when a launch happened.
    pub fn release(
        &mut self,
        stretch_px: f32,
        min_stretch: f32,
        band_delay: f32,
        last_attempt_timeout: f32,
    ) -> bool {
        if self.phase != LaunchPhase::Dragging {
            return false;
        }
        if stretch_px <= min_stretch {
            self.phase = LaunchPhase::Ready;
            return false;
        }
        self.phase = LaunchPhase::Launched;
        self.attempts_left = self.attempts_left.saturating_sub(1);
        self.launch_kinetic = self.max_potential;
        self.band_timer = Some(band_delay);
        if self.attempts_left == 0 {
            self.last_attempt_timer = Some(last_attempt_timeout);
        }
        true
    }

    /// Refresh speed and kinetic energy from the engine velocity while in
    /// flight.
    pub fn update_flight(&mut self, speed_px_per_tick: f32, mass: f32, px_per_meter: f32) {
        if self.phase != LaunchPhase::Launched {
            return;
        }
        self.potential = 0.0;
        self.stretch = 0.0;
        self.velocity = speed_px_per_tick / px_per_meter;
        self.kinetic = kinetic_energy(mass, self.velocity);
    }

    /// First projectile-box contact of a launch.  Returns `true` when the
    /// impact was recorded.
    pub fn register_impact(&mut self, work_fraction: f32) -> bool {
        if self.phase != LaunchPhase::Launched
            || self.launch_kinetic <= 0.0
            || self.impact_work != 0.0
        {
            return false;
        }
        self.impact_work = self.launch_kinetic * work_fraction;
        self.efficiency = efficiency_percent(self.impact_work, self.max_potential);
        true
    }

    /// Returns `true` on the tick the band should be detached.
    pub fn tick_band(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.band_timer else {
            return false;
        };
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            self.band_timer = None;
            true
        } else {
            self.band_timer = Some(remaining);
            false
        }
    }

    /// Watch a launched projectile for coming to rest.
    ///
    /// Below `stopped_speed` a timer of `delay` seconds is armed; moving again
    /// cancels it.  On expiry the projectile goes back on the band while
    /// attempts remain, otherwise the level is lost.
    pub fn tick_rest(
        &mut self,
        speed_px_per_tick: f32,
        stopped_speed: f32,
        delay: f32,
        dt: f32,
    ) -> RestOutcome {
        if self.phase != LaunchPhase::Launched {
            return RestOutcome::Waiting;
        }
        if speed_px_per_tick >= stopped_speed {
            self.stopped_timer = None;
            return RestOutcome::Waiting;
        }
        let remaining = self.stopped_timer.unwrap_or(delay) - dt;
        if remaining > 0.0 {
            self.stopped_timer = Some(remaining);
            return RestOutcome::Waiting;
        }
        self.stopped_timer = None;
        if self.attempts_left > 0 {
            self.reset_for_next_shot();
            RestOutcome::ResetProjectile
        } else {
            self.lose();
            RestOutcome::GameOver
        }
    }

    /// Count down the last-attempt timeout.  Returns `true` when it forced a
    /// loss.
    pub fn tick_last_attempt(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.last_attempt_timer else {
            return false;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.last_attempt_timer = Some(remaining);
            return false;
        }
        self.last_attempt_timer = None;
        if self.phase == LaunchPhase::Launched {
            self.lose();
            true
        } else {
            false
        }
    }

    /// Launched → Won.
    pub fn win(&mut self) -> bool {
        if self.phase != LaunchPhase::Launched {
            return false;
        }
        self.phase = LaunchPhase::Won;
        self.stopped_timer = None;
        self.last_attempt_timer = None;
        true
    }

    fn lose(&mut self) {
        if self.phase == LaunchPhase::Won {
            return;
        }
        self.phase = LaunchPhase::Lost;
        self.stopped_timer = None;
        self.last_attempt_timer = None;
    }

    fn reset_for_next_shot(&mut self) {
        self.phase = LaunchPhase::Ready;
        self.band_timer = None;
        self.clear_energies();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f32 = 10.0;
    const BAND: f32 = 0.05;
    const LAST: f32 = 5.0;
    const DT: f32 = 1.0 / 60.0;

    fn launched() -> SlingshotSession {
        let mut s = SlingshotSession::default();
        assert!(s.begin_drag());
        s.update_drag(120.0, 50.0, 100.0);
        assert!(s.release(120.0, MIN, BAND, LAST));
        s
    }

    #[test]
    fn drag_only_starts_from_ready() {
        let mut s = SlingshotSession::default();
        assert!(s.begin_drag());
        assert!(!s.begin_drag(), "already dragging");
        let mut s = launched();
        assert!(!s.begin_drag(), "in flight");
        s.phase = LaunchPhase::Won;
        assert!(!s.begin_drag());
    }

    #[test]
    fn drag_tracks_potential_and_its_maximum() {
        let mut s = SlingshotSession::default();
        s.begin_drag();
        s.update_drag(100.0, 50.0, 100.0);
        assert!((s.stretch - 1.0).abs() < 1e-6);
        assert!((s.potential - 25.0).abs() < 1e-4);
        s.update_drag(50.0, 50.0, 100.0);
        assert!((s.potential - 6.25).abs() < 1e-4);
        assert!((s.max_potential - 25.0).abs() < 1e-4);
        assert_eq!(s.kinetic, 0.0);
    }

    #[test]
    fn short_release_returns_to_ready_without_using_an_attempt() {
        let mut s = SlingshotSession::default();
        s.begin_drag();
        assert!(!s.release(MIN, MIN, BAND, LAST));
        assert_eq!(s.phase, LaunchPhase::Ready);
        assert_eq!(s.attempts_left, 3);
        assert_eq!(s.band_timer, None);
    }

    #[test]
    fn release_launches_and_spends_an_attempt() {
        let s = launched();
        assert_eq!(s.phase, LaunchPhase::Launched);
        assert_eq!(s.attempts_left, 2);
        assert_eq!(s.attempts_used(), 1);
        assert!((s.launch_kinetic - s.max_potential).abs() < 1e-6);
        assert_eq!(s.band_timer, Some(BAND));
        assert_eq!(s.last_attempt_timer, None);
    }

    #[test]
    fn second_release_does_not_double_launch() {
        let mut s = launched();
        assert!(!s.release(120.0, MIN, BAND, LAST));
        assert_eq!(s.attempts_left, 2);
    }

    #[test]
    fn last_launch_arms_the_timeout() {
        let mut s = SlingshotSession::new(1);
        s.begin_drag();
        s.update_drag(80.0, 50.0, 100.0);
        assert!(s.release(80.0, MIN, BAND, LAST));
        assert_eq!(s.attempts_left, 0);
        assert_eq!(s.last_attempt_timer, Some(LAST));
    }

    #[test]
    fn impact_is_recorded_once() {
        let mut s = launched();
        // ½ · 50 · 1.2² = 36 J stored.
        assert!(s.register_impact(0.75));
        assert!((s.impact_work - 27.0).abs() < 1e-3);
        assert!((s.efficiency - 75.0).abs() < 1e-3);
        assert!(!s.register_impact(0.75));
        assert!((s.impact_work - 27.0).abs() < 1e-3);
    }

    #[test]
    fn impact_before_launch_is_ignored() {
        let mut s = SlingshotSession::default();
        assert!(!s.register_impact(0.75));
        s.begin_drag();
        s.update_drag(60.0, 50.0, 100.0);
        assert!(!s.register_impact(0.75));
        assert_eq!(s.impact_work, 0.0);
    }

    #[test]
    fn flight_clears_potential_and_computes_kinetic() {
        let mut s = launched();
        s.update_flight(20.0, 0.5, 10.0);
        assert_eq!(s.potential, 0.0);
        assert_eq!(s.stretch, 0.0);
        assert!((s.velocity - 2.0).abs() < 1e-6);
        assert!((s.kinetic - 1.0).abs() < 1e-6);
    }

    #[test]
    fn band_detaches_after_its_delay() {
        let mut s = launched();
        assert!(!s.tick_band(0.03));
        assert!(s.tick_band(0.03));
        assert!(!s.tick_band(0.03), "fires once");
    }

    #[test]
    fn resting_projectile_resets_after_delay() {
        let mut s = launched();
        let mut outcome = RestOutcome::Waiting;
        let mut ticks = 0;
        while outcome == RestOutcome::Waiting {
            outcome = s.tick_rest(0.0, 0.1, 1.5, DT);
            ticks += 1;
            assert!(ticks < 200, "timer never expired");
        }
        assert_eq!(outcome, RestOutcome::ResetProjectile);
        assert!((89..=91).contains(&ticks));
        assert_eq!(s.phase, LaunchPhase::Ready);
        assert_eq!(s.attempts_left, 2);
        assert_eq!(s.max_potential, 0.0);
    }

    #[test]
    fn moving_again_cancels_the_stopped_timer() {
        let mut s = launched();
        s.tick_rest(0.0, 0.1, 1.5, 1.0);
        assert!(s.stopped_timer.is_some());
        assert_eq!(s.tick_rest(3.0, 0.1, 1.5, DT), RestOutcome::Waiting);
        assert_eq!(s.stopped_timer, None);
        // A fresh stop has to wait the full delay again.
        assert_eq!(s.tick_rest(0.0, 0.1, 1.5, 1.0), RestOutcome::Waiting);
    }

    #[test]
    fn resting_on_last_attempt_loses() {
        let mut s = SlingshotSession::new(1);
        s.begin_drag();
        s.update_drag(50.0, 50.0, 100.0);
        s.release(50.0, MIN, BAND, LAST);
        assert_eq!(s.tick_rest(0.0, 0.1, 1.5, 2.0), RestOutcome::GameOver);
        assert_eq!(s.phase, LaunchPhase::Lost);
        assert_eq!(s.last_attempt_timer, None);
    }

    #[test]
    fn last_attempt_timeout_forces_loss_while_launched() {
        let mut s = SlingshotSession::new(1);
        s.begin_drag();
        s.update_drag(50.0, 50.0, 100.0);
        s.release(50.0, MIN, BAND, LAST);
        assert!(!s.tick_last_attempt(4.0));
        assert!(s.tick_last_attempt(1.5));
        assert_eq!(s.phase, LaunchPhase::Lost);
    }

    #[test]
    fn win_stops_the_timeout() {
        let mut s = SlingshotSession::new(1);
        s.begin_drag();
        s.update_drag(50.0, 50.0, 100.0);
        s.release(50.0, MIN, BAND, LAST);
        assert!(s.win());
        assert!(!s.tick_last_attempt(10.0));
        assert_eq!(s.phase, LaunchPhase::Won);
        assert_eq!(s.tick_rest(0.0, 0.1, 1.5, 2.0), RestOutcome::Waiting);
    }

    #[test]
    fn win_only_from_launched() {
        let mut s = SlingshotSession::default();
        assert!(!s.win());
        s.begin_drag();
        assert!(!s.win());
        assert_eq!(s.phase, LaunchPhase::Dragging);
    }

    #[test]
    fn level_select_only_between_shots() {
        let mut s = SlingshotSession::default();
        assert!(s.allows_level_select());
        s.begin_drag();
        assert!(!s.allows_level_select());
        s.update_drag(60.0, 50.0, 100.0);
        s.release(60.0, MIN, BAND, LAST);
        assert!(!s.allows_level_select());
        s.win();
        assert!(s.allows_level_select());
    }
}
