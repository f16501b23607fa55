//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.spring_k`, `config.player_efficiency`, etc.

use crate::constants::*;
use crate::error::{validate_fraction, validate_positive, GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;

pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable physics and gameplay configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Shared ────────────────────────────────────────────────────────────────
    pub engine_tick_rate: f32,
    pub gravity_px: f32,
    pub stats_font_size: f32,

    // ── Platform: player ──────────────────────────────────────────────────────
    pub player_base_mass: f32,
    pub player_friction: f32,
    pub player_air_damping: f32,
    pub player_efficiency: f32,
    pub drive_force_per_base_kg: f32,
    pub drive_force_per_extra_kg: f32,
    pub max_drive_speed: f32,
    pub max_drive_speed_per_extra_kg: f32,
    pub jump_speed: f32,

    // ── Platform: ground probe ────────────────────────────────────────────────
    pub ground_probe_offset: f32,
    pub ground_probe_width: f32,
    pub ground_probe_height: f32,

    // ── Platform: box and work ────────────────────────────────────────────────
    pub box_friction: f32,
    pub ground_friction: f32,
    pub real_gravity: f32,
    pub box_sliding_threshold: f32,

    // ── Slingshot: energy ─────────────────────────────────────────────────────
    pub spring_k: f32,
    pub projectile_energy_mass: f32,
    pub stretch_px_per_meter: f32,
    pub velocity_px_per_meter: f32,
    pub impact_work_fraction: f32,

    // ── Slingshot: launch ─────────────────────────────────────────────────────
    pub max_stretch: f32,
    pub min_launch_stretch: f32,
    pub launch_speed: f32,
    pub max_attempts: u32,
    pub goal_fall_threshold: f32,

    // ── Slingshot: timers ─────────────────────────────────────────────────────
    pub stopped_speed: f32,
    pub stopped_delay: f32,
    pub band_detach_delay: f32,
    pub last_attempt_timeout: f32,

    // ── Slingshot: bodies ─────────────────────────────────────────────────────
    pub projectile_radius: f32,
    pub projectile_density: f32,
    pub projectile_restitution: f32,
    pub projectile_friction: f32,
    pub projectile_air_damping: f32,
    pub box_density: f32,
    pub sling_box_friction: f32,
    pub sling_box_restitution: f32,
    pub band_stiffness: f32,
    pub band_damping: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Shared
            engine_tick_rate: ENGINE_TICK_RATE,
            gravity_px: GRAVITY_PX,
            stats_font_size: STATS_FONT_SIZE,
            // Platform: player
            player_base_mass: PLAYER_BASE_MASS,
            player_friction: PLAYER_FRICTION,
            player_air_damping: PLAYER_AIR_DAMPING,
            player_efficiency: PLAYER_EFFICIENCY,
            drive_force_per_base_kg: DRIVE_FORCE_PER_BASE_KG,
            drive_force_per_extra_kg: DRIVE_FORCE_PER_EXTRA_KG,
            max_drive_speed: MAX_DRIVE_SPEED,
            max_drive_speed_per_extra_kg: MAX_DRIVE_SPEED_PER_EXTRA_KG,
            jump_speed: JUMP_SPEED,
            // Platform: ground probe
            ground_probe_offset: GROUND_PROBE_OFFSET,
            ground_probe_width: GROUND_PROBE_WIDTH,
            ground_probe_height: GROUND_PROBE_HEIGHT,
            // Platform: box and work
            box_friction: BOX_FRICTION,
            ground_friction: GROUND_FRICTION,
            real_gravity: REAL_GRAVITY,
            box_sliding_threshold: BOX_SLIDING_THRESHOLD,
            // Slingshot: energy
            spring_k: SPRING_K,
            projectile_energy_mass: PROJECTILE_ENERGY_MASS,
            stretch_px_per_meter: STRETCH_PX_PER_METER,
            velocity_px_per_meter: VELOCITY_PX_PER_METER,
            impact_work_fraction: IMPACT_WORK_FRACTION,
            // Slingshot: launch
            max_stretch: MAX_STRETCH,
            min_launch_stretch: MIN_LAUNCH_STRETCH,
            launch_speed: LAUNCH_SPEED,
            max_attempts: MAX_ATTEMPTS,
            goal_fall_threshold: GOAL_FALL_THRESHOLD,
            // Slingshot: timers
            stopped_speed: STOPPED_SPEED,
            stopped_delay: STOPPED_DELAY,
            band_detach_delay: BAND_DETACH_DELAY,
            last_attempt_timeout: LAST_ATTEMPT_TIMEOUT,
            // Slingshot: bodies
            projectile_radius: PROJECTILE_RADIUS,
            projectile_density: PROJECTILE_DENSITY,
            projectile_restitution: PROJECTILE_RESTITUTION,
            projectile_friction: PROJECTILE_FRICTION,
            projectile_air_damping: PROJECTILE_AIR_DAMPING,
            box_density: BOX_DENSITY,
            sling_box_friction: SLING_BOX_FRICTION,
            sling_box_restitution: SLING_BOX_RESTITUTION,
            band_stiffness: BAND_STIFFNESS,
            band_damping: BAND_DAMPING,
        }
    }
}

impl GameConfig {
    /// Convert a per-tick speed into px/s.
    #[inline]
    pub fn per_tick_to_px_s(&self, per_tick: f32) -> f32 {
        per_tick * self.engine_tick_rate
    }

    /// Convert a px/s speed into px/tick.
    #[inline]
    pub fn px_s_to_per_tick(&self, px_s: f32) -> f32 {
        px_s / self.engine_tick_rate
    }

    /// Reject values that would produce infinite or negative readouts.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("engine_tick_rate", self.engine_tick_rate)?;
        validate_fraction("player_efficiency", self.player_efficiency)?;
        validate_positive("player_base_mass", self.player_base_mass)?;
        validate_positive("spring_k", self.spring_k)?;
        validate_positive("projectile_energy_mass", self.projectile_energy_mass)?;
        validate_positive("stretch_px_per_meter", self.stretch_px_per_meter)?;
        validate_positive("velocity_px_per_meter", self.velocity_px_per_meter)?;
        validate_positive("max_stretch", self.max_stretch)?;
        validate_fraction("impact_work_fraction", self.impact_work_fraction)?;
        if self.min_launch_stretch >= self.max_stretch {
            return Err(GameError::UnsafeConstant {
                name: "min_launch_stretch",
                value: self.min_launch_stretch,
                safe_range: "[0.0, max_stretch)",
            });
        }
        if self.max_attempts == 0 {
            return Err(GameError::UnsafeConstant {
                name: "max_attempts",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        Ok(())
    }
}

/// Parse a TOML document into a validated [`GameConfig`].
pub fn parse_game_config(contents: &str) -> GameResult<GameConfig> {
    let config = toml::from_str::<GameConfig>(contents).map_err(|e| GameError::ConfigParse {
        path: CONFIG_PATH.to_string(),
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are logged but do not abort the game.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match parse_game_config(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("{e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}
