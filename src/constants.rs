//! Centralised gameplay and physics constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  [`crate::config::GameConfig::default`] copies every
//! value below; `assets/game.toml` can override any subset at startup.
//!
//! ## Units
//!
//! World units are canvas pixels (`pixels_per_meter(1.0)` in Rapier).  Speeds
//! quoted "per tick" refer to a 60 Hz reference tick and are multiplied by
//! [`ENGINE_TICK_RATE`] before being handed to the physics engine.  The derived
//! statistics (work, energy, m/s readouts) are computed from per-tick speeds so
//! their magnitudes stay stable regardless of the actual frame rate.

// ── Shared ────────────────────────────────────────────────────────────────────

/// Reference tick rate (Hz) used to express speeds in px/tick.
pub const ENGINE_TICK_RATE: f32 = 60.0;

/// Downward gravity applied by Rapier (px/s²).
///
/// 1000 px/s² reproduces a 0.28 px/tick² fall at 60 Hz.
pub const GRAVITY_PX: f32 = 1000.0;

/// Number of levels per game.  Requests above this wrap back to level 1.
pub const MAX_LEVEL: u8 = 3;

/// Font size for HUD text.
pub const STATS_FONT_SIZE: f32 = 16.0;

// ── Platform: world ───────────────────────────────────────────────────────────

pub const PLATFORM_CANVAS_WIDTH: f32 = 800.0;
pub const PLATFORM_CANVAS_HEIGHT: f32 = 600.0;

// ── Platform: player ──────────────────────────────────────────────────────────

/// Player mass at the start of every level (kg).
pub const PLAYER_BASE_MASS: f32 = 5.0;

/// Player–surface friction.  Combined with the `Min` rule, so the player
/// always slides at 0.1 regardless of the surface.
pub const PLAYER_FRICTION: f32 = 0.1;

/// Linear damping equivalent of 0.01/tick air friction.
pub const PLAYER_AIR_DAMPING: f32 = 0.6;

/// Fraction of expended muscle energy that ends up as useful work.
pub const PLAYER_EFFICIENCY: f32 = 0.25;

/// Drive force per kilogram of base mass (mass·px/s²).
pub const DRIVE_FORCE_PER_BASE_KG: f32 = 4000.0;

/// Additional drive force per kilogram gained from bonuses.
pub const DRIVE_FORCE_PER_EXTRA_KG: f32 = 3000.0;

/// Speed cap while driving at base mass (px/tick).
pub const MAX_DRIVE_SPEED: f32 = 5.0;

/// Speed-cap increase per extra kilogram (px/tick).
pub const MAX_DRIVE_SPEED_PER_EXTRA_KG: f32 = 0.3;

/// Vertical take-off speed for a jump (px/tick).
pub const JUMP_SPEED: f32 = 10.0;

// ── Platform: ground probe ────────────────────────────────────────────────────

/// Vertical distance from the player centre to the probe centre (px).
pub const GROUND_PROBE_OFFSET: f32 = 22.0;
pub const GROUND_PROBE_WIDTH: f32 = 38.0;
pub const GROUND_PROBE_HEIGHT: f32 = 4.0;

// ── Platform: box and work ────────────────────────────────────────────────────

/// Box–surface friction coefficient; also the μ used for the work readout.
pub const BOX_FRICTION: f32 = 0.5;

/// Friction of ground and steps.
pub const GROUND_FRICTION: f32 = 1.0;

/// Gravity used for the work readout (m/s²), independent of [`GRAVITY_PX`].
pub const REAL_GRAVITY: f32 = 9.8;

/// Box speed below which no work is accumulated (px/tick).
pub const BOX_SLIDING_THRESHOLD: f32 = 0.05;

// ── Slingshot: world ──────────────────────────────────────────────────────────

pub const SLINGSHOT_CANVAS_WIDTH: f32 = 1200.0;
pub const SLINGSHOT_CANVAS_HEIGHT: f32 = 700.0;

/// Anchor of the slingshot band in canvas coordinates (px, y down).
pub const SLINGSHOT_ANCHOR_X: f32 = 200.0;
pub const SLINGSHOT_ANCHOR_Y: f32 = 550.0;

// ── Slingshot: energy ─────────────────────────────────────────────────────────

/// Spring constant used for the potential-energy readout (N/m).
pub const SPRING_K: f32 = 50.0;

/// Projectile mass used for the kinetic-energy readout (kg).
pub const PROJECTILE_ENERGY_MASS: f32 = 0.5;

/// Stretch conversion for the potential-energy readout (px per metre).
pub const STRETCH_PX_PER_METER: f32 = 100.0;

/// Velocity conversion for the kinetic-energy readout (px/tick per m/s).
pub const VELOCITY_PX_PER_METER: f32 = 10.0;

/// Fraction of launch kinetic energy credited as work on first impact.
pub const IMPACT_WORK_FRACTION: f32 = 0.75;

// ── Slingshot: launch ─────────────────────────────────────────────────────────

/// Maximum band stretch (px).  The dragged projectile is held inside this circle.
pub const MAX_STRETCH: f32 = 120.0;

/// Stretches at or below this distance cancel the launch (px).
pub const MIN_LAUNCH_STRETCH: f32 = 10.0;

/// Launch speed at full stretch (px/tick).
pub const LAUNCH_SPEED: f32 = 8.0;

pub const MAX_ATTEMPTS: u32 = 3;

/// Goal box wins the level once its centre falls below this canvas y (px).
pub const GOAL_FALL_THRESHOLD: f32 = 600.0;

// ── Slingshot: timers ─────────────────────────────────────────────────────────

/// Speed under which the projectile counts as stopped (px/tick).
pub const STOPPED_SPEED: f32 = 0.1;

/// How long the projectile must stay stopped before it is reset (s).
pub const STOPPED_DELAY: f32 = 1.5;

/// Delay between release and band removal (s).
pub const BAND_DETACH_DELAY: f32 = 0.05;

/// After the final launch the level is lost if not won within this window (s).
pub const LAST_ATTEMPT_TIMEOUT: f32 = 5.0;

// ── Slingshot: bodies ─────────────────────────────────────────────────────────

pub const PROJECTILE_RADIUS: f32 = 15.0;
pub const PROJECTILE_DENSITY: f32 = 0.002;
pub const PROJECTILE_RESTITUTION: f32 = 0.5;
pub const PROJECTILE_FRICTION: f32 = 0.1;

/// Linear damping equivalent of 0.02/tick air friction.
pub const PROJECTILE_AIR_DAMPING: f32 = 1.2;

pub const BOX_DENSITY: f32 = 0.001;
pub const SLING_BOX_FRICTION: f32 = 0.5;
pub const SLING_BOX_RESTITUTION: f32 = 0.3;

/// Spring joint stiffness of the band (force per px of stretch).
///
/// Tested range: 150–400.  Lower values sag visibly under gravity at rest;
/// higher values add a large kick during the detach window.
pub const BAND_STIFFNESS: f32 = 250.0;

/// Spring joint damping of the band.
pub const BAND_DAMPING: f32 = 20.0;
