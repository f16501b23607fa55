//! Two small physics games about work and energy.
//!
//! * **Platform push**: drive a character into a heavy box and shove it along
//!   the floor into the goal while the friction work is tallied.
//! * **Slingshot**: stretch an elastic band, release the projectile into a box
//!   tower, and knock the goal box down within three launches.
//!
//! Bevy supplies the app, input and UI; Rapier supplies the rigid bodies,
//! contacts and the band joint.  Everything shown on screen is derived from
//! engine positions and velocities by the pure functions in [`energy`].

pub mod config;
pub mod constants;
pub mod energy;
pub mod error;
pub mod graphics;
pub mod hud;
pub mod levels;
pub mod menu;
pub mod particles;
pub mod platform;
pub mod session;
pub mod slingshot;
pub mod start_mode;
