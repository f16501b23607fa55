//! Slingshot game: pull the projectile back on an elastic band, release it
//! at a box tower, and knock the goal box down within three launches.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | Components and the `SlingshotSession` launch-phase machine |
//! | [`drag`] | Mouse grab, stretch and release |
//! | [`flight`] | Energy readouts, band detach, rest detection, timeout, victory, band gizmo |
//! | [`collision`] | First-impact work |
//! | [`spawn`] | Arena, tower, projectile and the `LoadLevelRequest` handler |
//!
//! All public items are re-exported at this level.

pub mod collision;
pub mod drag;
pub mod flight;
pub mod spawn;
pub mod state;

pub use collision::impact_system;
pub use drag::{
    cursor_to_world_system, drag_release_system, drag_start_system, drag_update_system,
    DragCursor,
};
pub use flight::{
    band_detach_system, band_gizmo_system, flight_stats_system, last_attempt_timeout_system,
    rest_detection_system, slingshot_summary, victory_system,
};
pub use spawn::{anchor_world, slingshot_load_level_system, spawn_projectile, spawn_slingshot_level};
pub use state::{
    GoalBox, LaunchPhase, RestOutcome, SlingAnchor, SlingBox, SlingProjectile, SlingshotSession,
};

use crate::menu::GameState;
use crate::session::SelectedGame;
use bevy::prelude::*;

pub struct SlingshotPlugin;

impl Plugin for SlingshotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SlingshotSession>()
            .init_resource::<DragCursor>()
            .add_systems(Update, slingshot_load_level_system)
            .add_systems(
                Update,
                (
                    (
                        cursor_to_world_system,
                        drag_start_system,
                        drag_update_system,
                        drag_release_system,
                    )
                        .chain(),
                    (
                        impact_system,
                        victory_system,
                        flight_stats_system,
                        band_detach_system,
                        rest_detection_system,
                        last_attempt_timeout_system,
                    )
                        .chain(),
                )
                    .chain()
                    .after(slingshot_load_level_system)
                    .run_if(in_state(GameState::Playing))
                    .run_if(resource_equals(SelectedGame::Slingshot)),
            )
            .add_systems(
                Update,
                band_gizmo_system
                    .run_if(not(in_state(GameState::MainMenu)))
                    .run_if(resource_equals(SelectedGame::Slingshot)),
            );
    }
}
