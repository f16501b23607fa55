//! Platform box-pushing game: the player pushes a heavy box along the floor
//! into the goal while friction work is tallied.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | Components (`Player`, `TargetBox`, `Goal`, `Bonus`, `Ground`) and resources (`PlatformSession`, `PlatformIntent`, `JumpLatch`) |
//! | [`control`] | Arrow-key drive and jump pipeline |
//! | [`collision`] | Bonus pickups, goal detection, friction work |
//! | [`spawn`] | Level bodies and the `LoadLevelRequest` handler |
//!
//! All public items are re-exported at this level.

pub mod collision;
pub mod control;
pub mod spawn;
pub mod state;

pub use collision::{bonus_pickup_system, friction_work_system, goal_reached_system};
pub use control::{
    apply_platform_intent_system, keyboard_to_intent_system, platform_intent_clear_system,
};
pub use spawn::{platform_load_level_system, spawn_platform_level};
pub use state::{
    Bonus, Goal, Ground, JumpLatch, Player, PlatformIntent, PlatformSession, TargetBox,
};

use crate::menu::GameState;
use crate::session::SelectedGame;
use bevy::prelude::*;

pub struct PlatformPlugin;

impl Plugin for PlatformPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlatformSession>()
            .init_resource::<PlatformIntent>()
            .init_resource::<JumpLatch>()
            .add_systems(Update, platform_load_level_system)
            .add_systems(
                Update,
                (
                    (
                        platform_intent_clear_system,
                        keyboard_to_intent_system,
                        apply_platform_intent_system,
                    )
                        .chain(),
                    bonus_pickup_system,
                    goal_reached_system,
                    friction_work_system,
                )
                    .after(platform_load_level_system)
                    .run_if(in_state(GameState::Playing))
                    .run_if(resource_equals(SelectedGame::Platform)),
            );
    }
}
