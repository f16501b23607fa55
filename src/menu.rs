//! Menus and dialogs: `GameState` definition and `MenuPlugin`.
//!
//! ## States
//!
//! | State           | Description                                          |
//! |-----------------|------------------------------------------------------|
//! | `MainMenu`      | Initial state; game picker shown                     |
//! | `Playing`       | Level running; physics pipeline active               |
//! | `LevelComplete` | Win dialog over the frozen level                     |
//! | `GameOver`      | Out-of-attempts dialog (slingshot)                   |
//! | `Finished`      | All levels done; times summary and restart           |
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                  | Schedule                     | Purpose                          |
//! |-------------------------|------------------------------|----------------------------------|
//! | `setup_main_menu`       | `OnEnter(MainMenu)`          | Spawn game picker                |
//! | `cleanup_game_world`    | `OnEnter(MainMenu)`          | Despawn level + HUD, reset state |
//! | `setup_*_dialog`        | `OnEnter(<dialog state>)`    | Spawn dialog card                |
//! | `cleanup_dialog`        | `OnExit(<dialog state>)`     | Despawn dialog card              |
//! | `resume_physics`        | `OnEnter(Playing)`           | Enable Rapier pipeline           |
//! | `pause_physics`         | `OnExit(Playing)`            | Freeze Rapier pipeline           |
//! | `menu_action_system`    | `Update`                     | Handle button presses            |
//! | `dialog_keyboard_system`| `Update / in dialogs`        | Enter = primary dialog button    |
//! | `return_to_menu_system` | `Update / not in MainMenu`   | Esc back to the main menu        |

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::session::{
    CurrentLevel, LevelClock, LevelSummary, LevelTimes, LoadLevelRequest, SelectedGame,
};

mod cleanup;
mod common;
mod dialogs;
mod main_menu;
mod types;

use common::*;

pub use cleanup::cleanup_game_world;
pub use types::*;

/// Registers `GameState`, the shared session resources, the main menu, the
/// dialogs, and the physics pause/resume hooks.
///
/// Must be added before any plugin that uses `.run_if(in_state(...))`.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<SelectedGame>()
            .init_resource::<CurrentLevel>()
            .init_resource::<LevelClock>()
            .init_resource::<LevelTimes>()
            .init_resource::<LevelSummary>()
            .init_resource::<RunCounters>()
            .add_message::<LoadLevelRequest>()
            .add_systems(
                OnEnter(GameState::MainMenu),
                (cleanup_game_world, main_menu::setup_main_menu),
            )
            .add_systems(OnExit(GameState::MainMenu), main_menu::cleanup_main_menu)
            .add_systems(OnEnter(GameState::Playing), resume_physics)
            .add_systems(OnExit(GameState::Playing), pause_physics)
            .add_systems(
                OnEnter(GameState::LevelComplete),
                dialogs::setup_level_complete_dialog,
            )
            .add_systems(OnEnter(GameState::GameOver), dialogs::setup_game_over_dialog)
            .add_systems(OnEnter(GameState::Finished), dialogs::setup_finished_dialog)
            .add_systems(OnExit(GameState::LevelComplete), dialogs::cleanup_dialog)
            .add_systems(OnExit(GameState::GameOver), dialogs::cleanup_dialog)
            .add_systems(OnExit(GameState::Finished), dialogs::cleanup_dialog)
            .add_systems(
                Update,
                (
                    button_hover_system,
                    menu_action_system,
                    dialog_keyboard_system.run_if(
                        in_state(GameState::LevelComplete)
                            .or(in_state(GameState::GameOver))
                            .or(in_state(GameState::Finished)),
                    ),
                    return_to_menu_system.run_if(not(in_state(GameState::MainMenu))),
                ),
            );
    }
}

// ── Physics pipeline ──────────────────────────────────────────────────────────

/// Disable the Rapier physics pipeline so the level freezes behind a dialog.
pub fn pause_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = false;
    }
}

/// Re-enable the Rapier physics pipeline.
pub fn resume_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.physics_pipeline_active = true;
    }
}

// ── Buttons ───────────────────────────────────────────────────────────────────

/// Tint button text white on hover and restore it afterwards.
pub fn button_hover_system(
    query: Query<(&Interaction, &Children, &ButtonRestColor), Changed<Interaction>>,
    mut btn_text: Query<&mut TextColor>,
) {
    for (interaction, children, rest) in query.iter() {
        let color = match interaction {
            Interaction::Hovered | Interaction::Pressed => Color::WHITE,
            Interaction::None => rest.0,
        };
        for child in children.iter() {
            if let Ok(mut text) = btn_text.get_mut(child) {
                *text = TextColor(color);
            }
        }
    }
}

/// Perform the [`MenuAction`] of any pressed button.
#[allow(clippy::too_many_arguments)]
pub fn menu_action_system(
    query: Query<(&Interaction, &MenuAction), Changed<Interaction>>,
    mut selected: ResMut<SelectedGame>,
    level: Res<CurrentLevel>,
    mut times: ResMut<LevelTimes>,
    mut counters: ResMut<RunCounters>,
    mut requests: MessageWriter<LoadLevelRequest>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    for (interaction, action) in query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        apply_menu_action(
            *action,
            &mut selected,
            *level,
            &mut times,
            &mut counters,
            &mut requests,
            &mut next_state,
            &mut exit,
        );
    }
}

/// Enter triggers the primary button of the open dialog.
#[allow(clippy::too_many_arguments)]
pub fn dialog_keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    query: Query<&MenuAction, With<PrimaryDialogButton>>,
    mut selected: ResMut<SelectedGame>,
    level: Res<CurrentLevel>,
    mut times: ResMut<LevelTimes>,
    mut counters: ResMut<RunCounters>,
    mut requests: MessageWriter<LoadLevelRequest>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    if !keys.just_pressed(KeyCode::Enter) {
        return;
    }
    if let Ok(action) = query.single() {
        apply_menu_action(
            *action,
            &mut selected,
            *level,
            &mut times,
            &mut counters,
            &mut requests,
            &mut next_state,
            &mut exit,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_menu_action(
    action: MenuAction,
    selected: &mut SelectedGame,
    level: CurrentLevel,
    times: &mut LevelTimes,
    counters: &mut RunCounters,
    requests: &mut MessageWriter<LoadLevelRequest>,
    next_state: &mut NextState<GameState>,
    exit: &mut MessageWriter<bevy::app::AppExit>,
) {
    match action {
        MenuAction::Start(game) => {
            *selected = game;
            info!("Starting {}", game.label());
            requests.write(LoadLevelRequest { level: 1 });
            next_state.set(GameState::Playing);
        }
        MenuAction::NextLevel => {
            if level.is_last() {
                next_state.set(GameState::Finished);
            } else {
                requests.write(LoadLevelRequest { level: level.0 + 1 });
            }
        }
        MenuAction::RetryLevel => {
            requests.write(LoadLevelRequest { level: level.0 });
        }
        MenuAction::Restart => {
            times.clear();
            *counters = RunCounters::default();
            requests.write(LoadLevelRequest { level: 1 });
        }
        MenuAction::MainMenu => next_state.set(GameState::MainMenu),
        MenuAction::Quit => {
            exit.write(bevy::app::AppExit::Success);
        }
    }
}

/// Esc from any in-game state → main menu.
pub fn return_to_menu_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::MainMenu);
    }
}
