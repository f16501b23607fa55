//! Headless tests for the [`GameState`] state machine and the dialog flow.
//!
//! These tests use [`MinimalPlugins`] (no window, no rendering, no physics)
//! so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. Default initial state is `MainMenu`.
//! 2. A `NextState` request transitions from `MainMenu` → `Playing`.
//! 3. `insert_state` can force-start directly in `Playing` (start-mode path).
//! 4. Enter on the level-complete dialog requests the next level, or opens
//!    `Finished` after the last one.
//! 5. Restart from `Finished` clears the run's times and launch counter.
//! 6. Esc from a dialog returns to the main menu.
//! 7. The main menu and the finished summary spawn their labelled widgets.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use energylab::menu::{GameState, MenuPlugin, RunCounters};
use energylab::platform::PlatformSession;
use energylab::session::{CurrentLevel, LevelTimes, LoadLevelRequest};
use energylab::slingshot::SlingshotSession;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a minimal headless app with just the state registered via `init_state`.
fn app_with_default_state() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<GameState>();
    app
}

/// Headless app with the full menu plugin and the resources its systems use.
fn menu_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, MenuPlugin));
    app.insert_resource(ButtonInput::<KeyCode>::default());
    app.init_resource::<PlatformSession>();
    app.init_resource::<SlingshotSession>();
    app.init_resource::<Requests>();
    app.add_systems(Last, collect_requests);
    app.update(); // settle into MainMenu
    app
}

#[derive(Resource, Default)]
struct Requests(Vec<LoadLevelRequest>);

fn collect_requests(mut reader: MessageReader<LoadLevelRequest>, mut seen: ResMut<Requests>) {
    seen.0.extend(reader.read().copied());
}

fn go_to(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update();
}

fn press(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear();
}

fn texts(app: &mut App) -> Vec<String> {
    app.world_mut()
        .query::<&Text>()
        .iter(app.world())
        .map(|text| text.0.clone())
        .collect()
}

fn state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

// ── State machine ─────────────────────────────────────────────────────────────

/// The default variant of `GameState` is `MainMenu`.
#[test]
fn default_state_is_main_menu() {
    let mut app = app_with_default_state();
    app.update(); // run one frame so StateTransition fires
    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::MainMenu,
        "initial state must be MainMenu"
    );
}

/// Requesting `Playing` via `NextState` transitions the state on the next
/// `StateTransition` pass (which Bevy runs before each `Update`).
#[test]
fn transition_main_menu_to_playing() {
    let mut app = app_with_default_state();
    app.update();

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::Playing,
        "state must be Playing after explicit transition"
    );
}

/// `insert_state` can force the initial state to `Playing` directly.
#[test]
fn insert_state_starts_in_playing() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.update();

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::Playing
    );
}

// ── Dialogs ───────────────────────────────────────────────────────────────────

#[test]
fn enter_on_level_complete_requests_the_next_level() {
    let mut app = menu_app();
    go_to(&mut app, GameState::Playing);
    app.insert_resource(CurrentLevel(1));
    go_to(&mut app, GameState::LevelComplete);

    press(&mut app, KeyCode::Enter);

    assert_eq!(
        app.world().resource::<Requests>().0,
        vec![LoadLevelRequest { level: 2 }]
    );
}

#[test]
fn enter_on_last_level_opens_the_finished_summary() {
    let mut app = menu_app();
    go_to(&mut app, GameState::Playing);
    app.insert_resource(CurrentLevel(3));
    go_to(&mut app, GameState::LevelComplete);

    press(&mut app, KeyCode::Enter);
    app.update();

    assert_eq!(state(&app), GameState::Finished);
    assert!(app.world().resource::<Requests>().0.is_empty());
}

#[test]
fn enter_on_game_over_retries_the_same_level() {
    let mut app = menu_app();
    go_to(&mut app, GameState::Playing);
    app.insert_resource(CurrentLevel(2));
    go_to(&mut app, GameState::GameOver);

    press(&mut app, KeyCode::Enter);

    assert_eq!(
        app.world().resource::<Requests>().0,
        vec![LoadLevelRequest { level: 2 }]
    );
}

#[test]
fn restart_clears_times_and_launches() {
    let mut app = menu_app();
    go_to(&mut app, GameState::Playing);
    app.world_mut().resource_mut::<LevelTimes>().record(1, 9.5);
    app.world_mut().resource_mut::<RunCounters>().launches = 7;
    go_to(&mut app, GameState::Finished);

    press(&mut app, KeyCode::Enter);

    let times = app.world().resource::<LevelTimes>();
    assert_eq!(times.recent(1), None);
    assert_eq!(times.best(1), Some(9.5), "best times survive a restart");
    assert_eq!(app.world().resource::<RunCounters>().launches, 0);
    assert_eq!(
        app.world().resource::<Requests>().0,
        vec![LoadLevelRequest { level: 1 }]
    );
}

#[test]
fn escape_from_a_dialog_returns_to_the_main_menu() {
    let mut app = menu_app();
    go_to(&mut app, GameState::Playing);
    go_to(&mut app, GameState::GameOver);

    press(&mut app, KeyCode::Escape);
    app.update();

    assert_eq!(state(&app), GameState::MainMenu);
}

// ── Widgets ───────────────────────────────────────────────────────────────────

#[test]
fn main_menu_offers_both_games_and_quit() {
    let mut app = menu_app();
    let labels = texts(&mut app);
    for label in ["ENERGYLAB", "PLATFORM PUSH", "SLINGSHOT", "QUIT"] {
        assert!(labels.iter().any(|l| l == label), "missing {label:?} in {labels:?}");
    }
}

#[test]
fn finished_summary_lists_times_with_older_bests() {
    let mut app = menu_app();
    {
        let mut times = app.world_mut().resource_mut::<LevelTimes>();
        times.record(1, 9.0);
        times.record(1, 12.0);
        times.record(2, 20.0);
    }
    go_to(&mut app, GameState::Finished);
    app.update();

    let labels = texts(&mut app);
    assert!(labels.iter().any(|l| l == "ALL LEVELS COMPLETE"));
    assert!(labels.iter().any(|l| l == "Level 1:  12.0s  (best 9.0s)"));
    assert!(labels.iter().any(|l| l == "Level 2:  20.0s"));
    assert!(labels.iter().any(|l| l == "Level 3:  --"));
    assert!(labels.iter().any(|l| l == "Total:  32.0s"));
}
