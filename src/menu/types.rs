use bevy::prelude::*;

use crate::session::SelectedGame;

/// Top-level application state machine.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Game picker; shown on startup.
    #[default]
    MainMenu,
    /// A level is running.
    Playing,
    /// Level won; summary dialog shown over the frozen level.
    LevelComplete,
    /// Slingshot ran out of attempts.
    GameOver,
    /// Last level won; per-level times and restart.
    Finished,
}

/// Counters that span a whole run of levels and reset only on restart or
/// when returning to the main menu.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Slingshot launches across all levels of the run.
    pub launches: u32,
}

/// What a menu or dialog button does when pressed.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Select a game and load its first level.
    Start(SelectedGame),
    /// Load the next level, or open the final summary after the last one.
    NextLevel,
    RetryLevel,
    /// Clear the run's times and counters and load level 1.
    Restart,
    MainMenu,
    Quit,
}

/// Text colour a button returns to when no longer hovered.
#[derive(Component, Debug, Clone, Copy)]
pub struct ButtonRestColor(pub Color);

/// Marks the dialog button triggered by Enter.
#[derive(Component)]
pub struct PrimaryDialogButton;

/// Root node of the main-menu UI; entire tree is despawned on `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

/// Root node of whichever dialog is open.
#[derive(Component)]
pub struct DialogRoot;
