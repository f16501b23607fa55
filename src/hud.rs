//! In-game HUD: live stats, the times table, the level button bar, and the
//! controls hint.
//!
//! ## Layout
//!
//! | Node            | Position      | Refreshed by          |
//! |-----------------|---------------|-----------------------|
//! | Stats panel     | top-left      | `hud_stats_system`    |
//! | Times table     | top-right     | `hud_times_system`    |
//! | Button bar      | bottom-left   | `hud_button_system`   |
//! | Controls hint   | bottom-right  | static                |
//!
//! Every top-level node carries [`HudRoot`] so returning to the main menu can
//! despawn the whole HUD in one query.  Text is produced by pure formatter
//! functions and only written back when it actually changed.

use crate::config::GameConfig;
use crate::constants::MAX_LEVEL;
use crate::menu::{GameState, RunCounters};
use crate::platform::PlatformSession;
use crate::session::{CurrentLevel, LevelClock, LevelTimes, LoadLevelRequest, SelectedGame};
use crate::slingshot::SlingshotSession;
use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;

// ── Components ────────────────────────────────────────────────────────────────

/// Tags every top-level HUD node.
#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudStatsText;

#[derive(Component)]
pub struct HudTimesText;

/// What a HUD button (or its keyboard shortcut) does.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudAction {
    Level(u8),
    /// Reload the current level.
    Reset,
}

impl HudAction {
    pub fn label(self) -> String {
        match self {
            HudAction::Level(n) => format!("LEVEL {n}"),
            HudAction::Reset => "RESET".to_string(),
        }
    }
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(
                Update,
                (
                    hud_stats_system,
                    hud_times_system,
                    hud_button_system,
                    hud_keyboard_system,
                )
                    .run_if(not(in_state(GameState::MainMenu))),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn panel_bg() -> Color {
    Color::srgba(0.05, 0.07, 0.10, 0.85)
}
fn panel_border() -> Color {
    Color::srgb(0.22, 0.26, 0.34)
}
fn stats_color() -> Color {
    Color::srgb(0.85, 0.95, 0.90)
}
fn button_bg() -> Color {
    Color::srgb(0.12, 0.16, 0.22)
}
fn button_text() -> Color {
    Color::srgb(0.80, 0.85, 0.95)
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Stats panel text for the platform game.
pub fn platform_stats_text(
    level: u8,
    elapsed: f32,
    session: &PlatformSession,
    efficiency: f32,
) -> String {
    format!(
        "Level: {level}\n\
         Time: {elapsed:.1}s\n\
         Mass: {:.2} kg\n\
         Work: {:.2} J\n\
         Energy spent: {:.2} J\n\
         Efficiency: {:.0}%",
        session.player_mass,
        session.work.total(),
        session.energy,
        efficiency * 100.0,
    )
}

/// Stats panel text for the slingshot game.
pub fn slingshot_stats_text(
    level: u8,
    elapsed: f32,
    session: &SlingshotSession,
    launches: u32,
    spring_k: f32,
) -> String {
    format!(
        "Level: {level}\n\
         Time: {elapsed:.1}s\n\
         Attempts left: {}\n\
         Launches: {launches}\n\
         Spring k: {spring_k:.0} N/m\n\
         Stretch: {:.2} m\n\
         Potential: {:.2} J\n\
         Kinetic: {:.2} J\n\
         Velocity: {:.2} m/s\n\
         Work on impact: {:.2} J\n\
         Efficiency: {:.0}%",
        session.attempts_left,
        session.stretch,
        session.potential,
        session.kinetic,
        session.velocity,
        session.impact_work,
        session.efficiency,
    )
}

/// Times table text: one row per level plus the total.
pub fn times_table_text(times: &LevelTimes) -> String {
    let mut out = String::from("TIMES\n");
    for level in 1..=MAX_LEVEL {
        out.push_str(&format!("Level {level}: {}\n", times.format_recent(level)));
    }
    out.push_str(&format!("Total: {}", times.format_total()));
    out
}

fn controls_hint(game: SelectedGame) -> &'static str {
    match game {
        SelectedGame::Platform => "Arrows: move / jump   1-3: level   R: reset   Esc: menu",
        SelectedGame::Slingshot => "Drag the ball and release   1-3: level   R: reset   Esc: menu",
    }
}

/// Whether `action` may run right now.  Slingshot level buttons wait until
/// no shot is in progress; reset always works.
pub fn hud_action_allowed(
    action: HudAction,
    game: SelectedGame,
    slingshot: &SlingshotSession,
) -> bool {
    match (action, game) {
        (HudAction::Reset, _) => true,
        (HudAction::Level(_), SelectedGame::Platform) => true,
        (HudAction::Level(_), SelectedGame::Slingshot) => slingshot.allows_level_select(),
    }
}

fn request_for(action: HudAction, current: CurrentLevel) -> LoadLevelRequest {
    match action {
        HudAction::Level(n) => LoadLevelRequest { level: n },
        HudAction::Reset => LoadLevelRequest { level: current.0 },
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Spawn the HUD the first time `Playing` is entered for a game.
///
/// Dialogs leave and re-enter `Playing` without touching the HUD; it is
/// despawned only by the return to the main menu.
pub fn setup_hud(
    mut commands: Commands,
    existing: Query<(), With<HudRoot>>,
    selected: Res<SelectedGame>,
    config: Res<GameConfig>,
) {
    if !existing.is_empty() {
        return;
    }
    let font_size = config.stats_font_size;

    commands.spawn((
        HudRoot,
        HudStatsText,
        Text::new(""),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(stats_color()),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            padding: UiRect::all(Val::Px(8.0)),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BackgroundColor(panel_bg()),
        BorderColor::all(panel_border()),
    ));

    commands.spawn((
        HudRoot,
        HudTimesText,
        Text::new(""),
        TextFont {
            font_size: font_size - 2.0,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.88, 0.45)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(10.0),
            top: Val::Px(10.0),
            padding: UiRect::all(Val::Px(8.0)),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BackgroundColor(panel_bg()),
        BorderColor::all(panel_border()),
    ));

    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                bottom: Val::Px(10.0),
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(6.0),
                ..default()
            },
        ))
        .with_children(|bar| {
            for level in 1..=MAX_LEVEL {
                spawn_hud_button(bar, HudAction::Level(level));
            }
            spawn_hud_button(bar, HudAction::Reset);
        });

    commands.spawn((
        HudRoot,
        Text::new(controls_hint(*selected)),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.55, 0.58, 0.66)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(12.0),
            bottom: Val::Px(14.0),
            ..default()
        },
    ));

    info!("[hud] spawned for {}", selected.label());
}

fn spawn_hud_button(parent: &mut ChildSpawnerCommands<'_>, action: HudAction) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(button_bg()),
            BorderColor::all(panel_border()),
            action,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(action.label()),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(button_text()),
            ));
        });
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Refresh the stats panel for whichever game is running.
#[allow(clippy::too_many_arguments)]
pub fn hud_stats_system(
    selected: Res<SelectedGame>,
    level: Res<CurrentLevel>,
    clock: Res<LevelClock>,
    platform: Res<PlatformSession>,
    slingshot: Res<SlingshotSession>,
    counters: Res<RunCounters>,
    config: Res<GameConfig>,
    mut q_text: Query<&mut Text, With<HudStatsText>>,
) {
    let content = match *selected {
        SelectedGame::Platform => {
            platform_stats_text(level.0, clock.elapsed, &platform, config.player_efficiency)
        }
        SelectedGame::Slingshot => slingshot_stats_text(
            level.0,
            clock.elapsed,
            &slingshot,
            counters.launches,
            config.spring_k,
        ),
    };
    for mut text in q_text.iter_mut() {
        if text.0 != content {
            text.0.clone_from(&content);
        }
    }
}

pub fn hud_times_system(times: Res<LevelTimes>, mut q_text: Query<&mut Text, With<HudTimesText>>) {
    if !times.is_changed() && q_text.iter().all(|t| !t.0.is_empty()) {
        return;
    }
    let content = times_table_text(&times);
    for mut text in q_text.iter_mut() {
        text.0.clone_from(&content);
    }
}

/// Handle clicks on the level / reset buttons.
pub fn hud_button_system(
    query: Query<(&Interaction, &HudAction), Changed<Interaction>>,
    selected: Res<SelectedGame>,
    slingshot: Res<SlingshotSession>,
    level: Res<CurrentLevel>,
    mut requests: MessageWriter<LoadLevelRequest>,
) {
    for (interaction, action) in query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if hud_action_allowed(*action, *selected, &slingshot) {
            requests.write(request_for(*action, *level));
        }
    }
}

/// Keys 1/2/3 pick a level, R reloads the current one.
pub fn hud_keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    selected: Res<SelectedGame>,
    slingshot: Res<SlingshotSession>,
    level: Res<CurrentLevel>,
    mut requests: MessageWriter<LoadLevelRequest>,
) {
    let action = if keys.just_pressed(KeyCode::Digit1) {
        HudAction::Level(1)
    } else if keys.just_pressed(KeyCode::Digit2) {
        HudAction::Level(2)
    } else if keys.just_pressed(KeyCode::Digit3) {
        HudAction::Level(3)
    } else if keys.just_pressed(KeyCode::KeyR) {
        HudAction::Reset
    } else {
        return;
    };
    if hud_action_allowed(action, *selected, &slingshot) {
        requests.write(request_for(action, *level));
    }
}
