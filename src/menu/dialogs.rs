use super::*;

/// Full-screen translucent overlay holding a bordered card; `build` fills the
/// card.
fn spawn_dialog(
    commands: &mut Commands,
    border: Color,
    build: impl FnOnce(&mut ChildSpawnerCommands<'_>),
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            GlobalZIndex(100),
            DialogRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(28.0)),
                        row_gap: Val::Px(8.0),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(CARD),
                    BorderColor::all(border),
                ))
                .with_children(build);
        });
}

fn spawn_summary(card: &mut ChildSpawnerCommands<'_>, summary: &LevelSummary) {
    for line in &summary.lines {
        spawn_line(card, line, 16.0, Color::srgb(0.85, 0.85, 0.9));
    }
}

fn spawn_main_menu_button(card: &mut ChildSpawnerCommands<'_>) {
    spawn_button(card, "MAIN MENU", MenuAction::MainMenu, RETREAT);
}

pub(super) fn setup_level_complete_dialog(
    mut commands: Commands,
    level: Res<CurrentLevel>,
    summary: Res<LevelSummary>,
) {
    let title = format!("LEVEL {} COMPLETE", level.0);
    let next_label = if level.is_last() {
        "SEE RESULTS"
    } else {
        "NEXT LEVEL"
    };
    spawn_dialog(&mut commands, WIN_EDGE, |card| {
        spawn_line(card, &title, 30.0, WIN_EDGE);
        gap(card, 6.0);
        spawn_summary(card, &summary);
        gap(card, 16.0);
        let primary = spawn_button(card, next_label, MenuAction::NextLevel, PROCEED);
        card.commands().entity(primary).insert(PrimaryDialogButton);
        spawn_main_menu_button(card);
        spawn_line(card, "Enter to continue", 12.0, HINT);
    });
}

pub(super) fn setup_game_over_dialog(
    mut commands: Commands,
    level: Res<CurrentLevel>,
    summary: Res<LevelSummary>,
) {
    let subtitle = format!("Level {}: out of attempts", level.0);
    spawn_dialog(&mut commands, LOSE_EDGE, |card| {
        spawn_line(card, "GAME OVER", 30.0, Color::srgb(1.0, 0.35, 0.35));
        spawn_line(card, &subtitle, 16.0, SUBTITLE);
        gap(card, 6.0);
        spawn_summary(card, &summary);
        gap(card, 16.0);
        let primary = spawn_button(card, "RETRY LEVEL", MenuAction::RetryLevel, PROCEED);
        card.commands().entity(primary).insert(PrimaryDialogButton);
        spawn_main_menu_button(card);
        spawn_line(card, "Enter to retry", 12.0, HINT);
    });
}

pub(super) fn setup_finished_dialog(
    mut commands: Commands,
    selected: Res<SelectedGame>,
    times: Res<LevelTimes>,
) {
    let rows: Vec<String> = (1..=crate::constants::MAX_LEVEL)
        .map(|lvl| times.summary_row(lvl))
        .collect();
    let total = format!("Total:  {}", times.format_total());
    spawn_dialog(&mut commands, WIN_EDGE, |card| {
        spawn_line(card, "ALL LEVELS COMPLETE", 30.0, TITLE);
        spawn_line(card, selected.label(), 16.0, SUBTITLE);
        gap(card, 8.0);
        for row in &rows {
            spawn_line(card, row, 18.0, Color::WHITE);
        }
        spawn_line(card, &total, 20.0, WIN_EDGE);
        gap(card, 16.0);
        let primary = spawn_button(card, "RESTART", MenuAction::Restart, PROCEED);
        card.commands().entity(primary).insert(PrimaryDialogButton);
        spawn_main_menu_button(card);
    });
}

pub(super) fn cleanup_dialog(mut commands: Commands, query: Query<Entity, With<DialogRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
