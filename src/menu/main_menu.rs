use super::*;

/// Spawn the full-screen game picker.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │                 ENERGYLAB                   │
/// │        Work and energy mini-games           │
/// │                                             │
/// │            [ PLATFORM PUSH ]                │
/// │              [ SLINGSHOT ]                  │
/// │                [ QUIT ]                     │
/// │                                             │
/// │          v0.1.0  ·  Bevy 0.17               │
/// └─────────────────────────────────────────────┘
/// ```
pub(super) fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            MainMenuRoot,
        ))
        .with_children(|root| {
            spawn_line(root, "ENERGYLAB", 56.0, TITLE);
            gap(root, 10.0);
            spawn_line(root, "Work and energy mini-games", 18.0, SUBTITLE);
            gap(root, 52.0);

            spawn_button(
                root,
                "PLATFORM PUSH",
                MenuAction::Start(SelectedGame::Platform),
                PROCEED,
            );
            spawn_line(
                root,
                "Push the box into the goal. Arrows move, Up jumps.",
                12.0,
                SUBTITLE,
            );
            gap(root, 14.0);

            spawn_button(
                root,
                "SLINGSHOT",
                MenuAction::Start(SelectedGame::Slingshot),
                SLINGSHOT,
            );
            spawn_line(
                root,
                "Drag the ball back and release to topple the green box.",
                12.0,
                SUBTITLE,
            );
            gap(root, 14.0);

            spawn_button(root, "QUIT", MenuAction::Quit, RETREAT);

            gap(root, 52.0);
            spawn_line(root, "v0.1.0  ·  Bevy 0.17", 12.0, HINT);
        });
}

/// Despawn the main-menu tree.
pub(super) fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
