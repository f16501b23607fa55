use super::*;

/// Fill, border and label colours of one button family.
#[derive(Clone, Copy)]
pub(super) struct ButtonPalette {
    pub fill: Color,
    pub edge: Color,
    pub label: Color,
}

/// Forward actions: play, next level, retry.
pub(super) const PROCEED: ButtonPalette = ButtonPalette {
    fill: Color::srgb(0.08, 0.36, 0.14),
    edge: Color::srgb(0.18, 0.72, 0.28),
    label: Color::srgb(0.75, 1.0, 0.80),
};
pub(super) const SLINGSHOT: ButtonPalette = ButtonPalette {
    fill: Color::srgb(0.22, 0.10, 0.36),
    edge: Color::srgb(0.66, 0.33, 0.97),
    label: Color::srgb(0.90, 0.80, 1.0),
};
/// Leave or quit.
pub(super) const RETREAT: ButtonPalette = ButtonPalette {
    fill: Color::srgb(0.28, 0.06, 0.06),
    edge: Color::srgb(0.60, 0.12, 0.12),
    label: Color::srgb(1.0, 0.65, 0.65),
};

pub(super) const TITLE: Color = Color::srgb(0.95, 0.88, 0.45);
pub(super) const SUBTITLE: Color = Color::srgb(0.55, 0.55, 0.65);
pub(super) const HINT: Color = Color::srgb(0.28, 0.28, 0.35);
pub(super) const CARD: Color = Color::srgb(0.04, 0.06, 0.10);
pub(super) const WIN_EDGE: Color = Color::srgb(0.13, 0.77, 0.37);
pub(super) const LOSE_EDGE: Color = Color::srgb(0.55, 0.10, 0.10);

const BUTTON_SIZE: Vec2 = Vec2::new(220.0, 50.0);

/// Empty vertical gap of `px` pixels.
pub(super) fn gap(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Spawn a bordered button carrying `action` and return its entity, so
/// dialogs can tag their default button with [`PrimaryDialogButton`].
pub(super) fn spawn_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    action: MenuAction,
    palette: ButtonPalette,
) -> Entity {
    let node = Node {
        width: Val::Px(BUTTON_SIZE.x),
        height: Val::Px(BUTTON_SIZE.y),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        border: UiRect::all(Val::Px(2.0)),
        ..default()
    };
    let button = parent
        .spawn((
            Button,
            node,
            BackgroundColor(palette.fill),
            BorderColor::all(palette.edge),
            ButtonRestColor(palette.label),
            action,
        ))
        .id();
    parent.commands().entity(button).with_child((
        Text::new(label),
        TextFont::from_font_size(18.0),
        TextColor(palette.label),
    ));
    button
}

pub(super) fn spawn_line(
    parent: &mut ChildSpawnerCommands<'_>,
    text: &str,
    size: f32,
    color: Color,
) {
    parent.spawn((Text::new(text), TextFont::from_font_size(size), TextColor(color)));
}
