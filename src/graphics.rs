use bevy::prelude::*;

use crate::levels::{PieceRole, PieceShape};

/// Fill shape and colour of a level body.  The mesh itself is attached by
/// [`attach_body_mesh_system`] the frame after spawn, so level spawning needs
/// no `Assets` access and runs headless.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyVisual {
    pub shape: PieceShape,
    pub color: Color,
}

impl BodyVisual {
    pub fn for_piece(role: PieceRole, shape: PieceShape) -> Self {
        Self {
            shape,
            color: role_color(role),
        }
    }
}

/// Fill colour of each kind of level body.
pub fn role_color(role: PieceRole) -> Color {
    match role {
        PieceRole::Ground | PieceRole::Wall | PieceRole::Boundary => {
            Color::srgb_u8(0x1f, 0x29, 0x37)
        }
        PieceRole::Player => Color::srgb_u8(0x34, 0xd3, 0x99),
        PieceRole::TargetBox { .. } | PieceRole::Box => Color::srgb_u8(0xef, 0x44, 0x44),
        PieceRole::Goal => Color::srgba_u8(0x3b, 0x82, 0xf6, 0xb0),
        PieceRole::Bonus { .. } => Color::srgb_u8(0xa3, 0xe6, 0x35),
        PieceRole::Obstacle => Color::srgb_u8(0x78, 0x71, 0x6c),
        PieceRole::GoalBox => Color::srgb_u8(0x22, 0xc5, 0x5e),
        PieceRole::Projectile => Color::WHITE,
    }
}

/// Setup camera for 2D rendering.  World origin is the canvas centre.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    info!("[SETUP] Camera spawned");
}

/// Attach a filled `Mesh2d` to every newly spawned [`BodyVisual`].
pub fn attach_body_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &BodyVisual), Added<BodyVisual>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, visual) in query.iter() {
        let mesh = match visual.shape {
            PieceShape::Rect { w, h } => meshes.add(Rectangle::new(w, h)),
            PieceShape::Circle { r } => meshes.add(Circle::new(r)),
        };
        let material = materials.add(ColorMaterial::from_color(visual.color));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh), MeshMaterial2d(material)));
    }
}
