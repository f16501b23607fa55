//! Arena, tower and projectile spawning, plus the `LoadLevelRequest` handler.

use super::state::{GoalBox, SlingAnchor, SlingBox, SlingProjectile, SlingshotSession};
use crate::config::GameConfig;
use crate::graphics::BodyVisual;
use crate::levels::{
    canvas_to_world, slingshot_anchor, slingshot_layout, LevelLayout, Piece, PieceRole, PieceShape,
};
use crate::menu::GameState;
use crate::session::{
    CurrentLevel, LevelClock, LevelEntity, LevelSummary, LoadLevelRequest, SelectedGame,
};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Anchor position in world space.
pub fn anchor_world(canvas: Vec2) -> Vec2 {
    canvas_to_world(slingshot_anchor(), canvas)
}

/// Spawn the projectile on the anchor, tied to it by a zero-length spring.
pub fn spawn_projectile(
    commands: &mut Commands,
    anchor: Entity,
    anchor_pos: Vec2,
    config: &GameConfig,
) -> Entity {
    let band = SpringJointBuilder::new(0.0, config.band_stiffness, config.band_damping);
    let shape = PieceShape::Circle {
        r: config.projectile_radius,
    };
    commands
        .spawn((
            LevelEntity,
            SlingProjectile,
            RigidBody::Dynamic,
            Collider::ball(config.projectile_radius),
            ColliderMassProperties::Density(config.projectile_density),
            Restitution::coefficient(config.projectile_restitution),
            Friction::coefficient(config.projectile_friction),
            Damping {
                linear_damping: config.projectile_air_damping,
                angular_damping: 0.0,
            },
            Velocity::zero(),
            Ccd::enabled(),
            ActiveEvents::COLLISION_EVENTS,
            ImpulseJoint::new(anchor, band),
            BodyVisual::for_piece(PieceRole::Projectile, shape),
            Transform::from_translation(anchor_pos.extend(1.0)),
        ))
        .id()
}

fn spawn_piece(commands: &mut Commands, piece: &Piece, canvas: Vec2, config: &GameConfig) {
    let pos = canvas_to_world(piece.center, canvas);
    let mut entity = commands.spawn((
        LevelEntity,
        piece.shape.collider(),
        BodyVisual::for_piece(piece.role, piece.shape),
        Transform::from_translation(pos.extend(0.0)),
    ));

    match piece.role {
        PieceRole::Boundary | PieceRole::Obstacle => {
            entity.insert(RigidBody::Fixed);
        }
        PieceRole::Box | PieceRole::GoalBox => {
            entity.insert((
                SlingBox,
                RigidBody::Dynamic,
                ColliderMassProperties::Density(config.box_density),
                Friction::coefficient(config.sling_box_friction),
                Restitution::coefficient(config.sling_box_restitution),
                Velocity::zero(),
            ));
            if piece.role == PieceRole::GoalBox {
                entity.insert(GoalBox);
            }
        }
        other => {
            warn!("[slingshot] ignoring unexpected piece {other:?}");
        }
    }
}

/// Spawn the anchor and every body of `layout`.
pub fn spawn_slingshot_level(commands: &mut Commands, layout: &LevelLayout, config: &GameConfig) {
    let anchor_pos = anchor_world(layout.canvas);
    let anchor = commands
        .spawn((
            LevelEntity,
            SlingAnchor,
            RigidBody::Fixed,
            Transform::from_translation(anchor_pos.extend(0.0)),
        ))
        .id();

    for piece in &layout.pieces {
        if piece.role == PieceRole::Projectile {
            spawn_projectile(commands, anchor, anchor_pos, config);
        } else {
            spawn_piece(commands, piece, layout.canvas, config);
        }
    }
}

/// Handle [`LoadLevelRequest`] while the slingshot game is selected.
///
/// Only the last request of a frame is honoured.  Launch counts in
/// `RunCounters` survive; everything per-level is reset.
#[allow(clippy::too_many_arguments)]
pub fn slingshot_load_level_system(
    mut commands: Commands,
    mut requests: MessageReader<LoadLevelRequest>,
    selected: Res<SelectedGame>,
    level_entities: Query<Entity, With<LevelEntity>>,
    config: Res<GameConfig>,
    mut level: ResMut<CurrentLevel>,
    mut session: ResMut<SlingshotSession>,
    mut clock: ResMut<LevelClock>,
    mut summary: ResMut<LevelSummary>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };
    if *selected != SelectedGame::Slingshot {
        return;
    }
    let layout = match slingshot_layout(request.level) {
        Ok(layout) => layout,
        Err(err) => {
            warn!("[slingshot] ignoring load request: {err}");
            return;
        }
    };

    for e in level_entities.iter() {
        commands.entity(e).despawn();
    }
    spawn_slingshot_level(&mut commands, &layout, &config);

    level.0 = layout.level;
    *session = SlingshotSession::new(config.max_attempts);
    *summary = LevelSummary::default();
    clock.restart();
    next_state.set(GameState::Playing);
    info!(
        "[slingshot] level {} loaded ({} bodies)",
        layout.level,
        layout.body_count()
    );
}
