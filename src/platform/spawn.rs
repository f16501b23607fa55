//! Level spawning and the `LoadLevelRequest` handler.

use super::state::{Bonus, Goal, Ground, JumpLatch, Player, PlatformSession, TargetBox};
use crate::config::GameConfig;
use crate::graphics::BodyVisual;
use crate::levels::{canvas_to_world, platform_layout, LevelLayout, Piece, PieceRole};
use crate::menu::GameState;
use crate::session::{
    CurrentLevel, LevelClock, LevelEntity, LevelSummary, LoadLevelRequest, SelectedGame,
};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Contact friction takes the smaller of the two coefficients.
fn min_friction(coefficient: f32) -> Friction {
    Friction {
        coefficient,
        combine_rule: CoefficientCombineRule::Min,
    }
}

/// Spawn one body of a platform level.
fn spawn_piece(commands: &mut Commands, piece: &Piece, canvas: Vec2, config: &GameConfig) {
    let pos = canvas_to_world(piece.center, canvas);
    let mut entity = commands.spawn((
        LevelEntity,
        piece.shape.collider(),
        BodyVisual::for_piece(piece.role, piece.shape),
        Transform::from_translation(pos.extend(0.0)),
    ));

    match piece.role {
        PieceRole::Ground => {
            entity.insert((
                RigidBody::Fixed,
                Ground {
                    half: piece.shape.half_extents(),
                },
                min_friction(config.ground_friction),
            ));
        }
        PieceRole::Wall => {
            entity.insert(RigidBody::Fixed);
        }
        PieceRole::Player => {
            entity.insert((
                Player,
                RigidBody::Dynamic,
                ColliderMassProperties::Mass(config.player_base_mass),
                min_friction(config.player_friction),
                Restitution::coefficient(0.0),
                LockedAxes::ROTATION_LOCKED,
                Damping {
                    linear_damping: config.player_air_damping,
                    angular_damping: 0.0,
                },
                Velocity::zero(),
                ExternalForce::default(),
                ActiveEvents::COLLISION_EVENTS,
            ));
        }
        PieceRole::TargetBox { mass } => {
            entity.insert((
                TargetBox { mass },
                RigidBody::Dynamic,
                ColliderMassProperties::Mass(mass),
                min_friction(config.box_friction),
                Restitution::coefficient(0.0),
                Velocity::zero(),
                ActiveEvents::COLLISION_EVENTS,
            ));
        }
        PieceRole::Goal => {
            entity.insert((
                Goal,
                RigidBody::Fixed,
                Sensor,
                ActiveEvents::COLLISION_EVENTS,
            ));
        }
        PieceRole::Bonus { mass } => {
            entity.insert((
                Bonus { mass },
                RigidBody::Fixed,
                Sensor,
                ActiveEvents::COLLISION_EVENTS,
            ));
        }
        other => {
            warn!("[platform] ignoring unexpected piece {other:?}");
        }
    }
}

/// Spawn every body of `layout`.
pub fn spawn_platform_level(commands: &mut Commands, layout: &LevelLayout, config: &GameConfig) {
    for piece in &layout.pieces {
        spawn_piece(commands, piece, layout.canvas, config);
    }
}

/// Handle [`LoadLevelRequest`] while the platform game is selected.
///
/// Only the last request of a frame is honoured so that two requests cannot
/// both spawn before the first despawn is applied.
#[allow(clippy::too_many_arguments)]
pub fn platform_load_level_system(
    mut commands: Commands,
    mut requests: MessageReader<LoadLevelRequest>,
    selected: Res<SelectedGame>,
    level_entities: Query<Entity, With<LevelEntity>>,
    config: Res<GameConfig>,
    mut level: ResMut<CurrentLevel>,
    mut session: ResMut<PlatformSession>,
    mut latch: ResMut<JumpLatch>,
    mut clock: ResMut<LevelClock>,
    mut summary: ResMut<LevelSummary>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };
    if *selected != SelectedGame::Platform {
        return;
    }
    let layout = match platform_layout(request.level) {
        Ok(layout) => layout,
        Err(err) => {
            warn!("[platform] ignoring load request: {err}");
            return;
        }
    };

    for e in level_entities.iter() {
        commands.entity(e).despawn();
    }
    spawn_platform_level(&mut commands, &layout, &config);

    level.0 = layout.level;
    *session = PlatformSession::new(config.player_base_mass);
    *latch = JumpLatch::default();
    *summary = LevelSummary::default();
    clock.restart();
    next_state.set(GameState::Playing);
    info!(
        "[platform] level {} loaded ({} bodies)",
        layout.level,
        layout.body_count()
    );
}
