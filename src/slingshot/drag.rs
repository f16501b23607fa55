//! Mouse drag of the projectile: grab, stretch, release.
//!
//! While held the projectile is switched to a kinematic body and follows the
//! cursor, clamped to `max_stretch` around the anchor.  Releasing hands it
//! back to the engine as a dynamic body with the launch velocity.  The
//! cursor is projected once per frame into [`DragCursor`] so the drag
//! systems never touch the window or camera.

use super::state::{LaunchPhase, SlingAnchor, SlingProjectile, SlingshotSession};
use crate::config::GameConfig;
use crate::energy::{clamp_stretch, launch_velocity};
use crate::menu::RunCounters;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

/// Extra pick-up tolerance around the projectile (px).
pub const GRAB_MARGIN: f32 = 8.0;

/// Cursor position in world space, `None` when it is outside the window.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DragCursor(pub Option<Vec2>);

/// Project the window cursor into world space for the drag systems.
pub fn cursor_to_world_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut cursor: ResMut<DragCursor>,
) {
    let world = windows
        .single()
        .ok()
        .and_then(Window::cursor_position)
        .zip(cameras.single().ok())
        .and_then(|(screen, (camera, camera_transform))| {
            camera.viewport_to_world_2d(camera_transform, screen).ok()
        });
    if cursor.0 != world {
        cursor.0 = world;
    }
}

/// Left press on the projectile while ready starts a drag.
pub fn drag_start_system(
    mouse: Res<ButtonInput<MouseButton>>,
    cursor: Res<DragCursor>,
    mut q_projectile: Query<(&Transform, &mut RigidBody, &mut Velocity), With<SlingProjectile>>,
    mut session: ResMut<SlingshotSession>,
    config: Res<GameConfig>,
) {
    if !mouse.just_pressed(MouseButton::Left) || session.phase != LaunchPhase::Ready {
        return;
    }
    let Some(cursor) = cursor.0 else {
        return;
    };
    let Ok((transform, mut body, mut velocity)) = q_projectile.single_mut() else {
        return;
    };
    let grab_radius = config.projectile_radius + GRAB_MARGIN;
    if transform.translation.truncate().distance(cursor) > grab_radius {
        return;
    }
    if session.begin_drag() {
        *body = RigidBody::KinematicPositionBased;
        *velocity = Velocity::zero();
    }
}

/// Move the held projectile to the cursor and refresh the band energy.
#[allow(clippy::type_complexity)]
pub fn drag_update_system(
    mouse: Res<ButtonInput<MouseButton>>,
    cursor: Res<DragCursor>,
    q_anchor: Query<&Transform, (With<SlingAnchor>, Without<SlingProjectile>)>,
    mut q_projectile: Query<&mut Transform, With<SlingProjectile>>,
    mut session: ResMut<SlingshotSession>,
    config: Res<GameConfig>,
) {
    if session.phase != LaunchPhase::Dragging || !mouse.pressed(MouseButton::Left) {
        return;
    }
    let Some(cursor) = cursor.0 else {
        return;
    };
    let (Ok(anchor), Ok(mut transform)) = (q_anchor.single(), q_projectile.single_mut()) else {
        return;
    };
    let (pos, stretch) = clamp_stretch(anchor.translation.truncate(), cursor, config.max_stretch);
    transform.translation.x = pos.x;
    transform.translation.y = pos.y;
    session.update_drag(stretch, config.spring_k, config.stretch_px_per_meter);
}

/// Left release while dragging: launch when stretched far enough, otherwise
/// let the band pull the projectile back.
#[allow(clippy::type_complexity)]
pub fn drag_release_system(
    mouse: Res<ButtonInput<MouseButton>>,
    q_anchor: Query<&Transform, (With<SlingAnchor>, Without<SlingProjectile>)>,
    mut q_projectile: Query<(&Transform, &mut RigidBody, &mut Velocity), With<SlingProjectile>>,
    mut session: ResMut<SlingshotSession>,
    mut counters: ResMut<RunCounters>,
    config: Res<GameConfig>,
) {
    if session.phase != LaunchPhase::Dragging || !mouse.just_released(MouseButton::Left) {
        return;
    }
    let (Ok(anchor), Ok((transform, mut body, mut velocity))) =
        (q_anchor.single(), q_projectile.single_mut())
    else {
        return;
    };
    let anchor = anchor.translation.truncate();
    let pos = transform.translation.truncate();
    let stretch = pos.distance(anchor);

    *body = RigidBody::Dynamic;
    let launched = session.release(
        stretch,
        config.min_launch_stretch,
        config.band_detach_delay,
        config.last_attempt_timeout,
    );
    if !launched {
        return;
    }

    let per_tick = launch_velocity(anchor, pos, config.max_stretch, config.launch_speed);
    velocity.linvel = per_tick * config.engine_tick_rate;
    counters.launches += 1;
    info!(
        "[slingshot] launch {} (stretch {:.0}px, {:.1} px/tick), {} attempts left",
        counters.launches,
        stretch,
        per_tick.length(),
        session.attempts_left
    );
}
