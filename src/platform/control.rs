//! Player input and movement systems.
//!
//! ## Pipeline (runs in order every `Update` frame while playing)
//!
//! 1. [`platform_intent_clear_system`]: resets `PlatformIntent` and `ExternalForce`.
//! 2. [`keyboard_to_intent_system`]: arrows into `PlatformIntent`; Up release re-arms the jump.
//! 3. [`apply_platform_intent_system`]: `PlatformIntent` into `ExternalForce` / `Velocity`.
//!
//! Tests populate `PlatformIntent` directly and run only the apply step.

use super::state::{Ground, JumpLatch, Player, PlatformIntent, PlatformSession};
use crate::config::GameConfig;
use crate::energy::{drive_force, max_drive_speed, probe_hits_ground};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

// ── Step 1: Clear ─────────────────────────────────────────────────────────────

pub fn platform_intent_clear_system(
    mut q: Query<&mut ExternalForce, With<Player>>,
    mut intent: ResMut<PlatformIntent>,
) {
    if let Ok(mut force) = q.single_mut() {
        force.force = Vec2::ZERO;
        force.torque = 0.0;
    }
    *intent = PlatformIntent::default();
}

// ── Step 2: Keyboard → Intent ─────────────────────────────────────────────────

/// - **←** / **→** held → `left` / `right`
/// - **↑** held → `jump`
/// - **↑** released → re-arm [`JumpLatch`]
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<PlatformIntent>,
    mut latch: ResMut<JumpLatch>,
) {
    intent.left = keys.pressed(KeyCode::ArrowLeft);
    intent.right = keys.pressed(KeyCode::ArrowRight);
    intent.jump = keys.pressed(KeyCode::ArrowUp);
    if keys.just_released(KeyCode::ArrowUp) {
        latch.armed = true;
    }
}

// ── Step 3: Apply intent → physics ───────────────────────────────────────────

/// Convert [`PlatformIntent`] into `ExternalForce` and `Velocity` on the
/// player.
///
/// | Intent  | Physics effect                                                     |
/// |---------|--------------------------------------------------------------------|
/// | `left`  | `force.x -= drive_force(mass)` while `vx > -max_drive_speed(mass)` |
/// | `right` | `force.x += drive_force(mass)` while `vx <  max_drive_speed(mass)` |
/// | `jump`  | `linvel.y = jump_speed` if the latch is armed and the probe hits ground |
pub fn apply_platform_intent_system(
    mut q: Query<(&Transform, &mut ExternalForce, &mut Velocity), With<Player>>,
    grounds: Query<(&Transform, &Ground), Without<Player>>,
    intent: Res<PlatformIntent>,
    mut latch: ResMut<JumpLatch>,
    session: Res<PlatformSession>,
    config: Res<GameConfig>,
) {
    let Ok((transform, mut force, mut velocity)) = q.single_mut() else {
        return;
    };

    let mass = session.player_mass;
    let push = drive_force(
        mass,
        config.player_base_mass,
        config.drive_force_per_base_kg,
        config.drive_force_per_extra_kg,
    );
    let cap = config.per_tick_to_px_s(max_drive_speed(
        mass,
        config.player_base_mass,
        config.max_drive_speed,
        config.max_drive_speed_per_extra_kg,
    ));

    if intent.left && velocity.linvel.x > -cap {
        force.force.x -= push;
    }
    if intent.right && velocity.linvel.x < cap {
        force.force.x += push;
    }

    if intent.jump && latch.armed {
        let pos = transform.translation.truncate();
        let probe_center = pos - Vec2::new(0.0, config.ground_probe_offset);
        let probe_half = Vec2::new(config.ground_probe_width, config.ground_probe_height) * 0.5;
        let on_ground = probe_hits_ground(
            probe_center,
            probe_half,
            grounds
                .iter()
                .map(|(t, g)| (t.translation.truncate(), g.half)),
        );
        if on_ground {
            velocity.linvel.y = config.per_tick_to_px_s(config.jump_speed);
            latch.armed = false;
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        DRIVE_FORCE_PER_BASE_KG, DRIVE_FORCE_PER_EXTRA_KG, ENGINE_TICK_RATE, JUMP_SPEED,
        MAX_DRIVE_SPEED, PLAYER_BASE_MASS,
    };

    // ── helpers ───────────────────────────────────────────────────────────────

    /// Minimal app with the resources `apply_platform_intent_system` reads;
    /// no window, renderer or physics.
    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(PlatformIntent::default());
        app.insert_resource(JumpLatch::default());
        app.insert_resource(PlatformSession::default());
        app.insert_resource(GameConfig::default());
        app.add_systems(Update, apply_platform_intent_system);
        app
    }

    /// Player at the origin standing on a floor whose top edge is 20 px below.
    fn spawn_player_on_floor(app: &mut App, linvel: Vec2) -> Entity {
        app.world_mut().spawn((
            Transform::from_translation(Vec3::new(0.0, -30.0, 0.0)),
            Ground {
                half: Vec2::new(400.0, 10.0),
            },
        ));
        spawn_player(app, linvel)
    }

    fn spawn_player(app: &mut App, linvel: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                Transform::default(),
                ExternalForce::default(),
                Velocity::linear(linvel),
            ))
            .id()
    }

    fn run_apply(app: &mut App, intent: PlatformIntent) {
        app.insert_resource(intent);
        app.update();
    }

    fn force_of(app: &App, player: Entity) -> Vec2 {
        app.world().get::<ExternalForce>(player).unwrap().force
    }

    fn linvel_of(app: &App, player: Entity) -> Vec2 {
        app.world().get::<Velocity>(player).unwrap().linvel
    }

    // ── drive ─────────────────────────────────────────────────────────────────

    #[test]
    fn right_pushes_with_base_drive_force() {
        let mut app = build_test_app();
        let player = spawn_player_on_floor(&mut app, Vec2::ZERO);

        run_apply(
            &mut app,
            PlatformIntent {
                right: true,
                ..Default::default()
            },
        );

        let expected = DRIVE_FORCE_PER_BASE_KG * PLAYER_BASE_MASS;
        let force = force_of(&app, player);
        assert!(
            (force.x - expected).abs() < 1e-3 && force.y == 0.0,
            "expected ({expected}, 0), got {force:?}"
        );
    }

    #[test]
    fn left_pushes_in_negative_x() {
        let mut app = build_test_app();
        let player = spawn_player_on_floor(&mut app, Vec2::ZERO);

        run_apply(
            &mut app,
            PlatformIntent {
                left: true,
                ..Default::default()
            },
        );

        assert!(force_of(&app, player).x < 0.0);
    }

    #[test]
    fn extra_mass_adds_reduced_force() {
        let mut app = build_test_app();
        app.world_mut()
            .resource_mut::<PlatformSession>()
            .collect_bonus(3.0);
        let player = spawn_player_on_floor(&mut app, Vec2::ZERO);

        run_apply(
            &mut app,
            PlatformIntent {
                right: true,
                ..Default::default()
            },
        );

        let expected =
            DRIVE_FORCE_PER_BASE_KG * PLAYER_BASE_MASS + DRIVE_FORCE_PER_EXTRA_KG * 3.0;
        assert!((force_of(&app, player).x - expected).abs() < 1e-3);
    }

    #[test]
    fn no_drive_at_speed_cap() {
        let mut app = build_test_app();
        let at_cap = Vec2::new(MAX_DRIVE_SPEED * ENGINE_TICK_RATE, 0.0);
        let player = spawn_player_on_floor(&mut app, at_cap);

        run_apply(
            &mut app,
            PlatformIntent {
                right: true,
                ..Default::default()
            },
        );
        assert_eq!(force_of(&app, player), Vec2::ZERO);
    }

    #[test]
    fn speed_cap_only_blocks_its_own_direction() {
        let mut app = build_test_app();
        let at_cap = Vec2::new(MAX_DRIVE_SPEED * ENGINE_TICK_RATE, 0.0);
        let player = spawn_player_on_floor(&mut app, at_cap);

        run_apply(
            &mut app,
            PlatformIntent {
                left: true,
                ..Default::default()
            },
        );
        assert!(force_of(&app, player).x < 0.0, "braking must still work at the cap");
    }

    #[test]
    fn no_intent_leaves_force_zero() {
        let mut app = build_test_app();
        let player = spawn_player_on_floor(&mut app, Vec2::ZERO);
        run_apply(&mut app, PlatformIntent::default());
        assert_eq!(force_of(&app, player), Vec2::ZERO);
    }

    // ── jump ──────────────────────────────────────────────────────────────────

    #[test]
    fn jump_on_ground_sets_vertical_speed_and_disarms() {
        let mut app = build_test_app();
        let player = spawn_player_on_floor(&mut app, Vec2::new(12.0, 0.0));

        run_apply(
            &mut app,
            PlatformIntent {
                jump: true,
                ..Default::default()
            },
        );

        let v = linvel_of(&app, player);
        assert!((v.y - JUMP_SPEED * ENGINE_TICK_RATE).abs() < 1e-3);
        assert_eq!(v.x, 12.0, "jump keeps horizontal velocity");
        assert!(!app.world().resource::<JumpLatch>().armed);
    }

    #[test]
    fn held_jump_does_not_repeat_until_rearmed() {
        let mut app = build_test_app();
        let player = spawn_player_on_floor(&mut app, Vec2::ZERO);
        let hold = PlatformIntent {
            jump: true,
            ..Default::default()
        };

        run_apply(&mut app, hold);
        app.world_mut().get_mut::<Velocity>(player).unwrap().linvel = Vec2::ZERO;
        run_apply(&mut app, hold);
        assert_eq!(linvel_of(&app, player).y, 0.0);

        app.world_mut().resource_mut::<JumpLatch>().armed = true;
        run_apply(&mut app, hold);
        assert!(linvel_of(&app, player).y > 0.0);
    }

    #[test]
    fn no_jump_in_mid_air() {
        let mut app = build_test_app();
        let player = spawn_player(&mut app, Vec2::ZERO);

        run_apply(
            &mut app,
            PlatformIntent {
                jump: true,
                ..Default::default()
            },
        );

        assert_eq!(linvel_of(&app, player).y, 0.0);
        assert!(app.world().resource::<JumpLatch>().armed);
    }

    #[test]
    fn sensors_without_ground_tag_do_not_count() {
        let mut app = build_test_app();
        // A bonus-like body right under the player, but not tagged `Ground`.
        app.world_mut().spawn((
            Transform::from_translation(Vec3::new(0.0, -30.0, 0.0)),
            Sensor,
        ));
        let player = spawn_player(&mut app, Vec2::ZERO);

        run_apply(
            &mut app,
            PlatformIntent {
                jump: true,
                ..Default::default()
            },
        );
        assert_eq!(linvel_of(&app, player).y, 0.0);
    }

    // ── keyboard ──────────────────────────────────────────────────────────────

    #[test]
    fn releasing_up_rearms_the_latch() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(PlatformIntent::default());
        app.insert_resource(JumpLatch { armed: false });
        app.insert_resource(ButtonInput::<KeyCode>::default());
        app.add_systems(Update, keyboard_to_intent_system);

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::ArrowUp);
            keys.press(KeyCode::ArrowRight);
        }
        app.update();
        let intent = *app.world().resource::<PlatformIntent>();
        assert!(intent.jump && intent.right && !intent.left);
        assert!(!app.world().resource::<JumpLatch>().armed);

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.clear();
            keys.release(KeyCode::ArrowUp);
        }
        app.update();
        assert!(app.world().resource::<JumpLatch>().armed);
    }
}
