use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;
use std::env;

use energylab::config::{self, GameConfig};
use energylab::constants::{SLINGSHOT_CANVAS_HEIGHT, SLINGSHOT_CANVAS_WIDTH};
use energylab::graphics;
use energylab::hud::HudPlugin;
use energylab::menu::{GameState, MenuPlugin};
use energylab::particles::ParticlesPlugin;
use energylab::platform::PlatformPlugin;
use energylab::session::level_clock_system;
use energylab::slingshot::SlingshotPlugin;
use energylab::start_mode::{configure_start_mode, parse_start_spec, START_ENV_VAR};

/// Apply the configured gravity (px/s², pointing down).
fn setup_physics_config(game: Res<GameConfig>, mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::new(0.0, -game.gravity_px);
        cfg.physics_pipeline_active = false;
    }
}

fn main() {
    let start = env::var(START_ENV_VAR).ok();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "EnergyLab".into(),
            resolution: WindowResolution::new(
                SLINGSHOT_CANVAS_WIDTH as u32,
                SLINGSHOT_CANVAS_HEIGHT as u32,
            ),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .insert_resource(ClearColor(Color::srgb_u8(0x0f, 0x17, 0x2a)))
    // Compiled defaults; load_game_config overwrites them from
    // assets/game.toml (if present) in the Startup schedule.
    .insert_resource(GameConfig::default())
    // One world unit is one canvas pixel, so forces and masses are given
    // directly in px-based units.
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
    .add_plugins((
        MenuPlugin,
        PlatformPlugin,
        SlingshotPlugin,
        HudPlugin,
        ParticlesPlugin,
    ))
    .add_systems(
        Startup,
        (
            // Load config first so every other startup system sees the final values.
            config::load_game_config,
            graphics::setup_camera.after(config::load_game_config),
            setup_physics_config.after(config::load_game_config),
        ),
    )
    .add_systems(
        Update,
        (
            level_clock_system.run_if(in_state(GameState::Playing)),
            graphics::attach_body_mesh_system,
        ),
    );

    if let Some(spec) = start {
        match parse_start_spec(&spec) {
            Ok((game, level)) => configure_start_mode(&mut app, game, level),
            Err(e) => warn!("{e}; showing the main menu"),
        }
    }

    app.run();
}
