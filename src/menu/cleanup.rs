use super::*;

use crate::session::LevelEntity;

/// Despawn every level body, the HUD, and live particles, then reset the
/// per-run resources so the next game starts clean.
///
/// Runs on `OnEnter(MainMenu)`.  The Rapier pipeline is left disabled; it is
/// switched back on by `resume_physics` when a level is entered again.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn cleanup_game_world(
    mut commands: Commands,
    world_entities: Query<
        Entity,
        Or<(
            With<LevelEntity>,
            With<crate::hud::HudRoot>,
            With<crate::particles::Particle>,
        )>,
    >,
    mut level: ResMut<CurrentLevel>,
    mut clock: ResMut<LevelClock>,
    mut times: ResMut<LevelTimes>,
    mut counters: ResMut<RunCounters>,
    mut summary: ResMut<LevelSummary>,
    mut platform: ResMut<crate::platform::PlatformSession>,
    mut slingshot: ResMut<crate::slingshot::SlingshotSession>,
    mut rapier_config: Query<&mut RapierConfiguration>,
) {
    for e in world_entities.iter() {
        commands.entity(e).despawn();
    }
    *level = CurrentLevel::default();
    *clock = LevelClock::default();
    times.clear();
    *counters = RunCounters::default();
    *summary = LevelSummary::default();
    *platform = crate::platform::PlatformSession::default();
    *slingshot = crate::slingshot::SlingshotSession::default();
    for mut cfg in rapier_config.iter_mut() {
        cfg.physics_pipeline_active = false;
    }
}
