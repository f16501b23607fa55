//! Everything that happens after release: per-tick energy readouts, band
//! detachment, rest detection, the last-attempt timeout and the victory
//! check.

use super::spawn::spawn_projectile;
use super::state::{
    GoalBox, LaunchPhase, RestOutcome, SlingAnchor, SlingProjectile, SlingshotSession,
};
use crate::config::GameConfig;
use crate::levels::{slingshot_canvas, world_to_canvas};
use crate::menu::GameState;
use crate::particles::spawn_celebration_particles;
use crate::session::{format_time, CurrentLevel, LevelClock, LevelSummary, LevelTimes};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Refresh speed and kinetic energy from the engine velocity.
pub fn flight_stats_system(
    q_projectile: Query<&Velocity, With<SlingProjectile>>,
    config: Res<GameConfig>,
    mut session: ResMut<SlingshotSession>,
) {
    if session.phase != LaunchPhase::Launched {
        return;
    }
    let Ok(velocity) = q_projectile.single() else {
        return;
    };
    let speed = config.px_s_to_per_tick(velocity.linvel.length());
    session.update_flight(
        speed,
        config.projectile_energy_mass,
        config.velocity_px_per_meter,
    );
}

/// Cut the band shortly after launch so the projectile flies free.
pub fn band_detach_system(
    mut commands: Commands,
    time: Res<Time>,
    q_projectile: Query<Entity, (With<SlingProjectile>, With<ImpulseJoint>)>,
    mut session: ResMut<SlingshotSession>,
) {
    if !session.tick_band(time.delta_secs()) {
        return;
    }
    for projectile in q_projectile.iter() {
        commands.entity(projectile).remove::<ImpulseJoint>();
    }
}

/// Watch the launched projectile come to rest.  Puts a fresh projectile on
/// the band while attempts remain and ends the level otherwise.  Nothing is
/// ticked until both the projectile and the anchor exist.
#[allow(clippy::too_many_arguments)]
pub fn rest_detection_system(
    mut commands: Commands,
    time: Res<Time>,
    q_projectile: Query<(Entity, &Velocity), With<SlingProjectile>>,
    q_anchor: Query<(Entity, &Transform), With<SlingAnchor>>,
    config: Res<GameConfig>,
    mut session: ResMut<SlingshotSession>,
    mut clock: ResMut<LevelClock>,
    mut summary: ResMut<LevelSummary>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let (Ok((projectile, velocity)), Ok((anchor, anchor_tf))) =
        (q_projectile.single(), q_anchor.single())
    else {
        return;
    };
    let speed = config.px_s_to_per_tick(velocity.linvel.length());
    match session.tick_rest(
        speed,
        config.stopped_speed,
        config.stopped_delay,
        time.delta_secs(),
    ) {
        RestOutcome::Waiting => {}
        RestOutcome::ResetProjectile => {
            commands.entity(projectile).despawn();
            spawn_projectile(
                &mut commands,
                anchor,
                anchor_tf.translation.truncate(),
                &config,
            );
            info!(
                "[slingshot] projectile at rest, {} attempts left",
                session.attempts_left
            );
        }
        RestOutcome::GameOver => {
            end_in_defeat(&mut clock, &session, &mut summary, &mut next_state);
        }
    }
}

/// Force a loss when the last launch has not won within the timeout.
pub fn last_attempt_timeout_system(
    time: Res<Time>,
    mut session: ResMut<SlingshotSession>,
    mut clock: ResMut<LevelClock>,
    mut summary: ResMut<LevelSummary>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if session.tick_last_attempt(time.delta_secs()) {
        end_in_defeat(&mut clock, &session, &mut summary, &mut next_state);
    }
}

fn end_in_defeat(
    clock: &mut LevelClock,
    session: &SlingshotSession,
    summary: &mut LevelSummary,
    next_state: &mut NextState<GameState>,
) {
    let secs = clock.stop();
    *summary = LevelSummary {
        lines: vec![
            format!("Time: {}", format_time(Some(secs))),
            format!(
                "Launches: {}/{}",
                session.attempts_used(),
                session.max_attempts
            ),
        ],
    };
    info!("[slingshot] out of attempts after {secs:.1}s");
    next_state.set(GameState::GameOver);
}

/// Goal box fell past the threshold while a launch is in progress.
#[allow(clippy::too_many_arguments)]
pub fn victory_system(
    mut commands: Commands,
    q_goal: Query<&Transform, With<GoalBox>>,
    level: Res<CurrentLevel>,
    config: Res<GameConfig>,
    mut session: ResMut<SlingshotSession>,
    mut clock: ResMut<LevelClock>,
    mut times: ResMut<LevelTimes>,
    mut summary: ResMut<LevelSummary>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if session.phase != LaunchPhase::Launched {
        return;
    }
    let Ok(goal) = q_goal.single() else {
        return;
    };
    let world = goal.translation.truncate();
    let canvas_y = world_to_canvas(world, slingshot_canvas()).y;
    if canvas_y <= config.goal_fall_threshold || !session.win() {
        return;
    }

    clock.stop();
    let secs = clock.rounded();
    times.record(level.0, secs);
    *summary = slingshot_summary(secs, &session);
    spawn_celebration_particles(&mut commands, world);
    info!(
        "[slingshot] level {} complete in {secs:.1}s with {} launch(es)",
        level.0,
        session.attempts_used()
    );
    next_state.set(GameState::LevelComplete);
}

/// Dialog lines for a won slingshot level.
pub fn slingshot_summary(secs: f32, session: &SlingshotSession) -> LevelSummary {
    LevelSummary {
        lines: vec![
            format!("Time: {}", format_time(Some(secs))),
            format!("Work on impact: {:.2} J", session.impact_work),
            format!(
                "Launches: {}/{}",
                session.attempts_used(),
                session.max_attempts
            ),
            format!("Efficiency: {:.0}%", session.efficiency),
        ],
    }
}

/// Draw the band from the anchor to the projectile while it is attached.
pub fn band_gizmo_system(
    mut gizmos: Gizmos,
    q_anchor: Query<&Transform, With<SlingAnchor>>,
    q_projectile: Query<&Transform, (With<SlingProjectile>, With<ImpulseJoint>)>,
) {
    let Ok(anchor) = q_anchor.single() else {
        return;
    };
    for projectile in q_projectile.iter() {
        gizmos.line_2d(
            anchor.translation.truncate(),
            projectile.translation.truncate(),
            Color::srgb(0.55, 0.36, 0.2),
        );
    }
}
