//! Bonus pickups, goal detection, and friction-work accounting.
//!
//! Pickup and goal both listen for Rapier `CollisionEvent::Started`; the
//! bonus and goal colliders are sensors, so the events fire on overlap.

use super::state::{Bonus, Goal, Player, PlatformSession, TargetBox};
use crate::config::GameConfig;
use crate::menu::GameState;
use crate::particles::{spawn_celebration_particles, spawn_pickup_particles};
use crate::session::{format_time, CurrentLevel, LevelClock, LevelSummary, LevelTimes};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Player overlaps a bonus: grow the player's mass and remove the bonus.
pub fn bonus_pickup_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_bonus: Query<(&Bonus, &Transform)>,
    q_player: Query<Entity, With<Player>>,
    mut session: ResMut<PlatformSession>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };
    let mut collected: Vec<Entity> = Vec::new();

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };

        let bonus_entity = if e2 == player && q_bonus.contains(e1) {
            e1
        } else if e1 == player && q_bonus.contains(e2) {
            e2
        } else {
            continue;
        };
        if collected.contains(&bonus_entity) {
            continue;
        }
        let Ok((bonus, transform)) = q_bonus.get(bonus_entity) else {
            continue;
        };

        let mass = session.collect_bonus(bonus.mass);
        commands
            .entity(player)
            .insert(ColliderMassProperties::Mass(mass));
        commands.entity(bonus_entity).despawn();
        spawn_pickup_particles(&mut commands, transform.translation.truncate());
        collected.push(bonus_entity);
        info!("[platform] bonus +{:.0} kg, player mass now {:.2} kg", bonus.mass, mass);
    }
}

/// Target box overlaps the goal: stop the clock, record the time, and open
/// the level-complete dialog.
#[allow(clippy::too_many_arguments)]
pub fn goal_reached_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_goal: Query<&Transform, With<Goal>>,
    q_box: Query<Entity, With<TargetBox>>,
    level: Res<CurrentLevel>,
    config: Res<GameConfig>,
    mut session: ResMut<PlatformSession>,
    mut clock: ResMut<LevelClock>,
    mut times: ResMut<LevelTimes>,
    mut summary: ResMut<LevelSummary>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };

        let goal_entity = if q_goal.contains(e1) && q_box.contains(e2) {
            e1
        } else if q_goal.contains(e2) && q_box.contains(e1) {
            e2
        } else {
            continue;
        };
        if session.completed {
            continue;
        }
        session.completed = true;

        clock.stop();
        let secs = clock.rounded();
        times.record(level.0, secs);
        *summary = platform_summary(secs, &session, config.player_efficiency);

        if let Ok(goal) = q_goal.get(goal_entity) {
            spawn_celebration_particles(&mut commands, goal.translation.truncate());
        }
        info!(
            "[platform] level {} complete in {secs:.1}s, work {:.2} J",
            level.0,
            session.work.total()
        );
        next_state.set(GameState::LevelComplete);
    }
}

/// Dialog lines for a completed platform level.
pub fn platform_summary(secs: f32, session: &PlatformSession, efficiency: f32) -> LevelSummary {
    LevelSummary {
        lines: vec![
            format!("Time: {}", format_time(Some(secs))),
            format!("Work done: {:.2} J", session.work.total()),
            format!("Energy spent: {:.2} J", session.energy),
            format!("Efficiency: {:.0}%", efficiency * 100.0),
        ],
    }
}

/// Accumulate friction work from the target box's engine velocity.
pub fn friction_work_system(
    q_box: Query<(&TargetBox, &Velocity)>,
    time: Res<Time>,
    config: Res<GameConfig>,
    mut session: ResMut<PlatformSession>,
) {
    let Ok((target, velocity)) = q_box.single() else {
        return;
    };
    let vx = config.px_s_to_per_tick(velocity.linvel.x);
    let speed = config.px_s_to_per_tick(velocity.linvel.length());
    session.add_work(
        config.box_friction,
        target.mass,
        config.real_gravity,
        vx,
        speed,
        time.delta_secs(),
        config.box_sliding_threshold,
        config.player_efficiency,
    );
}
