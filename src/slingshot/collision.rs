//! First projectile-box contact of a launch.

use super::state::{SlingBox, SlingProjectile, SlingshotSession};
use crate::config::GameConfig;
use crate::particles::spawn_impact_particles;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Record impact work on the first projectile-box contact after a launch.
///
/// Later contacts of the same launch are ignored by
/// [`SlingshotSession::register_impact`].
pub fn impact_system(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionEvent>,
    q_projectile: Query<(Entity, &Transform, &Velocity), With<SlingProjectile>>,
    q_boxes: Query<&Transform, (With<SlingBox>, Without<SlingProjectile>)>,
    config: Res<GameConfig>,
    mut session: ResMut<SlingshotSession>,
) {
    let Ok((projectile, projectile_tf, velocity)) = q_projectile.single() else {
        collision_events.clear();
        return;
    };

    for event in collision_events.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };
        let box_entity = if *e1 == projectile {
            *e2
        } else if *e2 == projectile {
            *e1
        } else {
            continue;
        };
        let Ok(box_tf) = q_boxes.get(box_entity) else {
            continue;
        };
        if !session.register_impact(config.impact_work_fraction) {
            continue;
        }

        let contact = (projectile_tf.translation.truncate() + box_tf.translation.truncate()) * 0.5;
        spawn_impact_particles(&mut commands, contact, velocity.linvel.normalize_or_zero());
        info!(
            "[slingshot] impact: {:.2} J delivered, efficiency {:.0}%",
            session.impact_work, session.efficiency
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::Particle;
    use crate::slingshot::state::LaunchPhase;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    fn impact_test_app() -> (App, Entity, Entity, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<CollisionEvent>();
        app.insert_resource(GameConfig::default());

        let mut session = SlingshotSession::default();
        session.begin_drag();
        session.update_drag(120.0, 50.0, 100.0);
        session.release(120.0, 10.0, 0.05, 5.0);
        assert_eq!(session.phase, LaunchPhase::Launched);
        app.insert_resource(session);
        app.add_systems(Update, impact_system);

        let projectile = app
            .world_mut()
            .spawn((
                SlingProjectile,
                Transform::default(),
                Velocity::linear(Vec2::new(480.0, 0.0)),
            ))
            .id();
        let tower_box = app
            .world_mut()
            .spawn((SlingBox, Transform::from_xyz(40.0, 0.0, 0.0)))
            .id();
        let obstacle = app.world_mut().spawn(Transform::from_xyz(0.0, -40.0, 0.0)).id();
        (app, projectile, tower_box, obstacle)
    }

    fn particle_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<Particle>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn first_box_contact_records_three_quarters_of_launch_energy() {
        let (mut app, projectile, tower_box, _) = impact_test_app();
        app.world_mut().write_message(CollisionEvent::Started(
            tower_box,
            projectile,
            CollisionEventFlags::empty(),
        ));
        app.update();

        let session = app.world().resource::<SlingshotSession>();
        // 0.5 * 50 * 1.2^2 = 36 J stored, 27 J delivered.
        assert!((session.impact_work - 27.0).abs() < 1e-3);
        assert!((session.efficiency - 75.0).abs() < 1e-3);
        assert!(particle_count(&mut app) > 0);
    }

    #[test]
    fn second_contact_does_not_change_the_work() {
        let (mut app, projectile, tower_box, _) = impact_test_app();
        app.world_mut().write_message(CollisionEvent::Started(
            projectile,
            tower_box,
            CollisionEventFlags::empty(),
        ));
        app.update();
        let first = app.world().resource::<SlingshotSession>().impact_work;

        app.world_mut().resource_mut::<SlingshotSession>().launch_kinetic = 100.0;
        app.world_mut().write_message(CollisionEvent::Started(
            projectile,
            tower_box,
            CollisionEventFlags::empty(),
        ));
        app.update();
        assert_eq!(app.world().resource::<SlingshotSession>().impact_work, first);
    }

    #[test]
    fn contact_with_non_box_is_ignored() {
        let (mut app, projectile, _, obstacle) = impact_test_app();
        app.world_mut().write_message(CollisionEvent::Started(
            projectile,
            obstacle,
            CollisionEventFlags::empty(),
        ));
        app.update();

        assert_eq!(app.world().resource::<SlingshotSession>().impact_work, 0.0);
        assert_eq!(particle_count(&mut app), 0);
    }
}
