//! Short-lived particle bursts: bonus pickups, projectile impacts, and the
//! level-complete confetti.
//!
//! Spawners only need `&mut Commands`.  The shared dot mesh and a private
//! material are attached the frame after spawn, and each particle then
//! drifts, fades out quadratically, and despawns when its lifetime is up.
//!
//! | System                        | Purpose                                  |
//! |-------------------------------|------------------------------------------|
//! | `attach_particle_mesh_system` | Give new particles a mesh and material   |
//! | `particle_update_system`      | Drift, fade, despawn                     |

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::Range;

const PARTICLE_RADIUS: f32 = 3.0;
const PARTICLE_SIDES: u32 = 8;
const PARTICLE_Z: f32 = 0.9;

/// Dot mesh shared by every particle.
#[derive(Resource)]
pub struct ParticleMesh(pub Handle<Mesh>);

#[derive(Component)]
pub struct Particle {
    /// px/s
    pub velocity: Vec2,
    pub age: f32,
    pub lifetime: f32,
    /// sRGB base colour; alpha is driven by age.
    pub rgb: [f32; 3],
    /// Own material so the fade does not affect other particles.
    pub material: Option<Handle<ColorMaterial>>,
}

impl Particle {
    fn new(velocity: Vec2, lifetime: f32, rgb: [f32; 3]) -> Self {
        Self {
            velocity,
            age: 0.0,
            lifetime,
            rgb,
            material: None,
        }
    }

    fn color(&self, alpha: f32) -> Color {
        let [r, g, b] = self.rgb;
        Color::srgba(r, g, b, alpha)
    }

    /// Remaining opacity, `(1 - t)²` over the lifetime.
    fn alpha(&self) -> f32 {
        let t = (self.age / self.lifetime).clamp(0.0, 1.0);
        (1.0 - t) * (1.0 - t)
    }
}

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, create_particle_mesh).add_systems(
            Update,
            (attach_particle_mesh_system, particle_update_system).chain(),
        );
    }
}

fn create_particle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(fan_disc(PARTICLE_RADIUS, PARTICLE_SIDES));
    commands.insert_resource(ParticleMesh(handle));
}

pub fn attach_particle_mesh_system(
    mut commands: Commands,
    particle_mesh: Res<ParticleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut fresh: Query<(Entity, &mut Particle), Added<Particle>>,
) {
    for (entity, mut particle) in fresh.iter_mut() {
        let material = materials.add(ColorMaterial::from_color(particle.color(1.0)));
        particle.material = Some(material.clone());
        commands.entity(entity).insert((
            Mesh2d(particle_mesh.0.clone()),
            MeshMaterial2d(material),
        ));
    }
}

pub fn particle_update_system(
    mut commands: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut particles: Query<(Entity, &mut Transform, &mut Particle)>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut particle) in particles.iter_mut() {
        particle.age += dt;
        if particle.age >= particle.lifetime {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation += (particle.velocity * dt).extend(0.0);

        let faded = particle.color(particle.alpha());
        if let Some(material) = particle
            .material
            .as_ref()
            .and_then(|handle| materials.get_mut(handle))
        {
            material.color = faded;
        }
    }
}

// ── Bursts ────────────────────────────────────────────────────────────────────

/// Shape of one burst; every particle draws its own values from the ranges.
struct Burst {
    count: usize,
    /// Direction range (radians).
    angle: Range<f32>,
    speed: Range<f32>,
    lifetime: Range<f32>,
    /// Half size of the square the particles start in (px).
    jitter: Vec2,
}

fn spawn_burst(
    commands: &mut Commands,
    origin: Vec2,
    burst: Burst,
    mut pick_rgb: impl FnMut(usize, &mut rand::rngs::ThreadRng) -> [f32; 3],
) {
    let mut rng = rand::thread_rng();
    for i in 0..burst.count {
        let heading = rng.gen_range(burst.angle.clone());
        let velocity = Vec2::from_angle(heading) * rng.gen_range(burst.speed.clone());
        let lifetime = rng.gen_range(burst.lifetime.clone());
        let offset = if burst.jitter == Vec2::ZERO {
            Vec2::ZERO
        } else {
            Vec2::new(
                rng.gen_range(-burst.jitter.x..=burst.jitter.x),
                rng.gen_range(-burst.jitter.y..=burst.jitter.y),
            )
        };
        let rgb = pick_rgb(i, &mut rng);

        commands.spawn((
            Particle::new(velocity, lifetime, rgb),
            Transform::from_translation((origin + offset).extend(PARTICLE_Z)),
            Visibility::default(),
        ));
    }
}

/// Lime ring where the player picked up a bonus.
pub fn spawn_pickup_particles(commands: &mut Commands, pos: Vec2) {
    let burst = Burst {
        count: 12,
        angle: 0.0..TAU,
        speed: 40.0..110.0,
        lifetime: 0.30..0.55,
        jitter: Vec2::ZERO,
    };
    spawn_burst(commands, pos, burst, |_, rng| {
        [
            rng.gen_range(0.55..0.70),
            rng.gen_range(0.85..0.95),
            rng.gen_range(0.15..0.30),
        ]
    });
}

/// Orange sparks thrown back against `impact_dir`, the projectile's heading
/// at contact.
pub fn spawn_impact_particles(commands: &mut Commands, pos: Vec2, impact_dir: Vec2) {
    let back = (-impact_dir).try_normalize().unwrap_or(Vec2::Y);
    let centre = back.to_angle();
    let spread = FRAC_PI_2 * 0.78;
    let burst = Burst {
        count: 10,
        angle: (centre - spread)..(centre + spread),
        speed: 80.0..200.0,
        lifetime: 0.20..0.40,
        jitter: Vec2::splat(3.0),
    };
    spawn_burst(commands, pos, burst, |_, rng| {
        [
            rng.gen_range(0.90..1.0),
            rng.gen_range(0.50..0.75),
            rng.gen_range(0.0..0.20),
        ]
    });
}

/// Alternating green and gold confetti thrown upward on a win.
pub fn spawn_celebration_particles(commands: &mut Commands, center: Vec2) {
    let burst = Burst {
        count: 24,
        angle: (FRAC_PI_2 - 1.1)..(FRAC_PI_2 + 1.1),
        speed: 120.0..260.0,
        lifetime: 0.6..1.1,
        jitter: Vec2::new(12.0, 6.0),
    };
    spawn_burst(commands, center, burst, |i, rng| {
        if i % 2 == 0 {
            [0.13, rng.gen_range(0.70..0.85), 0.37]
        } else {
            [0.98, rng.gen_range(0.75..0.85), 0.14]
        }
    });
}

// ── Mesh ──────────────────────────────────────────────────────────────────────

/// Flat disc of `sides` triangles fanned around a centre vertex.
fn fan_disc(radius: f32, sides: u32) -> Mesh {
    let rim = (0..sides).map(|i| Vec2::from_angle(TAU * i as f32 / sides as f32) * radius);
    let points: Vec<Vec2> = std::iter::once(Vec2::ZERO).chain(rim).collect();

    let positions: Vec<[f32; 3]> = points.iter().map(|p| [p.x, p.y, 0.0]).collect();
    let normals = vec![[0.0, 0.0, 1.0]; points.len()];
    let uvs: Vec<[f32; 2]> = points
        .iter()
        .map(|p| [0.5 + p.x / (2.0 * radius), 0.5 + p.y / (2.0 * radius)])
        .collect();
    let indices: Vec<u32> = (1..=sides)
        .flat_map(|i| [0, i, i % sides + 1])
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_disc_closes_back_on_the_first_rim_vertex() {
        let mesh = fan_disc(3.0, 8);
        assert_eq!(mesh.count_vertices(), 9);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), 24);
        assert_eq!(&indices[..3], &[0, 1, 2]);
        assert_eq!(&indices[21..], &[0, 8, 1]);
    }

    #[test]
    fn alpha_fades_quadratically() {
        let mut particle = Particle::new(Vec2::ZERO, 2.0, [1.0; 3]);
        assert_eq!(particle.alpha(), 1.0);
        particle.age = 1.0;
        assert!((particle.alpha() - 0.25).abs() < 1e-6);
        particle.age = 5.0;
        assert_eq!(particle.alpha(), 0.0);
    }

    #[test]
    fn bursts_spawn_their_particle_counts() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, |mut commands: Commands| {
            spawn_pickup_particles(&mut commands, Vec2::ZERO);
            spawn_impact_particles(&mut commands, Vec2::ZERO, Vec2::X);
            spawn_celebration_particles(&mut commands, Vec2::ZERO);
        });
        app.update();

        let count = app
            .world_mut()
            .query::<&Particle>()
            .iter(app.world())
            .count();
        assert_eq!(count, 12 + 10 + 24);
    }

    #[test]
    fn expired_particles_are_despawned() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Assets<ColorMaterial>>();
        app.add_systems(Update, particle_update_system);

        let mut particle = Particle::new(Vec2::X, 1.0, [1.0; 3]);
        particle.age = 2.0;
        let e = app
            .world_mut()
            .spawn((particle, Transform::default()))
            .id();
        app.update();
        assert!(app.world().get_entity(e).is_err());
    }
}
