//! Work and energy bookkeeping.
//!
//! Everything here is a pure function of engine-provided positions and
//! velocities; no ECS access.  Speeds are in px/tick unless noted.

use bevy::math::Vec2;

/// Accumulated friction work done on the pushed box (J).
///
/// Only ever increases: each tick adds `μ · m · g · |vx| · dt` while the box is
/// sliding, and nothing otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrictionWork {
    total: f32,
}

impl FrictionWork {
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Add one tick of work.  Returns the amount added.
    ///
    /// `speed` is the full box speed and gates the update against
    /// `sliding_threshold`; only the horizontal component `vx` contributes to
    /// the distance travelled.
    #[allow(clippy::too_many_arguments)]
    pub fn accumulate(
        &mut self,
        mu: f32,
        box_mass: f32,
        gravity: f32,
        vx: f32,
        speed: f32,
        dt: f32,
        sliding_threshold: f32,
    ) -> f32 {
        if speed < sliding_threshold {
            return 0.0;
        }
        let distance = (vx * dt).abs();
        if distance <= 0.0 {
            return 0.0;
        }
        let added = mu * box_mass * gravity * distance;
        self.total += added;
        added
    }

    pub fn reset(&mut self) {
        self.total = 0.0;
    }
}

/// Energy the player had to spend to deliver `work` at `efficiency`.
#[inline]
pub fn energy_expended(work: f32, efficiency: f32) -> f32 {
    work / efficiency
}

/// Elastic potential energy `½ k x²`.
#[inline]
pub fn spring_potential_energy(k: f32, stretch_m: f32) -> f32 {
    0.5 * k * stretch_m * stretch_m
}

/// Kinetic energy `½ m v²`.
#[inline]
pub fn kinetic_energy(mass: f32, speed: f32) -> f32 {
    0.5 * mass * speed * speed
}

/// `work / input` as a percentage, 0 when there was no input.
#[inline]
pub fn efficiency_percent(work: f32, input: f32) -> f32 {
    if input > 0.0 {
        work / input * 100.0
    } else {
        0.0
    }
}

/// Limit `pos` to a circle of radius `max` around `anchor`.
///
/// Returns the clamped position and its distance from the anchor.
pub fn clamp_stretch(anchor: Vec2, pos: Vec2, max: f32) -> (Vec2, f32) {
    let offset = pos - anchor;
    let distance = offset.length();
    if distance > max {
        (anchor + offset / distance * max, max)
    } else {
        (pos, distance)
    }
}

/// Release velocity for a projectile held at `pos`.
///
/// Points from the projectile toward the anchor and scales with the stretch,
/// reaching `launch_speed` at `max_stretch`.  Zero when the projectile sits on
/// the anchor.
pub fn launch_velocity(anchor: Vec2, pos: Vec2, max_stretch: f32, launch_speed: f32) -> Vec2 {
    let pull = anchor - pos;
    let distance = pull.length();
    if distance <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let power = (distance / max_stretch).min(1.0);
    pull / distance * launch_speed * power
}

/// Drive force for a player of `mass`: full rate for the base mass and a
/// reduced rate for every bonus kilogram on top of it.
pub fn drive_force(mass: f32, base_mass: f32, per_base_kg: f32, per_extra_kg: f32) -> f32 {
    let extra = mass - base_mass;
    per_base_kg * base_mass + per_extra_kg * extra
}

/// Speed cap while driving (px/tick).
pub fn max_drive_speed(mass: f32, base_mass: f32, base_speed: f32, per_extra_kg: f32) -> f32 {
    base_speed + (mass - base_mass) * per_extra_kg
}

/// Axis-aligned overlap of the ground probe against ground extents.
///
/// `grounds` yields `(centre, half_extents)` in the same space as the probe.
pub fn probe_hits_ground(
    probe_center: Vec2,
    probe_half: Vec2,
    grounds: impl IntoIterator<Item = (Vec2, Vec2)>,
) -> bool {
    grounds.into_iter().any(|(center, half)| {
        let d = (probe_center - center).abs();
        d.x < probe_half.x + half.x && d.y < probe_half.y + half.y
    })
}
