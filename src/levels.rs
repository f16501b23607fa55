//! Level layouts for both games.
//!
//! Layouts are plain data in **canvas coordinates** (origin top-left, y down),
//! which is how the levels were designed.  [`canvas_to_world`] maps them into
//! Bevy world space (origin centre, y up) at spawn time.

use bevy::prelude::*;
use bevy_rapier2d::prelude::Collider;

use crate::constants::{
    MAX_LEVEL, PLATFORM_CANVAS_HEIGHT, PLATFORM_CANVAS_WIDTH, SLINGSHOT_ANCHOR_X,
    SLINGSHOT_ANCHOR_Y, SLINGSHOT_CANVAS_HEIGHT, SLINGSHOT_CANVAS_WIDTH,
};
use crate::error::{validate_level, GameResult};

/// What a piece of a level is for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PieceRole {
    /// Standable surface (floor, steps).  Only these satisfy the ground probe.
    Ground,
    /// Side wall of the platform arena.
    Wall,
    Player,
    /// The box the player pushes into the goal.
    TargetBox { mass: f32 },
    /// Goal sensor.
    Goal,
    /// Sensor pickup that adds `mass` kilograms to the player.
    Bonus { mass: f32 },
    /// Closed arena edge of the slingshot (ground, ceiling, walls).
    Boundary,
    /// Static wall shielding the tower.
    Obstacle,
    /// Tower box.
    Box,
    /// Tower box that has to fall to win.
    GoalBox,
    Projectile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PieceShape {
    Rect { w: f32, h: f32 },
    Circle { r: f32 },
}

impl PieceShape {
    /// Half extents of the axis-aligned bounding box.
    pub fn half_extents(self) -> Vec2 {
        match self {
            PieceShape::Rect { w, h } => Vec2::new(w * 0.5, h * 0.5),
            PieceShape::Circle { r } => Vec2::splat(r),
        }
    }

    /// Engine collider matching the shape, centred on the body.
    pub fn collider(self) -> Collider {
        match self {
            PieceShape::Rect { w, h } => Collider::cuboid(w * 0.5, h * 0.5),
            PieceShape::Circle { r } => Collider::ball(r),
        }
    }
}

/// One body of a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub role: PieceRole,
    /// Centre in canvas coordinates.
    pub center: Vec2,
    pub shape: PieceShape,
}

impl Piece {
    fn rect(role: PieceRole, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            role,
            center: Vec2::new(x, y),
            shape: PieceShape::Rect { w, h },
        }
    }

    fn circle(role: PieceRole, x: f32, y: f32, r: f32) -> Self {
        Self {
            role,
            center: Vec2::new(x, y),
            shape: PieceShape::Circle { r },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub level: u8,
    /// Canvas size (px).
    pub canvas: Vec2,
    pub pieces: Vec<Piece>,
}

impl LevelLayout {
    /// Number of physics bodies the layout spawns.
    pub fn body_count(&self) -> usize {
        self.pieces.len()
    }
}

/// Wrap levels above [`MAX_LEVEL`] back to 1.  Level 0 is an error.
pub fn normalize_level(level: u8) -> GameResult<u8> {
    let level = validate_level(level)?;
    Ok(if level > MAX_LEVEL { 1 } else { level })
}

/// Map a canvas point (origin top-left, y down) into world space.
#[inline]
pub fn canvas_to_world(p: Vec2, canvas: Vec2) -> Vec2 {
    Vec2::new(p.x - canvas.x * 0.5, canvas.y * 0.5 - p.y)
}

/// Inverse of [`canvas_to_world`].
#[inline]
pub fn world_to_canvas(p: Vec2, canvas: Vec2) -> Vec2 {
    Vec2::new(p.x + canvas.x * 0.5, canvas.y * 0.5 - p.y)
}

pub fn platform_canvas() -> Vec2 {
    Vec2::new(PLATFORM_CANVAS_WIDTH, PLATFORM_CANVAS_HEIGHT)
}

pub fn slingshot_canvas() -> Vec2 {
    Vec2::new(SLINGSHOT_CANVAS_WIDTH, SLINGSHOT_CANVAS_HEIGHT)
}

/// Slingshot anchor in canvas coordinates.
pub fn slingshot_anchor() -> Vec2 {
    Vec2::new(SLINGSHOT_ANCHOR_X, SLINGSHOT_ANCHOR_Y)
}

// ── Platform ──────────────────────────────────────────────────────────────────

/// Layout of a platform level: floor, side walls, player, target box, goal
/// sensor, optional steps, and bonus pickups.
pub fn platform_layout(level: u8) -> GameResult<LevelLayout> {
    let level = normalize_level(level)?;
    let mut pieces = vec![
        Piece::rect(PieceRole::Ground, 400.0, 590.0, 800.0, 20.0),
        Piece::rect(PieceRole::Wall, 10.0, 300.0, 20.0, 600.0),
        Piece::rect(PieceRole::Wall, 790.0, 300.0, 20.0, 600.0),
    ];

    let bonus = |x: f32, mass: f32| Piece::circle(PieceRole::Bonus { mass }, x, 500.0, 15.0);
    let step = |x: f32, w: f32| Piece::rect(PieceRole::Ground, x, 570.0, w, 20.0);

    match level {
        1 => {
            pieces.push(Piece::rect(PieceRole::Player, 100.0, 520.0, 40.0, 40.0));
            pieces.push(Piece::rect(
                PieceRole::TargetBox { mass: 8.0 },
                300.0,
                530.0,
                50.0,
                50.0,
            ));
            pieces.push(Piece::rect(PieceRole::Goal, 700.0, 520.0, 20.0, 100.0));
            pieces.push(bonus(450.0, 3.0));
        }
        2 => {
            pieces.push(Piece::rect(PieceRole::Player, 80.0, 520.0, 40.0, 40.0));
            pieces.push(Piece::rect(
                PieceRole::TargetBox { mass: 12.0 },
                220.0,
                530.0,
                60.0,
                60.0,
            ));
            pieces.push(Piece::rect(PieceRole::Goal, 730.0, 520.0, 20.0, 100.0));
            pieces.push(step(400.0, 60.0));
            pieces.push(bonus(350.0, 5.0));
            pieces.push(bonus(550.0, 5.0));
        }
        _ => {
            pieces.push(Piece::rect(PieceRole::Player, 70.0, 520.0, 40.0, 40.0));
            pieces.push(Piece::rect(
                PieceRole::TargetBox { mass: 18.0 },
                180.0,
                520.0,
                70.0,
                70.0,
            ));
            pieces.push(Piece::rect(PieceRole::Goal, 750.0, 520.0, 20.0, 100.0));
            pieces.push(step(350.0, 50.0));
            pieces.push(step(550.0, 50.0));
            pieces.push(bonus(280.0, 6.0));
            pieces.push(bonus(450.0, 7.0));
            pieces.push(bonus(650.0, 7.0));
        }
    }

    Ok(LevelLayout {
        level,
        canvas: platform_canvas(),
        pieces,
    })
}

// ── Slingshot ─────────────────────────────────────────────────────────────────

/// Layout of a slingshot level: closed arena, projectile at the anchor,
/// shielding walls and the tower.
pub fn slingshot_layout(level: u8) -> GameResult<LevelLayout> {
    let level = normalize_level(level)?;
    let canvas = slingshot_canvas();
    let (w, h) = (canvas.x, canvas.y);
    let anchor = slingshot_anchor();

    let mut pieces = vec![
        Piece::rect(PieceRole::Boundary, w / 2.0, h - 10.0, w, 20.0),
        Piece::rect(PieceRole::Boundary, w / 2.0, 10.0, w, 20.0),
        Piece::rect(PieceRole::Boundary, 10.0, h / 2.0, 20.0, h),
        Piece::rect(PieceRole::Boundary, w - 10.0, h / 2.0, 20.0, h),
        Piece::circle(PieceRole::Projectile, anchor.x, anchor.y, 15.0),
    ];

    let crate_at = |role: PieceRole, x: f32, y: f32| Piece::rect(role, x, y, 50.0, 50.0);

    match level {
        1 => {
            pieces.push(crate_at(PieceRole::Box, 700.0, 655.0));
            pieces.push(crate_at(PieceRole::Box, 700.0, 605.0));
            pieces.push(crate_at(PieceRole::GoalBox, 700.0, 555.0));
        }
        2 => {
            pieces.push(Piece::rect(PieceRole::Obstacle, 600.0, 600.0, 15.0, 180.0));
            for y in [655.0, 605.0, 555.0] {
                pieces.push(crate_at(PieceRole::Box, 800.0, y));
            }
            pieces.push(crate_at(PieceRole::GoalBox, 800.0, 505.0));
            pieces.push(crate_at(PieceRole::Box, 750.0, 655.0));
            pieces.push(crate_at(PieceRole::Box, 850.0, 655.0));
        }
        _ => {
            pieces.push(Piece::rect(PieceRole::Obstacle, 550.0, 590.0, 15.0, 200.0));
            pieces.push(Piece::rect(PieceRole::Obstacle, 750.0, 570.0, 15.0, 240.0));
            for y in [655.0, 605.0, 555.0, 505.0] {
                pieces.push(crate_at(PieceRole::Box, 950.0, y));
            }
            pieces.push(crate_at(PieceRole::GoalBox, 950.0, 455.0));
            for (x, y) in [
                (900.0, 655.0),
                (1000.0, 655.0),
                (900.0, 605.0),
                (1000.0, 605.0),
                (850.0, 655.0),
            ] {
                pieces.push(crate_at(PieceRole::Box, x, y));
            }
        }
    }

    Ok(LevelLayout {
        level,
        canvas,
        pieces,
    })
}
