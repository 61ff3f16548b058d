//! Shared entity components
//!
//! Players, enemies and projectiles each embed a [`Body`] (and, when they can
//! be hurt, a [`Health`]) instead of inheriting from a common base.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;

/// Cardinal facing / travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in screen space (y grows downward)
    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Facing along the dominant axis of a velocity; `None` when standing still
    pub fn from_velocity(vel: Vec2) -> Option<Direction> {
        if vel == Vec2::ZERO {
            return None;
        }
        if vel.x.abs() > vel.y.abs() {
            Some(if vel.x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if vel.y > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            })
        }
    }
}

/// Position, extent and motion of a simulated entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center of the entity
    pub pos: Vec2,
    /// Full width/height
    pub size: Vec2,
    /// Unit (or zero) direction of travel
    pub vel: Vec2,
    /// Units moved per tick along `vel`
    pub speed: f32,
    pub facing: Direction,
    /// Inactive bodies are skipped and swept at the next update
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            speed,
            facing: Direction::Down,
            active: true,
        }
    }

    #[inline]
    pub fn half(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Advance along the velocity by the given per-tick speed
    pub fn step(&mut self, speed: f32) {
        self.pos += self.vel * speed;
    }

    /// Clamp the center so the whole box stays inside `[0, width] x [0, height]`
    pub fn keep_in_bounds(&mut self, width: f32, height: f32) {
        let half = self.half();
        self.pos.x = self.pos.x.max(half.x).min(width - half.x);
        self.pos.y = self.pos.y.max(half.y).min(height - half.y);
    }

    /// Whether the center has left `[0, width] x [0, height]`
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.x < 0.0 || self.pos.x > width || self.pos.y < 0.0 || self.pos.y > height
    }
}

/// Hit points; `current` never exceeds `max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Subtract damage (floored at zero); returns true when depleted
    pub fn damage(&mut self, amount: f32) -> bool {
        self.current = (self.current - amount).max(0.0);
        self.is_depleted()
    }

    /// Restore health, capped at max
    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Scale both current and max (boss reinforcement)
    pub fn scale(&mut self, factor: f32) {
        self.max *= factor;
        self.current = self.max;
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// current / max in `[0, 1]`, for health bars
    pub fn ratio(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

/// Anything with an axis-aligned footprint
pub trait Bounded {
    fn bounds(&self) -> Aabb;
}

impl Bounded for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

impl Bounded for Body {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Overlap test between any two bounded things
pub fn collides<A, B>(a: &A, b: &B) -> bool
where
    A: Bounded + ?Sized,
    B: Bounded + ?Sized,
{
    a.bounds().overlaps(&b.bounds())
}
