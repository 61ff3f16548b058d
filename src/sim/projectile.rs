//! Straight-line shots with a limited lifetime

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Bounded, Direction};
use super::geom::Aabb;
use super::player::ShotRequest;
use crate::tuning::ProjectileTuning;

/// Who fired the projectile (decides what it can hurt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub direction: Direction,
    pub damage: f32,
    pub owner: Owner,
    /// Ticks remaining before it fizzles
    pub lifetime: u32,
}

impl Projectile {
    pub fn new(
        origin: Vec2,
        direction: Direction,
        speed: f32,
        damage: f32,
        owner: Owner,
        tuning: &ProjectileTuning,
    ) -> Self {
        let mut body = Body::new(origin, Vec2::splat(tuning.size), speed);
        body.vel = direction.vector();
        body.facing = direction;
        Self {
            body,
            direction,
            damage,
            owner,
            lifetime: tuning.lifetime,
        }
    }

    /// Player projectile built from a shot request
    pub fn from_shot(shot: &ShotRequest, tuning: &ProjectileTuning) -> Self {
        Self::new(
            shot.origin,
            shot.direction,
            shot.speed,
            shot.damage,
            Owner::Player,
            tuning,
        )
    }

    pub fn update(&mut self) {
        let speed = self.body.speed;
        self.body.step(speed);

        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            self.body.active = false;
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_in_direction() {
        let tuning = ProjectileTuning::default();
        let mut p = Projectile::new(
            Vec2::new(100.0, 100.0),
            Direction::Left,
            7.0,
            1.0,
            Owner::Player,
            &tuning,
        );
        p.update();
        p.update();
        assert_eq!(p.body.pos, Vec2::new(86.0, 100.0));
        assert!(p.is_active());
    }

    #[test]
    fn test_lifetime_expires() {
        let tuning = ProjectileTuning {
            lifetime: 3,
            ..Default::default()
        };
        let mut p = Projectile::new(Vec2::ZERO, Direction::Down, 7.0, 1.0, Owner::Enemy, &tuning);
        p.update();
        p.update();
        assert!(p.is_active());
        p.update();
        assert!(!p.is_active());
        assert_eq!(p.lifetime, 0);
    }
}
