//! The player-controlled character

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Bounded, Direction, Health};
use super::geom::Aabb;
use super::item::ItemKind;
use super::room::Room;
use crate::tuning::PlayerTuning;

/// Movement directions currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything needed to spawn a projectile for a shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub origin: Vec2,
    pub direction: Direction,
    pub speed: f32,
    pub damage: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub health: Health,
    /// Damage per projectile (grows with damage-up pickups)
    pub damage: f32,
    pub projectile_speed: f32,
    /// Cooldown length in ticks
    pub fire_rate: u32,
    /// Ticks until the next shot is allowed
    pub fire_cooldown: u32,
    pub invincible: bool,
    pub invincible_timer: u32,
    pub invincible_duration: u32,
    /// Input snapshot for the current tick
    pub keys: MoveKeys,
    /// Pickups in collection order
    pub collected_items: Vec<ItemKind>,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(tuning.size), tuning.speed),
            health: Health::new(tuning.max_health),
            damage: tuning.damage,
            projectile_speed: tuning.projectile_speed,
            fire_rate: tuning.fire_rate,
            fire_cooldown: 0,
            invincible: false,
            invincible_timer: 0,
            invincible_duration: tuning.invincible_ticks,
            keys: MoveKeys::default(),
            collected_items: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.body.active && !self.health.is_depleted()
    }

    /// Turn the held keys into a velocity (diagonals normalized) and facing
    pub fn apply_keys(&mut self) {
        let mut vel = Vec2::ZERO;

        if self.keys.up {
            vel.y = -1.0;
            self.body.facing = Direction::Up;
        }
        if self.keys.down {
            vel.y = 1.0;
            self.body.facing = Direction::Down;
        }
        if self.keys.left {
            vel.x = -1.0;
            self.body.facing = Direction::Left;
        }
        if self.keys.right {
            vel.x = 1.0;
            self.body.facing = Direction::Right;
        }

        self.body.vel = vel.normalize_or_zero();
    }

    /// One tick: move (reverting fully on wall contact), then run down timers
    pub fn update(&mut self, room: &Room) {
        self.apply_keys();

        let prev = self.body.pos;
        let speed = self.body.speed;
        self.body.step(speed);

        if room.check_wall_collision(&self.body) {
            self.body.pos = prev;
        }

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        if self.invincible {
            self.invincible_timer = self.invincible_timer.saturating_sub(1);
            if self.invincible_timer == 0 {
                self.invincible = false;
            }
        }
    }

    /// Fire toward `aim` (or the facing direction); `None` while cooling down
    pub fn shoot(&mut self, aim: Option<Direction>) -> Option<ShotRequest> {
        if self.fire_cooldown > 0 {
            return None;
        }
        self.fire_cooldown = self.fire_rate;

        Some(ShotRequest {
            origin: self.body.pos,
            direction: aim.unwrap_or(self.body.facing),
            speed: self.projectile_speed,
            damage: self.damage,
        })
    }

    /// Apply damage unless invincible; returns whether it landed
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.invincible {
            return false;
        }

        let dead = self.health.damage(amount);
        self.invincible = true;
        self.invincible_timer = self.invincible_duration;

        if dead {
            self.body.active = false;
        }
        true
    }

    /// Record a pickup and apply its effect
    pub fn add_item(&mut self, kind: ItemKind, tuning: &PlayerTuning) {
        self.collected_items.push(kind);
        kind.apply(self, tuning);
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.body.pos = pos;
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}
