//! Enemies: variants, wander/chase AI and movement

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Bounded, Direction, Health};
use super::geom::{Aabb, distance, random_in_range};
use crate::tuning::EnemyTuning;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyVariant {
    #[default]
    Basic,
    Fast,
    Tank,
}

impl EnemyVariant {
    pub fn max_health(&self, tuning: &EnemyTuning) -> f32 {
        match self {
            EnemyVariant::Basic => tuning.basic_health,
            EnemyVariant::Fast => tuning.fast_health,
            EnemyVariant::Tank => tuning.tank_health,
        }
    }

    pub fn speed_multiplier(&self, tuning: &EnemyTuning) -> f32 {
        match self {
            EnemyVariant::Basic => 1.0,
            EnemyVariant::Fast => tuning.fast_speed_mult,
            EnemyVariant::Tank => tuning.tank_speed_mult,
        }
    }

    /// Weighted draw (basic-heavy, tanks are rare)
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, tuning: &EnemyTuning) -> Self {
        let r: f32 = rng.random();
        if r < tuning.basic_weight {
            EnemyVariant::Basic
        } else if r < tuning.basic_weight + tuning.fast_weight {
            EnemyVariant::Fast
        } else {
            EnemyVariant::Tank
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyVariant::Basic => "basic",
            EnemyVariant::Fast => "fast",
            EnemyVariant::Tank => "tank",
        }
    }
}

/// Wander moves: stay, right, left, down, up
const WANDER_MOVES: [Vec2; 5] = [
    Vec2::ZERO,
    Vec2::new(1.0, 0.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub health: Health,
    pub variant: EnemyVariant,
    /// Reinforced tank guarding a boss room
    pub boss: bool,
    /// Contact damage dealt to the player
    pub damage: f32,
    pub score_value: u64,
    /// Chase the player when closer than this
    pub detection_radius: f32,
    /// Ticks left before the wander AI may pick a new direction
    pub direction_change_cooldown: u32,
}

impl Enemy {
    pub fn new(pos: Vec2, variant: EnemyVariant, tuning: &EnemyTuning) -> Self {
        Self {
            body: Body::new(pos, Vec2::splat(tuning.size), tuning.speed),
            health: Health::new(variant.max_health(tuning)),
            variant,
            boss: false,
            damage: tuning.damage,
            score_value: tuning.score,
            detection_radius: tuning.detection_radius,
            direction_change_cooldown: 0,
        }
    }

    /// A boss is a tank with scaled health, damage, size and score
    pub fn boss(pos: Vec2, tuning: &EnemyTuning) -> Self {
        let mut enemy = Self::new(pos, EnemyVariant::Tank, tuning);
        enemy.boss = true;
        enemy.health.scale(tuning.boss_health_mult);
        enemy.damage *= tuning.boss_damage_mult;
        enemy.body.size *= tuning.boss_size_mult;
        enemy.score_value *= tuning.boss_score_mult;
        enemy
    }

    /// Per-tick movement speed after the variant modifier
    pub fn effective_speed(&self, tuning: &EnemyTuning) -> f32 {
        self.body.speed * self.variant.speed_multiplier(tuning)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    /// Think, move, and stay inside the room
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        player_pos: Vec2,
        room_size: Vec2,
        tuning: &EnemyTuning,
        rng: &mut R,
    ) {
        self.update_direction(player_pos, tuning, rng);

        let speed = self.effective_speed(tuning);
        self.body.step(speed);
        self.body.keep_in_bounds(room_size.x, room_size.y);
    }

    /// Chase when the player is close, otherwise wander with a cooldown
    pub fn update_direction<R: Rng + ?Sized>(
        &mut self,
        player_pos: Vec2,
        tuning: &EnemyTuning,
        rng: &mut R,
    ) {
        if self.direction_change_cooldown > 0 {
            self.direction_change_cooldown -= 1;
            return;
        }

        if distance(self.body.pos, player_pos) < self.detection_radius {
            let to_player = player_pos - self.body.pos;
            if to_player.length() > 0.0 {
                self.body.vel = to_player.normalize();
                if let Some(facing) = Direction::from_velocity(to_player) {
                    self.body.facing = facing;
                }
            }
        } else if rng.random_bool(tuning.wander_chance.clamp(0.0, 1.0)) {
            let dir = WANDER_MOVES[rng.random_range(0..WANDER_MOVES.len())];
            self.body.vel = dir;
            if let Some(facing) = Direction::from_velocity(dir) {
                self.body.facing = facing;
            }
            self.direction_change_cooldown = random_in_range(
                rng,
                tuning.wander_cooldown_min as i32,
                tuning.wander_cooldown_max as i32,
            )
            .max(0) as u32;
        }
    }

    /// Apply damage; returns true when this hit killed the enemy
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.health.damage(amount) {
            self.body.active = false;
            return true;
        }
        false
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Aabb {
        self.body.bounds()
    }
}
