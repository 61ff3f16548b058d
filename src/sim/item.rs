//! Pickups and their effects

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Bounded;
use super::geom::Aabb;
use super::player::Player;
use crate::tuning::{ItemTuning, PlayerTuning};

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Health,
    DamageUp,
    SpeedUp,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Health, ItemKind::DamageUp, ItemKind::SpeedUp];

    /// Name used in the HUD tally
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Health => "health",
            ItemKind::DamageUp => "damage_up",
            ItemKind::SpeedUp => "speed_up",
        }
    }

    /// Uniform draw over every kind (item rooms)
    pub fn random_any<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Weighted draw for ordinary drops: mostly health, else an even split
    pub fn random_drop<R: Rng + ?Sized>(rng: &mut R, tuning: &ItemTuning) -> Self {
        if rng.random_bool(tuning.health_drop_weight.clamp(0.0, 1.0)) {
            ItemKind::Health
        } else if rng.random_bool(0.5) {
            ItemKind::DamageUp
        } else {
            ItemKind::SpeedUp
        }
    }

    /// Apply this pickup's effect to the player
    pub fn apply(self, player: &mut Player, tuning: &PlayerTuning) {
        match self {
            ItemKind::Health => player.health.heal(tuning.heal_amount),
            ItemKind::DamageUp => player.damage += tuning.damage_step,
            ItemKind::SpeedUp => player.body.speed += tuning.speed_step,
        }
    }
}

/// A pickup lying in a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ItemKind,
    pub collected: bool,
    /// Vertical bob offset for rendering
    pub bob_offset: f32,
    bob_direction: f32,
    bob_speed: f32,
    bob_amount: f32,
}

impl Item {
    pub fn new(pos: Vec2, kind: ItemKind, tuning: &ItemTuning) -> Self {
        Self {
            pos,
            size: Vec2::splat(tuning.size),
            kind,
            collected: false,
            bob_offset: 0.0,
            bob_direction: 1.0,
            bob_speed: tuning.bob_speed,
            bob_amount: tuning.bob_amount,
        }
    }

    /// Advance the bob animation
    pub fn update(&mut self) {
        self.bob_offset += self.bob_speed * self.bob_direction;
        if self.bob_offset.abs() >= self.bob_amount {
            self.bob_direction = -self.bob_direction;
        }
    }

    /// Mark collected; yields the kind only the first time
    pub fn collect(&mut self) -> Option<ItemKind> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.kind)
    }
}

impl Bounded for Item {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_collect_once() {
        let tuning = ItemTuning::default();
        let mut item = Item::new(Vec2::new(400.0, 275.0), ItemKind::SpeedUp, &tuning);
        assert_eq!(item.collect(), Some(ItemKind::SpeedUp));
        assert_eq!(item.collect(), None);
    }

    #[test]
    fn test_effects() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::new(100.0, 100.0), &tuning.player);

        ItemKind::DamageUp.apply(&mut player, &tuning.player);
        assert_eq!(player.damage, 1.5);

        ItemKind::SpeedUp.apply(&mut player, &tuning.player);
        assert_eq!(player.body.speed, 3.5);

        player.health.damage(2.0);
        ItemKind::Health.apply(&mut player, &tuning.player);
        assert_eq!(player.health.current(), 2.0);
        ItemKind::Health.apply(&mut player, &tuning.player);
        ItemKind::Health.apply(&mut player, &tuning.player);
        assert_eq!(player.health.current(), 3.0);
    }

    #[test]
    fn test_bob_stays_within_amount() {
        let tuning = ItemTuning::default();
        let mut item = Item::new(Vec2::ZERO, ItemKind::Health, &tuning);
        for _ in 0..500 {
            item.update();
            assert!(item.bob_offset.abs() <= tuning.bob_amount + tuning.bob_speed);
        }
    }

    #[test]
    fn test_random_drop_favours_health() {
        let tuning = ItemTuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let draws = 10_000;
        let mut counts = [0u32; 3];
        for _ in 0..draws {
            let slot = match ItemKind::random_drop(&mut rng, &tuning) {
                ItemKind::Health => 0,
                ItemKind::DamageUp => 1,
                ItemKind::SpeedUp => 2,
            };
            counts[slot] += 1;
        }

        let share = |n: u32| n as f64 / draws as f64;
        assert!((0.67..0.73).contains(&share(counts[0])), "{counts:?}");
        assert!((0.12..0.18).contains(&share(counts[1])), "{counts:?}");
        assert!((0.12..0.18).contains(&share(counts[2])), "{counts:?}");
    }

    #[test]
    fn test_random_any_covers_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(ItemKind::random_any(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }
}
