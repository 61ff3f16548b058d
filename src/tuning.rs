//! Data-driven game balance
//!
//! Every gameplay constant lives here so front ends and tests can inject
//! overrides. Missing fields in a JSON override fall back to the defaults in
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Player stats and pickup increments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: f32,
    pub speed: f32,
    pub max_health: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    /// Ticks between shots
    pub fire_rate: u32,
    pub invincible_ticks: u32,
    /// Health restored by a health pickup
    pub heal_amount: f32,
    /// Damage added by a damage-up pickup
    pub damage_step: f32,
    /// Speed added by a speed-up pickup
    pub speed_step: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            max_health: PLAYER_MAX_HEALTH,
            damage: PLAYER_DAMAGE,
            projectile_speed: PROJECTILE_SPEED,
            fire_rate: PLAYER_FIRE_RATE,
            invincible_ticks: INVINCIBLE_TICKS,
            heal_amount: 1.0,
            damage_step: 0.5,
            speed_step: 0.5,
        }
    }
}

/// Enemy stats, variant modifiers and AI parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub size: f32,
    pub speed: f32,
    pub damage: f32,
    pub score: u64,
    pub detection_radius: f32,

    pub basic_health: f32,
    pub fast_health: f32,
    pub tank_health: f32,
    pub fast_speed_mult: f32,
    pub tank_speed_mult: f32,

    /// Probability of drawing a basic enemy
    pub basic_weight: f32,
    /// Probability of drawing a fast enemy (tank takes the rest)
    pub fast_weight: f32,

    /// Per-tick chance of picking a new wander direction
    pub wander_chance: f64,
    pub wander_cooldown_min: u32,
    pub wander_cooldown_max: u32,

    pub boss_health_mult: f32,
    pub boss_damage_mult: f32,
    pub boss_size_mult: f32,
    pub boss_score_mult: u64,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: ENEMY_SIZE,
            speed: ENEMY_SPEED,
            damage: ENEMY_DAMAGE,
            score: ENEMY_SCORE,
            detection_radius: DETECTION_RADIUS,

            basic_health: 2.0,
            fast_health: 1.0,
            tank_health: 5.0,
            fast_speed_mult: 1.5,
            tank_speed_mult: 0.7,

            basic_weight: 0.6,
            fast_weight: 0.3,

            wander_chance: 0.02,
            wander_cooldown_min: 30,
            wander_cooldown_max: 90,

            boss_health_mult: 3.0,
            boss_damage_mult: 2.0,
            boss_size_mult: 1.5,
            boss_score_mult: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub size: f32,
    /// Ticks before a projectile fizzles out
    pub lifetime: u32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            size: PROJECTILE_SIZE,
            lifetime: PROJECTILE_LIFETIME,
        }
    }
}

/// Item sizes and drop chances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemTuning {
    pub size: f32,
    /// Chance a killed enemy drops an item
    pub kill_drop_chance: f64,
    /// Chance a freshly cleared room rewards an item
    pub clear_drop_chance: f64,
    /// Chance a normal room starts with an item
    pub normal_room_chance: f64,
    /// Share of health pickups among random drops
    pub health_drop_weight: f64,
    pub bob_speed: f32,
    pub bob_amount: f32,
}

impl Default for ItemTuning {
    fn default() -> Self {
        Self {
            size: ITEM_SIZE,
            kill_drop_chance: 0.2,
            clear_drop_chance: 0.3,
            normal_room_chance: 0.3,
            health_drop_weight: 0.7,
            bob_speed: 0.05,
            bob_amount: 2.0,
        }
    }
}

/// Room geometry and spawn budgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTuning {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub door_size: f32,
    pub max_enemies: u32,
    pub wall_padding: f32,
    pub door_threshold: f32,
    pub tile_size: f32,
    pub enemy_spacing: f32,
    /// Positions tried per enemy before it is dropped
    pub placement_attempts: u32,
    /// Batch spawns tried while a room is still empty
    pub fill_attempts: u32,
}

impl Default for RoomTuning {
    fn default() -> Self {
        Self {
            width: ROOM_WIDTH,
            height: ROOM_HEIGHT,
            padding: ROOM_PADDING,
            door_size: DOOR_SIZE,
            max_enemies: MAX_ENEMIES,
            wall_padding: WALL_PADDING,
            door_threshold: DOOR_THRESHOLD,
            tile_size: TILE_SIZE,
            enemy_spacing: ENEMY_SPACING,
            placement_attempts: 20,
            fill_attempts: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonTuning {
    pub grid_size: usize,
    pub max_depth: u32,
    /// Chance of a door between two rooms that already exist
    pub lateral_door_chance: f64,
}

impl Default for DungeonTuning {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            max_depth: MAX_DEPTH,
            lateral_door_chance: 0.75,
        }
    }
}

/// Frame pacing and level progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopTuning {
    pub tick_ms: f64,
    pub max_ticks_per_frame: u32,
    /// Health restored when a level is completed
    pub level_heal: f32,
}

impl Default for LoopTuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            max_ticks_per_frame: MAX_TICKS_PER_FRAME,
            level_heal: 2.0,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub projectile: ProjectileTuning,
    pub item: ItemTuning,
    pub room: RoomTuning,
    pub dungeon: DungeonTuning,
    pub game_loop: LoopTuning,
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load overrides from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), err);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Invalid tuning file {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "room": { "max_enemies": 2 }, "player": { "speed": 4.5 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.room.max_enemies, 2);
        assert_eq!(tuning.room.width, ROOM_WIDTH);
        assert_eq!(tuning.player.speed, 4.5);
        assert_eq!(tuning.player.fire_rate, PLAYER_FIRE_RATE);
        assert_eq!(tuning.dungeon, DungeonTuning::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default("/definitely/not/here.json");
        assert_eq!(tuning, Tuning::default());
    }
}
