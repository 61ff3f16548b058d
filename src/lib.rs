//! Room Crawler - a top-down room-crawling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (dungeon generation, entities, rooms, tick)
//! - `clock`: Fixed timestep scheduler
//! - `session`: Frame driver tying the simulation to input and presentation
//! - `input`: Keyboard state merged into per-tick input
//! - `view`: Read-only snapshots for render/HUD collaborators
//! - `tuning`: Data-driven game balance

pub mod clock;
pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod view;

pub use clock::FrameClock;
pub use session::{Presenter, Session};
pub use tuning::Tuning;

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Maximum ticks per rendered frame to bound catch-up after a stall
    pub const MAX_TICKS_PER_FRAME: u32 = 8;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Strip at the bottom of the canvas reserved for the HUD
    pub const HUD_HEIGHT: f32 = 50.0;

    /// Room defaults
    pub const ROOM_WIDTH: f32 = CANVAS_WIDTH;
    pub const ROOM_HEIGHT: f32 = CANVAS_HEIGHT - HUD_HEIGHT;
    pub const ROOM_PADDING: f32 = 50.0;
    pub const DOOR_SIZE: f32 = 60.0;
    pub const MAX_ENEMIES: u32 = 5;
    pub const WALL_PADDING: f32 = 10.0;
    /// Distance from an edge at which an open door pulls the player through
    pub const DOOR_THRESHOLD: f32 = 20.0;
    pub const TILE_SIZE: f32 = 40.0;
    /// Minimum distance between freshly spawned enemies
    pub const ENEMY_SPACING: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HEALTH: f32 = 3.0;
    pub const PLAYER_DAMAGE: f32 = 1.0;
    pub const PLAYER_FIRE_RATE: u32 = 15; // Lower is faster
    pub const INVINCIBLE_TICKS: u32 = 60;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const ENEMY_SPEED: f32 = 1.0;
    pub const ENEMY_DAMAGE: f32 = 1.0;
    pub const ENEMY_SCORE: u64 = 100;
    pub const DETECTION_RADIUS: f32 = 250.0;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 8.0;
    pub const PROJECTILE_SPEED: f32 = 7.0;
    pub const PROJECTILE_LIFETIME: u32 = 60; // frames

    pub const ITEM_SIZE: f32 = 20.0;

    /// Dungeon defaults
    pub const GRID_SIZE: usize = 3;
    pub const MAX_DEPTH: u32 = 4;
}
