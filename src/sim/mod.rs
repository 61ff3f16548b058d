//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (vectors, walked back to front when removing)
//! - No rendering or platform dependencies

pub mod dungeon;
pub mod enemy;
pub mod entity;
pub mod geom;
pub mod item;
pub mod player;
pub mod projectile;
pub mod room;
pub mod state;
pub mod tick;

pub use dungeon::{Cell, Dungeon, RoomId};
pub use enemy::{Enemy, EnemyVariant};
pub use entity::{Body, Bounded, Direction, Health, collides};
pub use geom::Aabb;
pub use item::{Item, ItemKind};
pub use player::{MoveKeys, Player, ShotRequest};
pub use projectile::{Owner, Projectile};
pub use room::{Door, Doors, Room, RoomKind, Side};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, check_room_transition, tick};
