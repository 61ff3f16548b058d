//! Read-only snapshots for render and HUD collaborators
//!
//! A [`FrameView`] is captured once per frame from the game state. It holds
//! only plain data (positions, sizes, colour categories) and serializes to
//! JSON for front ends that live outside Rust.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{
    Aabb, Cell, Direction, Door, Enemy, EnemyVariant, GamePhase, GameState, Item, ItemKind,
    Owner, Projectile, Room, RoomKind, Side,
};

/// Depth of a door rectangle drawn into the wall
const DOOR_THICKNESS: f32 = 20.0;

/// Palette slot for a sprite; the front end picks actual colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorCategory {
    Player,
    /// Player while blinking after a hit
    PlayerHurt,
    EnemyBasic,
    EnemyFast,
    EnemyTank,
    Boss,
    PlayerShot,
    EnemyShot,
    ItemHealth,
    ItemDamageUp,
    ItemSpeedUp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    /// Center
    pub pos: Vec2,
    pub size: Vec2,
    pub color: ColorCategory,
    /// Remaining health fraction for entities with a health bar
    pub health_ratio: Option<f32>,
    pub facing: Option<Direction>,
}

impl SpriteView {
    fn player(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            pos: player.body.pos,
            size: player.body.size,
            color: if player.invincible {
                ColorCategory::PlayerHurt
            } else {
                ColorCategory::Player
            },
            health_ratio: Some(player.health.ratio()),
            facing: Some(player.body.facing),
        }
    }

    fn enemy(enemy: &Enemy) -> Self {
        let color = match (enemy.boss, enemy.variant) {
            (true, _) => ColorCategory::Boss,
            (false, EnemyVariant::Basic) => ColorCategory::EnemyBasic,
            (false, EnemyVariant::Fast) => ColorCategory::EnemyFast,
            (false, EnemyVariant::Tank) => ColorCategory::EnemyTank,
        };
        Self {
            pos: enemy.body.pos,
            size: enemy.body.size,
            color,
            health_ratio: Some(enemy.health.ratio()),
            facing: Some(enemy.body.facing),
        }
    }

    fn projectile(projectile: &Projectile) -> Self {
        Self {
            pos: projectile.body.pos,
            size: projectile.body.size,
            color: match projectile.owner {
                Owner::Player => ColorCategory::PlayerShot,
                Owner::Enemy => ColorCategory::EnemyShot,
            },
            health_ratio: None,
            facing: Some(projectile.direction),
        }
    }

    fn item(item: &Item) -> Self {
        Self {
            pos: item.pos + Vec2::new(0.0, item.bob_offset),
            size: item.size,
            color: match item.kind {
                ItemKind::Health => ColorCategory::ItemHealth,
                ItemKind::DamageUp => ColorCategory::ItemDamageUp,
                ItemKind::SpeedUp => ColorCategory::ItemSpeedUp,
            },
            health_ratio: None,
            facing: None,
        }
    }
}

/// One square of the floor checkerboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub dark: bool,
}

/// Floor tiles covering `width x height`, alternating shades
pub fn background_tiles(width: f32, height: f32, tile_size: f32) -> Vec<Tile> {
    if tile_size <= 0.0 {
        return Vec::new();
    }
    let cols = (width / tile_size).ceil() as usize;
    let rows = (height / tile_size).ceil() as usize;

    let mut tiles = Vec::with_capacity(cols * rows);
    for y in 0..rows {
        for x in 0..cols {
            tiles.push(Tile {
                pos: Vec2::new(x as f32, y as f32) * tile_size,
                size: tile_size,
                dark: (x + y) % 2 == 0,
            });
        }
    }
    tiles
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoorView {
    pub side: Side,
    pub door: Door,
    pub rect: Aabb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomView {
    pub width: f32,
    pub height: f32,
    pub kind: RoomKind,
    pub cleared: bool,
    /// Present doors only
    pub doors: Vec<DoorView>,
    pub tiles: Vec<Tile>,
}

impl RoomView {
    pub fn capture(room: &Room, door_size: f32, tile_size: f32) -> Self {
        let (w, h) = (room.width, room.height);
        let doors = room
            .doors
            .iter()
            .filter(|(_, door)| door.is_present())
            .map(|(side, door)| {
                let (center, size) = match side {
                    Side::Top => (
                        Vec2::new(w / 2.0, DOOR_THICKNESS / 2.0),
                        Vec2::new(door_size, DOOR_THICKNESS),
                    ),
                    Side::Right => (
                        Vec2::new(w - DOOR_THICKNESS / 2.0, h / 2.0),
                        Vec2::new(DOOR_THICKNESS, door_size),
                    ),
                    Side::Bottom => (
                        Vec2::new(w / 2.0, h - DOOR_THICKNESS / 2.0),
                        Vec2::new(door_size, DOOR_THICKNESS),
                    ),
                    Side::Left => (
                        Vec2::new(DOOR_THICKNESS / 2.0, h / 2.0),
                        Vec2::new(DOOR_THICKNESS, door_size),
                    ),
                };
                DoorView {
                    side,
                    door,
                    rect: Aabb::new(center, size),
                }
            })
            .collect();

        Self {
            width: w,
            height: h,
            kind: room.kind,
            cleared: room.cleared,
            doors,
            tiles: background_tiles(w, h, tile_size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinimapCell {
    pub cell: Cell,
    pub kind: RoomKind,
    pub cleared: bool,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub health: f32,
    pub max_health: f32,
    pub score: u64,
    pub level: u32,
    /// e.g. `"health: 2, damage_up: 1"`, or `"None"`
    pub items: String,
}

/// Count pickups by name in first-collected order
pub fn item_tally(items: &[ItemKind]) -> String {
    let mut counts: Vec<(ItemKind, u32)> = Vec::new();
    for &kind in items {
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }

    if counts.is_empty() {
        return "None".to_string();
    }
    counts
        .iter()
        .map(|(kind, n)| format!("{}: {}", kind.name(), n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub room: RoomView,
    pub player: SpriteView,
    pub enemies: Vec<SpriteView>,
    pub projectiles: Vec<SpriteView>,
    pub items: Vec<SpriteView>,
    /// Occupied cells only, row by row
    pub minimap: Vec<MinimapCell>,
    pub grid_size: usize,
    pub hud: HudView,
    pub game_over: bool,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let room = state.room();
        let tuning = &state.tuning.room;

        let minimap = state
            .dungeon
            .occupied()
            .map(|(cell, id)| {
                let r = &state.dungeon.rooms[id];
                MinimapCell {
                    cell,
                    kind: r.kind,
                    cleared: r.cleared,
                    current: id == state.current_room,
                }
            })
            .collect();

        Self {
            room: RoomView::capture(room, tuning.door_size, tuning.tile_size),
            player: SpriteView::player(state),
            enemies: room
                .enemies
                .iter()
                .filter(|e| e.is_active())
                .map(SpriteView::enemy)
                .collect(),
            projectiles: room
                .projectiles
                .iter()
                .filter(|p| p.is_active())
                .map(SpriteView::projectile)
                .collect(),
            items: room.items.iter().map(SpriteView::item).collect(),
            minimap,
            grid_size: state.dungeon.grid_size,
            hud: HudView {
                health: state.player.health.current(),
                max_health: state.player.health.max(),
                score: state.score,
                level: state.level,
                items: item_tally(&state.player.collected_items),
            },
            game_over: state.phase == GamePhase::GameOver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_item_tally() {
        assert_eq!(item_tally(&[]), "None");
        let items = [
            ItemKind::Health,
            ItemKind::DamageUp,
            ItemKind::Health,
            ItemKind::SpeedUp,
        ];
        assert_eq!(item_tally(&items), "health: 2, damage_up: 1, speed_up: 1");
    }

    #[test]
    fn test_background_checkerboard() {
        let tiles = background_tiles(800.0, 550.0, 40.0);
        // 20 columns, 14 rows (last row partly off the room)
        assert_eq!(tiles.len(), 20 * 14);
        assert!(tiles[0].dark);
        assert!(!tiles[1].dark);
        assert!(!tiles[20].dark);
        assert_eq!(tiles[21].pos, Vec2::new(40.0, 40.0));
        assert!(background_tiles(800.0, 550.0, 0.0).is_empty());
    }

    #[test]
    fn test_capture_start_room() {
        let state = GameState::new(17, Tuning::default());
        let view = FrameView::capture(&state);

        assert_eq!(view.room.kind, RoomKind::Start);
        assert!(view.room.cleared);
        assert!(!view.room.doors.is_empty());
        assert!(view.room.doors.iter().all(|d| d.door == Door::Open));
        assert!(view.enemies.is_empty());
        assert_eq!(view.player.color, ColorCategory::Player);
        assert_eq!(view.player.health_ratio, Some(1.0));
        assert_eq!(view.hud.items, "None");
        assert_eq!(view.hud.level, 1);
        assert!(!view.game_over);

        assert_eq!(view.minimap.len(), state.dungeon.len());
        let current: Vec<_> = view.minimap.iter().filter(|c| c.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].cell, (1, 1));
    }

    #[test]
    fn test_door_rects_sit_in_walls() {
        let state = GameState::new(17, Tuning::default());
        let view = FrameView::capture(&state);
        for door in &view.room.doors {
            let r = door.rect;
            match door.side {
                Side::Top => assert_eq!(r.top(), 0.0),
                Side::Right => assert_eq!(r.right(), 800.0),
                Side::Bottom => assert_eq!(r.bottom(), 550.0),
                Side::Left => assert_eq!(r.left(), 0.0),
            }
        }
    }

    #[test]
    fn test_view_serializes() {
        let state = GameState::new(2, Tuning::default());
        let json = serde_json::to_string(&FrameView::capture(&state)).unwrap();
        assert!(json.contains("\"hud\""));
        assert!(json.contains("\"kind\":\"Start\""));
    }
}
