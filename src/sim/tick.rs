//! Fixed timestep simulation tick
//!
//! One call advances the run by exactly one step: fire, move, cross doors,
//! resolve the room, then check for level completion and death.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Bounded, Direction};
use super::enemy::EnemyVariant;
use super::item::ItemKind;
use super::player::MoveKeys;
use super::projectile::Projectile;
use super::room::Side;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Movement directions held this tick
    pub keys: MoveKeys,
    /// Fire once (edge-triggered upstream)
    pub fire: bool,
    /// Shot direction; `None` fires where the player faces
    pub aim: Option<Direction>,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        }
        return;
    }

    state.time_ticks += 1;
    state.player.keys = input.keys;

    if input.fire {
        if let Some(shot) = state.player.shoot(input.aim) {
            let projectile = Projectile::from_shot(&shot, &state.tuning.projectile);
            state.room_mut().add_projectile(projectile);
        }
    }

    let room = &state.dungeon.rooms[state.current_room];
    state.player.update(room);

    check_room_transition(state);

    // Room interactions
    let items_before = state.player.collected_items.len();
    let mut kills: Vec<(EnemyVariant, bool, u64)> = Vec::new();
    let room = &mut state.dungeon.rooms[state.current_room];
    let just_cleared = room.update(&mut state.player, &state.tuning, &mut state.rng, |enemy| {
        kills.push((enemy.variant, enemy.boss, enemy.score_value));
    });

    for (variant, boss, score) in kills {
        state.score += score;
        log::debug!("Killed {} enemy (+{}), score {}", variant.as_str(), score, state.score);
        state.push_event(GameEvent::EnemyKilled { variant, boss, score });
    }

    let picked: Vec<ItemKind> = state.player.collected_items[items_before..].to_vec();
    for kind in picked {
        state.push_event(GameEvent::ItemCollected { kind });
    }

    if just_cleared {
        let cell = state.current_cell;
        state.rooms_cleared += 1;
        log::debug!("Cleared room at ({}, {})", cell.0, cell.1);
        state.push_event(GameEvent::RoomCleared { cell });

        if state.dungeon.all_combat_rooms_cleared() {
            state.next_level();
        }
    }

    if !state.player.is_alive() {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over: score {}, level {}, {} ticks",
            state.score,
            state.level,
            state.time_ticks
        );
    }
}

/// Move through an open door when the player's box reaches the edge
/// threshold. Only one edge is considered per tick, in the order top, right,
/// bottom, left. Returns true when the player changed rooms.
pub fn check_room_transition(state: &mut GameState) -> bool {
    let threshold = state.tuning.room.door_threshold;
    let bounds = state.player.bounds();
    let room = state.room();

    let side = if bounds.top() < threshold {
        Side::Top
    } else if bounds.right() > room.width - threshold {
        Side::Right
    } else if bounds.bottom() > room.height - threshold {
        Side::Bottom
    } else if bounds.left() < threshold {
        Side::Left
    } else {
        return false;
    };

    if !room.door(side).is_open() {
        return false;
    }

    let (dx, dy) = side.offset();
    let (x, y) = state.current_cell;
    if !state.enter_room(x as i32 + dx, y as i32 + dy) {
        return false;
    }

    // Arrive just inside the edge opposite the one we left through
    let half = state.player.body.half();
    let room = state.room();
    let pos = match side {
        Side::Top => Vec2::new(room.width / 2.0, room.height - threshold - half.y),
        Side::Right => Vec2::new(threshold + half.x, room.height / 2.0),
        Side::Bottom => Vec2::new(room.width / 2.0, threshold + half.y),
        Side::Left => Vec2::new(room.width - threshold - half.x, room.height / 2.0),
    };
    state.player.set_position(pos);
    true
}
