//! Game state and events
//!
//! Everything a run needs lives here: the seeded RNG, the current dungeon, the
//! player, and the score/level counters. Two states built from the same seed
//! and fed the same inputs stay identical.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::dungeon::{Cell, Dungeon, RoomId};
use super::enemy::EnemyVariant;
use super::item::ItemKind;
use super::player::Player;
use super::room::Room;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player died; only a restart leaves this phase
    GameOver,
}

/// Things that happened during a tick, for the HUD and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { variant: EnemyVariant, boss: bool, score: u64 },
    RoomCleared { cell: Cell },
    RoomEntered { cell: Cell },
    ItemCollected { kind: ItemKind },
    LevelUp { level: u32, score: u64 },
    GameOver { score: u64 },
}

#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// 1-based floor number
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Rooms cleared across every level of this run
    pub rooms_cleared: u32,
    pub player: Player,
    pub dungeon: Dungeon,
    pub current_room: RoomId,
    pub current_cell: Cell,
    /// Pending events, drained by the session
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let dungeon = Dungeon::generate(&tuning, &mut rng);
        let start = dungeon.start_cell();
        let center = room_center(&tuning);
        let player = Player::new(center, &tuning.player);

        log::info!("Level 1 generated: {} rooms (seed {})", dungeon.len(), seed);

        let mut state = Self {
            seed,
            rng,
            tuning,
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            time_ticks: 0,
            rooms_cleared: 0,
            player,
            dungeon,
            current_room: 0,
            current_cell: start,
            events: Vec::new(),
        };
        state.enter_room(start.0 as i32, start.1 as i32);
        state
    }

    /// Start a fresh run: new dungeon, new player, zeroed score and level
    pub fn restart(&mut self) {
        let seed: u64 = self.rng.random();
        log::info!("Restarting run (seed {})", seed);
        *self = Self::new(seed, self.tuning.clone());
    }

    #[inline]
    pub fn room(&self) -> &Room {
        &self.dungeon.rooms[self.current_room]
    }

    #[inline]
    pub fn room_mut(&mut self) -> &mut Room {
        &mut self.dungeon.rooms[self.current_room]
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Make the room at `(x, y)` current. Returns false, changing nothing,
    /// when the cell is outside the grid or empty.
    pub fn enter_room(&mut self, x: i32, y: i32) -> bool {
        let Some(id) = self.dungeon.room_at(x, y) else {
            return false;
        };

        let cell = (x as usize, y as usize);
        self.current_room = id;
        self.current_cell = cell;
        self.events.push(GameEvent::RoomEntered { cell });
        log::debug!("Entered {} room at ({}, {})", self.room().kind.as_str(), x, y);
        true
    }

    /// Advance to the next floor: fresh dungeon, player centred in the start
    /// room and partly healed. Score, level and pickups carry over.
    pub fn next_level(&mut self) {
        self.level += 1;
        self.dungeon = Dungeon::generate(&self.tuning, &mut self.rng);

        let start = self.dungeon.start_cell();
        self.enter_room(start.0 as i32, start.1 as i32);
        self.player.set_position(room_center(&self.tuning));
        self.player.health.heal(self.tuning.game_loop.level_heal);

        self.events.push(GameEvent::LevelUp {
            level: self.level,
            score: self.score,
        });
        log::info!(
            "Level {} generated: {} rooms, score {}",
            self.level,
            self.dungeon.len(),
            self.score
        );
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn room_center(tuning: &Tuning) -> Vec2 {
    Vec2::new(tuning.room.width, tuning.room.height) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::room::RoomKind;

    #[test]
    fn test_new_starts_in_center_room() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.current_cell, (1, 1));
        assert_eq!(state.room().kind, RoomKind::Start);
        assert_eq!(state.player.pos(), Vec2::new(400.0, 275.0));
        assert_eq!(state.events(), &[GameEvent::RoomEntered { cell: (1, 1) }]);
    }

    #[test]
    fn test_enter_room_rejects_bad_cells() {
        let mut state = GameState::new(7, Tuning::default());
        state.drain_events();
        let (room, cell) = (state.current_room, state.current_cell);

        assert!(!state.enter_room(-1, 1));
        assert!(!state.enter_room(1, 3));
        assert_eq!(state.current_room, room);
        assert_eq!(state.current_cell, cell);
        assert!(state.events().is_empty());
    }

    #[test]
    fn test_next_level_keeps_progress() {
        let mut state = GameState::new(11, Tuning::default());
        state.score = 1200;
        state.player.add_item(ItemKind::DamageUp, &state.tuning.player);
        // One point down: the level heal of 2 must stop at the maximum
        state.player.take_damage(1.0);
        assert_eq!(state.player.health.current(), 2.0);
        state.player.set_position(Vec2::new(100.0, 100.0));
        state.drain_events();

        state.next_level();
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 1200);
        assert_eq!(state.player.health.current(), 3.0);
        assert_eq!(state.player.collected_items, vec![ItemKind::DamageUp]);
        assert_eq!(state.player.pos(), Vec2::new(400.0, 275.0));
        assert_eq!(state.room().kind, RoomKind::Start);
        assert!(state.drain_events().contains(&GameEvent::LevelUp { level: 2, score: 1200 }));
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::new(3, Tuning::default());
        state.score = 900;
        state.level = 4;
        state.phase = GamePhase::GameOver;
        state.player.take_damage(3.0);

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.player.is_alive());
        assert_eq!(state.player.health.current(), 3.0);
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let a = GameState::new(42, Tuning::default());
        let b = GameState::new(42, Tuning::default());
        assert_eq!(a.dungeon, b.dungeon);
    }
}
