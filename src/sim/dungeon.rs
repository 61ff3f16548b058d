//! Procedural dungeon: a square grid of rooms joined by doors
//!
//! Generation carves outward from the centre cell with a randomized
//! depth-first walk, sprinkles extra lateral doors to create loops, then runs
//! a reachability repair pass so every room can be reached from the start.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::room::{Door, Room, RoomKind, Side};
use crate::tuning::Tuning;

/// Index into [`Dungeon::rooms`]
pub type RoomId = usize;

/// Grid coordinates `(x, y)`
pub type Cell = (usize, usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub grid_size: usize,
    /// Row-major `grid_size * grid_size` slots
    grid: Vec<Option<RoomId>>,
    /// Append-only room arena
    pub rooms: Vec<Room>,
    /// Cell of each room, parallel to `rooms`
    cells: Vec<Cell>,
}

impl Dungeon {
    pub fn empty(grid_size: usize) -> Self {
        Self {
            grid_size,
            grid: vec![None; grid_size * grid_size],
            rooms: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Generate with the grid size and depth from `tuning` (at least 1x1,
    /// so there is always a start room)
    pub fn generate<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        let grid_size = tuning.dungeon.grid_size.max(1);
        Self::generate_with(grid_size, tuning.dungeon.max_depth, tuning, rng)
    }

    pub fn generate_with<R: Rng + ?Sized>(
        grid_size: usize,
        max_depth: u32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let mut dungeon = Self::empty(grid_size);
        if grid_size == 0 {
            return dungeon;
        }

        let (width, height) = (tuning.room.width, tuning.room.height);
        let start = dungeon.start_cell();
        dungeon.add_room(start, Room::new(RoomKind::Start, width, height, tuning, rng));
        dungeon.carve(start, 0, max_depth, tuning, rng);
        dungeon.repair_connectivity();

        // One random non-start room becomes the item room
        if dungeon.rooms.len() > 1 {
            let id = rng.random_range(1..dungeon.rooms.len());
            let room = &mut dungeon.rooms[id];
            room.kind = RoomKind::Item;
            room.generate_contents(tuning, rng);
        }

        for room in &mut dungeon.rooms {
            room.sync_doors();
        }

        log::debug!(
            "Generated dungeon: {}x{} grid, {} rooms",
            grid_size,
            grid_size,
            dungeon.rooms.len()
        );
        dungeon
    }

    fn carve<R: Rng + ?Sized>(
        &mut self,
        cell: Cell,
        depth: u32,
        max_depth: u32,
        tuning: &Tuning,
        rng: &mut R,
    ) {
        if depth >= max_depth {
            return;
        }
        let Some(current) = self.room_at_cell(cell) else {
            return;
        };

        let mut sides = Side::ALL;
        sides.shuffle(rng);

        // Loops: link to rooms that already exist
        for side in sides {
            let Some(next) = self.neighbor(cell, side) else {
                continue;
            };
            if self.room_at_cell(next).is_some()
                && rng.random_bool(tuning.dungeon.lateral_door_chance.clamp(0.0, 1.0))
                && !self.rooms[current].door(side).is_present()
            {
                self.connect(current, side);
            }
        }

        // Tree: new rooms in empty cells, always linked, then recurse
        for side in sides {
            let Some(next) = self.neighbor(cell, side) else {
                continue;
            };
            if self.room_at_cell(next).is_some() {
                continue;
            }

            let kind = if depth + 1 == max_depth {
                RoomKind::Boss
            } else {
                RoomKind::Normal
            };
            let room = Room::new(kind, tuning.room.width, tuning.room.height, tuning, rng);
            self.add_room(next, room);
            self.connect(current, side);
            self.carve(next, depth + 1, max_depth, tuning, rng);
        }
    }

    /// Cell holding the start room
    pub fn start_cell(&self) -> Cell {
        (self.grid_size / 2, self.grid_size / 2)
    }

    pub fn start_room(&self) -> Option<RoomId> {
        self.room_at_cell(self.start_cell())
    }

    /// Room at signed coordinates; `None` when out of range or empty
    pub fn room_at(&self, x: i32, y: i32) -> Option<RoomId> {
        if x < 0 || y < 0 {
            return None;
        }
        self.room_at_cell((x as usize, y as usize))
    }

    pub fn room_at_cell(&self, (x, y): Cell) -> Option<RoomId> {
        if x >= self.grid_size || y >= self.grid_size {
            return None;
        }
        self.grid[y * self.grid_size + x]
    }

    pub fn cell_of(&self, id: RoomId) -> Option<Cell> {
        self.cells.get(id).copied()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Adjacent in-bounds cell
    pub fn neighbor(&self, (x, y): Cell, side: Side) -> Option<Cell> {
        let (dx, dy) = side.offset();
        let nx = x as i64 + dx as i64;
        let ny = y as i64 + dy as i64;
        let size = self.grid_size as i64;
        if nx < 0 || ny < 0 || nx >= size || ny >= size {
            return None;
        }
        Some((nx as usize, ny as usize))
    }

    /// Place a room in an empty cell; returns its id
    pub fn add_room(&mut self, (x, y): Cell, room: Room) -> RoomId {
        let id = self.rooms.len();
        self.rooms.push(room);
        self.cells.push((x, y));
        self.grid[y * self.grid_size + x] = Some(id);
        id
    }

    /// Put a door on `side` of `id` and the matching side of its neighbour.
    /// Each door opens or closes with its own room's cleared state.
    pub fn connect(&mut self, id: RoomId, side: Side) -> bool {
        let Some(cell) = self.cell_of(id) else {
            return false;
        };
        let Some(other) = self.neighbor(cell, side).and_then(|n| self.room_at_cell(n)) else {
            return false;
        };

        for (room_id, room_side) in [(id, side), (other, side.opposite())] {
            let room = &mut self.rooms[room_id];
            let door = if room.cleared { Door::Open } else { Door::Closed };
            room.set_door(room_side, door);
        }
        true
    }

    /// Rooms reachable from the start room over door edges (open or closed)
    pub fn reachable_from_start(&self) -> Vec<bool> {
        let mut visited = vec![false; self.rooms.len()];
        let Some(start) = self.start_room() else {
            return visited;
        };

        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if visited[id] {
                continue;
            }
            visited[id] = true;

            let cell = self.cells[id];
            for (side, door) in self.rooms[id].doors.iter() {
                if !door.is_present() {
                    continue;
                }
                let next = self.neighbor(cell, side).and_then(|n| self.room_at_cell(n));
                if let Some(next) = next {
                    if !visited[next] {
                        stack.push(next);
                    }
                }
            }
        }
        visited
    }

    /// Force-connect unreachable rooms to reachable neighbours until every
    /// room is reachable. Returns the number of doors added.
    pub fn repair_connectivity(&mut self) -> usize {
        let mut added = 0;
        loop {
            let reached = self.reachable_from_start();
            if reached.iter().all(|&r| r) {
                break;
            }

            let link = reached
                .iter()
                .enumerate()
                .filter(|&(_, &seen)| !seen)
                .find_map(|(id, _)| {
                    let cell = self.cells[id];
                    Side::ALL.into_iter().find_map(|side| {
                        let other = self.neighbor(cell, side).and_then(|n| self.room_at_cell(n))?;
                        reached[other].then_some((id, side))
                    })
                });

            match link {
                Some((id, side)) => {
                    self.connect(id, side);
                    added += 1;
                }
                None => {
                    let stranded = reached.iter().filter(|&&r| !r).count();
                    log::warn!("{} rooms have no reachable neighbour to connect to", stranded);
                    break;
                }
            }
        }

        if added > 0 {
            log::debug!("Repair pass added {} doors", added);
        }
        added
    }

    /// True once every room except the start room is cleared
    pub fn all_combat_rooms_cleared(&self) -> bool {
        self.rooms
            .iter()
            .all(|room| room.kind == RoomKind::Start || room.cleared)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Iterate `(cell, room id)` over occupied slots, row by row
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, RoomId)> + '_ {
        self.grid.iter().enumerate().filter_map(move |(i, slot)| {
            slot.map(|id| ((i % self.grid_size, i / self.grid_size), id))
        })
    }
}
