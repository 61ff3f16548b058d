//! A single room: contents, door state and per-tick interactions
//!
//! A room owns its enemies, items and projectiles. Each tick it runs enemy AI,
//! resolves projectile hits and pickups, and opens its doors the moment the
//! last enemy falls.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyVariant};
use super::entity::{Bounded, collides};
use super::geom::random_point;
use super::item::{Item, ItemKind};
use super::player::Player;
use super::projectile::{Owner, Projectile};
use crate::tuning::{RoomTuning, Tuning};

/// Room roles within a dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoomKind {
    /// Entry room: never has enemies, doors always open
    Start,
    #[default]
    Normal,
    /// Deepest rooms, guarded by a boss
    Boss,
    /// Guaranteed pickup
    Item,
}

impl RoomKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomKind::Start => "start",
            RoomKind::Normal => "normal",
            RoomKind::Boss => "boss",
            RoomKind::Item => "item",
        }
    }
}

/// Door tri-state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Door {
    /// No connection on this side
    #[default]
    Absent,
    /// Connected but blocked until the room is cleared
    Closed,
    /// Connected and passable
    Open,
}

impl Door {
    #[inline]
    pub fn is_present(&self) -> bool {
        !matches!(self, Door::Absent)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, Door::Open)
    }
}

/// Room edges, in transition priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Grid offset `(dx, dy)` of the neighbouring cell
    pub fn offset(self) -> (i32, i32) {
        match self {
            Side::Top => (0, -1),
            Side::Right => (1, 0),
            Side::Bottom => (0, 1),
            Side::Left => (-1, 0),
        }
    }
}

/// Door state on every side of a room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doors {
    pub top: Door,
    pub right: Door,
    pub bottom: Door,
    pub left: Door,
}

impl Doors {
    pub fn get(&self, side: Side) -> Door {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    pub fn set(&mut self, side: Side, door: Door) {
        match side {
            Side::Top => self.top = door,
            Side::Right => self.right = door,
            Side::Bottom => self.bottom = door,
            Side::Left => self.left = door,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, Door)> + '_ {
        Side::ALL.into_iter().map(|side| (side, self.get(side)))
    }

    /// Set every present door to `door`, leaving absent ones alone
    fn set_present(&mut self, door: Door) {
        for side in Side::ALL {
            if self.get(side).is_present() {
                self.set(side, door);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub width: f32,
    pub height: f32,
    pub kind: RoomKind,
    pub doors: Doors,
    /// Enemy population has reached zero at least once
    pub cleared: bool,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub projectiles: Vec<Projectile>,
    /// Walls are this far inside the room edges
    pub wall_padding: f32,
}

impl Room {
    /// A room with no contents and no doors
    pub fn empty(kind: RoomKind, width: f32, height: f32, tuning: &RoomTuning) -> Self {
        Self {
            width,
            height,
            kind,
            doors: Doors::default(),
            cleared: kind == RoomKind::Start,
            enemies: Vec::new(),
            items: Vec::new(),
            projectiles: Vec::new(),
            wall_padding: tuning.wall_padding,
        }
    }

    /// A room populated according to its kind
    pub fn new<R: Rng + ?Sized>(
        kind: RoomKind,
        width: f32,
        height: f32,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Self {
        let mut room = Self::empty(kind, width, height, &tuning.room);
        room.generate_contents(tuning, rng);
        room
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    #[inline]
    pub fn door(&self, side: Side) -> Door {
        self.doors.get(side)
    }

    pub fn set_door(&mut self, side: Side, door: Door) {
        self.doors.set(side, door);
    }

    /// Open every present door
    pub fn open_doors(&mut self) {
        self.doors.set_present(Door::Open);
    }

    /// Present doors follow the cleared flag: open if cleared, closed otherwise
    pub fn sync_doors(&mut self) {
        let door = if self.cleared { Door::Open } else { Door::Closed };
        self.doors.set_present(door);
    }

    /// (Re)populate enemies and items for the room's kind
    pub fn generate_contents<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        self.enemies.clear();
        self.items.clear();
        self.projectiles.clear();
        self.cleared = self.kind == RoomKind::Start;

        if self.kind != RoomKind::Start {
            let max = tuning.room.max_enemies.max(1) as i32;
            let count = rng.random_range(1..=max) as u32;

            let fill_attempts = tuning.room.fill_attempts;
            let mut attempts = 0;
            while self.enemies.is_empty() && attempts < fill_attempts {
                self.spawn_enemies(count, tuning, rng);
                attempts += 1;

                // Last resort before giving up: one basic enemy in the middle
                if self.enemies.is_empty() && attempts + 1 == fill_attempts {
                    self.enemies
                        .push(Enemy::new(self.center(), EnemyVariant::Basic, &tuning.enemy));
                }
            }

            if self.kind == RoomKind::Normal
                && rng.random_bool(tuning.item.normal_room_chance.clamp(0.0, 1.0))
            {
                self.spawn_item(false, tuning, rng);
            }
        }

        match self.kind {
            RoomKind::Item => {
                self.spawn_item(true, tuning, rng);
            }
            RoomKind::Boss => self.spawn_boss(tuning),
            RoomKind::Start | RoomKind::Normal => {}
        }

        if self.kind != RoomKind::Start && self.enemies.is_empty() {
            self.cleared = true;
        }
        self.sync_doors();
    }

    /// Place up to `count` enemies at least `enemy_spacing` apart.
    /// Enemies that find no spot within the attempt budget are dropped.
    fn spawn_enemies<R: Rng + ?Sized>(&mut self, count: u32, tuning: &Tuning, rng: &mut R) {
        let margin = Vec2::splat(tuning.room.padding + tuning.enemy.size);
        let min = margin;
        let max = self.size() - margin;

        for _ in 0..count {
            let variant = EnemyVariant::roll(rng, &tuning.enemy);

            let mut spot = None;
            for _ in 0..tuning.room.placement_attempts {
                let candidate = random_point(rng, min, max);
                let clear = self
                    .enemies
                    .iter()
                    .all(|e| e.body.pos.distance(candidate) >= tuning.room.enemy_spacing);
                if clear {
                    spot = Some(candidate);
                    break;
                }
            }

            if let Some(pos) = spot {
                self.enemies.push(Enemy::new(pos, variant, &tuning.enemy));
            }
        }
    }

    pub fn spawn_boss(&mut self, tuning: &Tuning) {
        self.enemies.push(Enemy::boss(self.center(), &tuning.enemy));
    }

    /// Drop an item in the room center unless one is already lying there.
    /// `special` draws uniformly over every kind.
    pub fn spawn_item<R: Rng + ?Sized>(
        &mut self,
        special: bool,
        tuning: &Tuning,
        rng: &mut R,
    ) -> bool {
        if !self.items.is_empty() {
            return false;
        }

        let kind = if special {
            ItemKind::random_any(rng)
        } else {
            ItemKind::random_drop(rng, &tuning.item)
        };
        self.items.push(Item::new(self.center(), kind, &tuning.item));
        true
    }

    pub fn add_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    /// Whether a box pokes into the wall padding on any side
    pub fn check_wall_collision<B: Bounded + ?Sized>(&self, body: &B) -> bool {
        let b = body.bounds();
        let pad = self.wall_padding;
        b.left() < pad
            || b.right() > self.width - pad
            || b.top() < pad
            || b.bottom() > self.height - pad
    }

    /// Advance everything in the room by one tick.
    ///
    /// Order is fixed: enemies, then projectiles, then the clear check, then
    /// items. `on_kill` fires once per enemy killed by a player projectile.
    /// Returns true only on the tick the room becomes cleared.
    pub fn update<R, F>(
        &mut self,
        player: &mut Player,
        tuning: &Tuning,
        rng: &mut R,
        mut on_kill: F,
    ) -> bool
    where
        R: Rng + ?Sized,
        F: FnMut(&Enemy),
    {
        if self.kind == RoomKind::Start {
            self.cleared = true;
            self.open_doors();

            // Nothing to hit here; shots fly until they expire or leave
            let (w, h) = (self.width, self.height);
            self.projectiles.retain_mut(|p| {
                p.update();
                p.is_active() && !p.body.is_out_of_bounds(w, h)
            });
            return false;
        }

        let had_enemies = !self.enemies.is_empty();
        let size = self.size();

        // Enemies (back to front so removal is safe)
        let mut i = self.enemies.len();
        while i > 0 {
            i -= 1;
            if !self.enemies[i].is_active() {
                self.enemies.remove(i);
                continue;
            }

            let enemy = &mut self.enemies[i];
            enemy.update(player.pos(), size, &tuning.enemy, rng);

            if collides(&*enemy, &*player) && !player.invincible {
                player.take_damage(enemy.damage);
            }
        }

        // Projectiles
        let mut i = self.projectiles.len();
        while i > 0 {
            i -= 1;
            if !self.projectiles[i].is_active() {
                self.projectiles.remove(i);
                continue;
            }

            self.projectiles[i].update();

            if self.projectiles[i].body.is_out_of_bounds(self.width, self.height) {
                self.projectiles.remove(i);
                continue;
            }

            let damage = self.projectiles[i].damage;
            match self.projectiles[i].owner {
                Owner::Player => {
                    let mut j = self.enemies.len();
                    while j > 0 {
                        j -= 1;
                        if !self.enemies[j].is_active()
                            || !collides(&self.projectiles[i], &self.enemies[j])
                        {
                            continue;
                        }

                        let killed = self.enemies[j].take_damage(damage);
                        self.projectiles[i].body.active = false;

                        if killed {
                            on_kill(&self.enemies[j]);
                            if rng.random_bool(tuning.item.kill_drop_chance.clamp(0.0, 1.0)) {
                                self.spawn_item(false, tuning, rng);
                            }
                            self.enemies.remove(j);
                        }
                        break;
                    }
                }
                Owner::Enemy => {
                    if collides(&self.projectiles[i], &*player) && !player.invincible {
                        player.take_damage(damage);
                        self.projectiles[i].body.active = false;
                    }
                }
            }
        }

        let mut just_cleared = false;
        if had_enemies && self.enemies.is_empty() && !self.cleared {
            self.cleared = true;
            just_cleared = true;
            self.open_doors();

            if self.kind != RoomKind::Item
                && rng.random_bool(tuning.item.clear_drop_chance.clamp(0.0, 1.0))
            {
                self.spawn_item(false, tuning, rng);
            }
        }

        // Items
        let mut i = self.items.len();
        while i > 0 {
            i -= 1;
            if collides(&self.items[i], &*player) {
                if let Some(kind) = self.items[i].collect() {
                    player.add_item(kind, &tuning.player);
                }
                self.items.remove(i);
                continue;
            }
            self.items[i].update();
        }

        just_cleared
    }
}
