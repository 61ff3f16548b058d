//! Keyboard state merged into per-tick input
//!
//! WASD and the arrow keys are independent bindings for movement. Space and
//! the arrow keys also fire: each key-down event queues one shot. An arrow
//! key aims the shot its own way; space aims at the held direction (up, down,
//! left, right priority) or the facing direction when nothing is held.

use crate::sim::{Direction, MoveKeys, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Restart,
}

impl Key {
    /// Parse a DOM-style key name; letters are case-insensitive
    pub fn from_name(name: &str) -> Option<Key> {
        match name {
            "ArrowUp" => return Some(Key::ArrowUp),
            "ArrowDown" => return Some(Key::ArrowDown),
            "ArrowLeft" => return Some(Key::ArrowLeft),
            "ArrowRight" => return Some(Key::ArrowRight),
            " " | "Space" | "Spacebar" => return Some(Key::Space),
            _ => {}
        }

        match name.to_ascii_lowercase().as_str() {
            "w" => Some(Key::W),
            "a" => Some(Key::A),
            "s" => Some(Key::S),
            "d" => Some(Key::D),
            "r" => Some(Key::Restart),
            _ => None,
        }
    }

    /// Whether pressing this key queues a shot
    pub fn fires(self) -> bool {
        matches!(
            self,
            Key::Space | Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }

    /// Direction an arrow key shoots in
    pub fn arrow_direction(self) -> Option<Direction> {
        match self {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardState {
    wasd: MoveKeys,
    arrows: MoveKeys,
    // One-shot inputs, cleared after each tick
    fire: bool,
    aim: Option<Direction>,
    restart: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key-down event. Returns false for keys the game ignores.
    pub fn key_down(&mut self, name: &str) -> bool {
        let Some(key) = Key::from_name(name) else {
            return false;
        };

        self.set_held(key, true);

        if key.fires() {
            self.fire = true;
            self.aim = key.arrow_direction().or_else(|| self.held_direction());
        }
        if key == Key::Restart {
            self.restart = true;
        }
        true
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        let Some(key) = Key::from_name(name) else {
            return false;
        };
        self.set_held(key, false);
        true
    }

    fn set_held(&mut self, key: Key, down: bool) {
        match key {
            Key::W => self.wasd.up = down,
            Key::S => self.wasd.down = down,
            Key::A => self.wasd.left = down,
            Key::D => self.wasd.right = down,
            Key::ArrowUp => self.arrows.up = down,
            Key::ArrowDown => self.arrows.down = down,
            Key::ArrowLeft => self.arrows.left = down,
            Key::ArrowRight => self.arrows.right = down,
            Key::Space | Key::Restart => {}
        }
    }

    /// Held movement from both bindings
    pub fn move_keys(&self) -> MoveKeys {
        MoveKeys {
            up: self.wasd.up || self.arrows.up,
            down: self.wasd.down || self.arrows.down,
            left: self.wasd.left || self.arrows.left,
            right: self.wasd.right || self.arrows.right,
        }
    }

    fn held_direction(&self) -> Option<Direction> {
        let keys = self.move_keys();
        if keys.up {
            Some(Direction::Up)
        } else if keys.down {
            Some(Direction::Down)
        } else if keys.left {
            Some(Direction::Left)
        } else if keys.right {
            Some(Direction::Right)
        } else {
            None
        }
    }

    #[inline]
    pub fn restart_requested(&self) -> bool {
        self.restart
    }

    /// Snapshot for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            keys: self.move_keys(),
            fire: self.fire,
            aim: self.aim,
            restart: self.restart,
        }
    }

    /// Clear one-shot inputs after processing
    pub fn clear_one_shots(&mut self) {
        self.fire = false;
        self.aim = None;
        self.restart = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(Key::from_name("W"), Some(Key::W));
        assert_eq!(Key::from_name("d"), Some(Key::D));
        assert_eq!(Key::from_name("R"), Some(Key::Restart));
        assert_eq!(Key::from_name("arrowup"), None);
        assert_eq!(Key::from_name("Shift"), None);
    }

    #[test]
    fn test_every_arrow_key_moves() {
        let cases = [
            ("ArrowUp", MoveKeys { up: true, ..Default::default() }),
            ("ArrowDown", MoveKeys { down: true, ..Default::default() }),
            ("ArrowLeft", MoveKeys { left: true, ..Default::default() }),
            ("ArrowRight", MoveKeys { right: true, ..Default::default() }),
        ];
        for (name, expected) in cases {
            let mut keyboard = KeyboardState::new();
            assert!(keyboard.key_down(name));
            assert_eq!(keyboard.move_keys(), expected, "{name}");
            keyboard.key_up(name);
            assert_eq!(keyboard.move_keys(), MoveKeys::default());
        }
    }

    #[test]
    fn test_bindings_are_independent() {
        let mut keyboard = KeyboardState::new();
        keyboard.key_down("a");
        keyboard.key_down("ArrowLeft");
        keyboard.key_up("ArrowLeft");
        assert!(keyboard.move_keys().left);
        keyboard.key_up("a");
        assert!(!keyboard.move_keys().left);
    }

    #[test]
    fn test_arrow_fires_in_its_direction() {
        let mut keyboard = KeyboardState::new();
        keyboard.key_down("ArrowLeft");
        let input = keyboard.tick_input();
        assert!(input.fire);
        assert_eq!(input.aim, Some(Direction::Left));

        keyboard.clear_one_shots();
        let input = keyboard.tick_input();
        assert!(!input.fire);
        assert_eq!(input.aim, None);
        // Still held for movement
        assert!(input.keys.left);
    }

    #[test]
    fn test_arrow_aim_beats_held_keys() {
        let mut keyboard = KeyboardState::new();
        keyboard.key_down("w");
        keyboard.key_down("ArrowLeft");
        let input = keyboard.tick_input();
        assert!(input.fire);
        assert_eq!(input.aim, Some(Direction::Left));
        assert!(input.keys.up && input.keys.left);

        keyboard.clear_one_shots();
        keyboard.key_down("ArrowDown");
        assert_eq!(keyboard.tick_input().aim, Some(Direction::Down));
    }

    #[test]
    fn test_space_fires_toward_held_direction() {
        let mut keyboard = KeyboardState::new();
        keyboard.key_down(" ");
        assert_eq!(keyboard.tick_input().aim, None);
        keyboard.clear_one_shots();

        keyboard.key_down("s");
        assert!(!keyboard.tick_input().fire);
        keyboard.key_down("Space");
        assert_eq!(keyboard.tick_input().aim, Some(Direction::Down));
    }

    #[test]
    fn test_restart_is_one_shot() {
        let mut keyboard = KeyboardState::new();
        keyboard.key_down("r");
        assert!(keyboard.restart_requested());
        assert!(keyboard.tick_input().restart);
        keyboard.clear_one_shots();
        assert!(!keyboard.restart_requested());
    }
}
