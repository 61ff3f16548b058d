//! Session driver
//!
//! Owns the game state, the frame clock and the keyboard. The host calls
//! [`Session::frame`] once per display frame with the elapsed real time; the
//! session runs the due ticks, forwards events, and presents a single view.

use crate::clock::FrameClock;
use crate::input::KeyboardState;
use crate::sim::{GameEvent, GameState, tick};
use crate::tuning::Tuning;
use crate::view::FrameView;

/// Render and HUD collaborator
pub trait Presenter {
    /// Called once per running frame, after every tick of that frame
    fn present(&mut self, view: &FrameView);

    /// Called for each game event, oldest first, before `present`
    fn notify(&mut self, _event: &GameEvent) {}
}

pub struct Session {
    pub state: GameState,
    pub clock: FrameClock,
    pub keyboard: KeyboardState,
    running: bool,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let clock = FrameClock::from_tuning(&tuning.game_loop);
        log::info!("Starting session (seed {})", seed);
        Self {
            state: GameState::new(seed, tuning),
            clock,
            keyboard: KeyboardState::new(),
            running: true,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn key_down(&mut self, name: &str) -> bool {
        self.keyboard.key_down(name)
    }

    pub fn key_up(&mut self, name: &str) -> bool {
        self.keyboard.key_up(name)
    }

    /// Advance by `elapsed_ms` of real time and present the result.
    ///
    /// Once the run is over the session stops ticking and presenting until a
    /// restart key arrives. Returns the number of ticks run.
    pub fn frame<P: Presenter + ?Sized>(&mut self, elapsed_ms: f64, presenter: &mut P) -> u32 {
        if !self.running {
            if !self.keyboard.restart_requested() {
                return 0;
            }
            // A game-over tick with the restart flag starts the new run
            tick(&mut self.state, &self.keyboard.tick_input());
            self.keyboard.clear_one_shots();
            self.clock.reset();
            self.running = true;
        }

        let state = &mut self.state;
        let keyboard = &mut self.keyboard;
        let ticks = self.clock.advance(elapsed_ms, || {
            let input = keyboard.tick_input();
            tick(state, &input);

            // Clear one-shot inputs after processing
            keyboard.clear_one_shots();
        });

        for event in self.state.drain_events() {
            presenter.notify(&event);
        }
        presenter.present(&FrameView::capture(&self.state));

        if self.state.is_game_over() {
            self.running = false;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_MS;
    use crate::sim::GamePhase;

    #[derive(Default)]
    struct Recorder {
        frames: u32,
        events: Vec<GameEvent>,
        last: Option<FrameView>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, view: &FrameView) {
            self.frames += 1;
            self.last = Some(view.clone());
        }

        fn notify(&mut self, event: &GameEvent) {
            self.events.push(event.clone());
        }
    }

    #[test]
    fn test_one_present_per_frame() {
        let mut session = Session::new(1, Tuning::default());
        let mut recorder = Recorder::default();

        assert_eq!(session.frame(TICK_MS * 3.5, &mut recorder), 3);
        assert_eq!(recorder.frames, 1);
        assert_eq!(session.state.time_ticks, 3);

        // Not enough time for a tick still presents
        assert_eq!(session.frame(1.0, &mut recorder), 0);
        assert_eq!(recorder.frames, 2);
    }

    #[test]
    fn test_events_forwarded() {
        let mut session = Session::new(1, Tuning::default());
        let mut recorder = Recorder::default();
        session.frame(0.0, &mut recorder);
        assert!(matches!(recorder.events[0], GameEvent::RoomEntered { .. }));
        assert!(session.state.events().is_empty());
    }

    #[test]
    fn test_fire_is_consumed_by_one_tick() {
        let mut session = Session::new(1, Tuning::default());
        let mut recorder = Recorder::default();
        session.key_down(" ");
        session.frame(TICK_MS * 2.5, &mut recorder);
        assert_eq!(session.state.room().projectiles.len(), 1);
        assert!(!session.keyboard.tick_input().fire);
    }

    #[test]
    fn test_stops_on_game_over_and_restarts() {
        let mut session = Session::new(4, Tuning::default());
        let mut recorder = Recorder::default();
        session.state.player.take_damage(10.0);

        session.frame(TICK_MS * 1.5, &mut recorder);
        assert!(!session.is_running());
        assert!(recorder.last.as_ref().is_some_and(|v| v.game_over));
        assert!(recorder.events.contains(&GameEvent::GameOver { score: 0 }));

        // Stopped: nothing ticks or renders
        let frames = recorder.frames;
        assert_eq!(session.frame(TICK_MS * 4.0, &mut recorder), 0);
        assert_eq!(recorder.frames, frames);

        session.key_down("r");
        session.frame(TICK_MS * 1.5, &mut recorder);
        assert!(session.is_running());
        assert_eq!(session.state.phase, GamePhase::Playing);
        assert_eq!(recorder.frames, frames + 1);
    }
}
