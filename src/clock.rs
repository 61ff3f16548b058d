//! Fixed timestep scheduler
//!
//! Real frame time goes into an accumulator and comes out as whole simulation
//! ticks. A stalled frame runs at most `max_ticks` ticks; any further backlog
//! is dropped instead of spiralling.

use crate::consts::{MAX_TICKS_PER_FRAME, TICK_MS};
use crate::tuning::LoopTuning;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    /// Unsimulated time carried into the next frame (ms)
    accumulator: f64,
    tick_ms: f64,
    max_ticks: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(TICK_MS, MAX_TICKS_PER_FRAME)
    }
}

impl FrameClock {
    pub fn new(tick_ms: f64, max_ticks: u32) -> Self {
        let tick_ms = if tick_ms > 0.0 {
            tick_ms
        } else {
            log::warn!("Invalid tick length {}ms, using {}ms", tick_ms, TICK_MS);
            TICK_MS
        };
        Self {
            accumulator: 0.0,
            tick_ms,
            max_ticks,
        }
    }

    pub fn from_tuning(tuning: &LoopTuning) -> Self {
        Self::new(tuning.tick_ms, tuning.max_ticks_per_frame)
    }

    #[inline]
    pub fn tick_ms(&self) -> f64 {
        self.tick_ms
    }

    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Forget any pending time (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Feed `elapsed_ms` of real time and run `step` once per whole tick,
    /// up to the catch-up cap. Returns the number of ticks run.
    pub fn advance<F: FnMut()>(&mut self, elapsed_ms: f64, mut step: F) -> u32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulator += elapsed_ms;
        }

        let mut ticks = 0;
        while self.accumulator >= self.tick_ms && ticks < self.max_ticks {
            step();
            self.accumulator -= self.tick_ms;
            ticks += 1;
        }

        // Cap hit: keep only the fractional remainder
        if self.accumulator >= self.tick_ms {
            let dropped = (self.accumulator / self.tick_ms).floor();
            self.accumulator -= dropped * self.tick_ms;
            log::debug!("Frame clock dropped {} ticks of backlog", dropped);
        }

        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FrameClock::default();
        let mut count = 0;

        assert_eq!(clock.advance(16.0, || count += 1), 0);
        assert_eq!(clock.advance(1.0, || count += 1), 1);
        assert_eq!(count, 1);
        assert!((clock.accumulator() - (17.0 - TICK_MS)).abs() < 1e-9);
    }

    #[test]
    fn test_runs_whole_ticks() {
        let mut clock = FrameClock::default();
        let mut count = 0;
        assert_eq!(clock.advance(40.0, || count += 1), 2);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_caps_catch_up_and_drops_backlog() {
        let mut clock = FrameClock::default();
        let mut count = 0;
        assert_eq!(clock.advance(1005.0, || count += 1), MAX_TICKS_PER_FRAME);
        assert_eq!(count, MAX_TICKS_PER_FRAME);
        assert!(clock.accumulator() < clock.tick_ms());

        // The dropped backlog does not come back next frame
        assert_eq!(clock.advance(0.0, || count += 1), 0);
    }

    #[test]
    fn test_ignores_bad_elapsed() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(-50.0, || {}), 0);
        assert_eq!(clock.advance(f64::NAN, || {}), 0);
        assert_eq!(clock.accumulator(), 0.0);
    }

    #[test]
    fn test_invalid_tick_length_falls_back() {
        let clock = FrameClock::new(0.0, 4);
        assert_eq!(clock.tick_ms(), TICK_MS);
    }
}
