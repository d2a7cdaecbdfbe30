//! Feed orchestration: when symbols are pushed into the engine.
//!
//! Decouples "evaluate this string" from the cadence symbols are applied at,
//! so a frontend can animate evaluation (one symbol every `delay` seconds)
//! or commit symbols as the user types, one character behind the cursor.
//! The controller never owns the engine; callers pass it in per operation so
//! the render/input layer keeps a single place of ownership.

use tracing::{debug, warn};

use crate::engine::AutomatonEngine;
use crate::error::{AutomatonError, AutomatonResult};

/// Default per-symbol delay for timed feeding, in seconds.
pub const DEFAULT_FEED_DELAY: f32 = 0.5;

/// What the controller is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Advancing through a buffered string on a fixed per-symbol delay.
    Timed,
    /// Committing symbols as they are typed, one character behind.
    Live,
}

/// Drives an [`AutomatonEngine`] incrementally.
#[derive(Debug, Default)]
pub struct FeedController {
    phase: FeedPhase,
    buffer: Vec<char>,
    cursor: usize,
    timer: f32,
    delay: f32,
    finished: bool,
    error: Option<AutomatonError>,
}

impl FeedController {
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_FEED_DELAY,
            ..Default::default()
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// Whether a timed feed is in flight.
    pub fn is_feeding(&self) -> bool {
        self.phase == FeedPhase::Timed
    }

    /// Whether live typing is in flight.
    pub fn is_live(&self) -> bool {
        self.phase == FeedPhase::Live
    }

    /// Whether the last timed feed ran to the end of its buffer.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The error that halted or blemished the last feed, if any.
    pub fn last_error(&self) -> Option<&AutomatonError> {
        self.error.as_ref()
    }

    /// The buffered input being fed.
    pub fn buffer(&self) -> &[char] {
        &self.buffer
    }

    /// Index of the next symbol to be applied.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The not-yet-committed symbol the cursor points at, for validity
    /// highlighting.
    pub fn pending(&self) -> Option<char> {
        self.buffer.get(self.cursor).copied()
    }

    /// Evaluate the whole string at once. Any in-flight feed is cancelled
    /// first; the result is available immediately.
    pub fn feed_atomic(
        &mut self,
        engine: &mut AutomatonEngine,
        input: &str,
    ) -> AutomatonResult<bool> {
        self.cancel(engine);
        engine.feed(input, false)
    }

    /// Begin feeding `input` one symbol every `delay` seconds. The engine is
    /// reset so evaluation starts from the initial state.
    pub fn start_timed_feed(&mut self, engine: &mut AutomatonEngine, input: &str, delay: f32) {
        engine.reset();
        self.buffer = input.chars().collect();
        self.cursor = 0;
        self.timer = 0.0;
        self.delay = delay;
        self.finished = false;
        self.error = None;
        self.phase = FeedPhase::Timed;
        debug!(symbols = self.buffer.len(), delay, "timed_feed_start");
    }

    /// Advance the timed feed by `dt` seconds of wall-clock time. At most one
    /// symbol is applied per call; the delay is subtracted from the
    /// accumulated timer rather than resetting it, so no time is lost to
    /// frame jitter. Returns whether the cursor moved.
    pub fn tick(&mut self, engine: &mut AutomatonEngine, dt: f32) -> bool {
        if self.phase != FeedPhase::Timed {
            return false;
        }

        if self.cursor < self.buffer.len() {
            self.timer += dt;
            if self.timer < self.delay {
                return false;
            }
            self.timer -= self.delay;

            if let Err(err) = engine.feed_char(self.buffer[self.cursor]) {
                warn!(error = %err, cursor = self.cursor, "timed_feed_halted");
                self.error = Some(err);
                self.phase = FeedPhase::Idle;
            }
            self.cursor += 1;
            true
        } else {
            self.finished = true;
            self.phase = FeedPhase::Idle;
            debug!("timed_feed_finished");
            false
        }
    }

    /// Begin live typing. The engine is reset and the buffer cleared.
    pub fn start_live_feed(&mut self, engine: &mut AutomatonEngine) {
        engine.reset();
        self.buffer.clear();
        self.cursor = 0;
        self.timer = 0.0;
        self.finished = false;
        self.error = None;
        self.phase = FeedPhase::Live;
        debug!("live_feed_start");
    }

    /// Append a typed character. The previously pending character (the one
    /// before the one just typed) is committed to the engine; the new one
    /// stays pending for validity highlighting.
    pub fn append_live_char(&mut self, engine: &mut AutomatonEngine, c: char) {
        if self.phase != FeedPhase::Live {
            return;
        }
        self.buffer.push(c);
        if self.buffer.len() > 1 {
            let committed = self.buffer[self.buffer.len() - 2];
            if let Err(err) = engine.feed_char(committed) {
                warn!(error = %err, "live_feed_invalid_symbol");
                self.error = Some(err);
            }
        }
        self.cursor = self.buffer.len() - 1;
    }

    /// End live typing, committing the final pending character immediately.
    pub fn end_live_feed(&mut self, engine: &mut AutomatonEngine) {
        if self.phase != FeedPhase::Live {
            return;
        }
        if let Some(&last) = self.buffer.last() {
            if let Err(err) = engine.feed_char(last) {
                warn!(error = %err, "live_feed_invalid_symbol");
                self.error = Some(err);
            }
        }
        self.buffer.clear();
        self.cursor = 0;
        self.phase = FeedPhase::Idle;
        debug!("live_feed_end");
    }

    /// Stop any in-flight feed, drop the buffered input, and reset the
    /// engine. Runs synchronously, so no partially-advanced state is ever
    /// observable afterwards.
    pub fn cancel(&mut self, engine: &mut AutomatonEngine) {
        self.buffer.clear();
        self.cursor = 0;
        self.timer = 0.0;
        self.finished = false;
        self.error = None;
        self.phase = FeedPhase::Idle;
        engine.reset();
        debug!("feed_cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfa_viz_core::AutomatonDescription;

    fn engine() -> AutomatonEngine {
        AutomatonEngine::from_description(&AutomatonDescription::sample()).unwrap()
    }

    #[test]
    fn test_atomic_feed() {
        let mut eng = engine();
        let mut feed = FeedController::new();
        assert_eq!(feed.feed_atomic(&mut eng, "1001"), Ok(true));
        assert_eq!(feed.feed_atomic(&mut eng, "11"), Ok(false));
    }

    #[test]
    fn test_timed_feed_applies_one_symbol_per_delay() {
        let mut eng = engine();
        let mut feed = FeedController::new();
        feed.start_timed_feed(&mut eng, "1001", 0.5);
        assert!(feed.is_feeding());

        // Not enough accumulated time yet.
        assert!(!feed.tick(&mut eng, 0.3));
        assert_eq!(eng.current_state_name(), "q0");

        // Crosses the delay; the remainder carries over.
        assert!(feed.tick(&mut eng, 0.3));
        assert_eq!(eng.current_state_name(), "q1");
        assert_eq!(feed.cursor(), 1);

        // 0.1 carried + 0.4 = 0.5 fires again immediately.
        assert!(feed.tick(&mut eng, 0.4));
        assert_eq!(eng.current_state_name(), "q3");
    }

    #[test]
    fn test_timed_feed_finishes() {
        let mut eng = engine();
        let mut feed = FeedController::new();
        feed.start_timed_feed(&mut eng, "10", 0.1);
        for _ in 0..2 {
            assert!(feed.tick(&mut eng, 0.1));
        }
        assert!(!feed.is_finished());
        // One more tick past the end flips the finished flag.
        assert!(!feed.tick(&mut eng, 0.1));
        assert!(feed.is_finished());
        assert!(!feed.is_feeding());
        assert!(eng.is_accepting());
    }

    #[test]
    fn test_timed_feed_halts_on_invalid_symbol() {
        let mut eng = engine();
        let mut feed = FeedController::new();
        feed.start_timed_feed(&mut eng, "1x0", 0.1);
        assert!(feed.tick(&mut eng, 0.1));
        assert_eq!(eng.current_state_name(), "q1");

        // The invalid symbol stops advancement but does not reset the engine.
        assert!(feed.tick(&mut eng, 0.1));
        assert!(!feed.is_feeding());
        assert!(!feed.is_finished());
        assert_eq!(
            feed.last_error(),
            Some(&AutomatonError::InvalidSymbol { symbol: "x".into() })
        );
        assert_eq!(eng.current_state_name(), "q1");

        // No further symbols are applied.
        assert!(!feed.tick(&mut eng, 10.0));
        assert_eq!(eng.current_state_name(), "q1");
    }

    #[test]
    fn test_live_feed_lags_one_char() {
        let mut eng = engine();
        let mut feed = FeedController::new();
        feed.start_live_feed(&mut eng);

        feed.append_live_char(&mut eng, '1');
        // First char stays pending.
        assert_eq!(eng.current_state_name(), "q0");
        assert_eq!(feed.pending(), Some('1'));

        feed.append_live_char(&mut eng, '0');
        // Typing the second char commits the first.
        assert_eq!(eng.current_state_name(), "q1");
        assert_eq!(feed.pending(), Some('0'));

        feed.append_live_char(&mut eng, '0');
        assert_eq!(eng.current_state_name(), "q3");

        // Ending live input flushes the pending char.
        feed.end_live_feed(&mut eng);
        assert_eq!(eng.current_state_name(), "q2");
        assert!(!feed.is_live());
        assert!(feed.buffer().is_empty());
    }

    #[test]
    fn test_live_feed_records_error_but_continues() {
        let mut eng = engine();
        let mut feed = FeedController::new();
        feed.start_live_feed(&mut eng);
        feed.append_live_char(&mut eng, 'z');
        feed.append_live_char(&mut eng, '1');
        // 'z' was committed and rejected; state unchanged, error recorded.
        assert_eq!(eng.current_state_name(), "q0");
        assert!(feed.last_error().is_some());
        assert!(feed.is_live());

        feed.end_live_feed(&mut eng);
        assert_eq!(eng.current_state_name(), "q1");
    }

    #[test]
    fn test_cancel_clears_everything_and_resets() {
        let mut eng = engine();
        let mut feed = FeedController::new();
        feed.start_timed_feed(&mut eng, "1001", 0.1);
        feed.tick(&mut eng, 0.1);
        assert_eq!(eng.current_state_name(), "q1");

        feed.cancel(&mut eng);
        assert_eq!(feed.phase(), FeedPhase::Idle);
        assert!(feed.buffer().is_empty());
        assert_eq!(feed.cursor(), 0);
        assert!(feed.last_error().is_none());
        assert!(!feed.is_finished());
        assert_eq!(eng.current_state_name(), "q0");
        assert_eq!(eng.previous_state(), None);
    }

    #[test]
    fn test_tick_outside_timed_phase_is_inert() {
        let mut eng = engine();
        let mut feed = FeedController::new();
        assert!(!feed.tick(&mut eng, 1.0));
        feed.start_live_feed(&mut eng);
        assert!(!feed.tick(&mut eng, 1.0));
        assert_eq!(eng.current_state_name(), "q0");
    }
}
