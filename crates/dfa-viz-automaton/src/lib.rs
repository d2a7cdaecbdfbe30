//! Deterministic finite acceptor engine with incremental, abortable feeding.
//!
//! Two layers live here:
//!
//! - [`Automaton`] / [`AutomatonEngine`]: a description compiled into a dense
//!   transition table (states and symbols interned to integer indices, δ in
//!   one flat row-major array) plus the runtime cursor that walks it.
//! - [`FeedController`]: orchestrates *when* symbols reach the engine:
//!   atomically, on a fixed per-symbol delay, or live while the user types,
//!   one character behind the input cursor.
//!
//! Construction is the only fatal failure point: an inconsistent description
//! (duplicates, accepting states outside the state set, holes in δ) is
//! rejected up front, so evaluation itself can only ever fail with a
//! recoverable [`AutomatonError::InvalidSymbol`].

mod engine;
mod error;
mod feed;

pub use engine::{Automaton, AutomatonEngine};
pub use error::{AutomatonError, AutomatonResult, DefinitionError};
pub use feed::{FeedController, FeedPhase, DEFAULT_FEED_DELAY};
