//! Error types for automaton construction and evaluation.

use thiserror::Error;

/// Result type alias for automaton operations.
pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Runtime errors during evaluation. The only member is recoverable: the
/// engine state is left untouched and the caller decides whether to abort,
/// halt, or skip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// The fed symbol is not part of the alphabet.
    #[error("symbol {symbol:?} is not in the alphabet")]
    InvalidSymbol { symbol: String },
}

/// Fatal configuration errors raised once, at construction. An automaton
/// never exists in an invalid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The state set is empty; there is no initial state.
    #[error("state set is empty")]
    EmptyStates,

    /// The alphabet is empty.
    #[error("alphabet is empty")]
    EmptyAlphabet,

    /// A symbol entry is the empty string.
    #[error("alphabet contains an empty symbol")]
    EmptySymbol,

    /// A state identifier appears more than once.
    #[error("duplicate state {state:?}")]
    DuplicateState { state: String },

    /// A symbol appears more than once in the alphabet.
    #[error("duplicate symbol {symbol:?}")]
    DuplicateSymbol { symbol: String },

    /// The accepting set references a state that is not declared.
    #[error("accepting set references unknown state {state:?}")]
    UnknownAcceptingState { state: String },

    /// The transition table has no row for a declared state.
    #[error("no transitions declared for state {state:?}")]
    MissingTransitionRow { state: String },

    /// A (state, symbol) pair has no transition; the function must be total.
    #[error("missing transition for state {state:?} on symbol {symbol:?}")]
    MissingTransition { state: String, symbol: String },

    /// A transition row belongs to a state that is not declared.
    #[error("transition row for unknown state {state:?}")]
    UnknownTransitionState { state: String },

    /// A transition row is keyed by a symbol outside the alphabet.
    #[error("transition for state {state:?} keyed by unknown symbol {symbol:?}")]
    UnknownTransitionSymbol { state: String, symbol: String },

    /// A transition points at a state that is not declared.
    #[error("transition {state:?} --{symbol:?}--> {target:?} targets an unknown state")]
    UnknownTransitionTarget {
        state: String,
        symbol: String,
        target: String,
    },
}
