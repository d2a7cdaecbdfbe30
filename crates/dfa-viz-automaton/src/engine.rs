//! Compiled transition table and the evaluation engine that walks it.
//!
//! States and symbols are interned to dense indices at construction and the
//! transition function is stored row-major in a single flat array, so
//! totality is structural: once compilation succeeds there is no missing-key
//! failure mode left at runtime.

use std::collections::HashMap;

use tracing::debug;

use dfa_viz_core::{AutomatonDescription, StateId, SymbolId};

use crate::error::{AutomatonError, AutomatonResult, DefinitionError};

/// A validated, immutable deterministic finite acceptor.
///
/// `delta` is indexed as `state.index() * symbol_count + symbol.index()`.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<String>,
    symbols: Vec<String>,
    accepting: Vec<bool>,
    delta: Vec<StateId>,
    state_ids: HashMap<String, StateId>,
    symbol_ids: HashMap<String, SymbolId>,
}

impl Automaton {
    /// Compile and validate a raw description.
    ///
    /// Rejects duplicate states/symbols, accepting states outside the state
    /// set, and any hole or stray entry in the transition table.
    pub fn compile(desc: &AutomatonDescription) -> Result<Self, DefinitionError> {
        if desc.states.is_empty() {
            return Err(DefinitionError::EmptyStates);
        }
        if desc.alphabet.is_empty() {
            return Err(DefinitionError::EmptyAlphabet);
        }

        let mut state_ids = HashMap::with_capacity(desc.states.len());
        for (idx, state) in desc.states.iter().enumerate() {
            if state_ids
                .insert(state.clone(), StateId(idx as u32))
                .is_some()
            {
                return Err(DefinitionError::DuplicateState {
                    state: state.clone(),
                });
            }
        }

        let mut symbol_ids = HashMap::with_capacity(desc.alphabet.len());
        for (idx, symbol) in desc.alphabet.iter().enumerate() {
            if symbol.is_empty() {
                return Err(DefinitionError::EmptySymbol);
            }
            if symbol_ids
                .insert(symbol.clone(), SymbolId(idx as u32))
                .is_some()
            {
                return Err(DefinitionError::DuplicateSymbol {
                    symbol: symbol.clone(),
                });
            }
        }

        let mut accepting = vec![false; desc.states.len()];
        for state in &desc.accepting {
            let id = state_ids
                .get(state)
                .ok_or_else(|| DefinitionError::UnknownAcceptingState {
                    state: state.clone(),
                })?;
            accepting[id.index()] = true;
        }

        // Stray rows or symbols are configuration mistakes, same as holes.
        for (state, row) in &desc.transitions {
            if !state_ids.contains_key(state) {
                return Err(DefinitionError::UnknownTransitionState {
                    state: state.clone(),
                });
            }
            for symbol in row.keys() {
                if !symbol_ids.contains_key(symbol) {
                    return Err(DefinitionError::UnknownTransitionSymbol {
                        state: state.clone(),
                        symbol: symbol.clone(),
                    });
                }
            }
        }

        let symbol_count = desc.alphabet.len();
        let mut delta = Vec::with_capacity(desc.states.len() * symbol_count);
        for state in &desc.states {
            let row = desc
                .transitions
                .get(state)
                .ok_or_else(|| DefinitionError::MissingTransitionRow {
                    state: state.clone(),
                })?;
            for symbol in &desc.alphabet {
                let target =
                    row.get(symbol)
                        .ok_or_else(|| DefinitionError::MissingTransition {
                            state: state.clone(),
                            symbol: symbol.clone(),
                        })?;
                let target_id = state_ids.get(target).ok_or_else(|| {
                    DefinitionError::UnknownTransitionTarget {
                        state: state.clone(),
                        symbol: symbol.clone(),
                        target: target.clone(),
                    }
                })?;
                delta.push(*target_id);
            }
        }

        debug!(
            states = desc.states.len(),
            symbols = symbol_count,
            accepting = desc.accepting.len(),
            "automaton_compiled"
        );

        Ok(Self {
            states: desc.states.clone(),
            symbols: desc.alphabet.clone(),
            accepting,
            delta,
            state_ids,
            symbol_ids,
        })
    }

    /// Number of states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of alphabet symbols.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// State identifiers in declaration order.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Alphabet symbols in declaration order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Display name of a state.
    pub fn state_name(&self, state: StateId) -> &str {
        &self.states[state.index()]
    }

    /// Display name of a symbol.
    pub fn symbol_name(&self, symbol: SymbolId) -> &str {
        &self.symbols[symbol.index()]
    }

    /// Look up a state by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.state_ids.get(name).copied()
    }

    /// Look up a symbol by name.
    pub fn symbol_id(&self, symbol: &str) -> Option<SymbolId> {
        self.symbol_ids.get(symbol).copied()
    }

    /// The designated initial state (first declared).
    pub fn initial_state(&self) -> StateId {
        StateId(0)
    }

    /// Whether a state is in the accepting set.
    pub fn is_accepting_state(&self, state: StateId) -> bool {
        self.accepting[state.index()]
    }

    /// Total transition function.
    pub fn next_state(&self, state: StateId, symbol: SymbolId) -> StateId {
        self.delta[state.index() * self.symbols.len() + symbol.index()]
    }
}

/// Evaluation engine: a compiled automaton plus the walking cursor.
///
/// `previous_state` is display metadata only; it never participates in a
/// transition decision.
#[derive(Debug, Clone)]
pub struct AutomatonEngine {
    automaton: Automaton,
    current: StateId,
    previous: Option<StateId>,
}

impl AutomatonEngine {
    /// Create an engine positioned at the initial state.
    pub fn new(automaton: Automaton) -> Self {
        let current = automaton.initial_state();
        Self {
            automaton,
            current,
            previous: None,
        }
    }

    /// Compile a description and wrap it in an engine.
    pub fn from_description(desc: &AutomatonDescription) -> Result<Self, DefinitionError> {
        Ok(Self::new(Automaton::compile(desc)?))
    }

    /// The compiled automaton.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Current state.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// State held immediately before the last successful transition.
    pub fn previous_state(&self) -> Option<StateId> {
        self.previous
    }

    /// Display name of the current state.
    pub fn current_state_name(&self) -> &str {
        self.automaton.state_name(self.current)
    }

    /// Whether the current state accepts.
    pub fn is_accepting(&self) -> bool {
        self.automaton.is_accepting_state(self.current)
    }

    /// Return to the initial state and clear the previous-state marker.
    pub fn reset(&mut self) {
        self.current = self.automaton.initial_state();
        self.previous = None;
        debug!(state = self.current_state_name(), "engine_reset");
    }

    /// Whether a symbol belongs to the alphabet. Pure.
    pub fn is_valid_input(&self, symbol: &str) -> bool {
        self.automaton.symbol_id(symbol).is_some()
    }

    /// Apply one symbol. On an unknown symbol the engine state is left
    /// untouched and the error is returned; otherwise returns whether the
    /// new current state accepts.
    pub fn feed_one(&mut self, symbol: &str) -> AutomatonResult<bool> {
        let Some(symbol_id) = self.automaton.symbol_id(symbol) else {
            return Err(AutomatonError::InvalidSymbol {
                symbol: symbol.to_string(),
            });
        };

        let next = self.automaton.next_state(self.current, symbol_id);
        debug!(
            from = self.automaton.state_name(self.current),
            symbol,
            to = self.automaton.state_name(next),
            "engine_transition"
        );
        self.previous = Some(self.current);
        self.current = next;

        Ok(self.is_accepting())
    }

    /// Apply one symbol given as a char.
    pub fn feed_char(&mut self, c: char) -> AutomatonResult<bool> {
        let mut buf = [0u8; 4];
        self.feed_one(c.encode_utf8(&mut buf))
    }

    /// Evaluate a whole input string, one char per symbol, starting from a
    /// fresh reset. With `skip_errors` unset the first invalid symbol aborts;
    /// with it set, an invalid symbol leaves the state untouched but lands a
    /// `false` in the running accepting flag, which only a later valid
    /// symbol overwrites.
    pub fn feed(&mut self, input: &str, skip_errors: bool) -> AutomatonResult<bool> {
        self.reset();
        let mut accepting = self.is_accepting();
        for c in input.chars() {
            match self.feed_char(c) {
                Ok(now_accepting) => accepting = now_accepting,
                Err(err) if skip_errors => {
                    debug!(error = %err, "feed_skipped_symbol");
                    accepting = false;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(accepting)
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
    fn test_compile_sample() {
        let eng = engine();
        assert_eq!(eng.automaton().state_count(), 4);
        assert_eq!(eng.automaton().symbol_count(), 2);
        assert_eq!(eng.current_state(), StateId(0));
        assert!(!eng.is_accepting());
    }

    #[test]
    fn test_compile_rejects_duplicate_state() {
        let mut desc = AutomatonDescription::sample();
        desc.states.push("q0".into());
        assert!(matches!(
            Automaton::compile(&desc),
            Err(DefinitionError::DuplicateState { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_duplicate_symbol() {
        let mut desc = AutomatonDescription::sample();
        desc.alphabet.push("1".into());
        assert!(matches!(
            Automaton::compile(&desc),
            Err(DefinitionError::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_unknown_accepting() {
        let mut desc = AutomatonDescription::sample();
        desc.accepting.push("q9".into());
        assert!(matches!(
            Automaton::compile(&desc),
            Err(DefinitionError::UnknownAcceptingState { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_missing_transition() {
        let mut desc = AutomatonDescription::sample();
        desc.transitions.get_mut("q1").unwrap().remove("0");
        assert!(matches!(
            Automaton::compile(&desc),
            Err(DefinitionError::MissingTransition { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_missing_row() {
        let mut desc = AutomatonDescription::sample();
        desc.transitions.remove("q2");
        assert!(matches!(
            Automaton::compile(&desc),
            Err(DefinitionError::MissingTransitionRow { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_target_outside_states() {
        let mut desc = AutomatonDescription::sample();
        desc.transitions
            .get_mut("q3")
            .unwrap()
            .insert("1".into(), "q7".into());
        assert!(matches!(
            Automaton::compile(&desc),
            Err(DefinitionError::UnknownTransitionTarget { .. })
        ));
    }

    #[test]
    fn test_compile_rejects_empty_sets() {
        let mut desc = AutomatonDescription::sample();
        desc.states.clear();
        assert!(matches!(
            Automaton::compile(&desc),
            Err(DefinitionError::EmptyStates)
        ));

        let mut desc = AutomatonDescription::sample();
        desc.alphabet.clear();
        assert!(matches!(
            Automaton::compile(&desc),
            Err(DefinitionError::EmptyAlphabet)
        ));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut eng = engine();
        eng.feed_one("1").unwrap();
        eng.reset();
        let after_first = (eng.current_state(), eng.previous_state());
        eng.reset();
        assert_eq!((eng.current_state(), eng.previous_state()), after_first);
        assert_eq!(eng.current_state(), StateId(0));
        assert_eq!(eng.previous_state(), None);
    }

    #[test]
    fn test_feed_one_tracks_previous() {
        let mut eng = engine();
        eng.feed_one("1").unwrap();
        assert_eq!(eng.current_state_name(), "q1");
        assert_eq!(eng.previous_state(), Some(StateId(0)));

        eng.feed_one("0").unwrap();
        assert_eq!(eng.current_state_name(), "q3");
        assert_eq!(
            eng.previous_state().map(|s| s.index()),
            eng.automaton().state_id("q1").map(|s| s.index())
        );
    }

    #[test]
    fn test_feed_one_invalid_leaves_state_untouched() {
        let mut eng = engine();
        eng.feed_one("1").unwrap();
        let before = (eng.current_state(), eng.previous_state());
        let err = eng.feed_one("x").unwrap_err();
        assert_eq!(
            err,
            AutomatonError::InvalidSymbol {
                symbol: "x".into()
            }
        );
        assert_eq!((eng.current_state(), eng.previous_state()), before);
    }

    #[test]
    fn test_feed_accepting_run() {
        // q0 --1--> q1 --0--> q3 --0--> q2 --1--> q3
        let mut eng = engine();
        assert_eq!(eng.feed("1001", false), Ok(true));
        assert_eq!(eng.current_state_name(), "q3");
    }

    #[test]
    fn test_feed_invalid_symbol_aborts() {
        let mut eng = engine();
        let result = eng.feed("2", false);
        assert_eq!(
            result,
            Err(AutomatonError::InvalidSymbol { symbol: "2".into() })
        );
        // Reset ran, then the invalid symbol left the engine alone.
        assert_eq!(eng.current_state_name(), "q0");
        assert_eq!(eng.previous_state(), None);
    }

    #[test]
    fn test_feed_empty_string_reports_initial_membership() {
        let mut eng = engine();
        assert_eq!(eng.feed("", false), Ok(false));
        assert_eq!(eng.current_state_name(), "q0");
    }

    #[test]
    fn test_feed_skip_errors_flag_carries_invalid_result() {
        let mut eng = engine();
        // "1" then "0" lands in q3 (accepting); the trailing junk symbol
        // leaves the state alone but its false is what gets reported.
        assert_eq!(eng.feed("10x", true), Ok(false));
        assert!(eng.is_accepting());

        // A valid symbol after the junk overwrites the flag again.
        assert_eq!(eng.feed("1x0", true), Ok(true));
        assert_eq!(eng.current_state_name(), "q3");
    }

    #[test]
    fn test_feed_is_deterministic() {
        let mut eng = engine();
        let first = eng.feed("110101", false);
        for _ in 0..10 {
            assert_eq!(eng.feed("110101", false), first);
        }
    }

    #[test]
    fn test_accepting_is_not_sticky() {
        let mut eng = engine();
        eng.feed("10", false).unwrap();
        assert!(eng.is_accepting());
        eng.feed_one("1").unwrap();
        assert!(!eng.is_accepting());
    }

    #[test]
    fn test_is_valid_input() {
        let eng = engine();
        assert!(eng.is_valid_input("0"));
        assert!(eng.is_valid_input("1"));
        assert!(!eng.is_valid_input("2"));
        assert!(!eng.is_valid_input(""));
    }
}
