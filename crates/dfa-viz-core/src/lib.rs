//! Core domain types shared across the dfa-viz workspace.
//!
//! A deterministic finite acceptor is described by four pieces: an alphabet
//! of input symbols, an ordered state set (first entry = initial state), the
//! accepting subset, and a total transition function. The raw, serde-facing
//! form of that record lives here as [`AutomatonDescription`]; compilation
//! into a dense table (and everything that can fail) lives in
//! `dfa-viz-automaton`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub mod vec2;

pub use vec2::Vec2;

/// Identifier for a state, a dense index into the compiled state table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateId(pub u32);

/// Identifier for an alphabet symbol, a dense index into the symbol table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

impl StateId {
    /// Convenience accessor as a plain usize for indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl SymbolId {
    /// Convenience accessor as a plain usize for indexing.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Raw description of a deterministic finite acceptor, as loaded from a
/// definition file.
///
/// The record is not validated here; `Automaton::compile` in
/// `dfa-viz-automaton` checks uniqueness, membership, and totality and
/// rejects inconsistent descriptions at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomatonDescription {
    /// Input symbols, in declaration order. Distinct, non-empty strings.
    pub alphabet: Vec<String>,

    /// State identifiers, in declaration order. The first entry is the
    /// initial state.
    pub states: Vec<String>,

    /// Subset of `states` whose members accept.
    pub accepting: Vec<String>,

    /// Transition function: `transitions[state][symbol] = next_state`,
    /// required to cover every (state, symbol) pair.
    pub transitions: HashMap<String, HashMap<String, String>>,
}

impl AutomatonDescription {
    /// The built-in demo acceptor: four states over {0, 1}, accepting in q3.
    pub fn sample() -> Self {
        Self {
            alphabet: vec!["0".into(), "1".into()],
            states: vec!["q0".into(), "q1".into(), "q2".into(), "q3".into()],
            accepting: vec!["q3".into()],
            transitions: HashMap::from([
                (
                    "q0".into(),
                    HashMap::from([("0".into(), "q2".into()), ("1".into(), "q1".into())]),
                ),
                (
                    "q1".into(),
                    HashMap::from([("0".into(), "q3".into()), ("1".into(), "q0".into())]),
                ),
                (
                    "q2".into(),
                    HashMap::from([("0".into(), "q0".into()), ("1".into(), "q3".into())]),
                ),
                (
                    "q3".into(),
                    HashMap::from([("0".into(), "q2".into()), ("1".into(), "q1".into())]),
                ),
            ]),
        }
    }

    /// A five-state acceptor for strings containing "1001", with self-loops
    /// on q0 and q1. Useful for exercising self-loop handling.
    pub fn sample_with_loops() -> Self {
        Self {
            alphabet: vec!["0".into(), "1".into()],
            states: vec![
                "q0".into(),
                "q1".into(),
                "q2".into(),
                "q3".into(),
                "q4".into(),
            ],
            accepting: vec!["q4".into()],
            transitions: HashMap::from([
                (
                    "q0".into(),
                    HashMap::from([("0".into(), "q0".into()), ("1".into(), "q1".into())]),
                ),
                (
                    "q1".into(),
                    HashMap::from([("0".into(), "q2".into()), ("1".into(), "q1".into())]),
                ),
                (
                    "q2".into(),
                    HashMap::from([("0".into(), "q3".into()), ("1".into(), "q1".into())]),
                ),
                (
                    "q3".into(),
                    HashMap::from([("0".into(), "q0".into()), ("1".into(), "q4".into())]),
                ),
                (
                    "q4".into(),
                    HashMap::from([("0".into(), "q2".into()), ("1".into(), "q1".into())]),
                ),
            ]),
        }
    }

    /// Number of states in the description.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of alphabet symbols in the description.
    pub fn symbol_count(&self) -> usize {
        self.alphabet.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let desc = AutomatonDescription::sample();
        assert_eq!(desc.state_count(), 4);
        assert_eq!(desc.symbol_count(), 2);
        assert_eq!(desc.states[0], "q0");
        assert_eq!(desc.accepting, vec!["q3".to_string()]);
    }

    #[test]
    fn test_description_round_trips_through_json() {
        let desc = AutomatonDescription::sample_with_loops();
        let json = serde_json::to_string(&desc).unwrap();
        let back: AutomatonDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(back, desc);
    }

    #[test]
    fn test_state_id_ordering() {
        assert!(StateId(0) < StateId(3));
        assert_eq!(StateId(2).index(), 2);
        assert_eq!(SymbolId(1).index(), 1);
    }
}
