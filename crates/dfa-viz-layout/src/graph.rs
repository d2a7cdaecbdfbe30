//! Edge derivation from the transition function.
//!
//! Derived once at layout initialization; the transition table is static, so
//! the edge set never changes at runtime.

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::StableDiGraph;
use tracing::debug;

use dfa_viz_automaton::Automaton;
use dfa_viz_core::{StateId, SymbolId};

/// A directed edge of the transition graph: every symbol that maps `from`
/// to `to`, grouped. Self-loops are included; the drawing layer renders
/// them as rings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionEdge {
    pub from: StateId,
    pub to: StateId,
    /// Symbols labeling this edge, in alphabet order.
    pub symbols: Vec<SymbolId>,
}

/// An undirected spring between two distinct states. One spring stands for
/// every transition relating the pair, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spring {
    pub a: StateId,
    pub b: StateId,
}

/// Sorted pair of state indices packed into one key, so a pair registered
/// in either direction dedups to the same entry.
fn pair_key(a: StateId, b: StateId) -> u64 {
    let (lo, hi) = if a.0 <= b.0 { (a, b) } else { (b, a) };
    ((lo.0 as u64) << 32) | hi.0 as u64
}

/// The edge set induced by an automaton's transition function.
#[derive(Debug, Clone)]
pub struct TransitionGraph {
    edges: Vec<TransitionEdge>,
    springs: Vec<Spring>,
}

impl TransitionGraph {
    /// Walk every (state, symbol) pair of δ and collect the edge set.
    pub fn derive(automaton: &Automaton) -> Self {
        let mut edges: Vec<TransitionEdge> = Vec::new();
        let mut edge_slots: HashMap<(StateId, StateId), usize> = HashMap::new();
        let mut springs: Vec<Spring> = Vec::new();
        let mut applied: HashSet<u64> = HashSet::new();

        for state_idx in 0..automaton.state_count() {
            let state = StateId(state_idx as u32);
            for symbol_idx in 0..automaton.symbol_count() {
                let symbol = SymbolId(symbol_idx as u32);
                let next = automaton.next_state(state, symbol);

                let slot = *edge_slots.entry((state, next)).or_insert_with(|| {
                    edges.push(TransitionEdge {
                        from: state,
                        to: next,
                        symbols: Vec::new(),
                    });
                    edges.len() - 1
                });
                edges[slot].symbols.push(symbol);

                // Springs skip self-loops and collapse both directions.
                if next == state {
                    continue;
                }
                if applied.insert(pair_key(state, next)) {
                    springs.push(Spring { a: state, b: next });
                }
            }
        }

        debug!(
            edges = edges.len(),
            springs = springs.len(),
            "transition_graph_derived"
        );

        Self { edges, springs }
    }

    /// Labeled directed edges, including self-loops, for drawing.
    pub fn edges(&self) -> &[TransitionEdge] {
        &self.edges
    }

    /// Deduplicated undirected springs, excluding self-loops.
    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    /// Convert to a petgraph graph for external analysis or drawing.
    /// Node weights are state names; edge weights are the comma-joined
    /// symbol labels.
    pub fn to_petgraph(&self, automaton: &Automaton) -> StableDiGraph<String, String> {
        let mut graph = StableDiGraph::new();
        let indices: Vec<_> = automaton
            .states()
            .iter()
            .map(|name| graph.add_node(name.clone()))
            .collect();

        for edge in &self.edges {
            let label = edge
                .symbols
                .iter()
                .map(|&s| automaton.symbol_name(s))
                .collect::<Vec<_>>()
                .join(",");
            graph.add_edge(indices[edge.from.index()], indices[edge.to.index()], label);
        }

        graph
    }
}
