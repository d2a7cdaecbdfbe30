//! Force-directed layout for automaton transition graphs.
//!
//! Given a compiled automaton, this crate derives the set of edges its
//! transition function induces and runs a fixed-timestep spring/repulsion
//! simulation that settles 2D positions for the states, so connected states
//! end up near each other and every pair of states stays separated. The
//! physics is O(n²) per tick, which is the intended scale: tens of nodes.
//!
//! The pieces:
//!
//! - [`TransitionGraph`]: the edge set derived once from the transition
//!   function: labeled directed edges (including self-loops) for drawing,
//!   plus deduplicated undirected springs (excluding self-loops) for the
//!   physics.
//! - [`LayoutEngine`]: node kinematics (position, velocity) advanced one
//!   fixed step at a time.
//! - [`FixedTimestep`]: the accumulator that converts variable frame deltas
//!   into whole physics steps, keeping the simulation independent of render
//!   frame rate.

mod clock;
mod graph;
mod layout;

pub use clock::FixedTimestep;
pub use graph::{Spring, TransitionEdge, TransitionGraph};
pub use layout::{LayoutConfig, LayoutEngine, LayoutNode};
