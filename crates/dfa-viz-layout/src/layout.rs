//! The fixed-timestep spring/repulsion simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use dfa_viz_automaton::Automaton;
use dfa_viz_core::vec2::{self, Vec2};
use dfa_viz_core::StateId;

use crate::graph::TransitionGraph;

/// Tuning constants for the simulation.
///
/// `slack_radii` sets, in node radii beyond the touching distance, how far
/// apart two connected nodes may drift before the spring starts pulling;
/// below that threshold the spring is exactly zero so it never fights the
/// repulsion term at rest length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Fixed physics steps per simulated second.
    pub physics_rate: f32,
    /// Node radius, in world units. The frontend derives its drawn radius
    /// from label metrics; the physics only needs the same scale.
    pub node_radius: f32,
    /// Spring constant: force per unit of distance beyond the slack
    /// threshold.
    pub edge_force: f32,
    /// Inverse-square repulsion constant, applied between every node pair.
    pub repulsion: f32,
    /// Constant speed removed from every node per tick (linear brake).
    pub decel: f32,
    /// Spring slack threshold, in node radii past touching distance.
    pub slack_radii: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            physics_rate: 60.0,
            node_radius: 20.0,
            edge_force: 10.0,
            repulsion: 4e6,
            decel: 8.0,
            slack_radii: 4.0,
        }
    }
}

impl LayoutConfig {
    /// Duration of one physics step.
    pub fn timestep(&self) -> f32 {
        1.0 / self.physics_rate
    }

    /// Distance below which springs exert no force.
    pub fn min_separation(&self) -> f32 {
        self.node_radius * (2.0 + self.slack_radii)
    }

    /// Lower clamp on the effective repulsion distance, so coinciding nodes
    /// do not blow the inverse-square term up.
    pub fn repulsion_floor(&self) -> f32 {
        self.node_radius * 2.0
    }
}

/// Kinematic state of one laid-out node. Index in the engine's node array
/// equals the state's dense index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Whether the state is accepting; computed once, used by the drawing
    /// layer for the target ring.
    pub is_target: bool,
}

/// Owns node kinematics and advances them one fixed step at a time.
///
/// The render/input layer must not mutate node state directly; dragging
/// routes through [`LayoutEngine::set_position`], which also zeroes the
/// node's velocity so the physics does not fight the drag.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    graph: TransitionGraph,
    nodes: Vec<LayoutNode>,
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Build a layout for the automaton with randomized initial positions.
    pub fn new(automaton: &Automaton, config: LayoutConfig) -> Self {
        Self::with_rng(automaton, config, &mut rand::thread_rng())
    }

    /// Build with a caller-supplied RNG (seed it for reproducible layouts).
    ///
    /// Initial positions are uniform over a square whose side grows with the
    /// node count, so layouts do not start fully overlapped; velocities
    /// start at zero.
    pub fn with_rng(automaton: &Automaton, config: LayoutConfig, rng: &mut impl Rng) -> Self {
        let side = automaton.state_count() as f32;
        let nodes = (0..automaton.state_count())
            .map(|idx| LayoutNode {
                position: Vec2::new(rng.gen_range(0.0..=side), rng.gen_range(0.0..=side)),
                velocity: Vec2::ZERO,
                is_target: automaton.is_accepting_state(StateId(idx as u32)),
            })
            .collect();

        let graph = TransitionGraph::derive(automaton);
        debug!(
            nodes = automaton.state_count(),
            springs = graph.spring_count(),
            "layout_initialized"
        );

        Self {
            graph,
            nodes,
            config,
        }
    }

    /// The derived edge set.
    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    /// The active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// All node kinematics, indexed by dense state index.
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    /// Kinematics of one state.
    pub fn node(&self, state: StateId) -> &LayoutNode {
        &self.nodes[state.index()]
    }

    /// Current position of one state.
    pub fn position(&self, state: StateId) -> Vec2 {
        self.nodes[state.index()].position
    }

    /// Move a node (drag interaction). Velocity is zeroed so the next
    /// physics step does not yank it back along its old momentum.
    pub fn set_position(&mut self, state: StateId, position: Vec2) {
        let node = &mut self.nodes[state.index()];
        node.position = position;
        node.velocity = Vec2::ZERO;
    }

    /// Advance the simulation by exactly one fixed timestep.
    ///
    /// Order per tick: spring forces, pairwise repulsion, linear brake,
    /// explicit Euler position integration.
    pub fn step(&mut self) {
        let dt = self.config.timestep();
        let min_separation = self.config.min_separation();
        let floor = self.config.repulsion_floor();

        // Springs pull each connected pair together, but only once the gap
        // exceeds the slack threshold.
        for spring in self.graph.springs() {
            let a = spring.a.index();
            let b = spring.b.index();

            let offset = vec2::sub(self.nodes[b].position, self.nodes[a].position);
            let excess = (vec2::length(offset) - min_separation).max(0.0);
            let dir = vec2::normalize(offset);
            let impulse = vec2::scale(dir, self.config.edge_force * excess * dt);

            self.nodes[a].velocity = vec2::add(self.nodes[a].velocity, impulse);
            self.nodes[b].velocity = vec2::sub(self.nodes[b].velocity, impulse);
        }

        // Inverse-square repulsion between every pair, connected or not.
        // The effective distance is clamped below so coinciding nodes do
        // not produce unbounded forces.
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let offset = vec2::sub(self.nodes[j].position, self.nodes[i].position);
                let dist = (vec2::length(offset) - min_separation).max(floor);
                let dir = vec2::normalize(offset);
                let impulse = vec2::scale(dir, self.config.repulsion / (dist * dist) * dt);

                self.nodes[i].velocity = vec2::sub(self.nodes[i].velocity, impulse);
                self.nodes[j].velocity = vec2::add(self.nodes[j].velocity, impulse);
            }
        }

        // Linear brake and integration. The brake removes a constant amount
        // of speed per tick; at or below one brake quantum the velocity
        // snaps to zero rather than reversing.
        for node in &mut self.nodes {
            let speed = vec2::length(node.velocity);
            node.velocity = if speed <= self.config.decel {
                Vec2::ZERO
            } else {
                vec2::sub(
                    node.velocity,
                    vec2::scale(vec2::normalize(node.velocity), self.config.decel),
                )
            };
            node.position = vec2::add(node.position, vec2::scale(node.velocity, dt));
        }
    }

    /// Run the simulation for a span of simulated seconds.
    pub fn settle(&mut self, seconds: f32) {
        let steps = (seconds * self.config.physics_rate).round() as usize;
        for _ in 0..steps {
            self.step();
        }
        debug!(steps, seconds, "layout_settled");
    }
}
