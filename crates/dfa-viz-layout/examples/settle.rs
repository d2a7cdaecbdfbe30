//! Settles the demo automaton's layout and prints node positions as the
//! simulation converges.
//!
//! Run with: cargo run --example settle

use dfa_viz_automaton::Automaton;
use dfa_viz_core::AutomatonDescription;
use dfa_viz_layout::{FixedTimestep, LayoutConfig, LayoutEngine};

fn main() -> anyhow::Result<()> {
    let automaton = Automaton::compile(&AutomatonDescription::sample())?;
    let mut layout = LayoutEngine::new(&automaton, LayoutConfig::default());
    let mut clock = FixedTimestep::from_rate(layout.config().physics_rate);

    println!(
        "{} states, {} springs",
        automaton.state_count(),
        layout.graph().spring_count()
    );

    // Simulate a 30 fps frontend for ten seconds of wall-clock time.
    let frame = 1.0 / 30.0;
    for frame_idx in 0..300 {
        for _ in 0..clock.accumulate(frame) {
            layout.step();
        }

        if frame_idx % 30 == 0 {
            println!("--- t = {:.1}s", frame_idx as f32 * frame);
            for (name, node) in automaton.states().iter().zip(layout.nodes()) {
                println!(
                    "  {name}  ({:8.2}, {:8.2})  v=({:7.2}, {:7.2})",
                    node.position.x, node.position.y, node.velocity.x, node.velocity.y
                );
            }
        }
    }

    Ok(())
}
