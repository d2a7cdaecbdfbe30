//! Drives a timed feed with a simulated clock and prints each transition.
//!
//! Run with: cargo run --example timed_feed

use dfa_viz_automaton::{AutomatonEngine, FeedController};
use dfa_viz_core::AutomatonDescription;

fn main() -> anyhow::Result<()> {
    let mut engine = AutomatonEngine::from_description(&AutomatonDescription::sample())?;
    let mut feed = FeedController::new();

    let input = "1001";
    println!("feeding {input:?} at 0.5 s/symbol\n");

    feed.start_timed_feed(&mut engine, input, 0.5);
    let frame = 1.0 / 60.0;
    let mut elapsed = 0.0f32;

    while feed.is_feeding() {
        if feed.tick(&mut engine, frame) {
            println!(
                "t={elapsed:5.2}s  fed {:?}  ->  {}{}",
                feed.buffer()[feed.cursor() - 1],
                engine.current_state_name(),
                if engine.is_accepting() { "  (accepting)" } else { "" },
            );
        }
        elapsed += frame;
    }

    if let Some(err) = feed.last_error() {
        println!("\nhalted: {err}");
    } else {
        println!(
            "\nfinished: {input:?} is {}",
            if engine.is_accepting() { "ACCEPTED" } else { "REJECTED" }
        );
    }

    Ok(())
}
