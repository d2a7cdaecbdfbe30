//! dfa-viz CLI - evaluate strings against a DFA and settle its layout.
//!
//! Definitions load from JSON files; with no `--definition` the built-in
//! demo acceptor is used.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::Level;

use dfa_viz_automaton::{Automaton, AutomatonEngine};
use dfa_viz_core::AutomatonDescription;
use dfa_viz_layout::{LayoutConfig, LayoutEngine};

/// dfa-viz: evaluate strings against a deterministic finite acceptor and
/// compute a force-directed layout for its transition graph.
#[derive(Parser, Debug)]
#[command(name = "dfv", author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a JSON automaton definition (defaults to the built-in demo).
    #[arg(short, long, global = true)]
    definition: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read strings from stdin and evaluate each one (default command).
    /// Type `exit` to quit.
    Run,

    /// Evaluate a single string and print ACCEPTED or REJECTED.
    Check {
        /// The input string; each character is one symbol.
        input: String,

        /// Continue past symbols outside the alphabet instead of aborting.
        #[arg(long)]
        skip_errors: bool,
    },

    /// Settle the force-directed layout and print positions as JSON.
    Layout {
        /// Simulated seconds to run the physics for.
        #[arg(long, default_value_t = 30.0)]
        seconds: f32,

        /// Seed for the initial placement (random when omitted).
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a summary of the loaded definition.
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let description = load_definition(cli.definition.as_deref())?;
    let automaton = Automaton::compile(&description)
        .context("definition failed validation")?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_console(automaton)?,

        Commands::Check { input, skip_errors } => {
            let mut engine = AutomatonEngine::new(automaton);
            match engine.feed(&input, skip_errors) {
                Ok(accepted) => {
                    println!(
                        "{} ({})",
                        if accepted { "ACCEPTED" } else { "REJECTED" },
                        engine.current_state_name()
                    );
                }
                Err(err) => {
                    println!("Error: {err}");
                    std::process::exit(2);
                }
            }
        }

        Commands::Layout { seconds, seed } => {
            let report = layout_report(&automaton, seconds, seed);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Show => show_definition(&automaton),
    }

    Ok(())
}

/// Load a definition from a JSON file, or fall back to the built-in demo.
fn load_definition(path: Option<&Path>) -> Result<AutomatonDescription> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read definition {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("cannot parse definition {}", path.display()))
        }
        None => Ok(AutomatonDescription::sample()),
    }
}

/// The original console mode: evaluate strings typed on stdin.
fn run_console(automaton: Automaton) -> Result<()> {
    let mut engine = AutomatonEngine::new(automaton);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("Type a string to evaluate (exit to quit)");
    loop {
        print!("string: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim_end_matches(['\n', '\r']);
        if input == "exit" {
            break;
        }

        match engine.feed(input, false) {
            Ok(accepted) => {
                println!(
                    "the string is {}",
                    if accepted { "ACCEPTED" } else { "REJECTED" }
                );
            }
            Err(err) => println!("Error: {err}"),
        }
    }

    Ok(())
}

/// Settle the layout and serialize positions plus the derived edge list.
fn layout_report(automaton: &Automaton, seconds: f32, seed: Option<u64>) -> serde_json::Value {
    let mut layout = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            LayoutEngine::with_rng(automaton, LayoutConfig::default(), &mut rng)
        }
        None => LayoutEngine::new(automaton, LayoutConfig::default()),
    };
    layout.settle(seconds);

    let positions: serde_json::Map<String, serde_json::Value> = automaton
        .states()
        .iter()
        .zip(layout.nodes())
        .map(|(name, node)| {
            (
                name.clone(),
                serde_json::json!({ "x": node.position.x, "y": node.position.y }),
            )
        })
        .collect();

    let edges: Vec<serde_json::Value> = layout
        .graph()
        .edges()
        .iter()
        .map(|edge| {
            let symbols: Vec<&str> = edge
                .symbols
                .iter()
                .map(|&s| automaton.symbol_name(s))
                .collect();
            serde_json::json!({
                "from": automaton.state_name(edge.from),
                "to": automaton.state_name(edge.to),
                "symbols": symbols,
            })
        })
        .collect();

    serde_json::json!({ "positions": positions, "edges": edges })
}

/// Print the definition the way the transition table reads.
fn show_definition(automaton: &Automaton) {
    println!("alphabet: {}", automaton.symbols().join(", "));
    println!(
        "states:   {} (initial: {})",
        automaton.states().join(", "),
        automaton.state_name(automaton.initial_state())
    );

    let accepting: Vec<&str> = (0..automaton.state_count())
        .filter(|&i| automaton.is_accepting_state(dfa_viz_core::StateId(i as u32)))
        .map(|i| automaton.state_name(dfa_viz_core::StateId(i as u32)))
        .collect();
    println!("accepting: {}", accepting.join(", "));

    println!("transitions:");
    for state_idx in 0..automaton.state_count() {
        let state = dfa_viz_core::StateId(state_idx as u32);
        for symbol_idx in 0..automaton.symbol_count() {
            let symbol = dfa_viz_core::SymbolId(symbol_idx as u32);
            println!(
                "  {} --{}--> {}",
                automaton.state_name(state),
                automaton.symbol_name(symbol),
                automaton.state_name(automaton.next_state(state, symbol))
            );
        }
    }
}
