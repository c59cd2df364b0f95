use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use swap_poker::gamelog::{Round, Street, SummaryTable, parse_file};
use swap_poker::holdem::{
    DEFAULT_ITERATIONS, MonteCarloStrength, StrengthConfig, StrengthEstimator, SwapPolicy,
};
use tracing::{Level, event};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "gamelog_summary",
    about = "Summarize the betting in a swap hold'em gamelog",
    long_about = "Parse an engine gamelog into rounds and print a table of how many chips\n\
                  one seat moved on each street, split by how the rounds ended."
)]
struct Args {
    /// Path to the gamelog
    path: PathBuf,

    /// Seat to summarize. 0 is the player holding the button in round 1
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    player: u8,

    /// Print the table as JSON
    #[arg(long)]
    json: bool,

    /// Also estimate the seat's average hand strength on each street
    #[arg(long)]
    strength: bool,

    /// Monte carlo iterations per estimate
    #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,

    /// Estimate as plain hold'em, with no swaps
    #[arg(long)]
    no_swaps: bool,

    /// Log debug output. RUST_LOG takes priority when set
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Mean strength on each betting street over the rounds that reached it.
fn average_strengths<E: StrengthEstimator>(
    rounds: &[Round],
    player: usize,
    estimator: &mut E,
) -> Result<[Option<f64>; 4], Box<dyn Error>> {
    let mut sums = [0.0; 4];
    let mut counts = [0usize; 4];
    for round in rounds {
        let strengths = round.strengths(player, estimator)?;
        for (idx, strength) in strengths.iter().enumerate() {
            if let Some(s) = strength {
                sums[idx] += s;
                counts[idx] += 1;
            }
        }
    }
    let mut averages = [None; 4];
    for (idx, avg) in averages.iter_mut().enumerate() {
        if counts[idx] > 0 {
            *avg = Some(sums[idx] / counts[idx] as f64);
        }
    }
    Ok(averages)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let rounds = parse_file(&args.path)?;
    event!(Level::INFO, rounds = rounds.len(), path = ?args.path, "Parsed gamelog");

    let player = usize::from(args.player);
    let table = SummaryTable::new(&rounds, player);

    let strengths = if args.strength {
        let swap = if args.no_swaps {
            SwapPolicy::none()
        } else {
            SwapPolicy::default()
        };
        let config = StrengthConfig {
            iterations: args.iterations,
            swap,
        };
        let mut estimator = MonteCarloStrength::new(config);
        Some(average_strengths(&rounds, player, &mut estimator)?)
    } else {
        None
    };

    if args.json {
        let output = serde_json::json!({
            "rounds": rounds.len(),
            "summary": table,
            "average_strength": strengths,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Rounds: {}", rounds.len());
    println!();
    print!("{table}");
    if let Some(strengths) = strengths {
        println!();
        println!("Average strength:");
        for (street, strength) in Street::BETTING.iter().zip(strengths.iter()) {
            match strength {
                Some(s) => println!("  {street:<9} {s:.3}"),
                None => println!("  {street:<9} -"),
            }
        }
    }
    Ok(())
}
