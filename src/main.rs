#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{init_logging, run_interactive, simulate, GameEngine, MatchConfig, MatchSession};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in this terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = broadside::COMPUTER_WAIT_MS, help = "Computer thinking time in milliseconds")]
        delay_ms: u64,
    },
    /// Let two targeting agents play each other and print a summary per game.
    Sim {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 1)]
        games: u64,
    },
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed, delay_ms } => {
            let mut config = MatchConfig::default().with_computer_delay(Duration::from_millis(delay_ms));
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
                config = config.with_seed(s);
            }
            let engine = GameEngine::new(config)?;
            run_interactive(MatchSession::new(engine)).await?;
        }
        Commands::Sim { seed, games } => {
            for offset in 0..games {
                let report = simulate(seed.wrapping_add(offset))?;
                println!(
                    "seed {}: {:?} after {} player / {} computer shots",
                    report.seed, report.outcome, report.player_shots, report.computer_shots
                );
            }
        }
    }
    Ok(())
}
