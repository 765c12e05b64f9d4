//! Wordle Server - CLI
//!
//! Runs the game API, or scores a single guess in the terminal.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use wordle_server::{config::ServerConfig, core::Word, logging::init_logging, output, server};

#[derive(Parser)]
#[command(
    name = "wordle_server",
    about = "Wordle game backend with a JSON API",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve(ServerConfig),

    /// Score a guess against a solution
    Score {
        /// Guessed word
        guess: String,

        /// Solution word
        solution: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Default to serving if no command given
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Serve(ServerConfig::default()));

    match command {
        Commands::Serve(config) => server::serve(config).await,
        Commands::Score { guess, solution } => run_score_command(&guess, &solution),
    }
}

fn run_score_command(guess: &str, solution: &str) -> Result<()> {
    let guess = Word::new(guess).with_context(|| format!("Invalid guess: {guess}"))?;
    let solution =
        Word::new(solution).with_context(|| format!("Invalid solution: {solution}"))?;

    output::print_score(&guess, &solution);
    Ok(())
}
