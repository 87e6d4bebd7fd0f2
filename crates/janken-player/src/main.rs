//! Janken Player
//!
//! Terminal game against a committed computer opponent. The computer's move
//! is published as an HMAC before you choose and the key is revealed after.

mod menu;
mod table;

use anyhow::Context;
use clap::Parser;
use janken_core::{GameRound, MoveSet, MoveSetError};
use menu::SessionEnd;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "janken", version, about = "Provably fair N-way rock-paper-scissors")]
struct Cli {
    /// Move names in dominance order: each beats the half before it, cyclically.
    /// Everything from the first move on is a move name, even if it starts with `-`
    #[arg(
        value_name = "MOVE",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    moves: Vec<String>,

    /// Write a JSON transcript of the finished round for `janken-verify`
    #[arg(long, value_name = "PATH")]
    transcript: Option<PathBuf>,

    /// Log filter, written to stderr
    #[arg(long, env = "JANKEN_LOG", default_value = "warn")]
    log_level: String,
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Suggestion and exit code for a rejected move list
fn rejection(err: &MoveSetError) -> (&'static str, u8) {
    match err {
        MoveSetError::Empty => ("Try with move names as command line arguments.", 1),
        MoveSetError::Duplicate(_) => ("Try without duplicate.", 1),
        MoveSetError::EvenCount(_) => ("Try with odd number of moves.", 2),
    }
}

fn print_help(suggestion: &str) {
    println!("Help:");
    println!("\tSuggestion: {suggestion}");
    println!("\tjanken <Odd number of moves>");
}

fn play(moves: MoveSet, transcript: Option<PathBuf>) -> anyhow::Result<()> {
    let mut round = GameRound::new(moves).context("could not commit to a computer move")?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let end = menu::run(&mut round, stdin.lock(), &mut stdout)?;

    if let (SessionEnd::Played(_), Some(path)) = (end, transcript) {
        let record = round
            .transcript()
            .context("resolved round has no transcript")?;
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
        info!(round = %round.id(), path = %path.display(), "Transcript written");
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let moves = match MoveSet::new(cli.moves) {
        Ok(moves) => moves,
        Err(err) => {
            let (suggestion, code) = rejection(&err);
            info!(error = %err, "Rejected move list");
            print_help(suggestion);
            return ExitCode::from(code);
        }
    };

    match play(moves, cli.transcript) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_exit_codes() {
        assert_eq!(rejection(&MoveSetError::Empty).1, 1);
        assert_eq!(rejection(&MoveSetError::Duplicate("rock".into())).1, 1);
        assert_eq!(rejection(&MoveSetError::EvenCount(4)).1, 2);
    }

    #[test]
    fn test_cli_collects_moves_in_order() {
        let cli = Cli::parse_from(["janken", "rock", "paper", "scissors"]);
        assert_eq!(cli.moves, ["rock", "paper", "scissors"]);
        assert!(cli.transcript.is_none());
    }

    #[test]
    fn test_cli_accepts_no_moves() {
        // An empty list must reach the exit-code mapping instead of failing in clap
        let cli = Cli::try_parse_from(["janken"]).unwrap();
        assert!(cli.moves.is_empty());
    }

    #[test]
    fn test_cli_takes_hyphenated_move_names() {
        let cli = Cli::try_parse_from(["janken", "-1", "0", "1"]).unwrap();
        assert_eq!(cli.moves, ["-1", "0", "1"]);

        let cli = Cli::try_parse_from(["janken", "rock", "-paper", "scissors"]).unwrap();
        assert_eq!(cli.moves, ["rock", "-paper", "scissors"]);
    }

    #[test]
    fn test_cli_flag_names_after_first_move_are_moves() {
        let cli = Cli::try_parse_from(["janken", "rock", "--help", "scissors"]).unwrap();
        assert_eq!(cli.moves, ["rock", "--help", "scissors"]);
        assert!(MoveSet::new(cli.moves).is_ok());
    }

    #[test]
    fn test_cli_transcript_flag() {
        let cli = Cli::parse_from(["janken", "--transcript", "round.json", "a", "b", "c"]);
        assert_eq!(cli.transcript, Some(PathBuf::from("round.json")));
        assert_eq!(cli.moves.len(), 3);
    }

    #[test]
    fn test_cli_verify_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
