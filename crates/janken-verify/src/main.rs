//! Janken Verifier
//!
//! Recomputes HMAC-SHA256 over a revealed move to confirm the computer's move
//! was fixed before the player chose.

use anyhow::{bail, Context};
use clap::Parser;
use janken_core::{MoveDigest, RoundTranscript, SecretKey};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "janken-verify", version, about = "Verify a revealed Janken round")]
struct Cli {
    /// Digest shown before the move (64 hex characters)
    #[arg(long, value_name = "HEX", required_unless_present = "transcript")]
    hmac: Option<String>,

    /// Key revealed after the move (64 hex characters)
    #[arg(long, value_name = "HEX", required_unless_present = "transcript")]
    key: Option<String>,

    /// Computer move revealed after the round
    #[arg(long = "move", value_name = "NAME", required_unless_present = "transcript")]
    move_name: Option<String>,

    /// JSON transcript written by `janken --transcript`
    #[arg(long, value_name = "PATH", conflicts_with_all = ["hmac", "key", "move_name"])]
    transcript: Option<PathBuf>,

    /// Log filter, written to stderr
    #[arg(long, env = "JANKEN_LOG", default_value = "warn")]
    log_level: String,
}

/// Findings for one round
#[derive(Debug, PartialEq, Eq)]
struct Report {
    commitment_holds: bool,
    /// Only known when a full transcript was supplied
    outcome_consistent: Option<bool>,
}

impl Report {
    fn passed(&self) -> bool {
        self.commitment_holds && self.outcome_consistent != Some(false)
    }
}

fn check_revealed(hmac: &str, key: &str, move_name: &str) -> anyhow::Result<Report> {
    let digest: MoveDigest = hmac.parse().context("invalid --hmac")?;
    let key: SecretKey = key.parse().context("invalid --key")?;
    Ok(Report {
        commitment_holds: digest.verify(&key, move_name),
        outcome_consistent: None,
    })
}

fn check_transcript(transcript: &RoundTranscript) -> Report {
    Report {
        commitment_holds: transcript.commitment_holds(),
        outcome_consistent: Some(transcript.outcome_consistent()),
    }
}

fn run(cli: &Cli) -> anyhow::Result<Report> {
    if let Some(path) = &cli.transcript {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let transcript: RoundTranscript =
            serde_json::from_str(&json).context("malformed transcript")?;
        debug!(round = %transcript.round_id, "Loaded transcript");
        return Ok(check_transcript(&transcript));
    }

    match (&cli.hmac, &cli.key, &cli.move_name) {
        (Some(hmac), Some(key), Some(move_name)) => check_revealed(hmac, key, move_name),
        _ => bail!("either --transcript or all of --hmac, --key and --move are required"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(report) if report.passed() => {
            println!("verified");
            ExitCode::SUCCESS
        }
        Ok(report) => {
            if !report.commitment_holds {
                println!("mismatch: key and move do not reproduce the HMAC");
            }
            if report.outcome_consistent == Some(false) {
                println!("mismatch: recorded outcome does not follow from the moves");
            }
            warn!(?report, "Verification failed");
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use janken_core::{GameRound, MoveSet};

    fn played_round() -> GameRound {
        let moves = MoveSet::new(["rock", "paper", "scissors"]).unwrap();
        let mut round = GameRound::new(moves).unwrap();
        round.submit_human_move(2).unwrap();
        round
    }

    #[test]
    fn test_revealed_values_verify() {
        let round = played_round();
        let report = check_revealed(
            &round.digest().to_string(),
            &round.revealed_key_hex().unwrap(),
            round.revealed_move().unwrap(),
        )
        .unwrap();

        assert!(report.commitment_holds);
        assert!(report.passed());
    }

    #[test]
    fn test_other_move_is_a_mismatch() {
        let round = played_round();
        let revealed = round.revealed_move().unwrap();
        let other = round.moves().iter().find(|m| *m != revealed).unwrap();

        let report = check_revealed(
            &round.digest().to_string(),
            &round.revealed_key_hex().unwrap(),
            other,
        )
        .unwrap();

        assert!(!report.passed());
    }

    #[test]
    fn test_malformed_hex_is_an_error() {
        assert!(check_revealed("zz", &"00".repeat(32), "rock").is_err());
        assert!(check_revealed(&"00".repeat(32), "abcd", "rock").is_err());
    }

    #[test]
    fn test_transcript_file_verifies() {
        let round = played_round();
        let path = std::env::temp_dir().join(format!("janken-{}.json", round.id()));
        let json = serde_json::to_string(&round.transcript().unwrap()).unwrap();
        fs::write(&path, json).unwrap();

        let cli = Cli::parse_from([
            "janken-verify",
            "--transcript",
            path.to_str().unwrap(),
        ]);
        let report = run(&cli).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            report,
            Report {
                commitment_holds: true,
                outcome_consistent: Some(true),
            }
        );
    }

    #[test]
    fn test_cli_requires_inputs() {
        assert!(Cli::try_parse_from(["janken-verify"]).is_err());
        assert!(Cli::try_parse_from(["janken-verify", "--hmac", "00"]).is_err());
        assert!(Cli::try_parse_from([
            "janken-verify",
            "--transcript",
            "t.json",
            "--key",
            "00"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_verify_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
