//! Interactive menu loop for a single round.

use crate::table;
use anyhow::Context;
use janken_core::{GameResult, GameRound, Outcome, RoundError};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// One line of player input, interpreted against a move set of `total` moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    Help,
    /// Zero-based move index
    Move(usize),
    Invalid,
}

impl MenuChoice {
    pub fn parse(line: &str, total: usize) -> Self {
        match line.trim() {
            "0" => MenuChoice::Exit,
            "?" => MenuChoice::Help,
            other => match other.parse::<usize>() {
                Ok(n) if (1..=total).contains(&n) => MenuChoice::Move(n - 1),
                _ => MenuChoice::Invalid,
            },
        }
    }
}

/// How the menu loop ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// Player chose to exit, or input ran out, before picking a move
    Exited,
    Played(GameResult),
}

fn print_menu<W: Write>(round: &GameRound, out: &mut W) -> io::Result<()> {
    writeln!(out, "HMAC: {}", round.digest())?;
    writeln!(out, "Available moves:")?;
    for (i, name) in round.moves().iter().enumerate() {
        writeln!(out, "{} - {}", i + 1, name)?;
    }
    writeln!(out, "0 - exit")?;
    writeln!(out, "? - help")?;
    write!(out, "Enter your move: ")?;
    out.flush()
}

fn print_result<W: Write>(round: &GameRound, result: &GameResult, out: &mut W) -> io::Result<()> {
    let moves = round.moves();
    writeln!(
        out,
        "Your move: {}",
        moves.name_at(result.human_move).unwrap_or_default()
    )?;
    writeln!(
        out,
        "Computer move: {}",
        round.revealed_move().unwrap_or_default()
    )?;
    let verdict = match result.outcome {
        Outcome::Win => "You Win!!!",
        Outcome::Draw => "Draw!!!",
        Outcome::Lose => "Lose!!!",
    };
    writeln!(out, "{verdict}")?;
    writeln!(
        out,
        "HMAC key: {}",
        round.revealed_key_hex().unwrap_or_default()
    )
}

/// Prompt until the player exits or picks a valid move.
///
/// End of input counts as an exit. The key is only printed after a move has
/// been accepted. A round that is already resolved is refused.
pub fn run<R: BufRead, W: Write>(
    round: &mut GameRound,
    mut input: R,
    out: &mut W,
) -> anyhow::Result<SessionEnd> {
    let total = round.moves().len();
    let mut line = String::new();

    loop {
        print_menu(round, out)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            writeln!(out, "Exiting game!!")?;
            return Ok(SessionEnd::Exited);
        }

        match MenuChoice::parse(&line, total) {
            MenuChoice::Exit => {
                writeln!(out, "Exiting game!!")?;
                return Ok(SessionEnd::Exited);
            }
            MenuChoice::Help => {
                write!(out, "{}", table::render(round.moves()))?;
            }
            MenuChoice::Invalid => {
                debug!(input = line.trim(), "Unrecognised menu input");
                writeln!(out, "Enter correct number.")?;
            }
            MenuChoice::Move(index) => match round.submit_human_move(index) {
                Ok(result) => {
                    print_result(round, &result, out)?;
                    return Ok(SessionEnd::Played(result));
                }
                Err(RoundError::InvalidSelection { .. }) => {
                    writeln!(out, "Enter correct number.")?;
                }
                Err(err @ RoundError::AlreadyResolved) => {
                    return Err(err).context("menu started on a finished round");
                }
            },
        }
    }
}
