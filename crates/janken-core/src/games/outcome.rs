//! Outcome resolution for cyclic N-way games.

use super::MoveSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Result of a round from the human player's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Lose,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Draw => "Draw",
            Outcome::Lose => "Lose",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a pairing of move positions in a set of `total` moves.
///
/// The signed cyclic distance from the human move to the opponent move is
/// centered on zero: positive means the opponent sits within the `total / 2`
/// moves after the human move and wins, negative means the human wins.
/// With `total == 1` every pairing is a draw.
///
/// # Panics
///
/// If `total` is even or either index is not below `total`. Callers build
/// indices from a validated [`MoveSet`], so either case is a broken contract.
pub fn resolve(opponent: usize, human: usize, total: usize) -> Outcome {
    assert!(total % 2 == 1, "move count must be odd, got {total}");
    assert!(
        opponent < total && human < total,
        "move index out of range: opponent {opponent}, human {human}, total {total}"
    );

    let half = total / 2;
    // `human < total`, so adding `total` first keeps the subtraction unsigned
    let shifted = (opponent + half + total - human) % total;
    match shifted.cmp(&half) {
        Ordering::Greater => Outcome::Lose,
        Ordering::Equal => Outcome::Draw,
        Ordering::Less => Outcome::Win,
    }
}

/// Full dominance matrix of a move set, derived from [`resolve`].
///
/// Rows are opponent moves, columns are human moves, cells are the human's
/// outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutcomeTable {
    cells: Vec<Vec<Outcome>>,
}

impl OutcomeTable {
    pub fn new(moves: &MoveSet) -> Self {
        let total = moves.len();
        let cells = (0..total)
            .map(|opponent| {
                (0..total)
                    .map(|human| resolve(opponent, human, total))
                    .collect()
            })
            .collect();
        Self { cells }
    }

    pub fn get(&self, opponent: usize, human: usize) -> Option<Outcome> {
        self.cells.get(opponent)?.get(human).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Outcome]> {
        self.cells.iter().map(Vec::as_slice)
    }
}
