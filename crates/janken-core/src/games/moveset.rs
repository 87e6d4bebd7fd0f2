//! Ordered move set whose positions encode cyclic dominance.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Reasons a list of move names cannot form a move set
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveSetError {
    #[error("no moves given")]
    Empty,

    #[error("duplicate move: {0}")]
    Duplicate(String),

    #[error("move count must be odd, got {0}")]
    EvenCount(usize),
}

/// Ordered, duplicate-free list of move names with odd length.
///
/// Each move beats the `len() / 2` moves that precede it cyclically and loses
/// to the `len() / 2` moves that follow it, as in `rock, paper, scissors`.
/// Only the order carries meaning; names are never interpreted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MoveSet(Vec<String>);

impl MoveSet {
    /// Validate and build a move set.
    ///
    /// Checks run in the order empty, duplicate, parity so callers can map
    /// each failure to its own exit path.
    pub fn new<I, S>(names: I) -> Result<Self, MoveSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(MoveSetError::Empty);
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(MoveSetError::Duplicate(name.clone()));
            }
        }

        if names.len() % 2 == 0 {
            return Err(MoveSetError::EvenCount(names.len()));
        }

        Ok(Self(names))
    }

    /// Number of moves (N)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; an empty move set cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the move at `index`, if in range
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Position of `name`, if present
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|m| m == name)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for MoveSet {
    type Error = MoveSetError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<MoveSet> for Vec<String> {
    fn from(moves: MoveSet) -> Self {
        moves.0
    }
}

impl fmt::Debug for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}
