//! Move sets and outcome resolution.

mod moveset;
mod outcome;

pub use moveset::{MoveSet, MoveSetError};
pub use outcome::{resolve, Outcome, OutcomeTable};
