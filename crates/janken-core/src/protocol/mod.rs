//! Round orchestration and protocol types.

mod round;
mod transcript;
mod types;

pub use round::{GameRound, RoundError};
pub use transcript::RoundTranscript;
pub use types::{GameResult, RoundId, RoundPhase};
