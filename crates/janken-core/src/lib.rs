//! Janken Core Library
//!
//! This crate provides the move-set model, the cyclic outcome resolver and
//! the HMAC commit-reveal rounds for a provably fair N-way
//! rock-paper-scissors game.

pub mod crypto;
pub mod games;
pub mod protocol;

pub use crypto::{Commitment, CommitmentError, MoveDigest, Opening, SecretKey};
pub use games::{resolve, MoveSet, MoveSetError, Outcome, OutcomeTable};
pub use protocol::{GameResult, GameRound, RoundError, RoundId, RoundPhase, RoundTranscript};
