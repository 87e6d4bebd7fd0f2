//! One play of the game: commit, accept the human move, resolve, reveal.

use super::{GameResult, RoundId, RoundPhase, RoundTranscript};
use crate::crypto::{Commitment, CommitmentError, MoveDigest, Opening};
use crate::games::{resolve, MoveSet};
use rand::{CryptoRng, RngCore};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from round transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("selection {index} is outside 0..{len}")]
    InvalidSelection { index: usize, len: usize },

    #[error("round already resolved")]
    AlreadyResolved,
}

#[derive(Debug)]
enum RoundState {
    AwaitingHumanMove { commitment: Commitment },
    Resolved { result: GameResult, opening: Opening },
}

/// A single round against the automated opponent.
///
/// The opponent's move is committed on construction. The key and move are
/// only reachable once [`GameRound::submit_human_move`] has moved the round to
/// its resolved state.
#[derive(Debug)]
pub struct GameRound {
    id: RoundId,
    moves: MoveSet,
    state: RoundState,
}

impl GameRound {
    /// Start a round, committing with the operating system's generator
    pub fn new(moves: MoveSet) -> Result<Self, CommitmentError> {
        let commitment = Commitment::create(&moves)?;
        Ok(Self::with_commitment(moves, commitment))
    }

    /// Start a round, committing with `rng`
    pub fn new_with<R: RngCore + CryptoRng>(
        moves: MoveSet,
        rng: &mut R,
    ) -> Result<Self, CommitmentError> {
        let commitment = Commitment::create_with(&moves, rng)?;
        Ok(Self::with_commitment(moves, commitment))
    }

    fn with_commitment(moves: MoveSet, commitment: Commitment) -> Self {
        let id = RoundId::new();
        info!(
            round = %id,
            moves = moves.len(),
            digest = %commitment.published_digest(),
            "Round committed"
        );
        Self {
            id,
            moves,
            state: RoundState::AwaitingHumanMove { commitment },
        }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    pub fn phase(&self) -> RoundPhase {
        match self.state {
            RoundState::AwaitingHumanMove { .. } => RoundPhase::AwaitingHumanMove,
            RoundState::Resolved { .. } => RoundPhase::Resolved,
        }
    }

    /// Digest published before the human moves
    pub fn digest(&self) -> MoveDigest {
        match &self.state {
            RoundState::AwaitingHumanMove { commitment } => commitment.published_digest(),
            RoundState::Resolved { opening, .. } => opening.digest,
        }
    }

    /// Fix the human move (zero-based) and resolve the round.
    ///
    /// An out-of-range index leaves the round waiting so the caller can ask
    /// again.
    pub fn submit_human_move(&mut self, human_move: usize) -> Result<GameResult, RoundError> {
        let commitment = match &self.state {
            RoundState::AwaitingHumanMove { commitment } => commitment,
            RoundState::Resolved { .. } => return Err(RoundError::AlreadyResolved),
        };

        if !self.moves.contains_index(human_move) {
            debug!(round = %self.id, index = human_move, "Rejected selection");
            return Err(RoundError::InvalidSelection {
                index: human_move,
                len: self.moves.len(),
            });
        }

        let opponent_move = commitment.move_index();
        let result = GameResult {
            opponent_move,
            human_move,
            outcome: resolve(opponent_move, human_move, self.moves.len()),
        };
        let opening = commitment.reveal();

        info!(
            round = %self.id,
            opponent_move,
            human_move,
            outcome = %result.outcome,
            "Round resolved"
        );

        self.state = RoundState::Resolved { result, opening };
        Ok(result)
    }

    pub fn result(&self) -> Option<&GameResult> {
        match &self.state {
            RoundState::Resolved { result, .. } => Some(result),
            RoundState::AwaitingHumanMove { .. } => None,
        }
    }

    /// Revealed key, move and digest
    pub fn opening(&self) -> Option<&Opening> {
        match &self.state {
            RoundState::Resolved { opening, .. } => Some(opening),
            RoundState::AwaitingHumanMove { .. } => None,
        }
    }

    /// Name of the opponent's move, once revealed
    pub fn revealed_move(&self) -> Option<&str> {
        self.opening()
            .and_then(|opening| self.moves.name_at(opening.move_index))
    }

    /// Lowercase hex of the key, once revealed
    pub fn revealed_key_hex(&self) -> Option<String> {
        self.opening().map(Opening::key_hex)
    }

    /// Self-contained record of a resolved round
    pub fn transcript(&self) -> Option<RoundTranscript> {
        let RoundState::Resolved { result, opening } = &self.state else {
            return None;
        };
        RoundTranscript::new(self.id, &self.moves, result, opening)
    }
}
