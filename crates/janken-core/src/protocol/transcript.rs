//! Serializable record of a finished round for independent verification.

use super::{GameResult, RoundId};
use crate::crypto::{MoveDigest, Opening, SecretKey};
use crate::games::{resolve, MoveSet, Outcome};
use serde::{Deserialize, Serialize};

/// Everything a third party needs to check a round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTranscript {
    pub round_id: RoundId,
    pub moves: MoveSet,
    /// Digest published before the human moved
    pub hmac: MoveDigest,
    /// Revealed key
    pub key: SecretKey,
    pub computer_move: String,
    pub user_move: String,
    pub outcome: Outcome,
}

impl RoundTranscript {
    pub(crate) fn new(
        round_id: RoundId,
        moves: &MoveSet,
        result: &GameResult,
        opening: &Opening,
    ) -> Option<Self> {
        Some(Self {
            round_id,
            moves: moves.clone(),
            hmac: opening.digest,
            key: opening.key.clone(),
            computer_move: moves.name_at(result.opponent_move)?.to_string(),
            user_move: moves.name_at(result.human_move)?.to_string(),
            outcome: result.outcome,
        })
    }

    /// The revealed key and computer move reproduce the published digest
    pub fn commitment_holds(&self) -> bool {
        self.moves.index_of(&self.computer_move).is_some()
            && self.hmac.verify(&self.key, &self.computer_move)
    }

    /// The recorded outcome is what the resolver gives for the recorded moves
    pub fn outcome_consistent(&self) -> bool {
        match (
            self.moves.index_of(&self.computer_move),
            self.moves.index_of(&self.user_move),
        ) {
            (Some(opponent), Some(human)) => {
                resolve(opponent, human, self.moves.len()) == self.outcome
            }
            _ => false,
        }
    }

    pub fn verify(&self) -> bool {
        self.commitment_holds() && self.outcome_consistent()
    }
}
