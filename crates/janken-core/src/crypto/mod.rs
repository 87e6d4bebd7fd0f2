//! Cryptographic primitives for the Janken commit-reveal scheme.
//!
//! This module provides:
//! - SecretKey drawn from a cryptographically secure generator
//! - MoveDigest, the HMAC-SHA256 binding of a move name
//! - Commitment and Opening for the commit and reveal phases

mod commitment;
mod secret;

pub use commitment::{Commitment, MoveDigest, Opening};
pub use secret::SecretKey;

use thiserror::Error;

/// Errors while committing to a move
#[derive(Debug, Error)]
pub enum CommitmentError {
    #[error("secure random generator failed: {0}")]
    Entropy(#[from] rand::Error),

    #[error("committed move index {0} is outside the move set")]
    MoveOutOfRange(usize),
}

/// Errors decoding hex-encoded keys and digests
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], DecodeError> {
    let bytes = hex::decode(s.trim())?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| DecodeError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}
