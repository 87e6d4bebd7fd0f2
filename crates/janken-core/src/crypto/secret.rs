//! Secret HMAC key for the commit-reveal scheme.

use super::{CommitmentError, DecodeError};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Key length in bytes (256 bits)
pub(crate) const SECRET_KEY_LEN: usize = 32;

/// Random key the opponent's move is bound under.
///
/// `Debug` never prints key material; use [`SecretKey::to_hex`] once the round
/// has been revealed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; SECRET_KEY_LEN]);

impl SecretKey {
    /// Fill a new key from a cryptographically secure generator.
    ///
    /// Generator failure is surfaced rather than retried with another source.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, CommitmentError> {
        let mut bytes = [0u8; SECRET_KEY_LEN];
        rng.try_fill_bytes(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.0
    }

    /// Lowercase hex of the raw key bytes
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for SecretKey {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::decode_fixed(s).map(Self)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(..)")
    }
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(s)
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}
