//! HMAC commitment to the opponent's move.
//!
//! digest = HMAC-SHA256(key, move_name)
//!
//! The digest is published before the human picks a move. Revealing the key
//! and the move afterwards lets anyone recompute the digest and confirm the
//! opponent's move was fixed in advance.
//!
//! Both the key and the move index must come from a cryptographically secure
//! generator. A predictable generator lets an observer recover the opponent's
//! move ahead of time while every digest still verifies, so the bound on
//! [`CryptoRng`] is load-bearing.

use super::secret::SECRET_KEY_LEN;
use super::{CommitmentError, DecodeError, SecretKey};
use crate::games::MoveSet;
use hmac::digest::{Key, KeyInit};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// Digest length in bytes
const DIGEST_LEN: usize = 32;

fn keyed_mac(key: &SecretKey, move_name: &str) -> HmacSha256 {
    // HMAC zero-pads keys shorter than the block, so padding here is the same key
    let mut block = Key::<HmacSha256>::default();
    block[..SECRET_KEY_LEN].copy_from_slice(key.as_bytes());
    let mut mac = <HmacSha256 as KeyInit>::new(&block);
    mac.update(move_name.as_bytes());
    mac
}

/// Published HMAC-SHA256 of the committed move name
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveDigest([u8; DIGEST_LEN]);

impl MoveDigest {
    /// Compute the digest binding `move_name` under `key`
    pub fn compute(key: &SecretKey, move_name: &str) -> Self {
        Self(keyed_mac(key, move_name).finalize().into_bytes().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex, 64 characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Check that `key` and `move_name` produce this digest (constant time)
    pub fn verify(&self, key: &SecretKey, move_name: &str) -> bool {
        keyed_mac(key, move_name).verify_slice(&self.0).is_ok()
    }
}

impl FromStr for MoveDigest {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::decode_fixed(s).map(Self)
    }
}

impl fmt::Debug for MoveDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for MoveDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for MoveDigest {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(s)
    }
}

impl<'de> Deserialize<'de> for MoveDigest {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Draw an index uniformly from `0..total` by rejection sampling.
fn draw_index<R: RngCore + CryptoRng>(rng: &mut R, total: usize) -> Result<usize, CommitmentError> {
    debug_assert!(total > 0);
    let total = total as u64;
    // Largest multiple of `total` that fits; values at or above it would bias low indices
    let zone = u64::MAX - u64::MAX % total;
    loop {
        let mut buf = [0u8; 8];
        rng.try_fill_bytes(&mut buf)?;
        let value = u64::from_le_bytes(buf);
        if value < zone {
            return Ok((value % total) as usize);
        }
    }
}

/// Sealed commitment to a secretly chosen move.
///
/// Only the digest is public. The key and move stay inside until
/// [`Commitment::reveal`]; keeping that call behind the human's move is the
/// job of the round that owns the commitment.
pub struct Commitment {
    digest: MoveDigest,
    key: SecretKey,
    move_index: usize,
}

impl Commitment {
    /// Commit to a random move using the operating system's generator
    pub fn create(moves: &MoveSet) -> Result<Self, CommitmentError> {
        Self::create_with(moves, &mut OsRng)
    }

    /// Commit to a random move drawn from `rng`
    pub fn create_with<R: RngCore + CryptoRng>(
        moves: &MoveSet,
        rng: &mut R,
    ) -> Result<Self, CommitmentError> {
        let move_index = draw_index(rng, moves.len())?;
        let key = SecretKey::generate(rng)?;
        let name = moves
            .name_at(move_index)
            .ok_or(CommitmentError::MoveOutOfRange(move_index))?;
        let digest = MoveDigest::compute(&key, name);

        Ok(Self {
            digest,
            key,
            move_index,
        })
    }

    /// Digest to show the human before they choose
    pub fn published_digest(&self) -> MoveDigest {
        self.digest
    }

    pub(crate) fn move_index(&self) -> usize {
        self.move_index
    }

    /// Open the commitment
    pub fn reveal(&self) -> Opening {
        Opening {
            digest: self.digest,
            key: self.key.clone(),
            move_index: self.move_index,
        }
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commitment")
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// Revealed commitment: everything a verifier needs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    pub digest: MoveDigest,
    pub key: SecretKey,
    pub move_index: usize,
}

impl Opening {
    pub fn key_hex(&self) -> String {
        self.key.to_hex()
    }

    /// Recompute the digest for the revealed move and compare with the
    /// published one. An index outside `moves` never verifies.
    pub fn verify(&self, moves: &MoveSet) -> bool {
        moves
            .name_at(self.move_index)
            .is_some_and(|name| self.digest.verify(&self.key, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn classic() -> MoveSet {
        MoveSet::new(["rock", "paper", "scissors"]).unwrap()
    }

    /// Generator that always fails, standing in for an unavailable entropy source
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!("commitment must only use try_fill_bytes")
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!("commitment must only use try_fill_bytes")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("commitment must only use try_fill_bytes")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn test_commitment_verification() {
        let moves = classic();
        let commitment = Commitment::create(&moves).unwrap();
        let opening = commitment.reveal();

        assert_eq!(opening.digest, commitment.published_digest());
        assert!(opening.verify(&moves));
    }

    #[test]
    fn test_known_hmac_vector() {
        // RFC 4231 test case 2
        let mut key_bytes = [0u8; 32];
        key_bytes[..4].copy_from_slice(b"Jefe");
        // HMAC zero-pads short keys, so a 32-byte key with trailing zeros is equivalent
        let key = SecretKey::from_bytes(key_bytes);
        let digest = MoveDigest::compute(&key, "what do ya want for nothing?");

        assert_eq!(
            digest.to_hex(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_padded_block_key_matches_raw_key() {
        let key = SecretKey::generate(&mut OsRng).unwrap();
        let mut raw = <HmacSha256 as KeyInit>::new_from_slice(key.as_bytes()).unwrap();
        raw.update(b"scissors");
        let expected: [u8; DIGEST_LEN] = raw.finalize().into_bytes().into();

        assert_eq!(MoveDigest::compute(&key, "scissors").as_bytes(), &expected);
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let commitment = Commitment::create(&classic()).unwrap();
        let hex_str = commitment.published_digest().to_hex();

        assert_eq!(hex_str.len(), 64);
        assert!(hex_str
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_wrong_move_fails_verification() {
        let moves = classic();
        let opening = Commitment::create(&moves).unwrap().reveal();
        let other = (opening.move_index + 1) % moves.len();

        let tampered = Opening {
            move_index: other,
            ..opening
        };
        assert!(!tampered.verify(&moves));
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let moves = classic();
        let opening = Commitment::create(&moves).unwrap().reveal();

        let tampered = Opening {
            key: SecretKey::generate(&mut OsRng).unwrap(),
            ..opening
        };
        assert!(!tampered.verify(&moves));
    }

    #[test]
    fn test_tampered_digest_fails_verification() {
        let moves = classic();
        let opening = Commitment::create(&moves).unwrap().reveal();

        let mut bytes = *opening.digest.as_bytes();
        bytes[0] ^= 0x01;
        let tampered = Opening {
            digest: MoveDigest::from_bytes(bytes),
            ..opening
        };
        assert!(!tampered.verify(&moves));
    }

    #[test]
    fn test_out_of_range_index_never_verifies() {
        let moves = classic();
        let opening = Commitment::create(&moves).unwrap().reveal();

        let tampered = Opening {
            move_index: moves.len(),
            ..opening
        };
        assert!(!tampered.verify(&moves));
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let moves = classic();
        let a = Commitment::create_with(&moves, &mut ChaCha20Rng::seed_from_u64(7)).unwrap();
        let b = Commitment::create_with(&moves, &mut ChaCha20Rng::seed_from_u64(7)).unwrap();

        assert_eq!(a.reveal(), b.reveal());
    }

    #[test]
    fn test_broken_generator_is_fatal() {
        let err = Commitment::create_with(&classic(), &mut BrokenRng).unwrap_err();
        assert!(matches!(err, CommitmentError::Entropy(_)));
    }

    #[test]
    fn test_single_move_always_commits_to_it() {
        let moves = MoveSet::new(["rock"]).unwrap();
        for _ in 0..16 {
            let commitment = Commitment::create(&moves).unwrap();
            assert_eq!(commitment.move_index(), 0);
        }
    }

    #[test]
    fn test_debug_hides_move_and_key() {
        let commitment = Commitment::create(&classic()).unwrap();
        let debug = format!("{:?}", commitment);

        assert!(!debug.contains("move_index"));
        assert!(!debug.contains("key"));
    }

    #[test]
    fn test_digest_hex_roundtrip_via_serde() {
        let commitment = Commitment::create(&classic()).unwrap();
        let digest = commitment.published_digest();

        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{}\"", digest.to_hex()));
        let back: MoveDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }
}
