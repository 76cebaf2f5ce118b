//! Vote commitments for commit-reveal voting.
//!
//! A juror first publishes `blake2b_256(verdict_code || salt)` and later discloses
//! the verdict and salt. The single code byte keeps the preimage fixed-width, so
//! no two `(verdict, salt)` pairs share an encoding.

use crate::hash::blake2b_256_multi;
use quill_types::Hash256;
use rand::RngCore;

/// A 32-byte secret that blinds a committed verdict.
pub type Salt = [u8; 32];

/// Bind a verdict code to a salt.
pub fn vote_commitment(verdict_code: u8, salt: &Salt) -> Hash256 {
    Hash256::new(blake2b_256_multi(&[&[verdict_code], salt]))
}

/// Generate a fresh salt from the thread-local CSPRNG.
pub fn random_salt() -> Salt {
    let mut salt = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}
