//! Cryptographic primitives for the QuillArbiter engine.
//!
//! - **Blake2b-256** for every digest the engine stores
//! - **Vote commitments**: the one-way binding of `(verdict, salt)` used by
//!   commit-reveal voting
//! - Random salt generation for jurors

pub mod commitment;
pub mod hash;

pub use commitment::{random_salt, vote_commitment, Salt};
pub use hash::{blake2b_256, blake2b_256_multi, content_hash};
