//! Nullable infrastructure for deterministic testing.
//!
//! The court's external dependencies (wall clock, jury randomness) sit behind
//! traits. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//!
//! Usage: swap real implementations for nullables in tests and simulations.

pub mod clock;
pub mod selector;

pub use clock::NullClock;
pub use selector::NullSelector;
