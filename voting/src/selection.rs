//! Jury selection from the active-juror pool.

use quill_crypto::blake2b_256;
use quill_types::{Address, DisputeId};
use rand::RngCore;

/// Draws a jury for a dispute from a pool of eligible jurors.
pub trait JurySelector: Send + Sync {
    fn select(&self, pool: &[Address], dispute_id: DisputeId, count: usize) -> Vec<Address>;
}

/// Deterministic seeded selection.
///
/// Any party holding the seed can recompute the jury: for each juror compute
/// `blake2b(seed || dispute_id || address)` and keep the `count` lowest scores.
#[derive(Clone, Debug)]
pub struct SeededSelector {
    seed: [u8; 32],
}

impl SeededSelector {
    pub fn new(seed: [u8; 32]) -> Self {
        Self { seed }
    }

    /// A selector seeded from the thread-local CSPRNG.
    pub fn from_entropy() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self { seed }
    }

    pub fn seed(&self) -> &[u8; 32] {
        &self.seed
    }
}

impl JurySelector for SeededSelector {
    fn select(&self, pool: &[Address], dispute_id: DisputeId, count: usize) -> Vec<Address> {
        if pool.is_empty() || count == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, [u8; 32])> = pool
            .iter()
            .enumerate()
            .map(|(i, juror)| {
                let mut data = Vec::with_capacity(40 + juror.as_str().len());
                data.extend_from_slice(&self.seed);
                data.extend_from_slice(&dispute_id.get().to_le_bytes());
                data.extend_from_slice(juror.as_str().as_bytes());
                (i, blake2b_256(&data))
            })
            .collect();

        scored.sort_by_key(|a| a.1);
        scored.truncate(count);
        scored.iter().map(|(i, _)| pool[*i].clone()).collect()
    }
}
