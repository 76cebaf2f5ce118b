//! Juror record.

use quill_types::{Amount, CourtParams, Timestamp};
use serde::{Deserialize, Serialize};

/// A juror's stake and track record.
///
/// Created on the first deposit and never deleted; a juror whose stake drops
/// below the minimum is only deactivated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurorRecord {
    pub staked: Amount,
    /// Time of the most recent deposit. The whole balance unlocks one lock
    /// period after this.
    pub staked_at: Timestamp,
    pub reputation: u64,
    pub correct_votes: u64,
    pub total_votes: u64,
    /// Always equal to `staked >= min_stake` under the ledger's current minimum.
    pub active: bool,
}

impl JurorRecord {
    pub(crate) fn new(now: Timestamp) -> Self {
        Self {
            staked: Amount::ZERO,
            staked_at: now,
            reputation: CourtParams::INITIAL_REPUTATION,
            correct_votes: 0,
            total_votes: 0,
            active: false,
        }
    }

    /// Share of correct votes in basis points, or `None` before the first vote.
    pub fn accuracy_bps(&self) -> Option<u64> {
        if self.total_votes == 0 {
            None
        } else {
            Some(self.correct_votes * 10_000 / self.total_votes)
        }
    }
}

/// Reputation after a correct vote: ×1.05 rounded down, capped at the maximum.
pub fn reward(reputation: u64) -> u64 {
    (reputation.saturating_mul(105) / 100).min(CourtParams::MAX_REPUTATION)
}

/// Reputation after an incorrect vote: ×0.90 rounded down, never below `floor`.
pub fn penalize(reputation: u64, floor: u64) -> u64 {
    (reputation.saturating_mul(90) / 100).max(floor)
}
