//! Court parameters: fees, staking thresholds, and phase durations.

use crate::amount::Amount;
use crate::time::DAY_SECS;
use serde::{Deserialize, Serialize};

/// Parameters consulted by every component of the court.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtParams {
    // ── Disputes ─────────────────────────────────────────────────────────
    /// Fee a plaintiff must attach when filing a dispute.
    pub dispute_fee: Amount,

    // ── Appeals ──────────────────────────────────────────────────────────
    /// Fee an appellant must attach when filing an appeal.
    pub appeal_fee: Amount,

    // ── Jurors ───────────────────────────────────────────────────────────
    /// Minimum stake for a juror to be active (and therefore eligible).
    pub min_stake: Amount,

    /// Seconds after the last deposit before a juror may withdraw.
    pub lock_period_secs: u64,

    /// Lowest reputation a juror can fall to.
    pub reputation_floor: u64,

    // ── Voting ───────────────────────────────────────────────────────────
    /// Length of the commit window, measured from session initialization.
    pub commit_period_secs: u64,

    /// Length of the reveal window, measured from the commit deadline.
    pub reveal_period_secs: u64,
}

impl CourtParams {
    /// Reputation assigned to a juror on first stake.
    pub const INITIAL_REPUTATION: u64 = 100;

    /// Upper bound on reputation.
    pub const MAX_REPUTATION: u64 = 1000;
}

impl Default for CourtParams {
    fn default() -> Self {
        Self {
            dispute_fee: Amount::from_fraction(1, 100),
            appeal_fee: Amount::from_fraction(1, 2),
            min_stake: Amount::from_fraction(1, 10),
            lock_period_secs: 30 * DAY_SECS,
            reputation_floor: 1,
            commit_period_secs: 3 * DAY_SECS,
            reveal_period_secs: 2 * DAY_SECS,
        }
    }
}
