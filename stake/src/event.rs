//! Events appended by the stake ledger.

use quill_types::{Address, Amount, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeEvent {
    JurorStaked {
        juror: Address,
        amount: Amount,
        total_staked: Amount,
        at: Timestamp,
    },
    JurorWithdrawn {
        juror: Address,
        amount: Amount,
        remaining: Amount,
        at: Timestamp,
    },
    JurorSlashed {
        juror: Address,
        amount: Amount,
        remaining: Amount,
        at: Timestamp,
    },
    ReputationUpdated {
        juror: Address,
        old: u64,
        new: u64,
        was_correct: bool,
    },
    /// The juror's stake crossed the minimum upward.
    JurorActivated { juror: Address },
    /// The juror's stake fell below the minimum.
    JurorDeactivated { juror: Address },
    MinStakeChanged { old: Amount, new: Amount },
}
