//! Events appended by the dispute registry.

use crate::dispute::DisputeStatus;
use quill_types::{Address, Amount, DisputeId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisputeEvent {
    DisputeFiled {
        dispute_id: DisputeId,
        plaintiff: Address,
        defendant: Address,
        metadata_ref: String,
        at: Timestamp,
    },
    DisputeStatusChanged {
        dispute_id: DisputeId,
        old: DisputeStatus,
        new: DisputeStatus,
        at: Timestamp,
    },
    DisputeClosed {
        dispute_id: DisputeId,
        closed_by: Address,
        at: Timestamp,
    },
    DisputeFeeChanged {
        old: Amount,
        new: Amount,
    },
    FeesWithdrawn {
        to: Address,
        amount: Amount,
    },
}
