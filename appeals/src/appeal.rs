//! Appeal records.

use quill_types::{Address, Amount, AppealId, DisputeId, Timestamp};
use serde::{Deserialize, Serialize};

/// An appeal against a dispute's ruling. Mutated exactly once, when processed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appeal {
    pub id: AppealId,
    pub dispute_id: DisputeId,
    pub appellant: Address,
    pub reason: String,
    pub fee_paid: Amount,
    pub processed: bool,
    /// Meaningful only once `processed` is set.
    pub accepted: bool,
    pub filed_at: Timestamp,
    pub processed_at: Option<Timestamp>,
}

impl Appeal {
    pub fn is_pending(&self) -> bool {
        !self.processed
    }
}
