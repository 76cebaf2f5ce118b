//! Events appended by the appeal board.

use quill_types::{Address, Amount, AppealId, DisputeId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppealEvent {
    AppealFiled {
        appeal_id: AppealId,
        dispute_id: DisputeId,
        appellant: Address,
        fee: Amount,
        at: Timestamp,
    },
    AppealProcessed {
        appeal_id: AppealId,
        dispute_id: DisputeId,
        accepted: bool,
        at: Timestamp,
    },
    AppealFeeChanged {
        old: Amount,
        new: Amount,
    },
    FeesWithdrawn {
        to: Address,
        amount: Amount,
    },
}
