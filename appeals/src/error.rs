//! Appeal-board errors.

use quill_disputes::DisputeStatus;
use quill_types::{AccessDenied, Amount, AppealId, DisputeId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppealError {
    #[error("appeal {0} does not exist")]
    NotFound(AppealId),

    #[error("dispute {0} does not exist")]
    DisputeNotFound(DisputeId),

    #[error(transparent)]
    Unauthorized(#[from] AccessDenied),

    #[error("appeal reason is required")]
    ReasonRequired,

    #[error("insufficient appeal fee: need {needed}, provided {provided}")]
    InsufficientFee { needed: Amount, provided: Amount },

    #[error("dispute in status {0:?} has no ruling to appeal")]
    NotAppealable(DisputeStatus),

    #[error("dispute {0} already has a pending appeal")]
    ActiveAppealExists(DisputeId),

    #[error("appeal {0} already processed")]
    AlreadyProcessed(AppealId),
}
