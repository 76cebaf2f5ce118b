//! Dispute-registry errors.

use crate::dispute::DisputeStatus;
use quill_types::{AccessDenied, Amount, DisputeId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisputeError {
    #[error("dispute {0} does not exist")]
    NotFound(DisputeId),

    #[error(transparent)]
    Unauthorized(#[from] AccessDenied),

    #[error("cannot file a dispute against yourself")]
    InvalidParty,

    #[error("metadata reference is required")]
    MetadataRequired,

    #[error("insufficient dispute fee: need {needed}, provided {provided}")]
    InsufficientFee { needed: Amount, provided: Amount },

    #[error("invalid status transition {from:?} -> {to:?}")]
    InvalidTransition {
        from: DisputeStatus,
        to: DisputeStatus,
    },
}
