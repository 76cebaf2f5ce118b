//! Evidence-vault errors.

use quill_types::{AccessDenied, DisputeId, EvidenceId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvidenceError {
    #[error("evidence {0} does not exist")]
    NotFound(EvidenceId),

    #[error("dispute {0} does not exist")]
    DisputeNotFound(DisputeId),

    #[error(transparent)]
    Unauthorized(#[from] AccessDenied),

    #[error("content hash must be non-zero")]
    InvalidHash,

    #[error("encrypted CID is required")]
    CidRequired,
}
