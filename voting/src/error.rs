//! Voting errors.

use quill_types::{AccessDenied, Address, DisputeId, Timestamp};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VotingError {
    #[error("no voting session for dispute {0}")]
    NotFound(DisputeId),

    #[error(transparent)]
    Unauthorized(#[from] AccessDenied),

    #[error("voting already initialized for dispute {0}")]
    AlreadyInitialized(DisputeId),

    #[error("jury must not be empty")]
    EmptyJury,

    #[error("{0} is not a selected juror")]
    NotSelectedJuror(Address),

    #[error("{0} already committed")]
    AlreadyCommitted(Address),

    #[error("{0} has not committed")]
    NotCommitted(Address),

    #[error("{0} already revealed")]
    AlreadyRevealed(Address),

    #[error("commit window closed at {0}")]
    CommitWindowClosed(Timestamp),

    #[error("commit window open until {0}")]
    CommitWindowOpen(Timestamp),

    #[error("reveal window closed at {0}")]
    RevealWindowClosed(Timestamp),

    #[error("reveal window open until {0}")]
    RevealWindowOpen(Timestamp),

    #[error("revealed vote does not match commitment")]
    InvalidReveal,

    #[error("voting already finalized for dispute {0}")]
    AlreadyFinalized(DisputeId),

    #[error("voting not finalized for dispute {0}")]
    NotFinalized(DisputeId),
}
