//! Stake-ledger errors.

use quill_types::{AccessDenied, Address, Amount, Timestamp};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StakeError {
    #[error("juror {0} not found")]
    NotFound(Address),

    #[error(transparent)]
    Unauthorized(#[from] AccessDenied),

    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("insufficient stake: requested {requested}, available {available}")]
    InsufficientStake { requested: Amount, available: Amount },

    #[error("lock period active until {unlock_at}")]
    LockPeriodActive { unlock_at: Timestamp },

    #[error("arithmetic overflow in stake accounting")]
    Overflow,
}
