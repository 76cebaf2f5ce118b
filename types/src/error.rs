//! Errors shared across crates.

use crate::access::Role;
use crate::address::Address;
use thiserror::Error;

/// A caller was not allowed to perform an operation.
///
/// Each component error type converts this into its `Unauthorized` variant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("{caller} lacks the {role} role")]
    MissingRole { caller: Address, role: Role },

    #[error("{caller} is not a party to the dispute")]
    NotParty { caller: Address },
}

/// A string was not a decimal amount of whole units.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid amount: {0:?}")]
pub struct ParseAmountError(pub String);
