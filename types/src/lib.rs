//! Fundamental types for the QuillArbiter adjudication engine.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! participant addresses, amounts, timestamps and clocks, record identifiers,
//! role-based access control, fee treasuries, and court parameters.

pub mod access;
pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod ids;
pub mod params;
pub mod time;
pub mod treasury;

pub use access::{AccessControl, Role};
pub use address::Address;
pub use amount::{Amount, UNIT};
pub use error::{AccessDenied, ParseAmountError};
pub use hash::Hash256;
pub use ids::{AppealId, DisputeId, EvidenceId};
pub use params::CourtParams;
pub use time::{Clock, SystemClock, Timestamp, DAY_SECS};
pub use treasury::Treasury;
