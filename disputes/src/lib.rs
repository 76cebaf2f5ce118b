//! Dispute registry.
//!
//! Disputes are filed by a plaintiff against a defendant with an attached fee
//! and then driven through a closed lifecycle:
//!
//! `Filed → EvidencePending → VotingInProgress → Ruled → {Appealed, Executed} → Closed`
//!
//! Forward transitions belong to the system role. Either party may close a
//! dispute early (settlement), except while an appeal is pending.

pub mod dispute;
pub mod error;
pub mod event;
pub mod registry;

pub use dispute::{Dispute, DisputeFiling, DisputeStatus};
pub use error::DisputeError;
pub use event::DisputeEvent;
pub use registry::DisputeRegistry;
