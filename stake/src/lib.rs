//! Juror stake ledger.
//!
//! Jurors lock native currency to become eligible for jury duty. The ledger
//! owns every juror record and is the only writer of stake and reputation:
//!
//! - Staking and withdrawal, gated by a lock period after the last deposit
//! - Slashing by the system role (slashed funds are burned)
//! - Multiplicative reputation updates after each ruling
//! - An incrementally maintained set of active (eligible) jurors

pub mod error;
pub mod event;
pub mod juror;
pub mod ledger;

pub use error::StakeError;
pub use event::StakeEvent;
pub use juror::JurorRecord;
pub use ledger::StakeLedger;
