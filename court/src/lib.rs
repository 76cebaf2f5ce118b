//! QuillArbiter court.
//!
//! Ties the stake ledger, dispute registry, voting engine, appeal board, and
//! evidence vault together behind one serialization point:
//!
//! - [`Court`]: the aggregate, stamping each operation with its clock
//! - [`EventLog`] / [`EventBus`]: the sequenced record of every change
//! - [`CourtConfig`]: TOML configuration
//! - [`CourtSnapshot`]: bincode/JSON persistence
//! - [`CourtService`]: async handle for concurrent callers

pub mod config;
pub mod court;
pub mod error;
pub mod event;
pub mod service;
pub mod snapshot;

pub use config::CourtConfig;
pub use court::Court;
pub use error::CourtError;
pub use event::{CourtEvent, EventBus, EventLog, EventRecord};
pub use service::CourtService;
pub use snapshot::CourtSnapshot;
