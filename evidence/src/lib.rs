//! Evidence vault.
//!
//! Dispute parties register evidence by content hash and encrypted content
//! identifier; the content itself lives off-core. Records are append-only,
//! except that a verifier may attest that a record matches its hash.

pub mod error;
pub mod event;
pub mod vault;

pub use error::EvidenceError;
pub use event::EvidenceEvent;
pub use vault::{Evidence, EvidenceSource, EvidenceVault};
