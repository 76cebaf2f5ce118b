//! Commit-reveal jury voting.
//!
//! Each dispute gets one voting session over a frozen jury. Jurors first commit
//! `blake2b_256(verdict_code || salt)` during the commit window, then disclose
//! the verdict and salt during the reveal window. After the reveal window
//! anyone may finalize the session, which tallies the revealed votes.

pub mod engine;
pub mod error;
pub mod event;
pub mod selection;
pub mod session;
pub mod verdict;

pub use engine::VotingEngine;
pub use error::VotingError;
pub use event::VotingEvent;
pub use selection::{JurySelector, SeededSelector};
pub use session::{VotingPhase, VotingResult, VotingSession};
pub use verdict::Verdict;
