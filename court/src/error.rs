//! Court errors: every component error plus config and snapshot failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourtError {
    #[error("stake error: {0}")]
    Stake(#[from] quill_stake::StakeError),

    #[error("dispute error: {0}")]
    Dispute(#[from] quill_disputes::DisputeError),

    #[error("voting error: {0}")]
    Voting(#[from] quill_voting::VotingError),

    #[error("appeal error: {0}")]
    Appeal(#[from] quill_appeals::AppealError),

    #[error("evidence error: {0}")]
    Evidence(#[from] quill_evidence::EvidenceError),

    #[error("ruling for dispute {0} already applied")]
    RulingAlreadyApplied(quill_types::DisputeId),

    #[error("config error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
