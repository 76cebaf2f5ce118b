//! Events appended by the voting engine.

use crate::verdict::Verdict;
use quill_types::{Address, DisputeId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotingEvent {
    VotingInitialized {
        dispute_id: DisputeId,
        jurors: Vec<Address>,
        commit_deadline: Timestamp,
        reveal_deadline: Timestamp,
    },
    VoteCommitted {
        dispute_id: DisputeId,
        juror: Address,
        at: Timestamp,
    },
    VoteRevealed {
        dispute_id: DisputeId,
        juror: Address,
        verdict: Verdict,
        at: Timestamp,
    },
    VotingFinalized {
        dispute_id: DisputeId,
        verdict: Verdict,
        plaintiff_votes: u32,
        defendant_votes: u32,
        invalid_votes: u32,
        at: Timestamp,
    },
}
