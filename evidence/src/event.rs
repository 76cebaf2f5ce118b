//! Events emitted by the evidence vault.

use quill_types::{Address, DisputeId, EvidenceId, Hash256, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceEvent {
    EvidenceSubmitted {
        evidence_id: EvidenceId,
        dispute_id: DisputeId,
        submitter: Address,
        content_hash: Hash256,
        at: Timestamp,
    },
    EvidenceVerified {
        evidence_id: EvidenceId,
        verifier: Address,
        /// Whether the claimed hash matched the stored one.
        matched: bool,
    },
}
