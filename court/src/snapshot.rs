//! Point-in-time copies of the whole court, for persistence and inspection.

use crate::error::CourtError;
use crate::event::EventLog;
use quill_appeals::AppealBoard;
use quill_disputes::DisputeRegistry;
use quill_evidence::EvidenceVault;
use quill_stake::StakeLedger;
use quill_types::{CourtParams, DisputeId, Timestamp};
use quill_voting::VotingEngine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Every record table, the parameters, and the event log.
///
/// The canonical encoding is `bincode`; JSON is offered for humans.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CourtSnapshot {
    pub version: u32,
    pub taken_at: Timestamp,
    pub params: CourtParams,
    pub stake: StakeLedger,
    pub disputes: DisputeRegistry,
    pub voting: VotingEngine,
    pub appeals: AppealBoard,
    pub evidence: EvidenceVault,
    pub applied_rulings: BTreeSet<DisputeId>,
    pub events: EventLog,
}

impl CourtSnapshot {
    pub const VERSION: u32 = 1;

    pub fn to_bincode(&self) -> Result<Vec<u8>, CourtError> {
        bincode::serialize(self).map_err(|e| CourtError::Snapshot(e.to_string()))
    }

    pub fn from_bincode(bytes: &[u8]) -> Result<Self, CourtError> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| CourtError::Snapshot(e.to_string()))?;
        snapshot.check_version()
    }

    pub fn to_json(&self) -> Result<String, CourtError> {
        serde_json::to_string_pretty(self).map_err(|e| CourtError::Snapshot(e.to_string()))
    }

    pub fn from_json(s: &str) -> Result<Self, CourtError> {
        let snapshot: Self =
            serde_json::from_str(s).map_err(|e| CourtError::Snapshot(e.to_string()))?;
        snapshot.check_version()
    }

    /// Write the bincode encoding to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), CourtError> {
        std::fs::write(path, self.to_bincode()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, CourtError> {
        Self::from_bincode(&std::fs::read(path)?)
    }

    fn check_version(self) -> Result<Self, CourtError> {
        if self.version != Self::VERSION {
            return Err(CourtError::Snapshot(format!(
                "unsupported snapshot version {} (expected {})",
                self.version,
                Self::VERSION
            )));
        }
        Ok(self)
    }
}
