//! Evidence records: content hashes and encrypted CIDs submitted by dispute
//! parties, with verifier attestations.

use crate::error::EvidenceError;
use crate::event::EvidenceEvent;
use quill_disputes::DisputeRegistry;
use quill_types::{
    AccessControl, AccessDenied, Address, DisputeId, EvidenceId, Hash256, Role, Timestamp,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Read access to submitted evidence, for collaborators that only need to
/// know who has submitted what.
pub trait EvidenceSource {
    fn submitter_has_submitted(&self, dispute_id: DisputeId, who: &Address) -> bool;
    fn evidence_count(&self, dispute_id: DisputeId) -> u64;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: EvidenceId,
    pub dispute_id: DisputeId,
    pub submitter: Address,
    pub content_hash: Hash256,
    pub encrypted_cid: String,
    pub submitted_at: Timestamp,
    pub verified: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvidenceVault {
    /// Evidence `n` lives at index `n - 1`.
    records: Vec<Evidence>,
    by_dispute: BTreeMap<DisputeId, Vec<EvidenceId>>,
    by_submitter: BTreeMap<Address, Vec<EvidenceId>>,
    roles: AccessControl,
    #[serde(skip)]
    pending_events: Vec<EvidenceEvent>,
}

impl EvidenceVault {
    pub fn new(admin: Address) -> Self {
        Self {
            records: Vec::new(),
            by_dispute: BTreeMap::new(),
            by_submitter: BTreeMap::new(),
            roles: AccessControl::with_admin(admin),
            pending_events: Vec::new(),
        }
    }

    /// Register a piece of evidence for a dispute the caller is party to.
    pub fn submit_evidence(
        &mut self,
        caller: &Address,
        disputes: &DisputeRegistry,
        dispute_id: DisputeId,
        content_hash: Hash256,
        encrypted_cid: impl Into<String>,
        now: Timestamp,
    ) -> Result<EvidenceId, EvidenceError> {
        let dispute = disputes
            .get_dispute(dispute_id)
            .map_err(|_| EvidenceError::DisputeNotFound(dispute_id))?;
        if !dispute.is_party(caller) {
            return Err(AccessDenied::NotParty {
                caller: caller.clone(),
            }
            .into());
        }
        if content_hash.is_zero() {
            return Err(EvidenceError::InvalidHash);
        }
        let encrypted_cid = encrypted_cid.into();
        if encrypted_cid.is_empty() {
            return Err(EvidenceError::CidRequired);
        }

        let id = EvidenceId::new(self.records.len() as u64 + 1);
        self.records.push(Evidence {
            id,
            dispute_id,
            submitter: caller.clone(),
            content_hash,
            encrypted_cid,
            submitted_at: now,
            verified: false,
        });
        self.by_dispute.entry(dispute_id).or_default().push(id);
        self.by_submitter.entry(caller.clone()).or_default().push(id);

        info!(evidence_id = %id, %dispute_id, submitter = %caller, %content_hash, "evidence submitted");
        self.pending_events.push(EvidenceEvent::EvidenceSubmitted {
            evidence_id: id,
            dispute_id,
            submitter: caller.clone(),
            content_hash,
            at: now,
        });
        Ok(id)
    }

    /// Check `claimed_hash` against the stored one. On a match the record is
    /// marked verified. Every attestation is recorded as an event, matching or
    /// not. Verifier role only.
    pub fn verify_evidence(
        &mut self,
        caller: &Address,
        evidence_id: EvidenceId,
        claimed_hash: Hash256,
    ) -> Result<bool, EvidenceError> {
        self.roles.require(caller, Role::Verifier)?;
        let record = evidence_id
            .is_valid()
            .then(|| evidence_id.get() as usize - 1)
            .and_then(|idx| self.records.get_mut(idx))
            .ok_or(EvidenceError::NotFound(evidence_id))?;
        let matched = record.content_hash == claimed_hash;
        if matched {
            record.verified = true;
            info!(%evidence_id, verifier = %caller, "evidence verified");
        } else {
            debug!(%evidence_id, verifier = %caller, "evidence hash mismatch");
        }
        self.pending_events.push(EvidenceEvent::EvidenceVerified {
            evidence_id,
            verifier: caller.clone(),
            matched,
        });
        Ok(matched)
    }

    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: Address,
    ) -> Result<bool, EvidenceError> {
        Ok(self.roles.grant(caller, role, grantee)?)
    }

    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: &Address,
    ) -> Result<bool, EvidenceError> {
        Ok(self.roles.revoke(caller, role, grantee)?)
    }

    pub fn get_evidence(&self, evidence_id: EvidenceId) -> Result<&Evidence, EvidenceError> {
        evidence_id
            .is_valid()
            .then(|| evidence_id.get() as usize - 1)
            .and_then(|idx| self.records.get(idx))
            .ok_or(EvidenceError::NotFound(evidence_id))
    }

    pub fn dispute_evidence(&self, dispute_id: DisputeId) -> &[EvidenceId] {
        self.by_dispute
            .get(&dispute_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn submitter_evidence(&self, who: &Address) -> &[EvidenceId] {
        self.by_submitter
            .get(who)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_evidence(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn dispute_evidence_count(&self, dispute_id: DisputeId) -> u64 {
        self.dispute_evidence(dispute_id).len() as u64
    }

    pub fn evidence_exists(&self, evidence_id: EvidenceId) -> bool {
        self.get_evidence(evidence_id).is_ok()
    }

    pub fn roles(&self) -> &AccessControl {
        &self.roles
    }

    pub fn drain_events(&mut self) -> Vec<EvidenceEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

impl EvidenceSource for EvidenceVault {
    fn submitter_has_submitted(&self, dispute_id: DisputeId, who: &Address) -> bool {
        self.submitter_evidence(who)
            .iter()
            .filter_map(|id| self.get_evidence(*id).ok())
            .any(|e| e.dispute_id == dispute_id)
    }

    fn evidence_count(&self, dispute_id: DisputeId) -> u64 {
        self.dispute_evidence_count(dispute_id)
    }
}
