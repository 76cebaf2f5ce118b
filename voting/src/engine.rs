//! The voting engine: owns every session and enforces the commit-reveal windows.

use crate::error::VotingError;
use crate::event::VotingEvent;
use crate::session::{VotingPhase, VotingResult, VotingSession};
use crate::verdict::Verdict;
use quill_crypto::Salt;
use quill_types::{AccessControl, Address, CourtParams, DisputeId, Hash256, Role, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Commit-reveal voting for every dispute, one session each.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VotingEngine {
    sessions: BTreeMap<DisputeId, VotingSession>,
    commit_period_secs: u64,
    reveal_period_secs: u64,
    roles: AccessControl,
    #[serde(skip)]
    pending_events: Vec<VotingEvent>,
}

impl VotingEngine {
    pub fn new(admin: Address, params: &CourtParams) -> Self {
        Self {
            sessions: BTreeMap::new(),
            commit_period_secs: params.commit_period_secs,
            reveal_period_secs: params.reveal_period_secs,
            roles: AccessControl::with_admin(admin),
            pending_events: Vec::new(),
        }
    }

    /// Open a session for `dispute_id` over `jurors`. System role only.
    ///
    /// Duplicate jurors are dropped, keeping first-seen order. The jury is
    /// frozen for the lifetime of the session.
    pub fn initialize_voting(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        jurors: Vec<Address>,
        now: Timestamp,
    ) -> Result<(), VotingError> {
        self.roles.require(caller, Role::System)?;
        if self.sessions.contains_key(&dispute_id) {
            return Err(VotingError::AlreadyInitialized(dispute_id));
        }
        let mut seen = HashSet::new();
        let jurors: Vec<Address> = jurors
            .into_iter()
            .filter(|j| seen.insert(j.clone()))
            .collect();
        if jurors.is_empty() {
            return Err(VotingError::EmptyJury);
        }

        let commit_deadline = now.plus(self.commit_period_secs);
        let reveal_deadline = commit_deadline.plus(self.reveal_period_secs);
        info!(
            %dispute_id,
            jurors = jurors.len(),
            %commit_deadline,
            %reveal_deadline,
            "voting initialized"
        );
        self.pending_events.push(VotingEvent::VotingInitialized {
            dispute_id,
            jurors: jurors.clone(),
            commit_deadline,
            reveal_deadline,
        });
        self.sessions.insert(
            dispute_id,
            VotingSession::new(dispute_id, jurors, commit_deadline, reveal_deadline),
        );
        Ok(())
    }

    /// Record a juror's sealed vote.
    pub fn commit_vote(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        commitment: Hash256,
        now: Timestamp,
    ) -> Result<(), VotingError> {
        let session = self.session_mut(dispute_id)?;
        if !session.is_juror(caller) {
            return Err(VotingError::NotSelectedJuror(caller.clone()));
        }
        if session.commits.contains_key(caller) {
            return Err(VotingError::AlreadyCommitted(caller.clone()));
        }
        if now >= session.commit_deadline {
            debug!(%dispute_id, juror = %caller, "commit after deadline");
            return Err(VotingError::CommitWindowClosed(session.commit_deadline));
        }
        session.commits.insert(caller.clone(), commitment);

        info!(%dispute_id, juror = %caller, "vote committed");
        self.pending_events.push(VotingEvent::VoteCommitted {
            dispute_id,
            juror: caller.clone(),
            at: now,
        });
        Ok(())
    }

    /// Disclose a committed vote. The verdict counts only if it hashes, with
    /// `salt`, to the stored commitment.
    pub fn reveal_vote(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        verdict: Verdict,
        salt: &Salt,
        now: Timestamp,
    ) -> Result<(), VotingError> {
        let session = self.session_mut(dispute_id)?;
        if now < session.commit_deadline {
            return Err(VotingError::CommitWindowOpen(session.commit_deadline));
        }
        if now >= session.reveal_deadline {
            return Err(VotingError::RevealWindowClosed(session.reveal_deadline));
        }
        let committed = session
            .commits
            .get(caller)
            .copied()
            .ok_or_else(|| VotingError::NotCommitted(caller.clone()))?;
        if session.reveals.contains_key(caller) {
            return Err(VotingError::AlreadyRevealed(caller.clone()));
        }
        if !verdict.is_decided() || verdict.commitment(salt) != committed {
            debug!(%dispute_id, juror = %caller, "reveal does not match commitment");
            return Err(VotingError::InvalidReveal);
        }
        session.record_reveal(caller.clone(), verdict);

        info!(%dispute_id, juror = %caller, ?verdict, "vote revealed");
        self.pending_events.push(VotingEvent::VoteRevealed {
            dispute_id,
            juror: caller.clone(),
            verdict,
            at: now,
        });
        Ok(())
    }

    /// Tally the revealed votes and seal the session. Anyone may call this
    /// once the reveal window has closed. Jurors who never revealed are
    /// simply left out of the tally.
    pub fn finalize_voting(
        &mut self,
        dispute_id: DisputeId,
        now: Timestamp,
    ) -> Result<VotingResult, VotingError> {
        let session = self.session_mut(dispute_id)?;
        if session.finalized {
            return Err(VotingError::AlreadyFinalized(dispute_id));
        }
        if now < session.reveal_deadline {
            return Err(VotingError::RevealWindowOpen(session.reveal_deadline));
        }
        session.final_verdict = session.tally();
        session.finalized = true;
        let result = session.result();

        info!(
            %dispute_id,
            verdict = ?result.verdict,
            plaintiff_votes = result.plaintiff_votes,
            defendant_votes = result.defendant_votes,
            invalid_votes = result.invalid_votes,
            "voting finalized"
        );
        self.pending_events.push(VotingEvent::VotingFinalized {
            dispute_id,
            verdict: result.verdict,
            plaintiff_votes: result.plaintiff_votes,
            defendant_votes: result.defendant_votes,
            invalid_votes: result.invalid_votes,
            at: now,
        });
        Ok(result)
    }

    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: Address,
    ) -> Result<bool, VotingError> {
        Ok(self.roles.grant(caller, role, grantee)?)
    }

    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: &Address,
    ) -> Result<bool, VotingError> {
        Ok(self.roles.revoke(caller, role, grantee)?)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn get_voting_session(&self, dispute_id: DisputeId) -> Result<&VotingSession, VotingError> {
        self.sessions
            .get(&dispute_id)
            .ok_or(VotingError::NotFound(dispute_id))
    }

    pub fn get_voting_result(&self, dispute_id: DisputeId) -> Result<VotingResult, VotingError> {
        Ok(self.get_voting_session(dispute_id)?.result())
    }

    pub fn phase(&self, dispute_id: DisputeId, now: Timestamp) -> Result<VotingPhase, VotingError> {
        Ok(self.get_voting_session(dispute_id)?.phase(now))
    }

    pub fn is_initialized(&self, dispute_id: DisputeId) -> bool {
        self.sessions.contains_key(&dispute_id)
    }

    /// Jurors who did not reveal, in jury order. Includes jurors who never committed.
    pub fn non_revealers(&self, dispute_id: DisputeId) -> Result<Vec<Address>, VotingError> {
        let session = self.get_voting_session(dispute_id)?;
        Ok(session
            .jurors
            .iter()
            .filter(|j| !session.reveals.contains_key(*j))
            .cloned()
            .collect())
    }

    /// Each revealed juror, in jury order, with whether their vote matched
    /// the final verdict.
    pub fn juror_outcomes(&self, dispute_id: DisputeId) -> Result<Vec<(Address, bool)>, VotingError> {
        let session = self.get_voting_session(dispute_id)?;
        if !session.finalized {
            return Err(VotingError::NotFinalized(dispute_id));
        }
        Ok(session
            .jurors
            .iter()
            .filter_map(|j| {
                session
                    .reveals
                    .get(j)
                    .map(|v| (j.clone(), *v == session.final_verdict))
            })
            .collect())
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn roles(&self) -> &AccessControl {
        &self.roles
    }

    /// Take the events appended since the last drain.
    pub fn drain_events(&mut self) -> Vec<VotingEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn session_mut(&mut self, dispute_id: DisputeId) -> Result<&mut VotingSession, VotingError> {
        self.sessions
            .get_mut(&dispute_id)
            .ok_or(VotingError::NotFound(dispute_id))
    }
}
