//! The court: one instance of every component behind a single writer.

use crate::config::CourtConfig;
use crate::error::CourtError;
use crate::event::{CourtEvent, EventBus, EventLog, EventRecord};
use crate::snapshot::CourtSnapshot;
use quill_appeals::AppealBoard;
use quill_crypto::Salt;
use quill_disputes::{DisputeError, DisputeFiling, DisputeRegistry, DisputeStatus};
use quill_evidence::EvidenceVault;
use quill_stake::{StakeError, StakeLedger};
use quill_types::{
    Address, Amount, AppealId, Clock, CourtParams, DisputeId, EvidenceId, Hash256, Role,
    Timestamp,
};
use quill_voting::{JurySelector, Verdict, VotingEngine, VotingError, VotingResult};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Every component of the court, a clock, and the ordered event log.
///
/// Each mutating method reads `now` from the clock, delegates to the owning
/// component, and on success moves the component's pending events into the
/// log and out to subscribers. A failed call leaves state and log unchanged.
pub struct Court {
    params: CourtParams,
    stake: StakeLedger,
    disputes: DisputeRegistry,
    voting: VotingEngine,
    appeals: AppealBoard,
    evidence: EvidenceVault,
    /// Disputes whose ruling has already been carried out.
    applied_rulings: BTreeSet<DisputeId>,
    clock: Box<dyn Clock>,
    log: EventLog,
    bus: EventBus,
}

impl Court {
    /// A fresh court whose every component has `admin` as its only admin.
    pub fn new(admin: Address, params: CourtParams, clock: Box<dyn Clock>) -> Self {
        Self {
            stake: StakeLedger::new(admin.clone(), &params),
            disputes: DisputeRegistry::new(admin.clone(), &params),
            voting: VotingEngine::new(admin.clone(), &params),
            appeals: AppealBoard::new(admin.clone(), &params),
            evidence: EvidenceVault::new(admin),
            params,
            applied_rulings: BTreeSet::new(),
            clock,
            log: EventLog::new(),
            bus: EventBus::new(),
        }
    }

    pub fn from_config(config: &CourtConfig, clock: Box<dyn Clock>) -> Self {
        Self::new(config.admin.clone(), config.params(), clock)
    }

    /// Rebuild a court from a snapshot. Subscribers are not part of a snapshot.
    pub fn restore(snapshot: CourtSnapshot, clock: Box<dyn Clock>) -> Self {
        Self {
            params: snapshot.params,
            stake: snapshot.stake,
            disputes: snapshot.disputes,
            voting: snapshot.voting,
            appeals: snapshot.appeals,
            evidence: snapshot.evidence,
            applied_rulings: snapshot.applied_rulings,
            clock,
            log: snapshot.events,
            bus: EventBus::new(),
        }
    }

    pub fn snapshot(&self) -> CourtSnapshot {
        CourtSnapshot {
            version: CourtSnapshot::VERSION,
            taken_at: self.clock.now(),
            params: self.params.clone(),
            stake: self.stake.clone(),
            disputes: self.disputes.clone(),
            voting: self.voting.clone(),
            appeals: self.appeals.clone(),
            evidence: self.evidence.clone(),
            applied_rulings: self.applied_rulings.clone(),
            events: self.log.clone(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&EventRecord) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    // ── Roles ──────────────────────────────────────────────────────────

    /// Grant `role` on every component. Returns whether any grant was new.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: Address,
    ) -> Result<bool, CourtError> {
        self.run(|court, _| {
            court.require_admin_everywhere(caller)?;
            let mut granted = court.stake.grant_role(caller, role, grantee.clone())?;
            granted |= court.disputes.grant_role(caller, role, grantee.clone())?;
            granted |= court.voting.grant_role(caller, role, grantee.clone())?;
            granted |= court.appeals.grant_role(caller, role, grantee.clone())?;
            granted |= court.evidence.grant_role(caller, role, grantee.clone())?;
            info!(%grantee, %role, "role granted");
            Ok(granted)
        })
    }

    /// Revoke `role` on every component. Returns whether any grant was removed.
    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: &Address,
    ) -> Result<bool, CourtError> {
        self.run(|court, _| {
            court.require_admin_everywhere(caller)?;
            let mut revoked = court.stake.revoke_role(caller, role, grantee)?;
            revoked |= court.disputes.revoke_role(caller, role, grantee)?;
            revoked |= court.voting.revoke_role(caller, role, grantee)?;
            revoked |= court.appeals.revoke_role(caller, role, grantee)?;
            revoked |= court.evidence.revoke_role(caller, role, grantee)?;
            info!(%grantee, %role, "role revoked");
            Ok(revoked)
        })
    }

    // ── Stake ──────────────────────────────────────────────────────────

    pub fn stake(&mut self, caller: &Address, amount: Amount) -> Result<Amount, CourtError> {
        self.run(|court, now| Ok(court.stake.stake(caller, amount, now)?))
    }

    pub fn withdraw(&mut self, caller: &Address, amount: Amount) -> Result<Amount, CourtError> {
        self.run(|court, now| Ok(court.stake.withdraw(caller, amount, now)?))
    }

    pub fn slash(
        &mut self,
        caller: &Address,
        juror: &Address,
        amount: Amount,
    ) -> Result<Amount, CourtError> {
        self.run(|court, now| Ok(court.stake.slash(caller, juror, amount, now)?))
    }

    pub fn update_reputation(
        &mut self,
        caller: &Address,
        juror: &Address,
        was_correct: bool,
    ) -> Result<u64, CourtError> {
        self.run(|court, _| Ok(court.stake.update_reputation(caller, juror, was_correct)?))
    }

    pub fn set_min_stake(&mut self, caller: &Address, amount: Amount) -> Result<(), CourtError> {
        self.run(|court, _| Ok(court.stake.set_min_stake(caller, amount)?))
    }

    // ── Disputes ───────────────────────────────────────────────────────

    pub fn file_dispute(
        &mut self,
        caller: &Address,
        filing: DisputeFiling,
        fee: Amount,
    ) -> Result<DisputeId, CourtError> {
        self.run(|court, now| Ok(court.disputes.file_dispute(caller, filing, fee, now)?))
    }

    pub fn update_status(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        status: DisputeStatus,
    ) -> Result<(), CourtError> {
        self.run(|court, now| Ok(court.disputes.update_status(caller, dispute_id, status, now)?))
    }

    pub fn close_dispute(&mut self, caller: &Address, dispute_id: DisputeId) -> Result<(), CourtError> {
        self.run(|court, now| Ok(court.disputes.close_dispute(caller, dispute_id, now)?))
    }

    pub fn set_dispute_fee(&mut self, caller: &Address, fee: Amount) -> Result<(), CourtError> {
        self.run(|court, _| Ok(court.disputes.set_dispute_fee(caller, fee)?))
    }

    pub fn withdraw_dispute_fees(&mut self, caller: &Address) -> Result<Amount, CourtError> {
        self.run(|court, _| Ok(court.disputes.withdraw_fees(caller)?))
    }

    // ── Voting ─────────────────────────────────────────────────────────

    pub fn initialize_voting(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        jurors: Vec<Address>,
    ) -> Result<(), CourtError> {
        self.run(|court, now| Ok(court.voting.initialize_voting(caller, dispute_id, jurors, now)?))
    }

    /// Draw `count` jurors from the active pool with `selector` and open a
    /// session over them. Returns the jury.
    pub fn select_jury(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        selector: &dyn JurySelector,
        count: usize,
    ) -> Result<Vec<Address>, CourtError> {
        self.run(|court, now| {
            let jury = selector.select(court.stake.active_jurors(), dispute_id, count);
            debug!(%dispute_id, pool = court.stake.active_jurors().len(), drawn = jury.len(), "jury drawn");
            court
                .voting
                .initialize_voting(caller, dispute_id, jury.clone(), now)?;
            Ok(jury)
        })
    }

    pub fn commit_vote(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        commitment: Hash256,
    ) -> Result<(), CourtError> {
        self.run(|court, now| Ok(court.voting.commit_vote(caller, dispute_id, commitment, now)?))
    }

    pub fn reveal_vote(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        verdict: Verdict,
        salt: &Salt,
    ) -> Result<(), CourtError> {
        self.run(|court, now| {
            Ok(court
                .voting
                .reveal_vote(caller, dispute_id, verdict, salt, now)?)
        })
    }

    pub fn finalize_voting(&mut self, dispute_id: DisputeId) -> Result<VotingResult, CourtError> {
        self.run(|court, now| Ok(court.voting.finalize_voting(dispute_id, now)?))
    }

    /// Carry out a finalized vote: move the dispute to `Ruled` and update the
    /// reputation of every juror who revealed. System role only, and at most
    /// once per dispute.
    ///
    /// All preconditions are checked before the first write, so either every
    /// step happens or none does.
    pub fn apply_ruling(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
    ) -> Result<VotingResult, CourtError> {
        self.run(|court, now| {
            court
                .disputes
                .roles()
                .require(caller, Role::System)
                .map_err(DisputeError::from)?;
            court
                .stake
                .roles()
                .require(caller, Role::System)
                .map_err(StakeError::from)?;

            if court.applied_rulings.contains(&dispute_id) {
                return Err(CourtError::RulingAlreadyApplied(dispute_id));
            }
            let status = court.disputes.get_dispute(dispute_id)?.status;
            if !status.can_transition_to(DisputeStatus::Ruled) {
                return Err(DisputeError::InvalidTransition {
                    from: status,
                    to: DisputeStatus::Ruled,
                }
                .into());
            }
            let result = court.voting.get_voting_result(dispute_id)?;
            if !result.finalized {
                return Err(VotingError::NotFinalized(dispute_id).into());
            }
            let outcomes = court.voting.juror_outcomes(dispute_id)?;
            for (juror, _) in &outcomes {
                court.stake.get_juror(juror)?;
            }

            court
                .disputes
                .update_status(caller, dispute_id, DisputeStatus::Ruled, now)?;
            for (juror, was_correct) in &outcomes {
                court.stake.update_reputation(caller, juror, *was_correct)?;
            }
            court.applied_rulings.insert(dispute_id);
            info!(
                %dispute_id,
                verdict = ?result.verdict,
                jurors = outcomes.len(),
                "ruling applied"
            );
            Ok(result)
        })
    }

    // ── Appeals ────────────────────────────────────────────────────────

    pub fn file_appeal(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        reason: impl Into<String>,
        fee: Amount,
    ) -> Result<AppealId, CourtError> {
        let reason = reason.into();
        self.run(|court, now| {
            Ok(court
                .appeals
                .file_appeal(caller, &court.disputes, dispute_id, reason, fee, now)?)
        })
    }

    pub fn process_appeal(
        &mut self,
        caller: &Address,
        appeal_id: AppealId,
        accepted: bool,
    ) -> Result<(), CourtError> {
        self.run(|court, now| Ok(court.appeals.process_appeal(caller, appeal_id, accepted, now)?))
    }

    pub fn set_appeal_fee(&mut self, caller: &Address, fee: Amount) -> Result<(), CourtError> {
        self.run(|court, _| Ok(court.appeals.set_appeal_fee(caller, fee)?))
    }

    pub fn withdraw_appeal_fees(&mut self, caller: &Address) -> Result<Amount, CourtError> {
        self.run(|court, _| Ok(court.appeals.withdraw_fees(caller)?))
    }

    // ── Evidence ───────────────────────────────────────────────────────

    pub fn submit_evidence(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        content_hash: Hash256,
        encrypted_cid: impl Into<String>,
    ) -> Result<EvidenceId, CourtError> {
        let encrypted_cid = encrypted_cid.into();
        self.run(|court, now| {
            Ok(court.evidence.submit_evidence(
                caller,
                &court.disputes,
                dispute_id,
                content_hash,
                encrypted_cid,
                now,
            )?)
        })
    }

    pub fn verify_evidence(
        &mut self,
        caller: &Address,
        evidence_id: EvidenceId,
        claimed_hash: Hash256,
    ) -> Result<bool, CourtError> {
        self.run(|court, _| Ok(court.evidence.verify_evidence(caller, evidence_id, claimed_hash)?))
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn params(&self) -> &CourtParams {
        &self.params
    }

    pub fn stake_ledger(&self) -> &StakeLedger {
        &self.stake
    }

    pub fn disputes(&self) -> &DisputeRegistry {
        &self.disputes
    }

    pub fn voting(&self) -> &VotingEngine {
        &self.voting
    }

    pub fn appeals(&self) -> &AppealBoard {
        &self.appeals
    }

    pub fn evidence(&self) -> &EvidenceVault {
        &self.evidence
    }

    pub fn events(&self) -> &EventLog {
        &self.log
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn run<T>(
        &mut self,
        op: impl FnOnce(&mut Self, Timestamp) -> Result<T, CourtError>,
    ) -> Result<T, CourtError> {
        let now = self.clock.now();
        let result = op(self, now);
        let events = self.drain_component_events();
        if result.is_ok() {
            for event in events {
                let record = self.log.append(now, event);
                self.bus.emit(record);
            }
        } else if !events.is_empty() {
            debug!(dropped = events.len(), "discarding events from failed operation");
        }
        result
    }

    /// Pending events of every component, in a fixed component order.
    fn drain_component_events(&mut self) -> Vec<CourtEvent> {
        let mut events: Vec<CourtEvent> = Vec::new();
        events.extend(self.disputes.drain_events().into_iter().map(CourtEvent::from));
        events.extend(self.voting.drain_events().into_iter().map(CourtEvent::from));
        events.extend(self.stake.drain_events().into_iter().map(CourtEvent::from));
        events.extend(self.appeals.drain_events().into_iter().map(CourtEvent::from));
        events.extend(self.evidence.drain_events().into_iter().map(CourtEvent::from));
        events
    }

    fn require_admin_everywhere(&self, caller: &Address) -> Result<(), CourtError> {
        self.stake
            .roles()
            .require(caller, Role::Admin)
            .map_err(StakeError::from)?;
        self.disputes
            .roles()
            .require(caller, Role::Admin)
            .map_err(DisputeError::from)?;
        self.voting
            .roles()
            .require(caller, Role::Admin)
            .map_err(VotingError::from)?;
        self.appeals
            .roles()
            .require(caller, Role::Admin)
            .map_err(quill_appeals::AppealError::from)?;
        self.evidence
            .roles()
            .require(caller, Role::Admin)
            .map_err(quill_evidence::EvidenceError::from)?;
        Ok(())
    }
}
