//! The appeal board: appeal records, the pending-appeal index, and the fee treasury.

use crate::appeal::Appeal;
use crate::error::AppealError;
use crate::event::AppealEvent;
use quill_disputes::DisputeRegistry;
use quill_types::{
    AccessControl, AccessDenied, Address, Amount, AppealId, CourtParams, DisputeId, Role,
    Timestamp, Treasury,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppealBoard {
    /// Appeal `n` lives at index `n - 1`.
    appeals: Vec<Appeal>,
    by_dispute: BTreeMap<DisputeId, Vec<AppealId>>,
    /// The single unprocessed appeal per dispute, if any.
    active: BTreeMap<DisputeId, AppealId>,
    appeal_fee: Amount,
    treasury: Treasury,
    roles: AccessControl,
    #[serde(skip)]
    pending_events: Vec<AppealEvent>,
}

impl AppealBoard {
    pub fn new(admin: Address, params: &CourtParams) -> Self {
        Self {
            appeals: Vec::new(),
            by_dispute: BTreeMap::new(),
            active: BTreeMap::new(),
            appeal_fee: params.appeal_fee,
            treasury: Treasury::new(),
            roles: AccessControl::with_admin(admin),
            pending_events: Vec::new(),
        }
    }

    /// Contest the ruling of `dispute_id`. Only its plaintiff or defendant may
    /// appeal, and only once the dispute has been ruled.
    pub fn file_appeal(
        &mut self,
        caller: &Address,
        disputes: &DisputeRegistry,
        dispute_id: DisputeId,
        reason: impl Into<String>,
        fee: Amount,
        now: Timestamp,
    ) -> Result<AppealId, AppealError> {
        let dispute = disputes
            .get_dispute(dispute_id)
            .map_err(|_| AppealError::DisputeNotFound(dispute_id))?;
        if !dispute.is_party(caller) {
            return Err(AccessDenied::NotParty {
                caller: caller.clone(),
            }
            .into());
        }
        let reason = reason.into();
        if reason.is_empty() {
            return Err(AppealError::ReasonRequired);
        }
        if fee < self.appeal_fee {
            debug!(%dispute_id, appellant = %caller, %fee, "appeal fee too low");
            return Err(AppealError::InsufficientFee {
                needed: self.appeal_fee,
                provided: fee,
            });
        }
        if !dispute.status.is_appealable() {
            return Err(AppealError::NotAppealable(dispute.status));
        }
        if self.active.contains_key(&dispute_id) {
            return Err(AppealError::ActiveAppealExists(dispute_id));
        }

        let id = AppealId::new(self.appeals.len() as u64 + 1);
        self.appeals.push(Appeal {
            id,
            dispute_id,
            appellant: caller.clone(),
            reason,
            fee_paid: fee,
            processed: false,
            accepted: false,
            filed_at: now,
            processed_at: None,
        });
        self.by_dispute.entry(dispute_id).or_default().push(id);
        self.active.insert(dispute_id, id);
        self.treasury.deposit(fee);

        info!(appeal_id = %id, %dispute_id, appellant = %caller, %fee, "appeal filed");
        self.pending_events.push(AppealEvent::AppealFiled {
            appeal_id: id,
            dispute_id,
            appellant: caller.clone(),
            fee,
            at: now,
        });
        Ok(id)
    }

    /// Record the arbitrators' decision. This does not reopen voting; acting
    /// on an accepted appeal is the caller's business.
    pub fn process_appeal(
        &mut self,
        caller: &Address,
        appeal_id: AppealId,
        accepted: bool,
        now: Timestamp,
    ) -> Result<(), AppealError> {
        self.roles.require(caller, Role::Arbitrator)?;
        let appeal = appeal_id
            .is_valid()
            .then(|| appeal_id.get() as usize - 1)
            .and_then(|idx| self.appeals.get_mut(idx))
            .ok_or(AppealError::NotFound(appeal_id))?;
        if appeal.processed {
            return Err(AppealError::AlreadyProcessed(appeal_id));
        }
        appeal.processed = true;
        appeal.accepted = accepted;
        appeal.processed_at = Some(now);
        let dispute_id = appeal.dispute_id;
        self.active.remove(&dispute_id);

        info!(%appeal_id, %dispute_id, accepted, arbitrator = %caller, "appeal processed");
        self.pending_events.push(AppealEvent::AppealProcessed {
            appeal_id,
            dispute_id,
            accepted,
            at: now,
        });
        Ok(())
    }

    /// Change the appeal fee. Admin only.
    pub fn set_appeal_fee(&mut self, caller: &Address, fee: Amount) -> Result<(), AppealError> {
        self.roles.require(caller, Role::Admin)?;
        let old = self.appeal_fee;
        self.appeal_fee = fee;
        info!(%old, new = %fee, "appeal fee changed");
        self.pending_events
            .push(AppealEvent::AppealFeeChanged { old, new: fee });
        Ok(())
    }

    /// Drain the treasury to the calling admin.
    pub fn withdraw_fees(&mut self, caller: &Address) -> Result<Amount, AppealError> {
        self.roles.require(caller, Role::Admin)?;
        let amount = self.treasury.drain();
        info!(to = %caller, %amount, "appeal fees withdrawn");
        self.pending_events.push(AppealEvent::FeesWithdrawn {
            to: caller.clone(),
            amount,
        });
        Ok(amount)
    }

    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: Address,
    ) -> Result<bool, AppealError> {
        Ok(self.roles.grant(caller, role, grantee)?)
    }

    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: &Address,
    ) -> Result<bool, AppealError> {
        Ok(self.roles.revoke(caller, role, grantee)?)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn get_appeal(&self, appeal_id: AppealId) -> Result<&Appeal, AppealError> {
        appeal_id
            .is_valid()
            .then(|| appeal_id.get() as usize - 1)
            .and_then(|idx| self.appeals.get(idx))
            .ok_or(AppealError::NotFound(appeal_id))
    }

    /// Whether appeal `appeal_id` exists and has not been processed yet.
    pub fn is_appeal_pending(&self, appeal_id: AppealId) -> bool {
        self.get_appeal(appeal_id)
            .map(Appeal::is_pending)
            .unwrap_or(false)
    }

    pub fn active_appeal(&self, dispute_id: DisputeId) -> Option<AppealId> {
        self.active.get(&dispute_id).copied()
    }

    /// Every appeal filed against `dispute_id`, oldest first.
    pub fn dispute_appeals(&self, dispute_id: DisputeId) -> &[AppealId] {
        self.by_dispute
            .get(&dispute_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_appeals(&self) -> u64 {
        self.appeals.len() as u64
    }

    pub fn appeal_fee(&self) -> Amount {
        self.appeal_fee
    }

    pub fn treasury(&self) -> &Treasury {
        &self.treasury
    }

    pub fn roles(&self) -> &AccessControl {
        &self.roles
    }

    pub fn drain_events(&mut self) -> Vec<AppealEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
