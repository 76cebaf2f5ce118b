//! The dispute registry: every dispute record plus the dispute-fee treasury.

use crate::dispute::{Dispute, DisputeFiling, DisputeStatus};
use crate::error::DisputeError;
use crate::event::DisputeEvent;
use quill_types::{
    AccessControl, AccessDenied, Address, Amount, CourtParams, DisputeId, Role, Timestamp,
    Treasury,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// The dispute registry.
///
/// Records live in an arena indexed by identifier: dispute `n` is stored at
/// position `n - 1`, so identifiers are dense and strictly increasing from 1.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisputeRegistry {
    disputes: Vec<Dispute>,
    /// Disputes each address is a party to, in filing order.
    by_party: HashMap<Address, Vec<DisputeId>>,
    dispute_fee: Amount,
    treasury: Treasury,
    roles: AccessControl,
    #[serde(skip)]
    pending_events: Vec<DisputeEvent>,
}

impl DisputeRegistry {
    pub fn new(admin: Address, params: &CourtParams) -> Self {
        Self {
            disputes: Vec::new(),
            by_party: HashMap::new(),
            dispute_fee: params.dispute_fee,
            treasury: Treasury::new(),
            roles: AccessControl::with_admin(admin),
            pending_events: Vec::new(),
        }
    }

    /// File a new dispute with `caller` as plaintiff.
    ///
    /// The whole attached `fee` goes to the treasury.
    pub fn file_dispute(
        &mut self,
        caller: &Address,
        filing: DisputeFiling,
        fee: Amount,
        now: Timestamp,
    ) -> Result<DisputeId, DisputeError> {
        if caller == &filing.defendant {
            debug!(plaintiff = %caller, "self-dispute rejected");
            return Err(DisputeError::InvalidParty);
        }
        if filing.metadata_ref.is_empty() {
            return Err(DisputeError::MetadataRequired);
        }
        if fee < self.dispute_fee {
            debug!(plaintiff = %caller, %fee, needed = %self.dispute_fee, "dispute fee too low");
            return Err(DisputeError::InsufficientFee {
                needed: self.dispute_fee,
                provided: fee,
            });
        }

        let id = DisputeId::new(self.disputes.len() as u64 + 1);
        let dispute = Dispute {
            id,
            plaintiff: caller.clone(),
            defendant: filing.defendant,
            metadata_ref: filing.metadata_ref,
            escrow_ref: filing.escrow_ref,
            escrow_amount: filing.escrow_amount,
            status: DisputeStatus::Filed,
            filed_at: now,
            updated_at: now,
        };
        self.treasury.deposit(fee);
        self.by_party
            .entry(dispute.plaintiff.clone())
            .or_default()
            .push(id);
        self.by_party
            .entry(dispute.defendant.clone())
            .or_default()
            .push(id);

        info!(
            dispute_id = %id,
            plaintiff = %dispute.plaintiff,
            defendant = %dispute.defendant,
            %fee,
            "dispute filed"
        );
        self.pending_events.push(DisputeEvent::DisputeFiled {
            dispute_id: id,
            plaintiff: dispute.plaintiff.clone(),
            defendant: dispute.defendant.clone(),
            metadata_ref: dispute.metadata_ref.clone(),
            at: now,
        });
        self.disputes.push(dispute);
        Ok(id)
    }

    /// Move a dispute to `new_status`. System role only.
    pub fn update_status(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        new_status: DisputeStatus,
        now: Timestamp,
    ) -> Result<(), DisputeError> {
        self.roles.require(caller, Role::System)?;
        let dispute = self.get_mut(dispute_id)?;
        let old = dispute.status;
        if !old.can_transition_to(new_status) {
            debug!(%dispute_id, from = ?old, to = ?new_status, "transition rejected");
            return Err(DisputeError::InvalidTransition {
                from: old,
                to: new_status,
            });
        }
        dispute.status = new_status;
        dispute.updated_at = now;

        info!(%dispute_id, from = ?old, to = ?new_status, "dispute status changed");
        self.pending_events.push(DisputeEvent::DisputeStatusChanged {
            dispute_id,
            old,
            new: new_status,
            at: now,
        });
        Ok(())
    }

    /// Settle a dispute early. Either party may call this.
    pub fn close_dispute(
        &mut self,
        caller: &Address,
        dispute_id: DisputeId,
        now: Timestamp,
    ) -> Result<(), DisputeError> {
        let dispute = self.get_mut(dispute_id)?;
        if !dispute.is_party(caller) {
            return Err(AccessDenied::NotParty {
                caller: caller.clone(),
            }
            .into());
        }
        let old = dispute.status;
        if !old.party_may_close() {
            return Err(DisputeError::InvalidTransition {
                from: old,
                to: DisputeStatus::Closed,
            });
        }
        dispute.status = DisputeStatus::Closed;
        dispute.updated_at = now;

        info!(%dispute_id, closed_by = %caller, from = ?old, "dispute closed by party");
        self.pending_events.push(DisputeEvent::DisputeStatusChanged {
            dispute_id,
            old,
            new: DisputeStatus::Closed,
            at: now,
        });
        self.pending_events.push(DisputeEvent::DisputeClosed {
            dispute_id,
            closed_by: caller.clone(),
            at: now,
        });
        Ok(())
    }

    /// Change the filing fee. Admin only.
    pub fn set_dispute_fee(&mut self, caller: &Address, fee: Amount) -> Result<(), DisputeError> {
        self.roles.require(caller, Role::Admin)?;
        let old = self.dispute_fee;
        self.dispute_fee = fee;
        info!(%old, new = %fee, "dispute fee changed");
        self.pending_events
            .push(DisputeEvent::DisputeFeeChanged { old, new: fee });
        Ok(())
    }

    /// Drain the treasury to the calling admin. Returns the amount paid out.
    pub fn withdraw_fees(&mut self, caller: &Address) -> Result<Amount, DisputeError> {
        self.roles.require(caller, Role::Admin)?;
        let amount = self.treasury.drain();
        info!(to = %caller, %amount, "dispute fees withdrawn");
        self.pending_events.push(DisputeEvent::FeesWithdrawn {
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
    ) -> Result<bool, DisputeError> {
        Ok(self.roles.grant(caller, role, grantee)?)
    }

    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: &Address,
    ) -> Result<bool, DisputeError> {
        Ok(self.roles.revoke(caller, role, grantee)?)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn get_dispute(&self, dispute_id: DisputeId) -> Result<&Dispute, DisputeError> {
        self.index(dispute_id)
            .and_then(|idx| self.disputes.get(idx))
            .ok_or(DisputeError::NotFound(dispute_id))
    }

    pub fn total_disputes(&self) -> u64 {
        self.disputes.len() as u64
    }

    /// Whether `who` is the plaintiff or defendant of the dispute.
    pub fn is_party(&self, dispute_id: DisputeId, who: &Address) -> Result<bool, DisputeError> {
        Ok(self.get_dispute(dispute_id)?.is_party(who))
    }

    /// Disputes `who` is a party to, in filing order.
    pub fn disputes_of(&self, who: &Address) -> &[DisputeId] {
        self.by_party.get(who).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dispute_fee(&self) -> Amount {
        self.dispute_fee
    }

    pub fn treasury(&self) -> &Treasury {
        &self.treasury
    }

    pub fn roles(&self) -> &AccessControl {
        &self.roles
    }

    /// Take the events appended since the last drain.
    pub fn drain_events(&mut self) -> Vec<DisputeEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn index(&self, dispute_id: DisputeId) -> Option<usize> {
        dispute_id
            .is_valid()
            .then(|| dispute_id.get() as usize - 1)
    }

    fn get_mut(&mut self, dispute_id: DisputeId) -> Result<&mut Dispute, DisputeError> {
        self.index(dispute_id)
            .and_then(|idx| self.disputes.get_mut(idx))
            .ok_or(DisputeError::NotFound(dispute_id))
    }
}
