//! The stake ledger: juror records plus the active-juror set.

use crate::error::StakeError;
use crate::event::StakeEvent;
use crate::juror::{penalize, reward, JurorRecord};
use quill_types::{AccessControl, Address, Amount, CourtParams, Role, Timestamp};
use quill_utils::format_duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// The stake ledger: juror deposits, withdrawals, slashing and reputation.
///
/// Every operation checks all of its preconditions before the first write, so a
/// rejected call leaves the ledger untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakeLedger {
    jurors: HashMap<Address, JurorRecord>,
    /// Active jurors. Removal swaps the last entry into the vacated slot.
    active: Vec<Address>,
    /// Position of each active juror in `active`.
    active_index: HashMap<Address, usize>,
    min_stake: Amount,
    lock_period_secs: u64,
    reputation_floor: u64,
    total_staked: Amount,
    total_burned: Amount,
    roles: AccessControl,
    #[serde(skip)]
    pending_events: Vec<StakeEvent>,
}

impl StakeLedger {
    pub fn new(admin: Address, params: &CourtParams) -> Self {
        Self {
            jurors: HashMap::new(),
            active: Vec::new(),
            active_index: HashMap::new(),
            min_stake: params.min_stake,
            lock_period_secs: params.lock_period_secs,
            reputation_floor: params.reputation_floor,
            total_staked: Amount::ZERO,
            total_burned: Amount::ZERO,
            roles: AccessControl::with_admin(admin),
            pending_events: Vec::new(),
        }
    }

    /// Deposit `amount` as stake for `caller`.
    ///
    /// A juror's first deposit must meet the minimum stake on its own; later
    /// top-ups may be any non-zero amount. Every deposit restarts the lock
    /// period for the whole balance.
    pub fn stake(
        &mut self,
        caller: &Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Amount, StakeError> {
        if amount.is_zero() {
            return Err(StakeError::ZeroAmount);
        }
        let is_new = !self.jurors.contains_key(caller);
        if is_new && amount < self.min_stake {
            debug!(juror = %caller, %amount, min = %self.min_stake, "first stake below minimum");
            return Err(StakeError::InsufficientStake {
                requested: amount,
                available: self.min_stake,
            });
        }
        let current = self.jurors.get(caller).map_or(Amount::ZERO, |j| j.staked);
        let total = current.checked_add(amount).ok_or(StakeError::Overflow)?;
        let ledger_total = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;

        let juror = self
            .jurors
            .entry(caller.clone())
            .or_insert_with(|| JurorRecord::new(now));
        juror.staked = total;
        juror.staked_at = now;
        self.total_staked = ledger_total;

        info!(juror = %caller, %amount, %total, new_juror = is_new, "juror staked");
        self.pending_events.push(StakeEvent::JurorStaked {
            juror: caller.clone(),
            amount,
            total_staked: total,
            at: now,
        });
        self.refresh_active(caller);
        Ok(total)
    }

    /// Withdraw `amount` of `caller`'s stake, returning the amount paid out.
    pub fn withdraw(
        &mut self,
        caller: &Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Amount, StakeError> {
        let juror = self
            .jurors
            .get(caller)
            .ok_or_else(|| StakeError::NotFound(caller.clone()))?;
        if !juror.staked_at.has_expired(self.lock_period_secs, now) {
            let unlock_at = juror.staked_at.plus(self.lock_period_secs);
            debug!(
                juror = %caller,
                remaining = %format_duration(now.elapsed_since(unlock_at)),
                "withdrawal rejected: lock period active"
            );
            return Err(StakeError::LockPeriodActive { unlock_at });
        }
        if amount.is_zero() {
            return Err(StakeError::ZeroAmount);
        }
        if amount > juror.staked {
            return Err(StakeError::InsufficientStake {
                requested: amount,
                available: juror.staked,
            });
        }

        let remaining = juror.staked - amount;
        if let Some(juror) = self.jurors.get_mut(caller) {
            juror.staked = remaining;
        }
        self.total_staked = self.total_staked.saturating_sub(amount);

        info!(juror = %caller, %amount, %remaining, "juror withdrew stake");
        self.pending_events.push(StakeEvent::JurorWithdrawn {
            juror: caller.clone(),
            amount,
            remaining,
            at: now,
        });
        self.refresh_active(caller);
        Ok(amount)
    }

    /// Forfeit up to `amount` of `juror`'s stake. System role only.
    ///
    /// The balance saturates at zero. Returns the amount actually removed,
    /// which is burned rather than paid to anyone.
    pub fn slash(
        &mut self,
        caller: &Address,
        juror: &Address,
        amount: Amount,
        now: Timestamp,
    ) -> Result<Amount, StakeError> {
        self.roles.require(caller, Role::System)?;
        if amount.is_zero() {
            return Err(StakeError::ZeroAmount);
        }
        let record = self
            .jurors
            .get_mut(juror)
            .ok_or_else(|| StakeError::NotFound(juror.clone()))?;

        let removed = amount.min(record.staked);
        record.staked = record.staked.saturating_sub(amount);
        let remaining = record.staked;
        self.total_staked = self.total_staked.saturating_sub(removed);
        self.total_burned = self.total_burned.saturating_add(removed);

        warn!(%juror, requested = %amount, %removed, %remaining, "juror slashed");
        self.pending_events.push(StakeEvent::JurorSlashed {
            juror: juror.clone(),
            amount: removed,
            remaining,
            at: now,
        });
        self.refresh_active(juror);
        Ok(removed)
    }

    /// Apply a ruling outcome to `juror`'s reputation. System role only.
    ///
    /// Correct votes multiply reputation by 1.05 (capped at 1000) and count toward
    /// both counters; incorrect votes multiply by 0.90 (floored) and count only
    /// toward the total.
    pub fn update_reputation(
        &mut self,
        caller: &Address,
        juror: &Address,
        was_correct: bool,
    ) -> Result<u64, StakeError> {
        self.roles.require(caller, Role::System)?;
        let floor = self.reputation_floor;
        let record = self
            .jurors
            .get_mut(juror)
            .ok_or_else(|| StakeError::NotFound(juror.clone()))?;

        let old = record.reputation;
        record.reputation = if was_correct {
            record.correct_votes += 1;
            reward(old)
        } else {
            penalize(old, floor)
        };
        record.total_votes += 1;
        let new = record.reputation;

        debug!(%juror, old, new, was_correct, "reputation updated");
        self.pending_events.push(StakeEvent::ReputationUpdated {
            juror: juror.clone(),
            old,
            new,
            was_correct,
        });
        Ok(new)
    }

    /// Change the minimum stake. Admin only.
    ///
    /// Every juror's active flag is re-evaluated against the new minimum, in
    /// address order so the resulting event sequence is deterministic.
    pub fn set_min_stake(&mut self, caller: &Address, min_stake: Amount) -> Result<(), StakeError> {
        self.roles.require(caller, Role::Admin)?;
        let old = self.min_stake;
        self.min_stake = min_stake;
        self.pending_events.push(StakeEvent::MinStakeChanged {
            old,
            new: min_stake,
        });
        let mut jurors: Vec<Address> = self.jurors.keys().cloned().collect();
        jurors.sort();
        for juror in &jurors {
            self.refresh_active(juror);
        }
        info!(%old, new = %min_stake, "minimum stake changed");
        Ok(())
    }

    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: Address,
    ) -> Result<bool, StakeError> {
        Ok(self.roles.grant(caller, role, grantee)?)
    }

    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: &Address,
    ) -> Result<bool, StakeError> {
        Ok(self.roles.revoke(caller, role, grantee)?)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    /// Whether `juror` may serve: its stake currently meets the minimum.
    pub fn is_eligible_juror(&self, juror: &Address) -> bool {
        self.jurors.get(juror).is_some_and(|j| j.active)
    }

    /// The current active set, for the juror-selection service.
    pub fn active_jurors(&self) -> &[Address] {
        &self.active
    }

    pub fn get_juror(&self, juror: &Address) -> Result<&JurorRecord, StakeError> {
        self.jurors
            .get(juror)
            .ok_or_else(|| StakeError::NotFound(juror.clone()))
    }

    /// When `juror`'s stake becomes withdrawable.
    pub fn unlock_at(&self, juror: &Address) -> Result<Timestamp, StakeError> {
        Ok(self.get_juror(juror)?.staked_at.plus(self.lock_period_secs))
    }

    pub fn juror_count(&self) -> usize {
        self.jurors.len()
    }

    pub fn total_staked(&self) -> Amount {
        self.total_staked
    }

    pub fn total_burned(&self) -> Amount {
        self.total_burned
    }

    pub fn min_stake(&self) -> Amount {
        self.min_stake
    }

    pub fn roles(&self) -> &AccessControl {
        &self.roles
    }

    /// Take the events appended since the last drain.
    pub fn drain_events(&mut self) -> Vec<StakeEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Active set maintenance ─────────────────────────────────────────

    /// Bring `juror`'s active flag and set membership in line with its stake.
    fn refresh_active(&mut self, juror: &Address) {
        let min_stake = self.min_stake;
        let Some(record) = self.jurors.get_mut(juror) else {
            return;
        };
        let should_be_active = record.staked >= min_stake;
        if record.active == should_be_active {
            return;
        }
        record.active = should_be_active;
        if should_be_active {
            self.active_index.insert(juror.clone(), self.active.len());
            self.active.push(juror.clone());
            info!(%juror, "juror activated");
            self.pending_events.push(StakeEvent::JurorActivated {
                juror: juror.clone(),
            });
        } else {
            if let Some(idx) = self.active_index.remove(juror) {
                self.active.swap_remove(idx);
                if let Some(moved) = self.active.get(idx) {
                    self.active_index.insert(moved.clone(), idx);
                }
            }
            info!(%juror, "juror deactivated");
            self.pending_events.push(StakeEvent::JurorDeactivated {
                juror: juror.clone(),
            });
        }
    }
}
