//! Fee treasury shared by the dispute registry and the appeal board.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};

/// Accumulates received fees until an admin withdraws them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Treasury {
    balance: Amount,
    lifetime_collected: Amount,
}

impl Treasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a received fee.
    pub fn deposit(&mut self, fee: Amount) {
        self.balance = self.balance.saturating_add(fee);
        self.lifetime_collected = self.lifetime_collected.saturating_add(fee);
    }

    /// Drain the whole balance, leaving zero behind.
    pub fn drain(&mut self) -> Amount {
        std::mem::take(&mut self.balance)
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn lifetime_collected(&self) -> Amount {
        self.lifetime_collected
    }
}
