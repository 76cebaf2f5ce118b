//! Dispute records and the lifecycle transition table.

use quill_types::{Address, Amount, DisputeId, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a dispute.
///
/// The discriminants are the stable wire codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisputeStatus {
    /// Filed, awaiting evidence collection.
    Filed = 0,
    /// Parties are submitting evidence.
    EvidencePending = 1,
    /// A jury is voting.
    VotingInProgress = 2,
    /// The jury's verdict is in.
    Ruled = 3,
    /// A party contested the ruling; the appeal board is deciding.
    Appealed = 4,
    /// The ruling has been carried out.
    Executed = 5,
    /// Terminal. No further changes.
    Closed = 6,
}

impl DisputeStatus {
    pub const ALL: [DisputeStatus; 7] = [
        DisputeStatus::Filed,
        DisputeStatus::EvidencePending,
        DisputeStatus::VotingInProgress,
        DisputeStatus::Ruled,
        DisputeStatus::Appealed,
        DisputeStatus::Executed,
        DisputeStatus::Closed,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn is_terminal(self) -> bool {
        self == DisputeStatus::Closed
    }

    /// The closed set of successors the system role may move a dispute to.
    ///
    /// Nothing may be skipped and nothing reversed, except that an accepted
    /// appeal reopens voting (`Appealed → VotingInProgress`).
    pub fn successors(self) -> &'static [DisputeStatus] {
        use DisputeStatus::*;
        match self {
            Filed => &[EvidencePending, Closed],
            EvidencePending => &[VotingInProgress, Closed],
            VotingInProgress => &[Ruled, Closed],
            Ruled => &[Appealed, Executed, Closed],
            Appealed => &[VotingInProgress, Executed],
            Executed => &[Appealed, Closed],
            Closed => &[],
        }
    }

    pub fn can_transition_to(self, next: DisputeStatus) -> bool {
        self.successors().contains(&next)
    }

    /// Whether a party may settle (close) the dispute from this status.
    ///
    /// A pending appeal has to be decided first.
    pub fn party_may_close(self) -> bool {
        !matches!(self, DisputeStatus::Closed | DisputeStatus::Appealed)
    }

    /// Whether a ruling exists that a party could contest.
    pub fn is_appealable(self) -> bool {
        matches!(self, DisputeStatus::Ruled | DisputeStatus::Executed)
    }
}

/// What a plaintiff submits when filing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeFiling {
    pub defendant: Address,
    /// Content identifier of the off-core dispute description.
    pub metadata_ref: String,
    /// Escrow contract holding the disputed funds, if any.
    pub escrow_ref: Option<Address>,
    pub escrow_amount: Amount,
}

impl DisputeFiling {
    pub fn new(defendant: Address, metadata_ref: impl Into<String>) -> Self {
        Self {
            defendant,
            metadata_ref: metadata_ref.into(),
            escrow_ref: None,
            escrow_amount: Amount::ZERO,
        }
    }

    pub fn with_escrow(mut self, escrow_ref: Option<Address>, escrow_amount: Amount) -> Self {
        self.escrow_ref = escrow_ref;
        self.escrow_amount = escrow_amount;
        self
    }
}

/// A filed dispute. Everything but `status` and `updated_at` is fixed at filing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispute {
    pub id: DisputeId,
    pub plaintiff: Address,
    pub defendant: Address,
    pub metadata_ref: String,
    pub escrow_ref: Option<Address>,
    pub escrow_amount: Amount,
    pub status: DisputeStatus,
    pub filed_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dispute {
    pub fn is_party(&self, who: &Address) -> bool {
        &self.plaintiff == who || &self.defendant == who
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DisputeStatus::*;

    #[test]
    fn codes_round_trip() {
        for status in DisputeStatus::ALL {
            assert_eq!(DisputeStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(DisputeStatus::from_code(7), None);
        assert_eq!(Executed.code(), 5);
    }

    #[test]
    fn happy_path_is_permitted() {
        let path = [Filed, EvidencePending, VotingInProgress, Ruled, Executed, Closed];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{:?}", pair);
        }
    }

    #[test]
    fn appeal_reopens_voting_only() {
        assert!(Ruled.can_transition_to(Appealed));
        assert!(Appealed.can_transition_to(VotingInProgress));
        assert!(!Appealed.can_transition_to(Filed));
        assert!(!Appealed.can_transition_to(Ruled));
    }

    #[test]
    fn no_skips_or_reversals() {
        assert!(!Filed.can_transition_to(VotingInProgress));
        assert!(!Filed.can_transition_to(Executed));
        assert!(!Ruled.can_transition_to(VotingInProgress));
        assert!(!Executed.can_transition_to(Ruled));
        assert!(!Filed.can_transition_to(Filed));
    }

    #[test]
    fn closed_is_terminal() {
        assert!(Closed.successors().is_empty());
        assert!(Closed.is_terminal());
        assert!(!Closed.party_may_close());
    }

    #[test]
    fn party_close_blocked_while_appealed() {
        assert!(!Appealed.party_may_close());
        assert!(VotingInProgress.party_may_close());
        assert!(Filed.party_may_close());
    }
}
