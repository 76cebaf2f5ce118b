//! Per-dispute voting session state.

use crate::verdict::Verdict;
use quill_types::{Address, DisputeId, Hash256, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The state of one dispute's vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingSession {
    pub dispute_id: DisputeId,
    /// The frozen jury, in selection order.
    pub jurors: Vec<Address>,
    /// Commitments received so far.
    pub commits: BTreeMap<Address, Hash256>,
    /// Verdicts disclosed so far.
    pub reveals: BTreeMap<Address, Verdict>,
    /// First instant at which commits are refused and reveals accepted.
    pub commit_deadline: Timestamp,
    /// First instant at which reveals are refused and finalization allowed.
    pub reveal_deadline: Timestamp,
    pub finalized: bool,
    pub final_verdict: Verdict,
    pub plaintiff_votes: u32,
    pub defendant_votes: u32,
    pub invalid_votes: u32,
}

/// Where a session stands at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotingPhase {
    CommitOpen,
    RevealOpen,
    /// Reveal window over, nobody has finalized yet.
    AwaitingFinalization,
    Finalized,
}

/// Tally of a session. `verdict` stays `Undecided` until finalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingResult {
    pub verdict: Verdict,
    pub plaintiff_votes: u32,
    pub defendant_votes: u32,
    pub invalid_votes: u32,
    pub finalized: bool,
}

impl VotingSession {
    pub(crate) fn new(
        dispute_id: DisputeId,
        jurors: Vec<Address>,
        commit_deadline: Timestamp,
        reveal_deadline: Timestamp,
    ) -> Self {
        Self {
            dispute_id,
            jurors,
            commits: BTreeMap::new(),
            reveals: BTreeMap::new(),
            commit_deadline,
            reveal_deadline,
            finalized: false,
            final_verdict: Verdict::Undecided,
            plaintiff_votes: 0,
            defendant_votes: 0,
            invalid_votes: 0,
        }
    }

    pub fn is_juror(&self, who: &Address) -> bool {
        self.jurors.contains(who)
    }

    pub fn phase(&self, now: Timestamp) -> VotingPhase {
        if self.finalized {
            VotingPhase::Finalized
        } else if now < self.commit_deadline {
            VotingPhase::CommitOpen
        } else if now < self.reveal_deadline {
            VotingPhase::RevealOpen
        } else {
            VotingPhase::AwaitingFinalization
        }
    }

    pub fn result(&self) -> VotingResult {
        VotingResult {
            verdict: self.final_verdict,
            plaintiff_votes: self.plaintiff_votes,
            defendant_votes: self.defendant_votes,
            invalid_votes: self.invalid_votes,
            finalized: self.finalized,
        }
    }

    pub(crate) fn record_reveal(&mut self, juror: Address, verdict: Verdict) {
        match verdict {
            Verdict::PlaintiffWins => self.plaintiff_votes += 1,
            Verdict::DefendantWins => self.defendant_votes += 1,
            Verdict::Invalid => self.invalid_votes += 1,
            Verdict::Undecided => return,
        }
        self.reveals.insert(juror, verdict);
    }

    /// The majority over revealed votes. A side wins only by strictly beating
    /// both other tallies; anything else, including no reveals, is `Invalid`.
    pub fn tally(&self) -> Verdict {
        let (p, d, i) = (self.plaintiff_votes, self.defendant_votes, self.invalid_votes);
        if p > d && p > i {
            Verdict::PlaintiffWins
        } else if d > p && d > i {
            Verdict::DefendantWins
        } else {
            Verdict::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> VotingSession {
        VotingSession::new(
            DisputeId::FIRST,
            vec![Address::new("a"), Address::new("b"), Address::new("c")],
            Timestamp::new(100),
            Timestamp::new(200),
        )
    }

    fn with_votes(p: u32, d: u32, i: u32) -> VotingSession {
        let mut s = session();
        s.plaintiff_votes = p;
        s.defendant_votes = d;
        s.invalid_votes = i;
        s
    }

    #[test]
    fn phase_follows_deadlines() {
        let mut s = session();
        assert_eq!(s.phase(Timestamp::new(99)), VotingPhase::CommitOpen);
        assert_eq!(s.phase(Timestamp::new(100)), VotingPhase::RevealOpen);
        assert_eq!(s.phase(Timestamp::new(199)), VotingPhase::RevealOpen);
        assert_eq!(s.phase(Timestamp::new(200)), VotingPhase::AwaitingFinalization);
        s.finalized = true;
        assert_eq!(s.phase(Timestamp::new(0)), VotingPhase::Finalized);
    }

    #[test]
    fn strict_majority_wins() {
        assert_eq!(with_votes(2, 1, 0).tally(), Verdict::PlaintiffWins);
        assert_eq!(with_votes(0, 3, 2).tally(), Verdict::DefendantWins);
    }

    #[test]
    fn ties_and_silence_are_invalid() {
        assert_eq!(with_votes(0, 0, 0).tally(), Verdict::Invalid);
        assert_eq!(with_votes(2, 2, 0).tally(), Verdict::Invalid);
        assert_eq!(with_votes(2, 0, 2).tally(), Verdict::Invalid);
        assert_eq!(with_votes(1, 1, 3).tally(), Verdict::Invalid);
    }

    #[test]
    fn reveal_increments_matching_tally() {
        let mut s = session();
        s.record_reveal(Address::new("a"), Verdict::DefendantWins);
        s.record_reveal(Address::new("b"), Verdict::Invalid);
        assert_eq!((s.plaintiff_votes, s.defendant_votes, s.invalid_votes), (0, 1, 1));
        assert_eq!(s.reveals.len(), 2);
    }
}
