//! Jury verdicts.

use quill_crypto::{vote_commitment, Salt};
use quill_types::Hash256;
use serde::{Deserialize, Serialize};

/// A jury verdict. The discriminants are the codes bound into commitments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// No verdict yet.
    #[default]
    Undecided = 0,
    PlaintiffWins = 1,
    DefendantWins = 2,
    /// The dispute is void, or the jury could not decide.
    Invalid = 3,
}

impl Verdict {
    pub const ALL: [Verdict; 4] = [
        Verdict::Undecided,
        Verdict::PlaintiffWins,
        Verdict::DefendantWins,
        Verdict::Invalid,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Whether a juror may vote this way. `Undecided` is never a vote.
    pub fn is_decided(self) -> bool {
        self != Verdict::Undecided
    }

    /// The commitment a juror publishes for this verdict.
    pub fn commitment(self, salt: &Salt) -> Hash256 {
        vote_commitment(self.code(), salt)
    }
}
