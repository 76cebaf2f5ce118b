//! Record identifiers.
//!
//! Each registry allocates its identifiers sequentially starting at 1.
//! Identifier 0 is reserved and never refers to a record.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            /// The first identifier a registry hands out.
            pub const FIRST: Self = Self(1);

            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub fn get(&self) -> u64 {
                self.0
            }

            /// Identifier 0 never names a record.
            pub fn is_valid(&self) -> bool {
                self.0 != 0
            }

            /// The identifier allocated after this one.
            pub fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

record_id!(
    /// Identifier of a dispute in the dispute registry.
    DisputeId,
    "dispute"
);
record_id!(
    /// Identifier of an appeal on the appeal board.
    AppealId,
    "appeal"
);
record_id!(
    /// Identifier of an evidence record in the evidence vault.
    EvidenceId,
    "evidence"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_never_valid() {
        assert!(!DisputeId::new(0).is_valid());
        assert!(DisputeId::FIRST.is_valid());
        assert_eq!(AppealId::FIRST.next().get(), 2);
    }

    #[test]
    fn display_names_the_record_kind() {
        assert_eq!(DisputeId::new(7).to_string(), "dispute#7");
        assert_eq!(EvidenceId::new(2).to_string(), "evidence#2");
    }
}
