use proptest::prelude::*;

use quill_types::{Address, Amount, DisputeId, Hash256, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// has_expired agrees with manual arithmetic, including the exact boundary.
    #[test]
    fn timestamp_has_expired(base in 0u64..1_000_000, dur in 0u64..1_000_000, probe in 0u64..3_000_000) {
        let t = Timestamp::new(base);
        prop_assert_eq!(t.has_expired(dur, Timestamp::new(probe)), probe >= base + dur);
    }

    /// plus never wraps.
    #[test]
    fn timestamp_plus_saturates(base in 0u64..u64::MAX, add in 0u64..u64::MAX) {
        let t = Timestamp::new(base).plus(add);
        prop_assert_eq!(t.as_secs(), base.saturating_add(add));
    }

    /// Amount checked arithmetic agrees with u128 arithmetic.
    #[test]
    fn amount_checked_ops(a in 0u128..u128::MAX / 2, b in 0u128..u128::MAX / 2) {
        let x = Amount::new(a);
        let y = Amount::new(b);
        prop_assert_eq!(x.checked_add(y).map(|v| v.raw()), Some(a + b));
        prop_assert_eq!(x.checked_sub(y).map(|v| v.raw()), a.checked_sub(b));
        prop_assert_eq!(x.saturating_sub(y).raw(), a.saturating_sub(b));
    }

    /// Hash256 hex display parses back to the same digest.
    #[test]
    fn hash_hex_parses_back(bytes in prop::array::uniform32(0u8..)) {
        let h = Hash256::new(bytes);
        prop_assert_eq!(Hash256::from_hex(&h.to_string()), Some(h));
        prop_assert_eq!(h.is_zero(), bytes == [0u8; 32]);
    }

    /// Identifiers keep their value through bincode.
    #[test]
    fn dispute_id_bincode(raw in 0u64..u64::MAX) {
        let id = DisputeId::new(raw);
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: DisputeId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, id);
        prop_assert_eq!(decoded.is_valid(), raw != 0);
    }

    /// Addresses compare by their raw string.
    #[test]
    fn address_equality(a in "[a-z0-9]{1,12}", b in "[a-z0-9]{1,12}") {
        prop_assert_eq!(Address::new(a.clone()) == Address::new(b.clone()), a == b);
    }
}
