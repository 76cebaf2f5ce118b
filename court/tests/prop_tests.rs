use proptest::prelude::*;

use quill_court::Court;
use quill_disputes::{DisputeFiling, DisputeStatus};
use quill_nullables::NullClock;
use quill_types::{Address, Amount, CourtParams, DisputeId, Role, DAY_SECS};

#[derive(Clone, Debug)]
enum Op {
    Stake { who: usize, tenths: u128 },
    Withdraw { who: usize, tenths: u128 },
    File { who: usize, against: usize, hundredths: u128 },
    Advance { status: u8, dispute: u64 },
    Close { who: usize, dispute: u64 },
    Wait { days: u64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4, 0u128..20).prop_map(|(who, tenths)| Op::Stake { who, tenths }),
        (0usize..4, 0u128..20).prop_map(|(who, tenths)| Op::Withdraw { who, tenths }),
        (0usize..4, 0usize..4, 0u128..3)
            .prop_map(|(who, against, hundredths)| Op::File { who, against, hundredths }),
        (0u8..7, 1u64..4).prop_map(|(status, dispute)| Op::Advance { status, dispute }),
        (0usize..4, 1u64..4).prop_map(|(who, dispute)| Op::Close { who, dispute }),
        (0u64..40).prop_map(|days| Op::Wait { days }),
    ]
}

fn user(i: usize) -> Address {
    Address::new(format!("user{i}"))
}

proptest! {
    /// Successful operations append a contiguous run of records; failed ones
    /// append nothing.
    #[test]
    fn log_grows_only_on_success(ops in prop::collection::vec(op_strategy(), 1..50)) {
        let clock = NullClock::new(1_000);
        let admin = Address::new("admin");
        let system = Address::new("system");
        let mut court = Court::new(admin.clone(), CourtParams::default(), Box::new(clock.clone()));
        court.grant_role(&admin, Role::System, system.clone()).unwrap();
        let tenth = Amount::from_fraction(1, 10).raw();
        let hundredth = Amount::from_fraction(1, 100).raw();

        for op in ops {
            let before = court.events().last_seq();
            let ok = match op {
                Op::Stake { who, tenths } => court.stake(&user(who), Amount::new(tenths * tenth)).is_ok(),
                Op::Withdraw { who, tenths } => court.withdraw(&user(who), Amount::new(tenths * tenth)).is_ok(),
                Op::File { who, against, hundredths } => court
                    .file_dispute(
                        &user(who),
                        DisputeFiling::new(user(against), "QmMeta"),
                        Amount::new(hundredths * hundredth),
                    )
                    .is_ok(),
                Op::Advance { status, dispute } => court
                    .update_status(
                        &system,
                        DisputeId::new(dispute),
                        DisputeStatus::from_code(status).unwrap(),
                    )
                    .is_ok(),
                Op::Close { who, dispute } => court.close_dispute(&user(who), DisputeId::new(dispute)).is_ok(),
                Op::Wait { days } => {
                    clock.advance(days * DAY_SECS);
                    true
                }
            };
            let after = court.events().last_seq();
            if ok {
                prop_assert!(after >= before);
            } else {
                prop_assert_eq!(after, before);
            }
            let seqs: Vec<u64> = court.events().records().iter().map(|r| r.seq).collect();
            prop_assert_eq!(seqs, (1..=after).collect::<Vec<_>>());
        }
    }
}
