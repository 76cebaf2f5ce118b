use proptest::prelude::*;

use quill_stake::{StakeError, StakeLedger};
use quill_types::{Address, Amount, CourtParams, Role, Timestamp, DAY_SECS};

const LOCK: u64 = 30 * DAY_SECS;

#[derive(Clone, Debug)]
enum Op {
    Stake { juror: usize, amount: u128 },
    Withdraw { juror: usize, amount: u128, after: u64 },
    Slash { juror: usize, amount: u128 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let min = CourtParams::default().min_stake.raw();
    prop_oneof![
        (0usize..4, 1u128..(3 * min)).prop_map(|(juror, amount)| Op::Stake { juror, amount }),
        (0usize..4, 1u128..(3 * min), 0u64..(2 * LOCK))
            .prop_map(|(juror, amount, after)| Op::Withdraw { juror, amount, after }),
        (0usize..4, 1u128..(2 * min)).prop_map(|(juror, amount)| Op::Slash { juror, amount }),
    ]
}

fn juror(i: usize) -> Address {
    Address::new(format!("juror{i}"))
}

fn setup() -> StakeLedger {
    let owner = Address::new("owner");
    let mut ledger = StakeLedger::new(owner.clone(), &CourtParams::default());
    ledger
        .grant_role(&owner, Role::System, Address::new("system"))
        .unwrap();
    ledger
}

proptest! {
    /// Eligibility holds iff stake >= minimum after every operation, and the
    /// active set contains exactly the eligible jurors.
    #[test]
    fn eligibility_matches_stake(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut ledger = setup();
        let system = Address::new("system");
        let min = ledger.min_stake();
        let mut now = 0u64;

        for op in ops {
            now += 1;
            match op {
                Op::Stake { juror: j, amount } => {
                    let _ = ledger.stake(&juror(j), Amount::new(amount), Timestamp::new(now));
                }
                Op::Withdraw { juror: j, amount, after } => {
                    now += after;
                    let _ = ledger.withdraw(&juror(j), Amount::new(amount), Timestamp::new(now));
                }
                Op::Slash { juror: j, amount } => {
                    let _ = ledger.slash(&system, &juror(j), Amount::new(amount), Timestamp::new(now));
                }
            }

            for i in 0..4 {
                let who = juror(i);
                let expected = ledger.get_juror(&who).map(|r| r.staked >= min).unwrap_or(false);
                prop_assert_eq!(ledger.is_eligible_juror(&who), expected);
                prop_assert_eq!(ledger.active_jurors().contains(&who), expected);
            }
        }
    }

    /// Withdrawal inside the lock period fails with LockPeriodActive for any amount.
    #[test]
    fn withdraw_inside_lock_always_fails(
        staked_at in 0u64..1_000_000,
        offset in 0u64..LOCK,
        amount in 0u128..u128::MAX,
    ) {
        let mut ledger = setup();
        let who = juror(0);
        ledger.stake(&who, ledger.min_stake(), Timestamp::new(staked_at)).unwrap();
        let err = ledger
            .withdraw(&who, Amount::new(amount), Timestamp::new(staked_at + offset))
            .unwrap_err();
        let is_lock = matches!(err, StakeError::LockPeriodActive { .. });
        prop_assert!(is_lock);
    }

    /// Reputation stays within [floor, 1000] under any update sequence.
    #[test]
    fn reputation_stays_bounded(outcomes in prop::collection::vec(any::<bool>(), 1..200)) {
        let mut ledger = setup();
        let system = Address::new("system");
        let who = juror(0);
        ledger.stake(&who, ledger.min_stake(), Timestamp::EPOCH).unwrap();
        let floor = CourtParams::default().reputation_floor;

        for correct in outcomes {
            let rep = ledger.update_reputation(&system, &who, correct).unwrap();
            prop_assert!(rep >= floor);
            prop_assert!(rep <= CourtParams::MAX_REPUTATION);
        }
        let record = ledger.get_juror(&who).unwrap();
        prop_assert!(record.correct_votes <= record.total_votes);
    }

    /// Slashing never removes more than the juror holds, and everything removed is burned.
    #[test]
    fn slash_conserves_funds(stake_units in 1u128..50, slash_raw in 1u128..u128::MAX / 4) {
        let mut ledger = setup();
        let system = Address::new("system");
        let who = juror(0);
        let deposit = Amount::new(ledger.min_stake().raw() * stake_units);
        ledger.stake(&who, deposit, Timestamp::EPOCH).unwrap();

        let removed = ledger.slash(&system, &who, Amount::new(slash_raw), Timestamp::new(1)).unwrap();
        prop_assert!(removed <= deposit);
        prop_assert_eq!(ledger.total_burned(), removed);
        prop_assert_eq!(ledger.total_staked() + removed, deposit);
    }
}
