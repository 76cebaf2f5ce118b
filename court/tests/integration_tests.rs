//! Integration tests exercising the whole court:
//! staking → filing → evidence → jury selection → commit → reveal →
//! finalization → ruling → appeal, plus snapshots and concurrent callers.

use quill_court::{Court, CourtError, CourtEvent, CourtService, CourtSnapshot};
use quill_crypto::content_hash;
use quill_disputes::{DisputeError, DisputeEvent, DisputeFiling, DisputeStatus};
use quill_nullables::{NullClock, NullSelector};
use quill_stake::StakeError;
use quill_types::{Address, Amount, CourtParams, DisputeId, Role, DAY_SECS, UNIT};
use quill_voting::{Verdict, VotingError};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const T0: u64 = 1_700_000_000;

fn addr(s: &str) -> Address {
    Address::new(s)
}

fn admin() -> Address {
    addr("admin")
}

fn system() -> Address {
    addr("system")
}

fn salt(i: u8) -> [u8; 32] {
    [i; 32]
}

/// A court with system, arbitrator, and verifier roles handed out.
fn setup() -> (Court, NullClock) {
    let clock = NullClock::new(T0);
    let mut court = Court::new(admin(), CourtParams::default(), Box::new(clock.clone()));
    court.grant_role(&admin(), Role::System, system()).unwrap();
    court
        .grant_role(&admin(), Role::Arbitrator, addr("arbitrator"))
        .unwrap();
    court
        .grant_role(&admin(), Role::Verifier, addr("verifier"))
        .unwrap();
    (court, clock)
}

fn stake_jurors(court: &mut Court, n: usize) -> Vec<Address> {
    (0..n)
        .map(|i| {
            let juror = addr(&format!("juror{i}"));
            court.stake(&juror, Amount::new(UNIT)).unwrap();
            juror
        })
        .collect()
}

fn file(court: &mut Court) -> DisputeId {
    let filing = DisputeFiling::new(addr("defendant"), "QmTestDispute")
        .with_escrow(None, Amount::new(UNIT));
    court
        .file_dispute(&addr("plaintiff"), filing, CourtParams::default().dispute_fee)
        .unwrap()
}

/// File a dispute and bring it to voting with a three-juror session.
fn into_voting(court: &mut Court) -> (DisputeId, Vec<Address>) {
    stake_jurors(court, 3);
    let id = file(court);
    court
        .update_status(&system(), id, DisputeStatus::EvidencePending)
        .unwrap();
    court
        .update_status(&system(), id, DisputeStatus::VotingInProgress)
        .unwrap();
    let jury = court
        .select_jury(&system(), id, &NullSelector::PoolOrder, 3)
        .unwrap();
    (id, jury)
}

/// Commit, reveal, and finalize `votes` (one per juror), advancing the clock
/// through both windows.
fn vote(court: &mut Court, clock: &NullClock, id: DisputeId, jury: &[Address], votes: &[Verdict]) {
    for (i, (juror, verdict)) in jury.iter().zip(votes).enumerate() {
        court
            .commit_vote(juror, id, verdict.commitment(&salt(i as u8)))
            .unwrap();
    }
    clock.advance(3 * DAY_SECS);
    for (i, (juror, verdict)) in jury.iter().zip(votes).enumerate() {
        court.reveal_vote(juror, id, *verdict, &salt(i as u8)).unwrap();
    }
    clock.advance(2 * DAY_SECS);
    court.finalize_voting(id).unwrap();
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn full_dispute_lifecycle() {
    let (mut court, clock) = setup();
    let (id, jury) = into_voting(&mut court);
    assert_eq!(id, DisputeId::FIRST);
    assert_eq!(court.disputes().get_dispute(id).unwrap().plaintiff, addr("plaintiff"));

    let hash = content_hash(b"evidence data");
    let evidence_id = court
        .submit_evidence(&addr("plaintiff"), id, hash, "QmEvidenceCID")
        .unwrap();
    assert_eq!(court.evidence().dispute_evidence(id).len(), 1);
    assert_eq!(court.evidence().total_evidence(), 1);
    assert!(court.verify_evidence(&addr("verifier"), evidence_id, hash).unwrap());

    vote(
        &mut court,
        &clock,
        id,
        &jury,
        &[Verdict::PlaintiffWins, Verdict::PlaintiffWins, Verdict::DefendantWins],
    );

    let result = court.apply_ruling(&system(), id).unwrap();
    assert_eq!(result.verdict, Verdict::PlaintiffWins);
    assert_eq!((result.plaintiff_votes, result.defendant_votes), (2, 1));
    assert_eq!(court.disputes().get_dispute(id).unwrap().status, DisputeStatus::Ruled);

    let reputations: Vec<u64> = jury
        .iter()
        .map(|j| court.stake_ledger().get_juror(j).unwrap().reputation)
        .collect();
    assert_eq!(reputations, vec![105, 105, 90]);

    let appeal_id = court
        .file_appeal(&addr("defendant"), id, "Unfair ruling", CourtParams::default().appeal_fee)
        .unwrap();
    court.update_status(&system(), id, DisputeStatus::Appealed).unwrap();
    assert!(court.close_dispute(&addr("plaintiff"), id).is_err());
    court.process_appeal(&addr("arbitrator"), appeal_id, false).unwrap();
    court.update_status(&system(), id, DisputeStatus::Executed).unwrap();
    court.update_status(&system(), id, DisputeStatus::Closed).unwrap();

    assert_eq!(court.withdraw_dispute_fees(&admin()).unwrap(), CourtParams::default().dispute_fee);
    assert_eq!(court.withdraw_appeal_fees(&admin()).unwrap(), CourtParams::default().appeal_fee);

    let seqs: Vec<u64> = court.events().records().iter().map(|r| r.seq).collect();
    assert_eq!(seqs, (1..=seqs.len() as u64).collect::<Vec<_>>());
}

#[test]
fn party_can_settle_early() {
    let (mut court, _clock) = setup();
    let id = file(&mut court);
    court.close_dispute(&addr("defendant"), id).unwrap();
    assert_eq!(court.disputes().get_dispute(id).unwrap().status, DisputeStatus::Closed);
    assert!(court
        .events()
        .records()
        .iter()
        .any(|r| matches!(r.event, CourtEvent::Dispute(DisputeEvent::DisputeClosed { .. }))));
}

#[test]
fn ruling_requires_finalized_vote() {
    let (mut court, _clock) = setup();
    let (id, _jury) = into_voting(&mut court);
    let before = court.events().len();

    let err = court.apply_ruling(&system(), id).unwrap_err();
    assert!(matches!(err, CourtError::Voting(VotingError::NotFinalized(_))));
    assert_eq!(court.disputes().get_dispute(id).unwrap().status, DisputeStatus::VotingInProgress);
    assert_eq!(court.events().len(), before);
}

#[test]
fn ruling_requires_system_role() {
    let (mut court, clock) = setup();
    let (id, jury) = into_voting(&mut court);
    vote(&mut court, &clock, id, &jury, &[Verdict::Invalid; 3]);

    let err = court.apply_ruling(&addr("plaintiff"), id).unwrap_err();
    assert!(matches!(err, CourtError::Dispute(DisputeError::Unauthorized(_))));
    let juror = court.stake_ledger().get_juror(&jury[0]).unwrap();
    assert_eq!(juror.total_votes, 0);
}

#[test]
fn ruling_with_unknown_juror_changes_nothing() {
    let (mut court, clock) = setup();
    stake_jurors(&mut court, 1);
    let id = file(&mut court);
    court.update_status(&system(), id, DisputeStatus::EvidencePending).unwrap();
    court.update_status(&system(), id, DisputeStatus::VotingInProgress).unwrap();
    let jury = vec![addr("juror0"), addr("never-staked")];
    court.initialize_voting(&system(), id, jury.clone()).unwrap();
    vote(&mut court, &clock, id, &jury, &[Verdict::DefendantWins; 2]);

    let err = court.apply_ruling(&system(), id).unwrap_err();
    assert!(matches!(err, CourtError::Stake(StakeError::NotFound(_))));
    assert_eq!(court.disputes().get_dispute(id).unwrap().status, DisputeStatus::VotingInProgress);
    assert_eq!(court.stake_ledger().get_juror(&jury[0]).unwrap().reputation, 100);
}

#[test]
fn reopened_dispute_cannot_reapply_ruling() {
    let (mut court, clock) = setup();
    let (id, jury) = into_voting(&mut court);
    vote(&mut court, &clock, id, &jury, &[Verdict::PlaintiffWins; 3]);
    court.apply_ruling(&system(), id).unwrap();

    let appeal_id = court
        .file_appeal(&addr("defendant"), id, "New evidence", CourtParams::default().appeal_fee)
        .unwrap();
    court.update_status(&system(), id, DisputeStatus::Appealed).unwrap();
    court.process_appeal(&addr("arbitrator"), appeal_id, true).unwrap();
    court.update_status(&system(), id, DisputeStatus::VotingInProgress).unwrap();

    let err = court.apply_ruling(&system(), id).unwrap_err();
    assert!(matches!(err, CourtError::RulingAlreadyApplied(d) if d == id));
    assert_eq!(court.stake_ledger().get_juror(&jury[0]).unwrap().reputation, 105);
}

#[test]
fn empty_pool_cannot_seat_a_jury() {
    let (mut court, _clock) = setup();
    let id = file(&mut court);
    let err = court
        .select_jury(&system(), id, &NullSelector::PoolOrder, 3)
        .unwrap_err();
    assert!(matches!(err, CourtError::Voting(VotingError::EmptyJury)));
}

#[test]
fn failed_operation_leaves_log_unchanged() {
    let (mut court, _clock) = setup();
    let juror = stake_jurors(&mut court, 1).remove(0);
    let before = court.events().len();

    assert!(court.withdraw(&juror, Amount::new(1)).is_err());
    assert!(court
        .file_dispute(&addr("plaintiff"), DisputeFiling::new(addr("plaintiff"), "Qm"), Amount::new(UNIT))
        .is_err());
    assert!(court.grant_role(&juror, Role::System, juror.clone()).is_err());
    assert_eq!(court.events().len(), before);
}

#[test]
fn lock_period_runs_from_last_deposit() {
    let (mut court, clock) = setup();
    let juror = stake_jurors(&mut court, 1).remove(0);
    clock.advance(29 * DAY_SECS);
    court.stake(&juror, Amount::new(UNIT)).unwrap();
    clock.advance(2 * DAY_SECS);
    assert!(matches!(
        court.withdraw(&juror, Amount::new(UNIT)),
        Err(CourtError::Stake(StakeError::LockPeriodActive { .. }))
    ));
    clock.advance(28 * DAY_SECS);
    court.withdraw(&juror, Amount::new(UNIT)).unwrap();
}

#[test]
fn subscribers_see_every_record() {
    let (mut court, _clock) = setup();
    let seen = Arc::new(AtomicUsize::new(0));
    let s = Arc::clone(&seen);
    court.subscribe(Box::new(move |_| {
        s.fetch_add(1, Ordering::SeqCst);
    }));
    let before = court.events().len();
    stake_jurors(&mut court, 2);
    file(&mut court);
    assert_eq!(seen.load(Ordering::SeqCst), court.events().len() - before);
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

#[test]
fn snapshot_round_trips_through_file() {
    let (mut court, clock) = setup();
    let (id, jury) = into_voting(&mut court);
    vote(&mut court, &clock, id, &jury, &[Verdict::DefendantWins; 3]);

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("court.snapshot");
    court.snapshot().write_to(&path).unwrap();

    let restored = Court::restore(CourtSnapshot::read_from(&path).unwrap(), Box::new(clock.clone()));
    assert_eq!(restored.params(), court.params());
    assert_eq!(restored.events().records(), court.events().records());
    assert_eq!(
        restored.disputes().get_dispute(id).unwrap(),
        court.disputes().get_dispute(id).unwrap()
    );
    assert_eq!(
        restored.voting().get_voting_session(id).unwrap(),
        court.voting().get_voting_session(id).unwrap()
    );
    for juror in &jury {
        assert_eq!(
            restored.stake_ledger().get_juror(juror).unwrap(),
            court.stake_ledger().get_juror(juror).unwrap()
        );
    }
    assert_eq!(restored.stake_ledger().active_jurors().len(), 3);
    assert!(restored.stake_ledger().roles().has_role(&system(), Role::System));
}

#[test]
fn restored_court_keeps_working() {
    let (mut court, clock) = setup();
    file(&mut court);
    let json = court.snapshot().to_json().unwrap();
    let mut restored = Court::restore(CourtSnapshot::from_json(&json).unwrap(), Box::new(clock));

    let next = file(&mut restored);
    assert_eq!(next, DisputeId::new(2));
    assert_eq!(restored.events().last_seq(), court.events().last_seq() + 1);
}

#[test]
fn corrupt_snapshot_is_rejected() {
    assert!(matches!(
        CourtSnapshot::from_bincode(&[1, 2, 3]),
        Err(CourtError::Snapshot(_))
    ));
    let dir = tempfile::tempdir().expect("temp dir");
    assert!(matches!(
        CourtSnapshot::read_from(dir.path().join("missing")),
        Err(CourtError::Io(_))
    ));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_callers_serialize() {
    let (court, _clock) = setup();
    let service = CourtService::new(court);
    let before = service.execute(|c| c.events().len()).await;

    let mut handles = Vec::new();
    for i in 0..16 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let juror = addr(&format!("juror{i}"));
            service
                .execute(move |c| c.stake(&juror, Amount::new(UNIT)))
                .await
        }));
    }
    for handle in handles {
        handle.await.expect("task panicked").unwrap();
    }

    let court = service.lock().await;
    assert_eq!(court.stake_ledger().total_staked(), Amount::new(16 * UNIT));
    assert_eq!(court.stake_ledger().active_jurors().len(), 16);
    let new_records = &court.events().records()[before..];
    let seqs: Vec<u64> = new_records.iter().map(|r| r.seq).collect();
    assert_eq!(seqs, ((before as u64 + 1)..=court.events().last_seq()).collect::<Vec<_>>());
}
