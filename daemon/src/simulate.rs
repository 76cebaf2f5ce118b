//! End-to-end simulation of one dispute on a fresh court.
//!
//! Time is simulated with a [`NullClock`], so the commit and reveal windows
//! pass instantly. Jurors act concurrently through a [`CourtService`].

use anyhow::{bail, Context};
use quill_court::{Court, CourtConfig, CourtService};
use quill_crypto::{content_hash, random_salt};
use quill_disputes::{DisputeFiling, DisputeStatus};
use quill_nullables::NullClock;
use quill_types::{Address, Amount, DisputeId, Role, Timestamp};
use quill_voting::{SeededSelector, Verdict};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Number of jurors who stake before the dispute is filed.
    #[arg(long, default_value_t = 5)]
    jurors: usize,

    /// Number of jurors drawn for the dispute.
    #[arg(long, default_value_t = 3)]
    jury_size: usize,

    /// Hex-encoded 32-byte jury selection seed. Random when omitted.
    #[arg(long)]
    seed: Option<String>,

    /// Have the losing party appeal the ruling.
    #[arg(long)]
    appeal: bool,

    /// Write the final court state to this path.
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn parse_seed(hex_seed: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = hex::decode(hex_seed).context("seed is not valid hex")?;
    match <[u8; 32]>::try_from(bytes.as_slice()) {
        Ok(seed) => Ok(seed),
        Err(_) => bail!("seed must be 32 bytes, got {}", bytes.len()),
    }
}

/// How simulated juror `index` votes: mostly for the plaintiff, with every
/// third juror dissenting.
fn simulated_vote(index: usize) -> Verdict {
    if index % 3 == 2 {
        Verdict::DefendantWins
    } else {
        Verdict::PlaintiffWins
    }
}

pub async fn run(config: &CourtConfig, args: SimulateArgs) -> anyhow::Result<()> {
    if args.jurors == 0 || args.jury_size == 0 {
        bail!("need at least one juror and a jury of at least one");
    }
    let selector = match &args.seed {
        Some(hex_seed) => SeededSelector::new(parse_seed(hex_seed)?),
        None => SeededSelector::from_entropy(),
    };
    info!(seed = %hex::encode(selector.seed()), "jury selection seed");

    let clock = NullClock::new(Timestamp::now().as_secs());
    let mut court = Court::from_config(config, Box::new(clock.clone()));
    court.subscribe(Box::new(|record| {
        debug!(seq = record.seq, at = %record.at, event = ?record.event, "court event");
    }));

    let admin = config.admin.clone();
    let system = Address::new("system");
    let arbitrator = Address::new("arbitrator");
    let plaintiff = Address::new("plaintiff");
    let defendant = Address::new("defendant");
    court.grant_role(&admin, Role::System, system.clone())?;
    court.grant_role(&admin, Role::Arbitrator, arbitrator.clone())?;

    let params = config.params();
    let service = CourtService::new(court);

    // Jurors stake concurrently; the service serializes them.
    let mut handles = Vec::new();
    for i in 0..args.jurors {
        let service = service.clone();
        let amount = Amount::new(params.min_stake.raw() * (i as u128 + 1));
        handles.push(tokio::spawn(async move {
            let juror = Address::new(format!("juror{i}"));
            service.execute(move |c| c.stake(&juror, amount)).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let dispute_id: DisputeId = service
        .execute(|c| {
            let filing = DisputeFiling::new(defendant.clone(), "QmSimulatedDispute");
            c.file_dispute(&plaintiff, filing, params.dispute_fee)
        })
        .await?;
    service
        .execute(|c| -> anyhow::Result<()> {
            c.submit_evidence(&plaintiff, dispute_id, content_hash(b"signed contract"), "QmContract")?;
            c.submit_evidence(&defendant, dispute_id, content_hash(b"delivery receipt"), "QmReceipt")?;
            c.update_status(&system, dispute_id, DisputeStatus::EvidencePending)?;
            c.update_status(&system, dispute_id, DisputeStatus::VotingInProgress)?;
            Ok(())
        })
        .await?;

    let jury = service
        .execute(|c| c.select_jury(&system, dispute_id, &selector, args.jury_size))
        .await?;
    info!(%dispute_id, jury = ?jury, "jury seated");

    let ballots: Vec<(Address, Verdict, [u8; 32])> = jury
        .iter()
        .enumerate()
        .map(|(i, juror)| (juror.clone(), simulated_vote(i), random_salt()))
        .collect();

    let mut handles = Vec::new();
    for (juror, verdict, salt) in ballots.clone() {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .execute(move |c| c.commit_vote(&juror, dispute_id, verdict.commitment(&salt)))
                .await
        }));
    }
    for handle in handles {
        handle.await??;
    }
    clock.advance(params.commit_period_secs);

    let mut handles = Vec::new();
    for (juror, verdict, salt) in ballots {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .execute(move |c| c.reveal_vote(&juror, dispute_id, verdict, &salt))
                .await
        }));
    }
    for handle in handles {
        handle.await??;
    }
    clock.advance(params.reveal_period_secs);

    let result = service
        .execute(|c| -> anyhow::Result<_> {
            c.finalize_voting(dispute_id)?;
            Ok(c.apply_ruling(&system, dispute_id)?)
        })
        .await?;
    info!(
        %dispute_id,
        verdict = ?result.verdict,
        plaintiff_votes = result.plaintiff_votes,
        defendant_votes = result.defendant_votes,
        invalid_votes = result.invalid_votes,
        "ruling applied"
    );

    service
        .execute(|c| -> anyhow::Result<()> {
            if args.appeal {
                let appellant = if result.verdict == Verdict::PlaintiffWins {
                    &defendant
                } else {
                    &plaintiff
                };
                let appeal_id =
                    c.file_appeal(appellant, dispute_id, "Jury ignored the receipt", params.appeal_fee)?;
                c.update_status(&system, dispute_id, DisputeStatus::Appealed)?;
                c.process_appeal(&arbitrator, appeal_id, false)?;
            }
            c.update_status(&system, dispute_id, DisputeStatus::Executed)?;
            c.update_status(&system, dispute_id, DisputeStatus::Closed)?;
            Ok(())
        })
        .await?;

    let court = service.lock().await;
    println!("dispute {dispute_id}: {:?}", result.verdict);
    println!(
        "  votes: plaintiff {}, defendant {}, invalid {}",
        result.plaintiff_votes, result.defendant_votes, result.invalid_votes
    );
    for juror in &jury {
        let record = court.stake_ledger().get_juror(juror)?;
        let accuracy = match record.accuracy_bps() {
            Some(bps) => format!("{bps}bps"),
            None => "n/a".to_string(),
        };
        println!(
            "  {juror}: staked {}, reputation {}, accuracy {accuracy}",
            record.staked, record.reputation
        );
    }
    println!(
        "  fees held: disputes {}, appeals {}",
        court.disputes().treasury().balance(),
        court.appeals().treasury().balance()
    );
    println!("  events logged: {}", court.events().len());

    if let Some(path) = &args.snapshot {
        court.snapshot().write_to(path)?;
        info!(path = %path.display(), "snapshot written");
    }
    Ok(())
}
