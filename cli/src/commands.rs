//! Subcommand execution. Results go to stdout, logs to stderr.

use std::sync::Arc;

use aidchain_distribution::{validator_activity, DistributionOutcome, RequestFilter};
use aidchain_donation::{aggregate, category_totals, donation_stats, recent};
use aidchain_store::{keys, Persistence};
use aidchain_types::{DistributionRequest, DonationRecord, TransactionId, ValidationRecord};
use aidchain_wallet_core::{connect_wallet, explorer_url, AutoConfirm, ConfirmationGate};

use crate::app::App;
use crate::prompt::StdinConfirmation;
use crate::Command;

pub async fn run(command: Command, app: &App) -> anyhow::Result<()> {
    match command {
        Command::Donate {
            category,
            message,
            amount,
        } => {
            let receipt = app.donations()?.submit(&category, &message, &amount).await?;
            println!("Donation submitted: {}", receipt.transaction_id);
            println!("  amount   {}", receipt.record.amount_principal);
            println!("  reward   {}", receipt.record.derived_reward);
            println!("  explorer {}", explorer_link(app, &receipt.transaction_id));
            warn_if_degraded(&receipt.persistence);
        }
        Command::Contribute { id, amount } => {
            let receipt = app.contributions()?.contribute(&id, &amount).await?;
            println!(
                "Contributed {} to request {}: {}",
                receipt.donation.record.amount_principal, id, receipt.donation.transaction_id
            );
            println!(
                "  raised   {} of {} ({})",
                receipt.request.raised_amount,
                receipt.request.requested_amount,
                percent(receipt.request.progress_bps())
            );
            println!(
                "  explorer {}",
                explorer_link(app, &receipt.donation.transaction_id)
            );
            warn_if_degraded(&receipt.donation.persistence.clone().and(receipt.persistence));
        }
        Command::Validate { id } => {
            let receipt = app.validations()?.validate(&id).await?;
            println!(
                "Validated request {} as {} ({}/{} validators, status {})",
                id,
                receipt.record.address,
                receipt.request.validator_count(),
                app.config.params.quorum_threshold,
                receipt.request.status
            );
            if receipt.promoted {
                println!("Quorum reached: request is ready for distribution.");
            }
            warn_if_degraded(&receipt.persistence);
        }
        Command::Distribute { id, yes } => {
            let gate: Arc<dyn ConfirmationGate> = if yes {
                Arc::new(AutoConfirm)
            } else {
                Arc::new(StdinConfirmation)
            };
            match app.distributions(gate)?.distribute(&id).await? {
                DistributionOutcome::Distributed(receipt) => {
                    println!(
                        "Request {} marked distributed by {}",
                        id, receipt.record.distributor
                    );
                    warn_if_degraded(&receipt.persistence);
                }
                DistributionOutcome::Declined => println!("Cancelled; request {id} unchanged."),
            }
        }
        Command::Requests { filter } => {
            let book = app.book();
            let counts = book.counts();
            println!(
                "{}",
                RequestFilter::ALL
                    .iter()
                    .map(|f| format!("{f}: {}", counts.get(*f)))
                    .collect::<Vec<_>>()
                    .join("  ")
            );
            for request in book.filter(filter) {
                print_request(app, &request);
            }
        }
        Command::Leaderboard { limit } => {
            let records: Vec<DonationRecord> = app.store.read_all(keys::DONATIONS);
            let board = aggregate(&records, limit);
            if board.is_empty() {
                println!("No donations recorded yet.");
            }
            for (rank, entry) in board.iter().enumerate() {
                println!(
                    "{:>3}. {}  donated {}  rewards {}",
                    rank + 1,
                    entry.address,
                    entry.total_donated,
                    entry.total_rewards
                );
            }
        }
        Command::Stats => print_stats(app),
        Command::Explorer { tx } => {
            let tx = TransactionId::new(tx)
                .ok_or_else(|| anyhow::anyhow!("transaction id must not be empty"))?;
            println!("{}", explorer_link(app, &tx));
        }
        Command::Connect => {
            let wallet = app.wallet()?;
            let address = connect_wallet(wallet.as_ref()).await?;
            println!("Connected as {address}");
        }
    }
    Ok(())
}

fn explorer_link(app: &App, tx: &TransactionId) -> String {
    explorer_url(&app.config.params.explorer_base, tx)
}

fn percent(bps: u32) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

fn warn_if_degraded(persistence: &Persistence) {
    if let Persistence::Degraded(reason) = persistence {
        eprintln!("warning: result not saved locally: {reason}");
    }
}

fn print_request(app: &App, request: &DistributionRequest) {
    println!(
        "[{}] {} ({}, {} urgency, {})",
        request.id, request.title, request.location, request.urgency, request.status
    );
    println!(
        "    {}: raised {} of {} ({}), {} recipients, {}/{} validators",
        request.category,
        request.raised_amount,
        request.requested_amount,
        percent(request.progress_bps()),
        request.recipient_count,
        request.validator_count(),
        app.config.params.quorum_threshold
    );
}

fn print_stats(app: &App) {
    let donations: Vec<DonationRecord> = app.store.read_all(keys::DONATIONS);
    let validations: Vec<ValidationRecord> = app.store.read_all(keys::VALIDATIONS);

    let stats = donation_stats(&donations);
    println!("Donations      {}", stats.donation_count);
    println!("Unique donors  {}", stats.unique_donors);
    println!("Total donated  {}", stats.total_donated);
    println!("Total rewards  {}", stats.total_rewards);
    println!("Validations    {}", validations.len());

    let categories = category_totals(&donations);
    if !categories.is_empty() {
        println!("\nBy category:");
        for c in categories {
            println!(
                "  {:<12} {} ({} donations, {})",
                c.category,
                c.total,
                c.count,
                percent(c.total.ratio_bps(stats.total_donated))
            );
        }
    }

    let latest = recent(&donations, 5);
    if !latest.is_empty() {
        println!("\nRecent donations:");
        for d in latest {
            println!(
                "  {} {} to {} ({})",
                d.address, d.amount_principal, d.category, d.transaction_id
            );
        }
    }

    let active = validator_activity(&validations, 5);
    if !active.is_empty() {
        println!("\nMost active validators:");
        for v in active {
            println!("  {} {} validations", v.address, v.validations);
        }
    }
}
