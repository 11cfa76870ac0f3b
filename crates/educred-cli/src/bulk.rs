//! `educred bulk` — bulk credential issuance from a CSV file.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context as _};
use clap::Args;
use educred_pipeline::{parse_rows, run_bulk, sample_csv, BulkConfig};

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct BulkArgs {
    /// CSV file with name, course, wallet, and institution columns.
    pub file: Option<PathBuf>,

    /// Write the reference sample CSV to the given path and exit.
    #[arg(long, value_name = "PATH")]
    pub sample: Option<PathBuf>,

    /// Delay between rows, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,
}

pub async fn run(ctx: &AppContext, args: BulkArgs) -> anyhow::Result<()> {
    if let Some(path) = &args.sample {
        std::fs::write(path, sample_csv())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Sample CSV written to {}", path.display());
        return Ok(());
    }

    let Some(path) = &args.file else {
        bail!("a CSV file is required (or use --sample to generate one)");
    };
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let rows = parse_rows(file).context("parsing CSV input")?;
    if rows.is_empty() {
        bail!("no valid rows: every row needs a non-empty name, course, and wallet");
    }

    println!("Issuing {} credentials:", rows.len());
    for row in &rows {
        println!("  {} — {} ({})", row.name, row.course, row.institution);
    }

    let config = BulkConfig {
        inter_row_delay: Duration::from_millis(args.delay_ms),
    };
    let outcomes = run_bulk(
        ctx.store.as_ref(),
        ctx.ledger.as_ref(),
        ctx.session.as_ref(),
        &rows,
        &config,
    )
    .await?;

    println!();
    for outcome in &outcomes {
        match &outcome.result {
            Ok(tx_hash) => println!("  ok      {} — {}", outcome.name, tx_hash),
            Err(message) => println!("  failed  {} — {}", outcome.name, message),
        }
    }

    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    println!();
    println!("{succeeded} succeeded, {} failed", outcomes.len() - succeeded);
    Ok(())
}
