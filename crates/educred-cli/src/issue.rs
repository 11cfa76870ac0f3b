//! `educred issue` — single credential issuance.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use educred_core::EthAddress;
use educred_pipeline::{issue, CertificateFile, IssueRequest};
use educred_storage::gateway;

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Recipient wallet address.
    #[arg(long)]
    pub recipient: String,

    /// Issuing institution.
    #[arg(long)]
    pub institution: String,

    /// Course or program name.
    #[arg(long)]
    pub course: String,

    /// Certificate file to store.
    #[arg(long)]
    pub file: PathBuf,
}

pub async fn run(ctx: &AppContext, args: IssueArgs) -> anyhow::Result<()> {
    let recipient = EthAddress::new(args.recipient).context("invalid recipient address")?;
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("certificate")
        .to_string();

    let request = IssueRequest::new(
        recipient,
        args.institution,
        args.course,
        CertificateFile { filename, bytes },
    );

    let receipt = issue(
        ctx.store.as_ref(),
        ctx.ledger.as_ref(),
        ctx.session.as_ref(),
        &request,
    )
    .await?;

    println!("Credential issued");
    println!("  transaction:  {}", receipt.tx_hash);
    println!("  explorer:     {}", ctx.network.tx_url(&receipt.tx_hash));
    println!("  certificate:  {}", gateway::resolve(&receipt.content_id));
    println!("  metadata cid: {}", receipt.metadata_content_id);
    Ok(())
}
