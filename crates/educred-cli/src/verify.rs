//! `educred verify` — credential lookup by token identifier.

use anyhow::bail;
use clap::Args;
use educred_core::TokenId;
use educred_pipeline::{verify, VerificationOutcome};
use educred_storage::gateway;

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Token identifier to look up.
    pub token: u64,
}

pub async fn run(ctx: &AppContext, args: VerifyArgs) -> anyhow::Result<()> {
    let outcome = verify(ctx.ledger.as_ref(), TokenId(args.token), ctx.network).await;
    match outcome {
        VerificationOutcome::Record(record) => {
            println!("Credential #{}", record.token_id);
            println!("  course:      {}", record.course_name);
            println!("  institution: {}", record.institution);
            println!("  recipient:   {}", record.recipient);
            if let Some(at) = record.issued_at() {
                println!("  issued:      {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            println!("  verified:    {}", if record.verified { "yes" } else { "no" });
            println!("  metadata:    {}", gateway::resolve(&record.content_id));
            Ok(())
        }
        VerificationOutcome::Negative { message } => bail!(message),
    }
}
