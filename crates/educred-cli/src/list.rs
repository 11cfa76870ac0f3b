//! `educred list` — credentials owned by an address.

use anyhow::{bail, Context as _};
use clap::Args;
use educred_core::EthAddress;

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Owner address. Defaults to the connected wallet.
    #[arg(long)]
    pub owner: Option<String>,
}

pub async fn run(ctx: &AppContext, args: ListArgs) -> anyhow::Result<()> {
    let owner = match (&args.owner, &ctx.session) {
        (Some(raw), _) => EthAddress::new(raw.as_str()).context("invalid owner address")?,
        (None, Some(session)) => session.address.clone(),
        (None, None) => bail!("provide --owner or connect a wallet with --wallet"),
    };

    let ids = ctx.ledger.owner_token_ids(&owner, ctx.network).await?;
    if ids.is_empty() {
        println!("No credentials found for {} on {}", owner.short(), ctx.network);
        return Ok(());
    }

    println!("Credentials owned by {} on {}:", owner.short(), ctx.network);
    for id in ids {
        match ctx.ledger.credential(id, ctx.network).await {
            Ok(record) => println!(
                "  #{:<6} {} — {}{}",
                record.token_id,
                record.course_name,
                record.institution,
                if record.verified { "" } else { " (unverified)" },
            ),
            // A token can disappear between enumeration and read.
            Err(e) => println!("  #{id:<6} unavailable: {e}"),
        }
    }
    println!();
    println!("  explorer: {}", ctx.network.address_url(&owner));
    Ok(())
}
