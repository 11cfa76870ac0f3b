//! `educred uri` — metadata URI recorded for a token.

use clap::Args;
use educred_core::TokenId;

use crate::context::AppContext;

#[derive(Args, Debug)]
pub struct UriArgs {
    /// Token identifier.
    pub token: u64,
}

pub async fn run(ctx: &AppContext, args: UriArgs) -> anyhow::Result<()> {
    let uri = ctx
        .ledger
        .token_uri(TokenId(args.token), ctx.network)
        .await?;
    println!("{uri}");
    Ok(())
}
