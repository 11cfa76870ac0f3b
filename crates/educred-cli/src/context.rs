//! Adapter assembly from global options and the environment.
//!
//! Production and demo modes are structurally distinguished here, at
//! composition time: `--demo` (or a missing upload token, for the content
//! store alone) selects the mock implementation, and the substitution is
//! logged so it never passes silently for the real thing.

use std::sync::Arc;

use anyhow::Context as _;
use clap::Args;
use educred_core::{EthAddress, Network, WalletSession};
use educred_ledger::{EvmLedger, EvmLedgerConfig, Ledger, MockLedger};
use educred_storage::{ContentStore, MockStore, PinningClient, StorageConfig};

/// Sender used for read-only ledger access when no wallet is configured.
const NULL_SENDER: &str = "0x0000000000000000000000000000000000000000";

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Wallet address transactions are sent from.
    #[arg(long, env = "EDUCRED_WALLET", global = true)]
    pub wallet: Option<String>,

    /// Target network (name or chain id).
    #[arg(long, env = "EDUCRED_NETWORK", default_value = "sepolia", global = true)]
    pub network: Network,

    /// Override the network's default JSON-RPC endpoint.
    #[arg(long, env = "EDUCRED_RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Use the in-memory demo adapters instead of live services.
    #[arg(long, global = true)]
    pub demo: bool,
}

/// Assembled adapters plus the session context for this invocation.
pub struct AppContext {
    pub store: Arc<dyn ContentStore>,
    pub ledger: Arc<dyn Ledger>,
    pub session: Option<WalletSession>,
    pub network: Network,
}

/// Build the application context from global options.
pub fn build(opts: &GlobalOpts) -> anyhow::Result<AppContext> {
    let wallet = opts
        .wallet
        .as_deref()
        .map(EthAddress::new)
        .transpose()
        .context("invalid wallet address")?;

    let session = wallet
        .clone()
        .map(|address| WalletSession::new(address, opts.network));

    Ok(AppContext {
        store: build_store(opts.demo)?,
        ledger: build_ledger(opts, wallet)?,
        session,
        network: opts.network,
    })
}

fn build_store(demo: bool) -> anyhow::Result<Arc<dyn ContentStore>> {
    if demo {
        return Ok(Arc::new(MockStore::new()));
    }

    let config = StorageConfig::from_env().context("loading content store configuration")?;
    if config.api_token.is_none() {
        tracing::warn!(
            "no upload token configured (EDUCRED_STORAGE_TOKEN): \
             using the demo content store with placeholder identifiers"
        );
        return Ok(Arc::new(MockStore::new()));
    }
    Ok(Arc::new(
        PinningClient::new(config).context("building pinning client")?,
    ))
}

fn build_ledger(
    opts: &GlobalOpts,
    wallet: Option<EthAddress>,
) -> anyhow::Result<Arc<dyn Ledger>> {
    if opts.demo {
        return Ok(Arc::new(MockLedger::seeded()));
    }

    let from = match wallet {
        Some(address) => address,
        None => EthAddress::new(NULL_SENDER).context("null sender address")?,
    };
    let mut config = EvmLedgerConfig::new(from);
    if let Some(url) = &opts.rpc_url {
        config = config.with_rpc_url(url);
    }
    Ok(Arc::new(
        EvmLedger::new(config).context("building ledger client")?,
    ))
}
