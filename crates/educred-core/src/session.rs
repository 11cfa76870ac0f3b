//! # Wallet Session Context
//!
//! The connected wallet and its active network, passed explicitly into
//! every pipeline call. Adapters and pipelines only ever read this value;
//! the surface that established the wallet connection is the only thing
//! that replaces it. Keeping the session as a plain value (rather than
//! ambient global state) makes every pipeline trivially testable with a
//! synthetic session.

use serde::{Deserialize, Serialize};

use crate::identity::EthAddress;
use crate::network::Network;

/// An active wallet connection scoped to one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    /// The connected wallet address.
    pub address: EthAddress,
    /// The network the wallet is currently on.
    pub network: Network,
}

impl WalletSession {
    pub fn new(address: EthAddress, network: Network) -> Self {
        Self { address, network }
    }
}
