//! # Network Registry — Static Chain Lookup
//!
//! Maps a [`Network`] to its concrete JSON-RPC endpoint, credential
//! contract address, and block-explorer base URL. The table is static:
//! adding a deployment means adding an entry here, and a network with no
//! entry is always a hard failure, never a silent default.
//!
//! The credential contract is deployed on the Sepolia and Polygon Mumbai
//! test networks. Ethereum and Polygon mainnet are known networks (their
//! explorer links work) but carry no contract, so every ledger call
//! against them fails with [`CoreError::UnsupportedNetwork`] before any
//! network I/O is attempted.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::identity::{EthAddress, TxHash};

/// Networks the stack knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Mainnet,
    Sepolia,
    Polygon,
    PolygonMumbai,
}

/// Static per-network configuration.
#[derive(Debug, Clone, Copy)]
pub struct NetworkProfile {
    /// EVM chain ID (e.g. 1 for Ethereum mainnet, 11155111 for Sepolia).
    pub chain_id: u64,
    /// Default JSON-RPC endpoint. Overridable at the adapter layer.
    pub rpc_url: &'static str,
    /// Credential contract address, if deployed on this network.
    pub contract_address: Option<&'static str>,
    /// Block-explorer base URL, no trailing slash.
    pub explorer_base: &'static str,
}

/// A resolved (endpoint, contract) pair for a network that carries the
/// credential contract.
#[derive(Debug, Clone)]
pub struct DeployedContract {
    pub rpc_url: String,
    pub contract_address: String,
}

/// Address the credential contract is deployed at on the test networks.
const CONTRACT_ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

impl Network {
    /// All known networks, in registry order.
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Sepolia,
        Network::Polygon,
        Network::PolygonMumbai,
    ];

    /// Static profile for this network.
    pub fn profile(&self) -> NetworkProfile {
        match self {
            Network::Mainnet => NetworkProfile {
                chain_id: 1,
                rpc_url: "https://eth.llamarpc.com",
                contract_address: None,
                explorer_base: "https://etherscan.io",
            },
            Network::Sepolia => NetworkProfile {
                chain_id: 11_155_111,
                rpc_url: "https://rpc.sepolia.org",
                contract_address: Some(CONTRACT_ADDRESS),
                explorer_base: "https://sepolia.etherscan.io",
            },
            Network::Polygon => NetworkProfile {
                chain_id: 137,
                rpc_url: "https://polygon-rpc.com",
                contract_address: None,
                explorer_base: "https://polygonscan.com",
            },
            Network::PolygonMumbai => NetworkProfile {
                chain_id: 80_001,
                rpc_url: "https://rpc-mumbai.maticvigil.com",
                contract_address: Some(CONTRACT_ADDRESS),
                explorer_base: "https://mumbai.polygonscan.com",
            },
        }
    }

    /// Human-readable network name (matches the kebab-case serde form).
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Sepolia => "sepolia",
            Network::Polygon => "polygon",
            Network::PolygonMumbai => "polygon-mumbai",
        }
    }

    /// EVM chain ID.
    pub fn chain_id(&self) -> u64 {
        self.profile().chain_id
    }

    /// Resolve this network to a (endpoint, contract address) pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnsupportedNetwork`] if the credential contract
    /// is not deployed on this network. This is a pure table lookup — no
    /// network I/O happens here or before it.
    pub fn deployed_contract(&self) -> Result<DeployedContract, CoreError> {
        let profile = self.profile();
        match profile.contract_address {
            Some(addr) => Ok(DeployedContract {
                rpc_url: profile.rpc_url.to_string(),
                contract_address: addr.to_string(),
            }),
            None => Err(CoreError::UnsupportedNetwork {
                network: self.name().to_string(),
            }),
        }
    }

    /// Explorer URL for a transaction on this network.
    pub fn tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{hash}", self.profile().explorer_base)
    }

    /// Explorer URL for an address on this network.
    pub fn address_url(&self, address: &EthAddress) -> String {
        format!("{}/address/{address}", self.profile().explorer_base)
    }
}

impl std::str::FromStr for Network {
    type Err = CoreError;

    /// Parse a network from its name or decimal chain ID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "ethereum" | "1" => Ok(Network::Mainnet),
            "sepolia" | "11155111" => Ok(Network::Sepolia),
            "polygon" | "137" => Ok(Network::Polygon),
            "polygon-mumbai" | "mumbai" | "80001" => Ok(Network::PolygonMumbai),
            _ => Err(CoreError::UnknownNetwork(s.to_string())),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
