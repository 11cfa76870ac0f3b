//! # EVM JSON-RPC Ledger
//!
//! Production ledger adapter speaking JSON-RPC to an EVM-compatible
//! endpoint. Writes go through `eth_sendTransaction` — the RPC provider's
//! key management signs; this adapter never holds private keys. A mint is
//! not reported as successful until `eth_getTransactionReceipt` shows the
//! transaction mined with a success status, so pipeline callers always
//! observe final success or failure, never a merely-submitted state.
//!
//! Every call takes an explicit [`Network`]; the static registry in
//! `educred-core` resolves it to an endpoint and contract address before
//! any request is made.

use std::time::Duration;

use async_trait::async_trait;
use educred_core::{
    ContentId, CoreError, CredentialRecord, EthAddress, Network, TokenId, TxHash,
};

use crate::abi;
use crate::error::LedgerError;
use crate::{Ledger, MintRequest};

/// Configuration for the EVM ledger adapter.
#[derive(Debug, Clone)]
pub struct EvmLedgerConfig {
    /// Sender address whose transactions the RPC provider signs.
    pub from_address: EthAddress,
    /// Override for the registry's RPC endpoint (staging, local nodes,
    /// tests). Applies to every network this adapter is called with.
    pub rpc_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Delay between receipt polls.
    pub receipt_poll_interval: Duration,
    /// Number of receipt polls before a mint is reported as failed.
    pub receipt_poll_attempts: u32,
}

impl EvmLedgerConfig {
    /// Defaults: 30s timeout, 2s poll interval, 60 poll attempts.
    pub fn new(from_address: EthAddress) -> Self {
        Self {
            from_address,
            rpc_url: None,
            timeout_secs: 30,
            receipt_poll_interval: Duration::from_secs(2),
            receipt_poll_attempts: 60,
        }
    }

    /// Point every call at an explicit RPC endpoint.
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    /// Tune receipt polling.
    pub fn with_polling(mut self, interval: Duration, attempts: u32) -> Self {
        self.receipt_poll_interval = interval;
        self.receipt_poll_attempts = attempts;
        self
    }
}

/// JSON-RPC ledger adapter for the credential contract.
#[derive(Debug, Clone)]
pub struct EvmLedger {
    client: reqwest::Client,
    config: EvmLedgerConfig,
}

/// Internal RPC failure, mapped to read/write errors at each call site.
#[derive(Debug)]
enum RpcFailure {
    Transport(String),
    Rpc { message: String },
    MalformedResponse(String),
}

impl RpcFailure {
    fn reason(&self) -> String {
        match self {
            RpcFailure::Transport(m) => m.clone(),
            RpcFailure::Rpc { message } => message.clone(),
            RpcFailure::MalformedResponse(m) => m.clone(),
        }
    }

    /// Whether the failure is a contract revert (token does not exist).
    fn is_revert(&self) -> bool {
        matches!(self, RpcFailure::Rpc { message } if message.to_ascii_lowercase().contains("revert"))
    }
}

impl EvmLedger {
    /// Create an adapter from configuration.
    pub fn new(config: EvmLedgerConfig) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LedgerError::ReadFailed {
                network: "client_init".into(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    /// Resolve a network to (endpoint, contract address), honoring the
    /// configured RPC override. Pure lookup — no I/O.
    fn resolve(&self, network: Network) -> Result<(String, String), LedgerError> {
        let deployed = network.deployed_contract().map_err(|e| match e {
            CoreError::UnsupportedNetwork { network } => {
                LedgerError::UnsupportedNetwork { network }
            }
            other => LedgerError::ReadFailed {
                network: network.name().to_string(),
                reason: other.to_string(),
            },
        })?;
        let rpc_url = self
            .config
            .rpc_url
            .clone()
            .unwrap_or(deployed.rpc_url);
        Ok((rpc_url, deployed.contract_address))
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(
        &self,
        rpc_url: &str,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, RpcFailure> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let resp = self
            .client
            .post(rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RpcFailure::Transport(format!("{method}: request timed out"))
                } else {
                    RpcFailure::Transport(format!("{method}: {e}"))
                }
            })?;

        if !resp.status().is_success() {
            return Err(RpcFailure::Transport(format!(
                "{method}: HTTP {}",
                resp.status()
            )));
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| RpcFailure::MalformedResponse(format!("{method}: invalid JSON: {e}")))?;

        if let Some(error) = json.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown RPC error")
                .to_string();
            return Err(RpcFailure::Rpc { message });
        }

        json.get("result").cloned().ok_or_else(|| {
            RpcFailure::MalformedResponse(format!(
                "{method}: JSON-RPC response missing 'result' field"
            ))
        })
    }

    /// `eth_call` against the credential contract, returning the hex blob.
    async fn contract_read(
        &self,
        network: Network,
        calldata: String,
    ) -> Result<String, LedgerError> {
        let (rpc_url, contract) = self.resolve(network)?;
        let call = serde_json::json!([{ "to": contract, "data": calldata }, "latest"]);

        let result = self
            .rpc_call(&rpc_url, "eth_call", call)
            .await
            .map_err(|f| LedgerError::ReadFailed {
                network: network.name().to_string(),
                reason: f.reason(),
            })?;

        result
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| LedgerError::ReadFailed {
                network: network.name().to_string(),
                reason: "eth_call returned non-string result".into(),
            })
    }

    /// Poll for the transaction receipt until it appears or attempts run out.
    async fn wait_for_receipt(
        &self,
        rpc_url: &str,
        network: Network,
        tx_hash: &str,
    ) -> Result<(), LedgerError> {
        for attempt in 0..self.config.receipt_poll_attempts {
            let receipt = self
                .rpc_call(rpc_url, "eth_getTransactionReceipt", serde_json::json!([tx_hash]))
                .await
                .map_err(|f| LedgerError::WriteFailed {
                    network: network.name().to_string(),
                    reason: f.reason(),
                })?;

            if receipt.is_null() {
                tracing::debug!(tx_hash, attempt, "mint pending, receipt not yet available");
                tokio::time::sleep(self.config.receipt_poll_interval).await;
                continue;
            }

            let status = receipt
                .get("status")
                .and_then(|s| s.as_str())
                .unwrap_or("0x0");
            if status == "0x0" {
                return Err(LedgerError::WriteFailed {
                    network: network.name().to_string(),
                    reason: format!("transaction {tx_hash} reverted"),
                });
            }
            return Ok(());
        }

        Err(LedgerError::WriteFailed {
            network: network.name().to_string(),
            reason: format!(
                "transaction {tx_hash} not confirmed after {} polls",
                self.config.receipt_poll_attempts
            ),
        })
    }
}

#[async_trait]
impl Ledger for EvmLedger {
    async fn mint(&self, req: &MintRequest, network: Network) -> Result<TxHash, LedgerError> {
        let (rpc_url, contract) = self.resolve(network)?;
        let calldata = abi::mint_credential_calldata(
            &req.recipient,
            &req.institution,
            &req.course_name,
            &req.content_id,
        );

        tracing::info!(
            recipient = %req.recipient,
            network = network.name(),
            "submitting mint transaction"
        );

        let tx = serde_json::json!([{
            "from": self.config.from_address.as_str(),
            "to": contract,
            "data": calldata,
        }]);

        let result = self
            .rpc_call(&rpc_url, "eth_sendTransaction", tx)
            .await
            .map_err(|f| LedgerError::WriteFailed {
                network: network.name().to_string(),
                reason: f.reason(),
            })?;

        let hash_str = result.as_str().ok_or_else(|| LedgerError::WriteFailed {
            network: network.name().to_string(),
            reason: "eth_sendTransaction returned non-string result".into(),
        })?;

        // Suspend until the transaction is confirmed: callers must observe
        // final success or failure, never merely "submitted".
        self.wait_for_receipt(&rpc_url, network, hash_str).await?;

        let hash = TxHash::new(hash_str).map_err(|e| LedgerError::WriteFailed {
            network: network.name().to_string(),
            reason: e.to_string(),
        })?;

        tracing::info!(tx_hash = %hash, network = network.name(), "mint confirmed");
        Ok(hash)
    }

    async fn credential(
        &self,
        token_id: TokenId,
        network: Network,
    ) -> Result<CredentialRecord, LedgerError> {
        let (rpc_url, contract) = self.resolve(network)?;
        let calldata = abi::get_credential_calldata(token_id);
        let call = serde_json::json!([{ "to": contract, "data": calldata }, "latest"]);

        let data = match self.rpc_call(&rpc_url, "eth_call", call).await {
            Ok(result) => result
                .as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| LedgerError::ReadFailed {
                    network: network.name().to_string(),
                    reason: "eth_call returned non-string result".into(),
                })?,
            // The contract reverts for a nonexistent token.
            Err(f) if f.is_revert() => {
                return Err(LedgerError::RecordNotFound {
                    token_id,
                    network: network.name().to_string(),
                });
            }
            Err(f) => {
                return Err(LedgerError::ReadFailed {
                    network: network.name().to_string(),
                    reason: f.reason(),
                });
            }
        };

        if data == "0x" || data.is_empty() {
            return Err(LedgerError::RecordNotFound {
                token_id,
                network: network.name().to_string(),
            });
        }

        let decoded = abi::decode_credential(&data).map_err(|e| LedgerError::ReadFailed {
            network: network.name().to_string(),
            reason: format!("getCredential: {e}"),
        })?;

        let recipient =
            EthAddress::new(decoded.recipient).map_err(|e| LedgerError::ReadFailed {
                network: network.name().to_string(),
                reason: format!("getCredential: {e}"),
            })?;
        let content_id =
            ContentId::new(decoded.content_id).map_err(|e| LedgerError::ReadFailed {
                network: network.name().to_string(),
                reason: format!("getCredential: {e}"),
            })?;

        Ok(CredentialRecord {
            token_id,
            recipient,
            institution: decoded.institution,
            course_name: decoded.course_name,
            issue_date: decoded.issue_date,
            content_id,
            verified: decoded.verified,
        })
    }

    async fn owner_token_ids(
        &self,
        owner: &EthAddress,
        network: Network,
    ) -> Result<Vec<TokenId>, LedgerError> {
        let read_failed = |reason: String| LedgerError::ReadFailed {
            network: network.name().to_string(),
            reason,
        };

        let balance_data = self
            .contract_read(network, abi::balance_of_calldata(owner))
            .await?;
        let count =
            abi::decode_uint(&balance_data).map_err(|e| read_failed(format!("balanceOf: {e}")))?;

        // Fixed enumeration order 0..count-1. The resulting sequence is
        // stable for a given on-chain state but otherwise unspecified.
        let mut tokens = Vec::with_capacity(count as usize);
        for index in 0..count {
            let data = self
                .contract_read(network, abi::token_of_owner_by_index_calldata(owner, index))
                .await?;
            let id = abi::decode_uint(&data)
                .map_err(|e| read_failed(format!("tokenOfOwnerByIndex[{index}]: {e}")))?;
            tokens.push(TokenId(id));
        }
        Ok(tokens)
    }

    async fn token_uri(&self, token_id: TokenId, network: Network) -> Result<String, LedgerError> {
        let data = self
            .contract_read(network, abi::token_uri_calldata(token_id))
            .await?;
        abi::decode_string(&data).map_err(|e| LedgerError::ReadFailed {
            network: network.name().to_string(),
            reason: format!("tokenURI: {e}"),
        })
    }
}
