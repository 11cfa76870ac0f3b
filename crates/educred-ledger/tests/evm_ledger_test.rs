//! Contract tests for the EVM ledger adapter against a simulated JSON-RPC
//! endpoint.
//!
//! A single wiremock responder routes on the JSON-RPC method (and, for
//! `eth_call`, the 4-byte selector in the calldata), mirroring how a real
//! node multiplexes every call over one URL.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use educred_core::{ContentId, EthAddress, Network, TokenId};
use educred_ledger::{EvmLedger, EvmLedgerConfig, Ledger, LedgerError, MintRequest};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const TX_HASH: &str = "0x9f2c7d4aa1b3e8f4c2d0e6b5a49381726354493827160594837261049582736a";

fn from_address() -> EthAddress {
    EthAddress::new("0x1111111111111111111111111111111111111111").unwrap()
}

fn recipient() -> EthAddress {
    EthAddress::new("0x742d35Cc6634C0532925a3b844Bc454e4438f44e").unwrap()
}

fn mint_request() -> MintRequest {
    MintRequest {
        recipient: recipient(),
        institution: "MIT".into(),
        course_name: "Blockchain Fundamentals".into(),
        content_id: ContentId::new("bafybeimeta1").unwrap(),
    }
}

async fn test_ledger(server: &MockServer) -> EvmLedger {
    let config = EvmLedgerConfig::new(from_address())
        .with_rpc_url(server.uri())
        .with_polling(Duration::from_millis(1), 5);
    EvmLedger::new(config).unwrap()
}

/// JSON-RPC responder: the closure maps (method, params) to the `result`
/// or `error` half of the reply body.
struct Rpc<F>(F);

impl<F> Respond for Rpc<F>
where
    F: Fn(&str, &serde_json::Value) -> serde_json::Value + Send + Sync,
{
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value =
            serde_json::from_slice(&request.body).expect("JSON-RPC body");
        let method = body["method"].as_str().unwrap_or_default();
        let mut reply = serde_json::json!({"jsonrpc": "2.0", "id": 1});
        let half = (self.0)(method, &body["params"]);
        if let Some(map) = half.as_object() {
            for (k, v) in map {
                reply[k] = v.clone();
            }
        }
        ResponseTemplate::new(200).set_body_json(reply)
    }
}

// ── Test-local ABI return-data builders ──────────────────────────────

fn enc_uint(v: u64) -> String {
    format!("{v:064x}")
}

fn enc_string_tail(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = enc_uint(bytes.len() as u64);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    let rem = bytes.len() % 32;
    if rem != 0 {
        out.push_str(&"00".repeat(32 - rem));
    }
    out
}

/// Return blob for `getCredential`: offset word + dynamic tuple.
fn credential_return_blob(
    recipient_hex: &str,
    institution: &str,
    course: &str,
    issue_date: u64,
    cid: &str,
    verified: bool,
) -> String {
    let inst_tail = enc_string_tail(institution);
    let course_tail = enc_string_tail(course);
    let cid_tail = enc_string_tail(cid);
    let inst_off = 6 * 32;
    let course_off = inst_off + inst_tail.len() / 2;
    let cid_off = course_off + course_tail.len() / 2;

    let mut tuple = format!("{:0>64}", recipient_hex.trim_start_matches("0x").to_lowercase());
    tuple.push_str(&enc_uint(inst_off as u64));
    tuple.push_str(&enc_uint(course_off as u64));
    tuple.push_str(&enc_uint(issue_date));
    tuple.push_str(&enc_uint(cid_off as u64));
    tuple.push_str(&enc_uint(u64::from(verified)));
    tuple.push_str(&inst_tail);
    tuple.push_str(&course_tail);
    tuple.push_str(&cid_tail);

    format!("0x{}{tuple}", enc_uint(32))
}

// ── mint ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn mint_confirms_after_pending_receipt() {
    let server = MockServer::start().await;
    let polls = Arc::new(AtomicU32::new(0));
    let polls_in_responder = polls.clone();

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(move |method: &str, _params: &serde_json::Value| match method {
            "eth_sendTransaction" => serde_json::json!({"result": TX_HASH}),
            "eth_getTransactionReceipt" => {
                // First poll: still pending. Second poll: mined and successful.
                if polls_in_responder.fetch_add(1, Ordering::SeqCst) == 0 {
                    serde_json::json!({"result": null})
                } else {
                    serde_json::json!({"result": {"status": "0x1", "blockNumber": "0x10"}})
                }
            }
            other => serde_json::json!({"error": {"message": format!("unexpected: {other}")}}),
        }))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    let hash = ledger.mint(&mint_request(), Network::Sepolia).await.unwrap();
    assert_eq!(hash.as_str(), TX_HASH);
    assert_eq!(polls.load(Ordering::SeqCst), 2, "should poll until mined");
}

#[tokio::test]
async fn mint_reports_reverted_transaction() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(|method: &str, _: &serde_json::Value| match method {
            "eth_sendTransaction" => serde_json::json!({"result": TX_HASH}),
            "eth_getTransactionReceipt" => {
                serde_json::json!({"result": {"status": "0x0", "blockNumber": "0x10"}})
            }
            _ => serde_json::json!({"error": {"message": "unexpected"}}),
        }))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    match ledger.mint(&mint_request(), Network::Sepolia).await.unwrap_err() {
        LedgerError::WriteFailed { reason, .. } => assert!(reason.contains("reverted")),
        other => panic!("expected WriteFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn mint_surfaces_rpc_errors() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(|_: &str, _: &serde_json::Value| {
            serde_json::json!({"error": {"message": "insufficient funds for gas"}})
        }))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    match ledger.mint(&mint_request(), Network::Sepolia).await.unwrap_err() {
        LedgerError::WriteFailed { reason, .. } => {
            assert!(reason.contains("insufficient funds"));
        }
        other => panic!("expected WriteFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn mint_times_out_without_receipt() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(|method: &str, _: &serde_json::Value| match method {
            "eth_sendTransaction" => serde_json::json!({"result": TX_HASH}),
            "eth_getTransactionReceipt" => serde_json::json!({"result": null}),
            _ => serde_json::json!({"error": {"message": "unexpected"}}),
        }))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    match ledger.mint(&mint_request(), Network::Sepolia).await.unwrap_err() {
        LedgerError::WriteFailed { reason, .. } => assert!(reason.contains("not confirmed")),
        other => panic!("expected WriteFailed, got {other:?}"),
    }
}

// ── unsupported networks ─────────────────────────────────────────────

#[tokio::test]
async fn unsupported_network_fails_before_any_io() {
    let server = MockServer::start().await;
    let ledger = test_ledger(&server).await;

    for network in [Network::Mainnet, Network::Polygon] {
        assert!(matches!(
            ledger.mint(&mint_request(), network).await,
            Err(LedgerError::UnsupportedNetwork { .. })
        ));
        assert!(matches!(
            ledger.credential(TokenId(1), network).await,
            Err(LedgerError::UnsupportedNetwork { .. })
        ));
        assert!(matches!(
            ledger.owner_token_ids(&recipient(), network).await,
            Err(LedgerError::UnsupportedNetwork { .. })
        ));
        assert!(matches!(
            ledger.token_uri(TokenId(1), network).await,
            Err(LedgerError::UnsupportedNetwork { .. })
        ));
    }

    assert!(
        server.received_requests().await.unwrap().is_empty(),
        "unmapped networks must be rejected before any network I/O"
    );
}

// ── reads ────────────────────────────────────────────────────────────

#[tokio::test]
async fn credential_decodes_record() {
    let server = MockServer::start().await;
    let blob = credential_return_blob(
        recipient().as_str(),
        "MIT",
        "Blockchain Fundamentals",
        1_700_000_000,
        "bafybeimeta1",
        true,
    );

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(move |method: &str, _: &serde_json::Value| match method {
            "eth_call" => serde_json::json!({"result": blob}),
            _ => serde_json::json!({"error": {"message": "unexpected"}}),
        }))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    let record = ledger.credential(TokenId(1), Network::Sepolia).await.unwrap();
    assert_eq!(record.token_id, TokenId(1));
    assert_eq!(
        record.recipient.as_str(),
        "0x742d35cc6634c0532925a3b844bc454e4438f44e"
    );
    assert_eq!(record.institution, "MIT");
    assert_eq!(record.course_name, "Blockchain Fundamentals");
    assert_eq!(record.issue_date, 1_700_000_000);
    assert_eq!(record.content_id.as_str(), "bafybeimeta1");
    assert!(record.verified);
}

#[tokio::test]
async fn credential_revert_maps_to_record_not_found() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(|_: &str, _: &serde_json::Value| {
            serde_json::json!({"error": {"message": "execution reverted: nonexistent token"}})
        }))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    match ledger.credential(TokenId(42), Network::Sepolia).await.unwrap_err() {
        LedgerError::RecordNotFound { token_id, .. } => assert_eq!(token_id, TokenId(42)),
        other => panic!("expected RecordNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn credential_empty_return_maps_to_record_not_found() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(|_: &str, _: &serde_json::Value| serde_json::json!({"result": "0x"})))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    assert!(matches!(
        ledger.credential(TokenId(42), Network::Sepolia).await,
        Err(LedgerError::RecordNotFound { .. })
    ));
}

#[tokio::test]
async fn owner_token_ids_enumerates_in_index_order() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(|method: &str, params: &serde_json::Value| {
            if method != "eth_call" {
                return serde_json::json!({"error": {"message": "unexpected"}});
            }
            let data = params[0]["data"].as_str().unwrap_or_default();
            match &data[2..10] {
                // balanceOf → 2 tokens
                "70a08231" => serde_json::json!({"result": format!("0x{}", enc_uint(2))}),
                // tokenOfOwnerByIndex → 7 for index 0, 3 for index 1:
                // deliberately not sorted, to pin "index order, not value order".
                "2f745c59" => {
                    let index =
                        u64::from_str_radix(data.trim_start_matches("0x").get(72..136).unwrap_or("0"), 16)
                            .unwrap_or(0);
                    let id = if index == 0 { 7 } else { 3 };
                    serde_json::json!({"result": format!("0x{}", enc_uint(id))})
                }
                _ => serde_json::json!({"error": {"message": "unknown selector"}}),
            }
        }))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    let ids = ledger
        .owner_token_ids(&recipient(), Network::Sepolia)
        .await
        .unwrap();
    assert_eq!(ids, vec![TokenId(7), TokenId(3)]);
}

#[tokio::test]
async fn owner_token_ids_propagates_read_failures() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(|_: &str, _: &serde_json::Value| {
            serde_json::json!({"error": {"message": "node unavailable"}})
        }))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    match ledger
        .owner_token_ids(&recipient(), Network::Sepolia)
        .await
        .unwrap_err()
    {
        LedgerError::ReadFailed { reason, .. } => assert!(reason.contains("node unavailable")),
        other => panic!("expected ReadFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn token_uri_decodes_string_return() {
    let server = MockServer::start().await;
    let blob = format!("0x{}{}", enc_uint(32), enc_string_tail("ipfs://bafybeimeta1"));

    Mock::given(wiremock::matchers::method("POST"))
        .respond_with(Rpc(move |_: &str, _: &serde_json::Value| serde_json::json!({"result": blob})))
        .mount(&server)
        .await;

    let ledger = test_ledger(&server).await;
    let uri = ledger.token_uri(TokenId(1), Network::Sepolia).await.unwrap();
    assert_eq!(uri, "ipfs://bafybeimeta1");
}
