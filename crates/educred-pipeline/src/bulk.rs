//! # Bulk-Issuance Pipeline
//!
//! Parses tabular input (CSV with a header row), filters it to rows with a
//! non-empty name, course, and wallet, and runs the single-issuance steps
//! per row, strictly sequentially. Each row gets an independent
//! [`BulkOutcome`]; one row's failure never aborts or skips later rows. A
//! fixed delay is imposed after every row (success or failure) because the
//! underlying wallet signing flow is single-flow per session.
//!
//! There is no maximum batch size and no checkpoint/resume: interrupting a
//! run keeps the effect of already-confirmed mints and abandons the rest.

use std::io::Read;
use std::time::Duration;

use educred_core::{EthAddress, TxHash, WalletSession};
use educred_ledger::Ledger;
use educred_storage::ContentStore;
use serde::{Deserialize, Serialize};

use crate::error::{IssueError, IssueFailure};
use crate::issue::{issue, CertificateFile, IssueRequest, IssueStage};

/// One parsed input row.
///
/// All fields default to empty so that partially-filled rows deserialize
/// and are dropped by the filter instead of failing the whole parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub wallet: String,
    #[serde(default)]
    pub institution: String,
}

impl BulkRow {
    /// Whether the row enters the working set: name, course, and wallet all
    /// non-empty. Rows failing this are dropped silently, not reported.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.course.trim().is_empty()
            && !self.wallet.trim().is_empty()
    }
}

/// Parse CSV input (header row required) into the filtered working set,
/// preserving input order.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<BulkRow>, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<BulkRow>() {
        let row = record?;
        if row.is_complete() {
            rows.push(row);
        } else {
            tracing::debug!(name = %row.name, "dropping incomplete bulk row");
        }
    }
    Ok(rows)
}

/// Plain-text certificate artifact for one row.
///
/// The full row, including the recipient's wallet address, is embedded in
/// cleartext and lands in a publicly resolvable content store entry.
pub fn certificate_text(row: &BulkRow, date: &str) -> String {
    format!(
        "CERTIFICATE OF COMPLETION\n\n\
         This is to certify that\n\n\
         {}\n\n\
         has successfully completed the course\n\n\
         {}\n\n\
         Issued by: {}\n\
         Date: {}\n\
         Wallet: {}\n",
        row.name, row.course, row.institution, date, row.wallet
    )
}

/// Filename for a row's certificate artifact.
fn certificate_filename(row: &BulkRow) -> String {
    let course: String = row
        .course
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}.txt", row.name, course)
}

/// Bulk run tuning.
#[derive(Debug, Clone)]
pub struct BulkConfig {
    /// Delay imposed after every row, success or failure.
    pub inter_row_delay: Duration,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            inter_row_delay: Duration::from_secs(1),
        }
    }
}

/// Outcome of one row: the transaction hash of a confirmed mint, or the
/// error message the row died with. Exists only for the duration of the
/// run; nothing persists it.
#[derive(Debug, Clone)]
pub struct BulkOutcome {
    pub name: String,
    pub result: Result<TxHash, String>,
}

impl BulkOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run the bulk pipeline over an already-filtered working set.
///
/// Result order equals input row order. The only whole-run failure is a
/// missing wallet session, raised before any row is attempted; everything
/// else is recorded per row.
pub async fn run_bulk(
    store: &dyn ContentStore,
    ledger: &dyn Ledger,
    session: Option<&WalletSession>,
    rows: &[BulkRow],
    config: &BulkConfig,
) -> Result<Vec<BulkOutcome>, IssueFailure> {
    let session = session.ok_or_else(|| {
        IssueFailure::at(IssueStage::Idle, IssueError::WalletNotConnected)
    })?;

    let mut outcomes = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        tracing::info!(
            name = %row.name,
            position = index + 1,
            total = rows.len(),
            "processing bulk row"
        );

        let result = process_row(store, ledger, session, row).await;
        if let Err(message) = &result {
            tracing::warn!(name = %row.name, %message, "bulk row failed");
        }
        outcomes.push(BulkOutcome {
            name: row.name.clone(),
            result,
        });

        tokio::time::sleep(config.inter_row_delay).await;
    }
    Ok(outcomes)
}

async fn process_row(
    store: &dyn ContentStore,
    ledger: &dyn Ledger,
    session: &WalletSession,
    row: &BulkRow,
) -> Result<TxHash, String> {
    let recipient = EthAddress::new(row.wallet.trim()).map_err(|e| e.to_string())?;

    let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let certificate = CertificateFile {
        filename: certificate_filename(row),
        bytes: certificate_text(row, &date).into_bytes(),
    };

    let request = IssueRequest {
        recipient,
        institution: row.institution.clone(),
        course_name: row.course.clone(),
        certificate: Some(certificate),
        recipient_name: Some(row.name.clone()),
    };

    issue(store, ledger, Some(session), &request)
        .await
        .map(|receipt| receipt.tx_hash)
        .map_err(|e| e.to_string())
}

/// The reference CSV content, in `name,course,wallet,institution` column
/// order, with the two sample rows.
pub fn sample_csv() -> String {
    let rows = [
        BulkRow {
            name: "John Doe".into(),
            course: "Blockchain Fundamentals".into(),
            wallet: "0x742d35Cc6634C0532925a3b844Bc454e4438f44e".into(),
            institution: "MIT".into(),
        },
        BulkRow {
            name: "Jane Smith".into(),
            course: "Advanced Cryptography".into(),
            wallet: "0x123456789abcdef123456789abcdef123456789a".into(),
            institution: "Stanford".into(),
        },
    ];

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in &rows {
        if writer.serialize(row).is_err() {
            break;
        }
    }
    writer
        .into_inner()
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default()
}
