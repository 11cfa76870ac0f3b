//! # Single-Issuance Pipeline
//!
//! Sequential three-step orchestration: store the certificate file, store
//! the metadata document referencing it, then mint. Stages are strictly
//! ordered and each step's success is the precondition for the next:
//!
//! ```text
//! Idle -> UploadingFile -> UploadingMetadata -> Minting -> Confirmed
//! ```
//!
//! Any failure terminates the run; [`IssueFailure`] records which stage was
//! in progress. Preconditions (wallet session, certificate file, non-empty
//! labels) are checked at `Idle`, before any adapter call. There is no
//! rollback of already-stored content on a later failure — an uploaded but
//! unminted file is an accepted orphan — and no built-in retry: a failed
//! run is resubmitted by the caller.

use chrono::{SecondsFormat, Utc};
use educred_core::{ContentId, CredentialMetadata, EthAddress, TxHash, WalletSession};
use educred_ledger::{Ledger, MintRequest};
use educred_storage::{gateway, ContentStore};

use crate::error::{IssueError, IssueFailure};

/// Pipeline stage. `Failed` is implicit: a run that returns [`IssueFailure`]
/// is terminal, and the failure names the stage it died in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStage {
    Idle,
    UploadingFile,
    UploadingMetadata,
    Minting,
    Confirmed,
}

impl std::fmt::Display for IssueStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            IssueStage::Idle => "idle",
            IssueStage::UploadingFile => "uploading certificate file",
            IssueStage::UploadingMetadata => "uploading metadata",
            IssueStage::Minting => "minting",
            IssueStage::Confirmed => "confirmed",
        })
    }
}

/// Certificate file content as submitted by the caller.
#[derive(Debug, Clone)]
pub struct CertificateFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// One issuance submission.
#[derive(Debug, Clone)]
pub struct IssueRequest {
    /// Wallet the credential is minted to.
    pub recipient: EthAddress,
    /// Issuing institution label. Must be non-empty.
    pub institution: String,
    /// Course or program label. Must be non-empty.
    pub course_name: String,
    /// The certificate file. Absence fails the run before any adapter call.
    pub certificate: Option<CertificateFile>,
    /// Recipient display name. Set by the bulk pipeline; when present the
    /// metadata carries a `Recipient` attribute instead of the single-issue
    /// `Certificate CID` attribute.
    pub recipient_name: Option<String>,
}

impl IssueRequest {
    pub fn new(
        recipient: EthAddress,
        institution: impl Into<String>,
        course_name: impl Into<String>,
        certificate: CertificateFile,
    ) -> Self {
        Self {
            recipient,
            institution: institution.into(),
            course_name: course_name.into(),
            certificate: Some(certificate),
            recipient_name: None,
        }
    }
}

/// What a confirmed run exposes to the caller.
#[derive(Debug, Clone)]
pub struct IssueReceipt {
    /// Hash of the confirmed mint transaction.
    pub tx_hash: TxHash,
    /// Content identifier of the stored certificate file.
    pub content_id: ContentId,
    /// Content identifier of the stored metadata document (what the minted
    /// token references).
    pub metadata_content_id: ContentId,
}

/// Run the single-issuance pipeline to completion.
///
/// # Errors
///
/// [`IssueFailure`] at `Idle` for precondition failures (missing session,
/// missing file, empty labels) — no adapter is contacted in that case.
/// Later stages carry the adapter's error unchanged.
pub async fn issue(
    store: &dyn ContentStore,
    ledger: &dyn Ledger,
    session: Option<&WalletSession>,
    request: &IssueRequest,
) -> Result<IssueReceipt, IssueFailure> {
    let session = session.ok_or_else(|| {
        IssueFailure::at(IssueStage::Idle, IssueError::WalletNotConnected)
    })?;
    let file = request.certificate.as_ref().ok_or_else(|| {
        IssueFailure::at(
            IssueStage::Idle,
            IssueError::MissingRequiredInput("certificate file"),
        )
    })?;
    if request.institution.trim().is_empty() {
        return Err(IssueFailure::at(
            IssueStage::Idle,
            IssueError::MissingRequiredInput("institution"),
        ));
    }
    if request.course_name.trim().is_empty() {
        return Err(IssueFailure::at(
            IssueStage::Idle,
            IssueError::MissingRequiredInput("course name"),
        ));
    }

    tracing::info!(
        recipient = %request.recipient.short(),
        course = %request.course_name,
        network = session.network.name(),
        "issuance started, uploading certificate file"
    );
    let content_id = store
        .store(&file.bytes, &file.filename)
        .await
        .map_err(|e| IssueFailure::at(IssueStage::UploadingFile, e))?;

    tracing::info!(%content_id, "certificate stored, uploading metadata");
    let metadata = build_metadata(request, &content_id);
    let metadata_content_id = store
        .store_metadata(&metadata)
        .await
        .map_err(|e| IssueFailure::at(IssueStage::UploadingMetadata, e))?;

    tracing::info!(metadata_content_id = %metadata_content_id, "metadata stored, minting");
    let mint = MintRequest {
        recipient: request.recipient.clone(),
        institution: request.institution.clone(),
        course_name: request.course_name.clone(),
        content_id: metadata_content_id.clone(),
    };
    let tx_hash = ledger
        .mint(&mint, session.network)
        .await
        .map_err(|e| IssueFailure::at(IssueStage::Minting, e))?;

    tracing::info!(%tx_hash, "issuance confirmed");
    Ok(IssueReceipt {
        tx_hash,
        content_id,
        metadata_content_id,
    })
}

/// Metadata document for a stored certificate file.
fn build_metadata(request: &IssueRequest, content_id: &ContentId) -> CredentialMetadata {
    let issued = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let base = CredentialMetadata::for_course(
        &request.course_name,
        &request.institution,
        gateway::resolve(content_id),
    )
    .with_attribute("Institution", request.institution.clone())
    .with_attribute("Course", request.course_name.clone());

    match &request.recipient_name {
        Some(name) => base
            .with_attribute("Recipient", name.clone())
            .with_attribute("Issue Date", issued),
        None => base
            .with_attribute("Issue Date", issued)
            .with_attribute("Certificate CID", content_id.as_str()),
    }
}
