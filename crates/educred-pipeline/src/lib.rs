//! # educred-pipeline — Issuance Pipelines and Verification Lookup
//!
//! The coordination layer of the EduCred stack. Adapters (`ContentStore`,
//! `Ledger`) do the I/O; this crate sequences them:
//!
//! - [`issue`] — the single-issuance state machine: store certificate file,
//!   store metadata, mint, in that strict order.
//! - [`run_bulk`] — the bulk runner: filtered CSV rows, processed strictly
//!   sequentially with per-row outcome isolation and a fixed inter-row
//!   delay.
//! - [`verify`] — the read-path lookup that never propagates an error past
//!   its boundary.
//!
//! ## Key Design Principles
//!
//! 1. **Preconditions before I/O.** Wallet session and required inputs are
//!    checked at `Idle`; no adapter is contacted for an invalid submission.
//! 2. **Adapter errors surface verbatim.** Pipelines add the failing stage,
//!    never rewrite the underlying error.
//! 3. **No hidden recovery.** No retry, no rollback of stored content, no
//!    per-row compensation. Failure handling is the caller's decision.
//! 4. **Explicit session context.** Every pipeline call takes the
//!    [`educred_core::WalletSession`] as a value; nothing reads ambient
//!    connection state.

pub mod bulk;
pub mod error;
pub mod issue;
pub mod verify;

pub use bulk::{
    certificate_text, parse_rows, run_bulk, sample_csv, BulkConfig, BulkOutcome, BulkRow,
};
pub use error::{IssueError, IssueFailure};
pub use issue::{issue, CertificateFile, IssueReceipt, IssueRequest, IssueStage};
pub use verify::{verify, VerificationOutcome};
