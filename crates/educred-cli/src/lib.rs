//! # educred-cli — EduCred Command-Line Interface
//!
//! Thin composition layer over the domain crates. Argument parsing lives
//! in each handler module's `Args` struct; the handler functions delegate
//! to `educred-pipeline`, `educred-ledger`, and `educred-agent` — no
//! business logic here.
//!
//! ## Subcommands
//!
//! - `issue` — single credential issuance
//! - `bulk` — CSV bulk issuance (plus sample-file generation)
//! - `verify` — credential lookup by token identifier
//! - `list` — credentials owned by an address
//! - `uri` — metadata URI recorded for a token
//! - `agent` — free-text command interpretation
//!
//! ## Crate Policy
//!
//! - Adapters are assembled once, in [`context::build`]; `--demo` selects
//!   the mock implementations explicitly.
//! - `anyhow` is used only at this binary boundary; domain crates keep
//!   their typed errors.

pub mod agent;
pub mod bulk;
pub mod context;
pub mod issue;
pub mod list;
pub mod uri;
pub mod verify;
