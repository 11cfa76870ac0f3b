//! # educred-core — Foundational Types for the EduCred Stack
//!
//! This crate is the bedrock of the EduCred credential issuance stack. It
//! defines the type-system primitives shared by every other crate in the
//! workspace; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `TokenId`, `EthAddress`,
//!    `ContentId`, `TxHash` — all newtypes with validated constructors.
//!    No bare strings for identifiers.
//!
//! 2. **Static network registry.** Every ledger call is scoped to an explicit
//!    [`Network`]. The registry maps a network to its RPC endpoint and
//!    contract address; an unmapped network is a hard
//!    [`CoreError::UnsupportedNetwork`], never a silent default.
//!
//! 3. **Explicit session context.** The connected wallet and active network
//!    travel as a [`WalletSession`] value passed into every pipeline call.
//!    There is no ambient global session state.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `educred-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` where they cross a wire or file boundary.

pub mod error;
pub mod identity;
pub mod network;
pub mod record;
pub mod session;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use identity::{ContentId, EthAddress, TokenId, TxHash};
pub use network::{DeployedContract, Network, NetworkProfile};
pub use record::{CredentialMetadata, CredentialRecord, MetadataAttribute};
pub use session::WalletSession;
