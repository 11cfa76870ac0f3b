//! # Credential Records and Metadata
//!
//! [`CredentialRecord`] is the unit of value: the decoded on-ledger state
//! of one minted credential. It is created by a successful issuance run
//! and read-only thereafter — this stack exposes no mutation or delete
//! operation for it.
//!
//! [`CredentialMetadata`] is the JSON document stored in the content store
//! and referenced by the minted token. Its shape follows the common NFT
//! metadata convention: name, description, image URL, and a list of
//! `{trait_type, value}` attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::{ContentId, EthAddress, TokenId};

/// Decoded on-ledger credential state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Ledger-assigned identifier, unique and never reused.
    pub token_id: TokenId,
    /// Wallet the credential was minted to. Immutable after mint.
    pub recipient: EthAddress,
    /// Issuing institution label.
    pub institution: String,
    /// Course or program label.
    pub course_name: String,
    /// Mint timestamp recorded by the ledger, unix seconds.
    pub issue_date: u64,
    /// Content identifier of the stored metadata. Immutable once recorded.
    pub content_id: ContentId,
    /// Ledger-side verification flag.
    pub verified: bool,
}

impl CredentialRecord {
    /// The issue date as a UTC datetime, if it is representable.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.issue_date as i64, 0)
    }
}

/// One `{trait_type, value}` attribute in stored metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttribute {
    pub trait_type: String,
    pub value: String,
}

/// Metadata document stored in the content store for a minted credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialMetadata {
    /// Display name, conventionally `"{course} Certificate"`.
    pub name: String,
    /// Description, conventionally `"Academic credential issued by {institution}"`.
    pub description: String,
    /// Resolved gateway URL of the certificate file.
    pub image: String,
    /// Attribute list (institution, course, issue date, and so on).
    #[serde(default)]
    pub attributes: Vec<MetadataAttribute>,
}

impl CredentialMetadata {
    /// Start a metadata document with the conventional name and description
    /// for a course credential.
    pub fn for_course(course_name: &str, institution: &str, image: impl Into<String>) -> Self {
        Self {
            name: format!("{course_name} Certificate"),
            description: format!("Academic credential issued by {institution}"),
            image: image.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, trait_type: &str, value: impl Into<String>) -> Self {
        self.attributes.push(MetadataAttribute {
            trait_type: trait_type.to_string(),
            value: value.into(),
        });
        self
    }
}
