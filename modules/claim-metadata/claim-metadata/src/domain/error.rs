//! Domain error types for the claim metadata module.

use claim_metadata_sdk::ClaimMetadataError;
use thiserror::Error;

/// Domain-level errors for claim metadata operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// A required argument was blank.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A record with the same key already exists for the tenant.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The fallback chain found no attribute for the claim.
    #[error("Cannot find suitable mapped attribute for local claim {claim_uri}")]
    NoMappedAttribute { claim_uri: String },

    /// Management operation requested on the read-only store.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl DomainError {
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    #[must_use]
    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists(key.into())
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    #[must_use]
    pub fn no_mapped_attribute(claim_uri: impl Into<String>) -> Self {
        Self::NoMappedAttribute {
            claim_uri: claim_uri.into(),
        }
    }

    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Invalid arguments are the caller's responsibility and are not logged.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<DomainError> for ClaimMetadataError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidArgument(msg) => ClaimMetadataError::invalid_argument(msg),
            DomainError::NoMappedAttribute { claim_uri } => {
                ClaimMetadataError::no_mapped_attribute(claim_uri)
            }
            DomainError::Unsupported(msg) => ClaimMetadataError::unsupported(msg),
            e @ (DomainError::AlreadyExists(_) | DomainError::Storage(_)) => {
                ClaimMetadataError::store(e.to_string())
            }
        }
    }
}
