//! Error types for the claim metadata module.

use thiserror::Error;

/// Errors that can occur when using the claim metadata API.
#[derive(Debug, Error)]
pub enum ClaimMetadataError {
    /// A required argument was blank.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying repository failed. The message is preserved from the store.
    #[error("claim store error: {0}")]
    Store(String),

    /// The fallback chain found no attribute for a claim.
    ///
    /// The tenant's claim data is malformed and needs operator attention.
    #[error("cannot find suitable mapped attribute for local claim {claim_uri}")]
    NoMappedAttribute {
        /// The local claim that has no usable mapping.
        claim_uri: String,
    },

    /// Management operations are not available through the store.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl ClaimMetadataError {
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    #[must_use]
    pub fn no_mapped_attribute(claim_uri: impl Into<String>) -> Self {
        Self::NoMappedAttribute {
            claim_uri: claim_uri.into(),
        }
    }

    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedOperation(message.into())
    }

    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    #[must_use]
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    #[must_use]
    pub fn is_no_mapped_attribute(&self) -> bool {
        matches!(self, Self::NoMappedAttribute { .. })
    }

    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation(_))
    }
}
