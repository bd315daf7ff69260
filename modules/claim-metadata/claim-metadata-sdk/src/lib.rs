//! Claim Metadata SDK
//!
//! This crate provides the public API for the `claim-metadata` module:
//!
//! - [`ClaimMetadataStore`] - Tenant-bound resolution and legacy read API
//! - [`ResolutionListener`] - Hook invoked before resolution calls
//! - [`Dialect`], [`LocalClaim`], [`ExternalClaim`], [`AttributeMapping`] - Claim model
//! - [`Claim`], [`ClaimMapping`] - Legacy flat projections
//! - [`ClaimMetadataError`] - Error types
//!
//! ## Usage
//!
//! Consumers obtain a store for a tenant from the module:
//!
//! ```ignore
//! use claim_metadata_sdk::ClaimMetadataStore;
//!
//! let store = module.store_for_tenant(tenant_id);
//!
//! // Resolve the attribute backing a claim in a user-store domain
//! let attr = store.get_attribute_name("PRIMARY", "http://wso2.org/claims/emailaddress")?;
//!
//! // Legacy projection of the whole local dialect
//! let mappings = store.get_all_claim_mappings(None)?;
//! ```

pub mod api;
pub mod constants;
pub mod error;
pub mod listener;
pub mod models;

// Re-export main types at crate root
pub use api::ClaimMetadataStore;
pub use constants::LOCAL_CLAIM_DIALECT_URI;
pub use error::ClaimMetadataError;
pub use listener::{ListenerDecision, ResolutionListener};
pub use models::{
    AttributeMapping, Claim, ClaimMapping, ClaimProperties, Dialect, ExternalClaim, LocalClaim,
    TenantId, is_local_dialect,
};
