//! Claim Metadata Module Implementation
//!
//! Resolves which user-store attribute backs a claim, and seeds each
//! tenant's claim model from a flat legacy claim map on first use.
//! The public API is defined in `claim-metadata-sdk` and re-exported here.
//!
//! ## Architecture
//!
//! - **One-time import**: a tenant with no dialects is seeded under a per-tenant lock
//! - **Two repository sets**: direct writes for import, `moka`-cached reads for resolution
//! - **Single resolution path**: local match, external bridge, then the attribute fallback chain

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === PUBLIC API (from SDK) ===
pub use claim_metadata_sdk::{
    AttributeMapping, Claim, ClaimMapping, ClaimMetadataError, ClaimMetadataStore,
    ClaimProperties, Dialect, ExternalClaim, ListenerDecision, LocalClaim, ResolutionListener,
    TenantId,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::ClaimMetadataModule;

// === CONFIGURATION ===
pub mod config;
pub mod legacy;
pub use config::ClaimMetadataConfig;
pub use legacy::{LegacyClaimConfig, LegacyClaimEntry};

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
#[doc(hidden)]
pub mod local_client;
