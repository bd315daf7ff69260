//! Repository traits for claim metadata storage.
//!
//! Every operation is scoped by tenant. Two flavours of each repository are
//! wired by the module: a direct one used by the importer for bulk writes at
//! cold start, and a cache-backed one used by resolution and legacy reads.

use std::sync::Arc;

use claim_metadata_sdk::{Dialect, ExternalClaim, LocalClaim, TenantId};

use super::error::DomainError;

/// Storage for claim dialects.
pub trait DialectRepository: Send + Sync {
    /// Lists the tenant's dialects in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the backing store fails.
    fn list(&self, tenant_id: TenantId) -> Result<Vec<Dialect>, DomainError>;

    /// Adds a dialect to the tenant.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the tenant already has a dialect with the
    /// same URI (case-insensitive), or `Storage` if the backing store fails.
    fn add(&self, dialect: &Dialect, tenant_id: TenantId) -> Result<(), DomainError>;

    /// Drops any cached view of the tenant. Direct stores keep nothing to drop.
    fn invalidate_tenant(&self, _tenant_id: TenantId) {}
}

/// Storage for local claims.
pub trait LocalClaimRepository: Send + Sync {
    /// Lists the tenant's local claims in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the backing store fails.
    fn list(&self, tenant_id: TenantId) -> Result<Vec<LocalClaim>, DomainError>;

    /// Adds a local claim to the tenant.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` on a duplicate claim URI, or `Storage`.
    fn add(&self, claim: &LocalClaim, tenant_id: TenantId) -> Result<(), DomainError>;

    /// Drops any cached view of the tenant.
    fn invalidate_tenant(&self, _tenant_id: TenantId) {}
}

/// Storage for external claims, partitioned by dialect.
pub trait ExternalClaimRepository: Send + Sync {
    /// Lists the external claims of one dialect.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the backing store fails.
    fn list(
        &self,
        tenant_id: TenantId,
        dialect_uri: &str,
    ) -> Result<Vec<ExternalClaim>, DomainError>;

    /// Adds an external claim to its dialect.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` on a duplicate claim URI within the dialect, or `Storage`.
    fn add(&self, claim: &ExternalClaim, tenant_id: TenantId) -> Result<(), DomainError>;

    /// Drops any cached view of the tenant, across all dialects.
    fn invalidate_tenant(&self, _tenant_id: TenantId) {}
}

/// One handle per repository kind.
///
/// The module keeps two sets over the same backing store: a direct set for
/// import and a cache-backed set for reads.
#[derive(Clone)]
pub struct RepositorySet {
    pub dialects: Arc<dyn DialectRepository>,
    pub local_claims: Arc<dyn LocalClaimRepository>,
    pub external_claims: Arc<dyn ExternalClaimRepository>,
}

impl RepositorySet {
    /// Drops every cached view of the tenant held by this set.
    pub fn invalidate_tenant(&self, tenant_id: TenantId) {
        self.dialects.invalidate_tenant(tenant_id);
        self.local_claims.invalidate_tenant(tenant_id);
        self.external_claims.invalidate_tenant(tenant_id);
    }
}
