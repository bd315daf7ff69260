//! Output ports for configuration lookups.

use std::collections::HashMap;

use claim_metadata_sdk::TenantId;

use super::error::DomainError;

/// Process-wide primary user-store domain name.
///
/// Used by the importer to attribute a legacy entry's single mapped attribute.
pub trait PrimaryDomainNameProvider: Send + Sync {
    fn primary_domain_name(&self) -> String;
}

/// Per-tenant realm configuration.
///
/// Used by resolution to find the tenant's primary domain. May differ from
/// the process-wide [`PrimaryDomainNameProvider`].
pub trait RealmConfigurationProvider: Send + Sync {
    /// Returns the primary user-store domain name configured for `tenant_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tenant's realm cannot be read.
    fn primary_domain(&self, tenant_id: TenantId) -> Result<String, DomainError>;
}

/// Fixed primary domain for every tenant, with optional per-tenant overrides.
#[derive(Debug, Clone)]
pub struct StaticRealmConfiguration {
    primary_domain: String,
    tenant_overrides: HashMap<TenantId, String>,
}

impl StaticRealmConfiguration {
    #[must_use]
    pub fn new(primary_domain: impl Into<String>) -> Self {
        Self {
            primary_domain: primary_domain.into(),
            tenant_overrides: HashMap::new(),
        }
    }

    /// Overrides the primary domain of one tenant.
    #[must_use]
    pub fn with_tenant(mut self, tenant_id: TenantId, primary_domain: impl Into<String>) -> Self {
        self.tenant_overrides
            .insert(tenant_id, primary_domain.into());
        self
    }
}

impl PrimaryDomainNameProvider for StaticRealmConfiguration {
    fn primary_domain_name(&self) -> String {
        self.primary_domain.clone()
    }
}

impl RealmConfigurationProvider for StaticRealmConfiguration {
    fn primary_domain(&self, tenant_id: TenantId) -> Result<String, DomainError> {
        Ok(self
            .tenant_overrides
            .get(&tenant_id)
            .unwrap_or(&self.primary_domain)
            .clone())
    }
}
