//! Module declaration for the claim metadata module.

use std::sync::Arc;

use claim_metadata_sdk::{ClaimMetadataStore, ResolutionListener, TenantId};
use tracing::{debug, info};

use crate::config::ClaimMetadataConfig;
use crate::domain::{
    ImportPolicies, InitOutcome, LegacyImporter, RealmConfigurationProvider, Service,
    StaticRealmConfiguration, TenantInitializer,
};
use crate::infra::ClaimRepositories;
use crate::local_client::ClaimMetadataLocalClient;

/// Claim metadata module.
///
/// Owns the repositories and hands out tenant-bound [`ClaimMetadataStore`]s.
/// The first store requested for a tenant with no dialects seeds it from the
/// configured legacy claim map.
///
/// ```ignore
/// let module = ClaimMetadataModule::from_config(config).with_listener(audit);
/// let store = module.store_for_tenant(tenant_id);
/// let attr = store.get_attribute_name("PRIMARY", "http://wso2.org/claims/givenname")?;
/// ```
pub struct ClaimMetadataModule {
    repos: ClaimRepositories,
    realm: Arc<dyn RealmConfigurationProvider>,
    listeners: Vec<Arc<dyn ResolutionListener>>,
    initializer: TenantInitializer,
}

impl ClaimMetadataModule {
    /// Wires the module over existing repositories and realm configuration.
    ///
    /// The importer attributes legacy primary attributes to
    /// `config.primary_domain`; resolution asks `realm` per tenant.
    #[must_use]
    pub fn new(
        config: ClaimMetadataConfig,
        repos: ClaimRepositories,
        realm: Arc<dyn RealmConfigurationProvider>,
    ) -> Self {
        info!(
            primary_domain = %config.primary_domain,
            legacy_claims = config.legacy_claims.as_ref().map_or(0, |l| l.claims.len()),
            "initializing claim-metadata module"
        );

        let importer = LegacyImporter::new(
            repos.direct.clone(),
            Arc::new(StaticRealmConfiguration::new(config.primary_domain)),
            ImportPolicies {
                duplicate_domain_mapping: config.duplicate_domain_mapping,
                orphan_external_claims: config.orphan_external_claims,
            },
        );
        let initializer = TenantInitializer::new(
            repos.direct.dialects.clone(),
            importer,
            config.legacy_claims.unwrap_or_default(),
        );

        Self {
            repos,
            realm,
            listeners: Vec::new(),
            initializer,
        }
    }

    /// In-memory repositories, and the configured primary domain for every tenant.
    #[must_use]
    pub fn from_config(config: ClaimMetadataConfig) -> Self {
        let repos = ClaimRepositories::in_memory(&config.cache);
        let realm = Arc::new(StaticRealmConfiguration::new(config.primary_domain.clone()));
        Self::new(config, repos, realm)
    }

    /// Registers a listener consulted by every store this module creates.
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn ResolutionListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Seeds `tenant_id` from the legacy claim map if it has no dialects.
    ///
    /// The import writes past the caches, so a successful import drops any
    /// cached view of the tenant read before it.
    #[must_use]
    pub fn initialize_tenant(&self, tenant_id: TenantId) -> InitOutcome {
        let outcome = self.initializer.ensure_initialized(tenant_id);
        if matches!(outcome, InitOutcome::Imported(_)) {
            self.repos.cached.invalidate_tenant(tenant_id);
            debug!(tenant_id = %tenant_id, "dropped cached claim metadata after import");
        }
        outcome
    }

    /// Returns a store bound to `tenant_id`, initializing the tenant first.
    ///
    /// Never fails: initialization problems are logged and the store is
    /// returned regardless.
    #[must_use]
    #[tracing::instrument(skip_all, fields(tenant_id = %tenant_id))]
    pub fn store_for_tenant(&self, tenant_id: TenantId) -> Arc<dyn ClaimMetadataStore> {
        if let InitOutcome::Imported(report) = self.initialize_tenant(tenant_id) {
            info!(
                dialects = report.dialects_created,
                local_claims = report.local_claims_created,
                external_claims = report.external_claims_created,
                "tenant seeded from legacy claim config"
            );
        }

        let service = Service::new(
            tenant_id,
            self.repos.cached.clone(),
            self.realm.clone(),
            self.listeners.clone(),
        );
        Arc::new(ClaimMetadataLocalClient::new(Arc::new(service)))
    }

    /// Direct and cache-backed repositories used by this module.
    #[must_use]
    pub fn repositories(&self) -> &ClaimRepositories {
        &self.repos
    }
}
