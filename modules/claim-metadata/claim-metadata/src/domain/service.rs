//! Claim attribute resolution and legacy read views for one tenant.

use std::sync::Arc;

use claim_metadata_sdk::{Claim, ClaimMapping, LocalClaim, ResolutionListener, TenantId, is_local_dialect};
use tracing::debug;

use super::error::DomainError;
use super::ports::RealmConfigurationProvider;
use super::projection::{convert_external_claim, convert_local_claim};
use super::repo::RepositorySet;

/// Tenant-bound claim metadata service.
///
/// Reads go through the cache-backed repositories on every call. The service
/// holds no state besides its collaborators and is cheap to rebuild.
pub struct Service {
    tenant_id: TenantId,
    repos: RepositorySet,
    realm: Arc<dyn RealmConfigurationProvider>,
    listeners: Vec<Arc<dyn ResolutionListener>>,
}

impl Service {
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        repos: RepositorySet,
        realm: Arc<dyn RealmConfigurationProvider>,
        listeners: Vec<Arc<dyn ResolutionListener>>,
    ) -> Self {
        Self {
            tenant_id,
            repos,
            realm,
            listeners,
        }
    }

    /// All local claim URIs in repository order, or `None` if a listener stops the call.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the local claims cannot be read.
    pub fn all_claim_uris(&self) -> Result<Option<Vec<String>>, DomainError> {
        if self
            .listeners
            .iter()
            .any(|l| l.before_get_all_claim_uris().is_stop())
        {
            debug!(tenant_id = %self.tenant_id, "listener stopped get_all_claim_uris");
            return Ok(None);
        }

        let claims = self.repos.local_claims.list(self.tenant_id)?;
        Ok(Some(claims.into_iter().map(|c| c.claim_uri).collect()))
    }

    /// Resolves the attribute backing `claim_uri`.
    ///
    /// `domain_name` of `None` means the tenant's primary domain.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `claim_uri` or a given `domain_name` is blank
    /// - `NoMappedAttribute` if a claim matches but has no usable attribute
    /// - storage errors from the repositories or the realm lookup
    pub fn resolve_attribute_name(
        &self,
        domain_name: Option<&str>,
        claim_uri: &str,
    ) -> Result<Option<String>, DomainError> {
        if domain_name.is_some_and(|d| d.trim().is_empty()) {
            return Err(DomainError::invalid_argument(
                "user store domain name cannot be empty",
            ));
        }
        if claim_uri.trim().is_empty() {
            return Err(DomainError::invalid_argument("claim URI cannot be empty"));
        }

        let domain_name = match domain_name {
            Some(domain) => domain.to_owned(),
            None => self.realm.primary_domain(self.tenant_id)?,
        };

        if self
            .listeners
            .iter()
            .any(|l| l.before_get_attribute_name(&domain_name, claim_uri).is_stop())
        {
            debug!(
                tenant_id = %self.tenant_id,
                domain = %domain_name,
                claim_uri,
                "listener stopped get_attribute_name"
            );
            return Ok(None);
        }

        let local_claims = self.repos.local_claims.list(self.tenant_id)?;
        let Some(local) = self.correlate(claim_uri, &local_claims)? else {
            debug!(
                tenant_id = %self.tenant_id,
                domain = %domain_name,
                claim_uri,
                "no claim matched, returning none"
            );
            return Ok(None);
        };
        self.mapped_attribute(local, &domain_name).map(Some)
    }

    /// Legacy claim for a local or external claim URI.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repositories or the realm lookup.
    pub fn get_claim(&self, claim_uri: &str) -> Result<Option<Claim>, DomainError> {
        Ok(self.get_claim_mapping(claim_uri)?.map(|m| m.claim))
    }

    /// Legacy mapping for a local or external claim URI.
    ///
    /// An external claim URI yields the mapping of the local claim it refers to.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repositories or the realm lookup.
    pub fn get_claim_mapping(&self, claim_uri: &str) -> Result<Option<ClaimMapping>, DomainError> {
        let local_claims = self.repos.local_claims.list(self.tenant_id)?;
        let Some(local) = self.correlate(claim_uri, &local_claims)? else {
            debug!(tenant_id = %self.tenant_id, claim_uri, "no claim matched, returning none");
            return Ok(None);
        };
        let primary_domain = self.realm.primary_domain(self.tenant_id)?;
        Ok(Some(convert_local_claim(local, &primary_domain)))
    }

    /// Legacy mappings for a dialect. `None` selects the local dialect.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repositories or the realm lookup.
    pub fn get_all_claim_mappings(
        &self,
        dialect_uri: Option<&str>,
    ) -> Result<Vec<ClaimMapping>, DomainError> {
        let primary_domain = self.realm.primary_domain(self.tenant_id)?;
        let local_claims = self.repos.local_claims.list(self.tenant_id)?;

        match dialect_uri {
            Some(dialect) if !is_local_dialect(dialect) => {
                let external_claims = self.repos.external_claims.list(self.tenant_id, dialect)?;
                Ok(external_claims
                    .iter()
                    .map(|e| convert_external_claim(e, &local_claims, &primary_domain))
                    .collect())
            }
            _ => Ok(local_claims
                .iter()
                .map(|l| convert_local_claim(l, &primary_domain))
                .collect()),
        }
    }

    /// Local mappings whose claim is supported by default.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repositories or the realm lookup.
    pub fn get_supported_by_default_mappings(&self) -> Result<Vec<ClaimMapping>, DomainError> {
        self.local_mappings_where(|c| c.supported_by_default)
    }

    /// Local mappings whose claim is required.
    ///
    /// # Errors
    ///
    /// Returns storage errors from the repositories or the realm lookup.
    pub fn get_required_mappings(&self) -> Result<Vec<ClaimMapping>, DomainError> {
        self.local_mappings_where(|c| c.required)
    }

    fn local_mappings_where(
        &self,
        keep: impl Fn(&Claim) -> bool,
    ) -> Result<Vec<ClaimMapping>, DomainError> {
        Ok(self
            .get_all_claim_mappings(None)?
            .into_iter()
            .filter(|m| keep(&m.claim))
            .collect())
    }

    /// Finds the local claim `claim_uri` stands for.
    ///
    /// Local claims are matched first. Otherwise external claims of every
    /// non-local dialect are scanned, and the first one whose mapped local
    /// claim exists wins.
    fn correlate<'a>(
        &self,
        claim_uri: &str,
        local_claims: &'a [LocalClaim],
    ) -> Result<Option<&'a LocalClaim>, DomainError> {
        if let Some(local) = local_claims.iter().find(|c| c.matches_uri(claim_uri)) {
            return Ok(Some(local));
        }

        for dialect in self.repos.dialects.list(self.tenant_id)? {
            if dialect.is_local() {
                continue;
            }
            let external_claims = self.repos.external_claims.list(self.tenant_id, &dialect.uri)?;
            for external in external_claims.iter().filter(|e| e.matches_uri(claim_uri)) {
                if let Some(local) = local_claims.iter().find(|l| external.refers_to(l)) {
                    debug!(
                        tenant_id = %self.tenant_id,
                        external_claim = %external.claim_uri,
                        dialect_uri = %external.dialect_uri,
                        local_claim = %local.claim_uri,
                        "resolved external claim through its local claim"
                    );
                    return Ok(Some(local));
                }
            }
        }

        Ok(None)
    }

    /// Fallback chain: requested domain, default attribute, tenant primary domain.
    fn mapped_attribute(&self, local: &LocalClaim, domain_name: &str) -> Result<String, DomainError> {
        if let Some(attribute) = local.mapped_attribute(domain_name) {
            debug!(
                tenant_id = %self.tenant_id,
                claim_uri = %local.claim_uri,
                domain = domain_name,
                attribute,
                "mapped attribute from requested domain"
            );
            return Ok(attribute.to_owned());
        }

        if let Some(attribute) = local.properties.default_attribute() {
            debug!(
                tenant_id = %self.tenant_id,
                claim_uri = %local.claim_uri,
                attribute,
                "mapped attribute from default attribute property"
            );
            return Ok(attribute.to_owned());
        }

        let primary_domain = self.realm.primary_domain(self.tenant_id)?;
        if let Some(attribute) = local.mapped_attribute(&primary_domain) {
            debug!(
                tenant_id = %self.tenant_id,
                claim_uri = %local.claim_uri,
                domain = %primary_domain,
                attribute,
                "mapped attribute from primary domain"
            );
            return Ok(attribute.to_owned());
        }

        Err(DomainError::no_mapped_attribute(local.claim_uri.clone()))
    }
}
