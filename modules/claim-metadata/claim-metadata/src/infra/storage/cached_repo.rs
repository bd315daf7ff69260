//! Cache-backed repository wrappers.
//!
//! Each wrapper reads through to an inner repository and keeps the listed
//! records in a `moka` cache with TTL. A successful `add` invalidates the
//! affected entry.

use std::sync::Arc;

use claim_metadata_sdk::{Dialect, ExternalClaim, LocalClaim, TenantId};
use moka::sync::Cache;

use crate::config::CacheConfig;
use crate::domain::error::DomainError;
use crate::domain::repo::{DialectRepository, ExternalClaimRepository, LocalClaimRepository};

fn build_cache<K, V>(config: &CacheConfig) -> Cache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    Cache::builder()
        .max_capacity(config.max_entries)
        .time_to_live(config.ttl)
        .build()
}

/// Read-through cache over a [`DialectRepository`].
pub struct CachedDialectRepository {
    inner: Arc<dyn DialectRepository>,
    cache: Cache<TenantId, Arc<Vec<Dialect>>>,
}

impl CachedDialectRepository {
    #[must_use]
    pub fn new(inner: Arc<dyn DialectRepository>, config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: build_cache(config),
        }
    }
}

impl DialectRepository for CachedDialectRepository {
    fn list(&self, tenant_id: TenantId) -> Result<Vec<Dialect>, DomainError> {
        if let Some(hit) = self.cache.get(&tenant_id) {
            return Ok(hit.as_ref().clone());
        }
        let dialects = self.inner.list(tenant_id)?;
        self.cache.insert(tenant_id, Arc::new(dialects.clone()));
        Ok(dialects)
    }

    fn add(&self, dialect: &Dialect, tenant_id: TenantId) -> Result<(), DomainError> {
        self.inner.add(dialect, tenant_id)?;
        self.cache.invalidate(&tenant_id);
        Ok(())
    }

    fn invalidate_tenant(&self, tenant_id: TenantId) {
        self.cache.invalidate(&tenant_id);
    }
}

/// Read-through cache over a [`LocalClaimRepository`].
pub struct CachedLocalClaimRepository {
    inner: Arc<dyn LocalClaimRepository>,
    cache: Cache<TenantId, Arc<Vec<LocalClaim>>>,
}

impl CachedLocalClaimRepository {
    #[must_use]
    pub fn new(inner: Arc<dyn LocalClaimRepository>, config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: build_cache(config),
        }
    }
}

impl LocalClaimRepository for CachedLocalClaimRepository {
    fn list(&self, tenant_id: TenantId) -> Result<Vec<LocalClaim>, DomainError> {
        if let Some(hit) = self.cache.get(&tenant_id) {
            return Ok(hit.as_ref().clone());
        }
        let claims = self.inner.list(tenant_id)?;
        self.cache.insert(tenant_id, Arc::new(claims.clone()));
        Ok(claims)
    }

    fn add(&self, claim: &LocalClaim, tenant_id: TenantId) -> Result<(), DomainError> {
        self.inner.add(claim, tenant_id)?;
        self.cache.invalidate(&tenant_id);
        Ok(())
    }

    fn invalidate_tenant(&self, tenant_id: TenantId) {
        self.cache.invalidate(&tenant_id);
    }
}

/// Read-through cache over an [`ExternalClaimRepository`], keyed by tenant and dialect.
pub struct CachedExternalClaimRepository {
    inner: Arc<dyn ExternalClaimRepository>,
    cache: Cache<(TenantId, String), Arc<Vec<ExternalClaim>>>,
}

impl CachedExternalClaimRepository {
    #[must_use]
    pub fn new(inner: Arc<dyn ExternalClaimRepository>, config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: build_cache(config),
        }
    }

    // Dialect URIs compare case-insensitively.
    fn key(tenant_id: TenantId, dialect_uri: &str) -> (TenantId, String) {
        (tenant_id, dialect_uri.to_ascii_lowercase())
    }
}

impl ExternalClaimRepository for CachedExternalClaimRepository {
    fn list(
        &self,
        tenant_id: TenantId,
        dialect_uri: &str,
    ) -> Result<Vec<ExternalClaim>, DomainError> {
        let key = Self::key(tenant_id, dialect_uri);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit.as_ref().clone());
        }
        let claims = self.inner.list(tenant_id, dialect_uri)?;
        self.cache.insert(key, Arc::new(claims.clone()));
        Ok(claims)
    }

    fn add(&self, claim: &ExternalClaim, tenant_id: TenantId) -> Result<(), DomainError> {
        self.inner.add(claim, tenant_id)?;
        self.cache
            .invalidate(&Self::key(tenant_id, &claim.dialect_uri));
        Ok(())
    }

    fn invalidate_tenant(&self, tenant_id: TenantId) {
        let stale: Vec<_> = self
            .cache
            .iter()
            .filter(|(key, _)| key.0 == tenant_id)
            .map(|(key, _)| key)
            .collect();
        for key in stale {
            self.cache.invalidate(key.as_ref());
        }
    }
}
