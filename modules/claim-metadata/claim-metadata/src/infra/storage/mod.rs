//! Storage implementations for the claim metadata module.

pub mod cached_repo;
pub mod in_memory_repo;

use std::sync::Arc;

pub use cached_repo::{
    CachedDialectRepository, CachedExternalClaimRepository, CachedLocalClaimRepository,
};
pub use in_memory_repo::{
    InMemoryDialectRepository, InMemoryExternalClaimRepository, InMemoryLocalClaimRepository,
};

use crate::config::CacheConfig;
use crate::domain::repo::RepositorySet;

/// Direct and cache-backed repositories sharing one backing store.
#[derive(Clone)]
pub struct ClaimRepositories {
    /// Used by the importer.
    pub direct: RepositorySet,
    /// Used by resolution and legacy reads.
    pub cached: RepositorySet,
}

impl ClaimRepositories {
    /// Wraps `direct` with read-through caches.
    #[must_use]
    pub fn with_cache(direct: RepositorySet, config: &CacheConfig) -> Self {
        let cached = RepositorySet {
            dialects: Arc::new(CachedDialectRepository::new(
                direct.dialects.clone(),
                config,
            )),
            local_claims: Arc::new(CachedLocalClaimRepository::new(
                direct.local_claims.clone(),
                config,
            )),
            external_claims: Arc::new(CachedExternalClaimRepository::new(
                direct.external_claims.clone(),
                config,
            )),
        };
        Self { direct, cached }
    }

    /// Fresh in-memory store with caches on top.
    #[must_use]
    pub fn in_memory(config: &CacheConfig) -> Self {
        let direct = RepositorySet {
            dialects: Arc::new(InMemoryDialectRepository::new()),
            local_claims: Arc::new(InMemoryLocalClaimRepository::new()),
            external_claims: Arc::new(InMemoryExternalClaimRepository::new()),
        };
        Self::with_cache(direct, config)
    }
}
