//! In-memory repository implementations.
//!
//! These are the direct (non-cached) repositories. Records are kept per
//! tenant in insertion order, and keys are unique case-insensitively, so a
//! second insert of the same dialect or claim fails with `AlreadyExists`.

use std::collections::HashMap;

use claim_metadata_sdk::{Dialect, ExternalClaim, LocalClaim, TenantId};
use parking_lot::RwLock;

use crate::domain::error::DomainError;
use crate::domain::repo::{DialectRepository, ExternalClaimRepository, LocalClaimRepository};

/// In-memory dialect storage.
#[derive(Default)]
pub struct InMemoryDialectRepository {
    dialects: RwLock<HashMap<TenantId, Vec<Dialect>>>,
}

impl InMemoryDialectRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DialectRepository for InMemoryDialectRepository {
    fn list(&self, tenant_id: TenantId) -> Result<Vec<Dialect>, DomainError> {
        Ok(self
            .dialects
            .read()
            .get(&tenant_id)
            .cloned()
            .unwrap_or_default())
    }

    fn add(&self, dialect: &Dialect, tenant_id: TenantId) -> Result<(), DomainError> {
        let mut dialects = self.dialects.write();
        let tenant = dialects.entry(tenant_id).or_default();
        if tenant.iter().any(|d| d.uri.eq_ignore_ascii_case(&dialect.uri)) {
            return Err(DomainError::already_exists(format!(
                "dialect {}",
                dialect.uri
            )));
        }
        tenant.push(dialect.clone());
        Ok(())
    }
}

/// In-memory local claim storage.
#[derive(Default)]
pub struct InMemoryLocalClaimRepository {
    claims: RwLock<HashMap<TenantId, Vec<LocalClaim>>>,
}

impl InMemoryLocalClaimRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalClaimRepository for InMemoryLocalClaimRepository {
    fn list(&self, tenant_id: TenantId) -> Result<Vec<LocalClaim>, DomainError> {
        Ok(self
            .claims
            .read()
            .get(&tenant_id)
            .cloned()
            .unwrap_or_default())
    }

    fn add(&self, claim: &LocalClaim, tenant_id: TenantId) -> Result<(), DomainError> {
        let mut claims = self.claims.write();
        let tenant = claims.entry(tenant_id).or_default();
        if tenant.iter().any(|c| c.matches_uri(&claim.claim_uri)) {
            return Err(DomainError::already_exists(format!(
                "local claim {}",
                claim.claim_uri
            )));
        }
        tenant.push(claim.clone());
        Ok(())
    }
}

/// In-memory external claim storage.
#[derive(Default)]
pub struct InMemoryExternalClaimRepository {
    claims: RwLock<HashMap<TenantId, Vec<ExternalClaim>>>,
}

impl InMemoryExternalClaimRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExternalClaimRepository for InMemoryExternalClaimRepository {
    fn list(
        &self,
        tenant_id: TenantId,
        dialect_uri: &str,
    ) -> Result<Vec<ExternalClaim>, DomainError> {
        Ok(self
            .claims
            .read()
            .get(&tenant_id)
            .map(|claims| {
                claims
                    .iter()
                    .filter(|c| c.dialect_uri.eq_ignore_ascii_case(dialect_uri))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn add(&self, claim: &ExternalClaim, tenant_id: TenantId) -> Result<(), DomainError> {
        let mut claims = self.claims.write();
        let tenant = claims.entry(tenant_id).or_default();
        if tenant.iter().any(|c| {
            c.dialect_uri.eq_ignore_ascii_case(&claim.dialect_uri) && c.matches_uri(&claim.claim_uri)
        }) {
            return Err(DomainError::already_exists(format!(
                "external claim {} in dialect {}",
                claim.claim_uri, claim.dialect_uri
            )));
        }
        tenant.push(claim.clone());
        Ok(())
    }
}
