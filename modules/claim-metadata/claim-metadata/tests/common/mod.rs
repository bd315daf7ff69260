#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Common test utilities for claim-metadata integration tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use claim_metadata::config::ClaimMetadataConfig;
use claim_metadata::domain::{
    DialectRepository, DomainError, ExternalClaimRepository, LocalClaimRepository, RepositorySet,
    StaticRealmConfiguration,
};
use claim_metadata::infra::ClaimRepositories;
use claim_metadata::infra::storage::{
    InMemoryDialectRepository, InMemoryExternalClaimRepository, InMemoryLocalClaimRepository,
};
use claim_metadata::{
    ClaimMetadataModule, Dialect, ExternalClaim, LegacyClaimConfig, LegacyClaimEntry, LocalClaim,
    TenantId,
};

pub const LOCAL_DIALECT: &str = "http://wso2.org/claims";
pub const SAML_BASIC: &str = "urn:oasis:names:tc:SAML:2.0:attrname-format:basic";
pub const OIDC: &str = "http://wso2.org/oidc/claim";
pub const EMAIL: &str = "http://wso2.org/claims/emailaddress";
pub const GIVEN_NAME: &str = "http://wso2.org/claims/givenname";

/// Reads and writes that reached the backing store.
#[derive(Default)]
pub struct Counters {
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl Counters {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

struct CountingDialects {
    inner: InMemoryDialectRepository,
    counters: Arc<Counters>,
}

impl DialectRepository for CountingDialects {
    fn list(&self, tenant_id: TenantId) -> Result<Vec<Dialect>, DomainError> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list(tenant_id)
    }

    fn add(&self, dialect: &Dialect, tenant_id: TenantId) -> Result<(), DomainError> {
        self.counters.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.add(dialect, tenant_id)
    }
}

struct CountingLocalClaims {
    inner: InMemoryLocalClaimRepository,
    counters: Arc<Counters>,
}

impl LocalClaimRepository for CountingLocalClaims {
    fn list(&self, tenant_id: TenantId) -> Result<Vec<LocalClaim>, DomainError> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list(tenant_id)
    }

    fn add(&self, claim: &LocalClaim, tenant_id: TenantId) -> Result<(), DomainError> {
        self.counters.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.add(claim, tenant_id)
    }
}

struct CountingExternalClaims {
    inner: InMemoryExternalClaimRepository,
    counters: Arc<Counters>,
}

impl ExternalClaimRepository for CountingExternalClaims {
    fn list(
        &self,
        tenant_id: TenantId,
        dialect_uri: &str,
    ) -> Result<Vec<ExternalClaim>, DomainError> {
        self.counters.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list(tenant_id, dialect_uri)
    }

    fn add(&self, claim: &ExternalClaim, tenant_id: TenantId) -> Result<(), DomainError> {
        self.counters.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.add(claim, tenant_id)
    }
}

/// In-memory repositories whose backing store counts every access.
pub fn counting_repositories(config: &ClaimMetadataConfig) -> (ClaimRepositories, Arc<Counters>) {
    let counters = Arc::new(Counters::default());
    let direct = RepositorySet {
        dialects: Arc::new(CountingDialects {
            inner: InMemoryDialectRepository::new(),
            counters: counters.clone(),
        }),
        local_claims: Arc::new(CountingLocalClaims {
            inner: InMemoryLocalClaimRepository::new(),
            counters: counters.clone(),
        }),
        external_claims: Arc::new(CountingExternalClaims {
            inner: InMemoryExternalClaimRepository::new(),
            counters: counters.clone(),
        }),
    };
    (ClaimRepositories::with_cache(direct, &config.cache), counters)
}

/// Dialect store whose first `failures` reads fail.
struct FlakyDialects {
    inner: InMemoryDialectRepository,
    failures: AtomicUsize,
}

impl DialectRepository for FlakyDialects {
    fn list(&self, tenant_id: TenantId) -> Result<Vec<Dialect>, DomainError> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(DomainError::storage("dialect store unavailable"));
        }
        self.inner.list(tenant_id)
    }

    fn add(&self, dialect: &Dialect, tenant_id: TenantId) -> Result<(), DomainError> {
        self.inner.add(dialect, tenant_id)
    }
}

/// In-memory repositories whose dialect reads fail `failures` times before recovering.
pub fn flaky_dialect_repositories(config: &ClaimMetadataConfig, failures: usize) -> ClaimRepositories {
    let direct = RepositorySet {
        dialects: Arc::new(FlakyDialects {
            inner: InMemoryDialectRepository::new(),
            failures: AtomicUsize::new(failures),
        }),
        local_claims: Arc::new(InMemoryLocalClaimRepository::new()),
        external_claims: Arc::new(InMemoryExternalClaimRepository::new()),
    };
    ClaimRepositories::with_cache(direct, &config.cache)
}

pub fn config_with(claims: Vec<LegacyClaimEntry>) -> ClaimMetadataConfig {
    ClaimMetadataConfig {
        legacy_claims: Some(LegacyClaimConfig::new(claims)),
        ..ClaimMetadataConfig::default()
    }
}

pub fn create_module(config: ClaimMetadataConfig) -> (ClaimMetadataModule, Arc<Counters>) {
    let (repos, counters) = counting_repositories(&config);
    let realm = Arc::new(StaticRealmConfiguration::new(config.primary_domain.clone()));
    (ClaimMetadataModule::new(config, repos, realm), counters)
}

/// Local email claim mapped to `mail` in the primary domain and `email` in `LDAP`.
pub fn email_entry() -> LegacyClaimEntry {
    LegacyClaimEntry::new(EMAIL, LOCAL_DIALECT)
        .with_mapped_attribute("mail")
        .with_domain_attribute("LDAP", "email")
        .with_property("DisplayName", "Email")
        .with_property("SupportedByDefault", "")
}

pub fn given_name_entry() -> LegacyClaimEntry {
    LegacyClaimEntry::new(GIVEN_NAME, LOCAL_DIALECT)
        .with_mapped_attribute("givenName")
        .with_property("Required", "true")
}

pub fn external_entry(dialect: &str, claim_uri: &str, local_uri: &str) -> LegacyClaimEntry {
    LegacyClaimEntry::new(claim_uri, dialect).with_property("MappedLocalClaim", local_uri)
}

/// Local email and given name claims, bridged from SAML and OIDC.
pub fn sample_config() -> ClaimMetadataConfig {
    config_with(vec![
        email_entry(),
        given_name_entry(),
        external_entry(SAML_BASIC, "email", EMAIL),
        external_entry(OIDC, "email", EMAIL),
        external_entry(OIDC, "given_name", GIVEN_NAME),
    ])
}
