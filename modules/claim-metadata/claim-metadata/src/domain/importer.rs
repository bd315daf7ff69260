//! One-shot import of a legacy claim map into dialects, local claims and
//! external claims.
//!
//! The importer writes through the direct repositories. Every failure is
//! logged and counted; a failing entry never aborts the rest of the import.

use std::sync::Arc;

use claim_metadata_sdk::constants::property;
use claim_metadata_sdk::{AttributeMapping, Dialect, ExternalClaim, LocalClaim, TenantId};
use tracing::{debug, error, info, warn};

use super::error::DomainError;
use super::ports::PrimaryDomainNameProvider;
use super::properties::fill_claim_properties;
use super::repo::RepositorySet;
use crate::config::{DuplicateDomainPolicy, OrphanPolicy};
use crate::legacy::{LegacyClaimConfig, LegacyClaimEntry};

/// Counts collected during one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub dialects_created: usize,
    pub local_claims_created: usize,
    pub external_claims_created: usize,
    /// Entries not stored because of a policy decision.
    pub skipped: usize,
    /// Repository writes that failed.
    pub failures: usize,
}

/// Policies applied while importing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportPolicies {
    pub duplicate_domain_mapping: DuplicateDomainPolicy,
    pub orphan_external_claims: OrphanPolicy,
}

/// Legacy claim map importer.
pub struct LegacyImporter {
    repos: RepositorySet,
    primary_domain: Arc<dyn PrimaryDomainNameProvider>,
    policies: ImportPolicies,
}

impl LegacyImporter {
    /// `repos` must be the direct (non-cached) repositories.
    #[must_use]
    pub fn new(
        repos: RepositorySet,
        primary_domain: Arc<dyn PrimaryDomainNameProvider>,
        policies: ImportPolicies,
    ) -> Self {
        Self {
            repos,
            primary_domain,
            policies,
        }
    }

    /// Seeds `tenant_id` from `legacy`.
    ///
    /// The local dialect is always created, even when `legacy` is empty.
    #[must_use]
    pub fn import(&self, legacy: &LegacyClaimConfig, tenant_id: TenantId) -> ImportReport {
        info!(
            tenant_id = %tenant_id,
            entries = legacy.claims.len(),
            "importing legacy claim config"
        );
        let mut report = ImportReport::default();

        let local = Dialect::local();
        match self.repos.dialects.add(&local, tenant_id) {
            Ok(()) => report.dialects_created += 1,
            Err(e) => {
                error!(tenant_id = %tenant_id, dialect_uri = %local.uri, error = %e, "failed to add claim dialect");
                report.failures += 1;
            }
        }

        let primary_domain = self.primary_domain.primary_domain_name();
        let mut external_dialects: Vec<&str> = Vec::new();

        for entry in &legacy.claims {
            if entry.is_local() {
                self.import_local_claim(entry, &primary_domain, tenant_id, &mut report);
            } else if !external_dialects
                .iter()
                .any(|d| d.eq_ignore_ascii_case(&entry.dialect_uri))
            {
                external_dialects.push(&entry.dialect_uri);
            }
        }

        let mut missing_dialects: Vec<&str> = Vec::new();
        for dialect_uri in external_dialects {
            match self.repos.dialects.add(&Dialect::new(dialect_uri), tenant_id) {
                Ok(()) => report.dialects_created += 1,
                Err(DomainError::AlreadyExists(_)) => {
                    debug!(tenant_id = %tenant_id, dialect_uri, "claim dialect already exists");
                }
                Err(e) => {
                    error!(tenant_id = %tenant_id, dialect_uri, error = %e, "failed to add claim dialect");
                    report.failures += 1;
                    missing_dialects.push(dialect_uri);
                }
            }
        }

        for entry in legacy.claims.iter().filter(|e| !e.is_local()) {
            let dialect_missing = missing_dialects
                .iter()
                .any(|d| d.eq_ignore_ascii_case(&entry.dialect_uri));
            if dialect_missing && self.policies.orphan_external_claims == OrphanPolicy::Skip {
                warn!(
                    tenant_id = %tenant_id,
                    claim_uri = %entry.claim_uri,
                    dialect_uri = %entry.dialect_uri,
                    "skipping external claim, its dialect could not be created"
                );
                report.skipped += 1;
                continue;
            }
            self.import_external_claim(entry, tenant_id, &mut report);
        }

        info!(
            tenant_id = %tenant_id,
            dialects = report.dialects_created,
            local_claims = report.local_claims_created,
            external_claims = report.external_claims_created,
            skipped = report.skipped,
            failures = report.failures,
            "legacy claim import finished"
        );
        report
    }

    fn import_local_claim(
        &self,
        entry: &LegacyClaimEntry,
        primary_domain: &str,
        tenant_id: TenantId,
        report: &mut ImportReport,
    ) {
        let Some(claim) = self.build_local_claim(entry, primary_domain) else {
            report.skipped += 1;
            return;
        };
        match self.repos.local_claims.add(&claim, tenant_id) {
            Ok(()) => report.local_claims_created += 1,
            Err(e) => {
                error!(tenant_id = %tenant_id, claim_uri = %claim.claim_uri, error = %e, "failed to add local claim");
                report.failures += 1;
            }
        }
    }

    /// Returns `None` when the entry is rejected by the duplicate-domain policy.
    fn build_local_claim(&self, entry: &LegacyClaimEntry, primary_domain: &str) -> Option<LocalClaim> {
        let mut claim = LocalClaim::new(
            entry.claim_uri.clone(),
            fill_claim_properties(entry.properties.clone()),
        );

        if let Some(attribute) = entry
            .mapped_attribute
            .as_deref()
            .filter(|a| !a.trim().is_empty())
        {
            claim.set_attribute_mapping(AttributeMapping::new(primary_domain, attribute));
        }

        for (domain_name, attribute) in &entry.mapped_attributes {
            let Some(replaced) =
                claim.set_attribute_mapping(AttributeMapping::new(domain_name.clone(), attribute.clone()))
            else {
                continue;
            };
            match self.policies.duplicate_domain_mapping {
                DuplicateDomainPolicy::LastWriteWins => warn!(
                    claim_uri = %entry.claim_uri,
                    domain = %domain_name,
                    replaced = %replaced.attribute_name,
                    attribute = %attribute,
                    "duplicate attribute mapping for domain, keeping the last one"
                ),
                DuplicateDomainPolicy::Reject => {
                    error!(
                        claim_uri = %entry.claim_uri,
                        domain = %domain_name,
                        "duplicate attribute mapping for domain, local claim not imported"
                    );
                    return None;
                }
            }
        }

        Some(claim)
    }

    fn import_external_claim(
        &self,
        entry: &LegacyClaimEntry,
        tenant_id: TenantId,
        report: &mut ImportReport,
    ) {
        let Some(mapped_local_claim) = entry
            .mapped_local_claim()
            .filter(|uri| !uri.trim().is_empty())
            .map(ToOwned::to_owned)
        else {
            error!(
                tenant_id = %tenant_id,
                claim_uri = %entry.claim_uri,
                dialect_uri = %entry.dialect_uri,
                "external claim has no {} property", property::MAPPED_LOCAL_CLAIM
            );
            report.failures += 1;
            return;
        };

        let mut properties = entry.properties.clone();
        properties.remove(property::MAPPED_LOCAL_CLAIM);
        let claim = ExternalClaim::new(
            entry.dialect_uri.clone(),
            entry.claim_uri.clone(),
            mapped_local_claim,
            fill_claim_properties(properties),
        );

        match self.repos.external_claims.add(&claim, tenant_id) {
            Ok(()) => report.external_claims_created += 1,
            Err(e) => {
                error!(
                    tenant_id = %tenant_id,
                    claim_uri = %claim.claim_uri,
                    dialect_uri = %claim.dialect_uri,
                    error = %e,
                    "failed to add external claim"
                );
                report.failures += 1;
            }
        }
    }
}
