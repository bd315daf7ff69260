//! Local client implementing the `ClaimMetadataStore` trait.

use std::sync::Arc;

use claim_metadata_sdk::{Claim, ClaimMapping, ClaimMetadataError, ClaimMetadataStore};

use crate::domain::{DomainError, Service};

const MANAGEMENT_UNSUPPORTED: &str = "claim metadata store does not support management operations";

/// Tenant-bound store handed out by the module.
///
/// Delegates to the domain service and converts domain errors into SDK
/// errors, logging everything except invalid arguments.
pub struct ClaimMetadataLocalClient {
    service: Arc<Service>,
}

impl ClaimMetadataLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> ClaimMetadataError {
    if !e.is_caller_error() {
        tracing::error!(operation = op, error = ?e, "claim-metadata call failed");
    }
    e.into()
}

impl ClaimMetadataStore for ClaimMetadataLocalClient {
    fn get_all_claim_uris(&self) -> Result<Option<Vec<String>>, ClaimMetadataError> {
        self.service
            .all_claim_uris()
            .map_err(|e| log_and_convert("get_all_claim_uris", e))
    }

    fn get_attribute_name(
        &self,
        domain_name: &str,
        claim_uri: &str,
    ) -> Result<Option<String>, ClaimMetadataError> {
        self.service
            .resolve_attribute_name(Some(domain_name), claim_uri)
            .map_err(|e| log_and_convert("get_attribute_name", e))
    }

    fn get_attribute_name_for_primary_domain(
        &self,
        claim_uri: &str,
    ) -> Result<Option<String>, ClaimMetadataError> {
        self.service
            .resolve_attribute_name(None, claim_uri)
            .map_err(|e| log_and_convert("get_attribute_name_for_primary_domain", e))
    }

    fn get_claim(&self, claim_uri: &str) -> Result<Option<Claim>, ClaimMetadataError> {
        self.service
            .get_claim(claim_uri)
            .map_err(|e| log_and_convert("get_claim", e))
    }

    fn get_claim_mapping(
        &self,
        claim_uri: &str,
    ) -> Result<Option<ClaimMapping>, ClaimMetadataError> {
        self.service
            .get_claim_mapping(claim_uri)
            .map_err(|e| log_and_convert("get_claim_mapping", e))
    }

    fn get_all_claim_mappings(
        &self,
        dialect_uri: Option<&str>,
    ) -> Result<Vec<ClaimMapping>, ClaimMetadataError> {
        self.service
            .get_all_claim_mappings(dialect_uri)
            .map_err(|e| log_and_convert("get_all_claim_mappings", e))
    }

    fn get_all_supported_claim_mappings_by_default(
        &self,
    ) -> Result<Vec<ClaimMapping>, ClaimMetadataError> {
        self.service
            .get_supported_by_default_mappings()
            .map_err(|e| log_and_convert("get_all_supported_claim_mappings_by_default", e))
    }

    fn get_all_required_claim_mappings(&self) -> Result<Vec<ClaimMapping>, ClaimMetadataError> {
        self.service
            .get_required_mappings()
            .map_err(|e| log_and_convert("get_all_required_claim_mappings", e))
    }

    fn add_new_claim_mapping(&self, _mapping: &ClaimMapping) -> Result<(), ClaimMetadataError> {
        Err(DomainError::unsupported(MANAGEMENT_UNSUPPORTED).into())
    }

    fn update_claim_mapping(&self, _mapping: &ClaimMapping) -> Result<(), ClaimMetadataError> {
        Err(DomainError::unsupported(MANAGEMENT_UNSUPPORTED).into())
    }

    fn delete_claim_mapping(&self, _mapping: &ClaimMapping) -> Result<(), ClaimMetadataError> {
        Err(DomainError::unsupported(MANAGEMENT_UNSUPPORTED).into())
    }
}
