//! Public API trait for a tenant-bound claim metadata store.
//!
//! A store is created per tenant by the claim-metadata module. The tenant is
//! bound at construction, so no method takes a tenant identifier.

use crate::error::ClaimMetadataError;
use crate::models::{Claim, ClaimMapping};

/// Read-only claim metadata API for one tenant.
///
/// ```ignore
/// let store = module.store_for_tenant(tenant_id);
///
/// // Attribute backing a local or external claim in a user-store domain
/// let attr = store.get_attribute_name("PRIMARY", "http://wso2.org/claims/givenname")?;
///
/// // Legacy flat projection of an external dialect
/// let mappings = store.get_all_claim_mappings(Some("http://schemas.xmlsoap.org/ws/2005/05/identity"))?;
/// ```
///
/// Every method except [`get_attribute_name`](Self::get_attribute_name) is a
/// compatibility view over the normalized claim model and is deprecated.
pub trait ClaimMetadataStore: Send + Sync {
    /// All local claim URIs, in repository order.
    ///
    /// Returns `Ok(None)` when a listener stops the call.
    ///
    /// # Errors
    ///
    /// - `Store` if the repository read fails
    fn get_all_claim_uris(&self) -> Result<Option<Vec<String>>, ClaimMetadataError>;

    /// Resolves the attribute backing `claim_uri` in `domain_name`.
    ///
    /// `claim_uri` may name a local claim or an external claim; external claims
    /// resolve through their mapped local claim. Fallback order for the matched
    /// local claim: mapping for `domain_name`, the default-attribute property,
    /// then the mapping for the tenant's primary domain.
    ///
    /// Returns `Ok(None)` if no claim matches or a listener stops the call.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `domain_name` or `claim_uri` is blank
    /// - `NoMappedAttribute` if a claim matches but the fallback chain is exhausted
    /// - `Store` if a repository read fails
    fn get_attribute_name(
        &self,
        domain_name: &str,
        claim_uri: &str,
    ) -> Result<Option<String>, ClaimMetadataError>;

    /// Same as [`get_attribute_name`](Self::get_attribute_name) for the tenant's primary domain.
    ///
    /// # Errors
    ///
    /// See [`get_attribute_name`](Self::get_attribute_name).
    #[deprecated(note = "use get_attribute_name with an explicit domain")]
    fn get_attribute_name_for_primary_domain(
        &self,
        claim_uri: &str,
    ) -> Result<Option<String>, ClaimMetadataError>;

    /// Legacy claim for a local or external claim URI.
    ///
    /// # Errors
    ///
    /// - `Store` if a repository read fails
    #[deprecated(note = "read LocalClaim / ExternalClaim instead")]
    fn get_claim(&self, claim_uri: &str) -> Result<Option<Claim>, ClaimMetadataError>;

    /// Legacy claim mapping for a local or external claim URI.
    ///
    /// # Errors
    ///
    /// - `Store` if a repository read fails
    #[deprecated(note = "read LocalClaim / ExternalClaim instead")]
    fn get_claim_mapping(&self, claim_uri: &str)
    -> Result<Option<ClaimMapping>, ClaimMetadataError>;

    /// Legacy mappings for every claim in a dialect (`None` = local dialect).
    ///
    /// # Errors
    ///
    /// - `Store` if a repository read fails
    #[deprecated(note = "read LocalClaim / ExternalClaim instead")]
    fn get_all_claim_mappings(
        &self,
        dialect_uri: Option<&str>,
    ) -> Result<Vec<ClaimMapping>, ClaimMetadataError>;

    /// Local claim mappings whose claim is supported by default.
    ///
    /// # Errors
    ///
    /// - `Store` if a repository read fails
    #[deprecated(note = "read LocalClaim / ExternalClaim instead")]
    fn get_all_supported_claim_mappings_by_default(
        &self,
    ) -> Result<Vec<ClaimMapping>, ClaimMetadataError>;

    /// Local claim mappings whose claim is required.
    ///
    /// # Errors
    ///
    /// - `Store` if a repository read fails
    #[deprecated(note = "read LocalClaim / ExternalClaim instead")]
    fn get_all_required_claim_mappings(&self) -> Result<Vec<ClaimMapping>, ClaimMetadataError>;

    /// Always fails: the store does not support management operations.
    ///
    /// # Errors
    ///
    /// - `UnsupportedOperation`, unconditionally
    #[deprecated(note = "claim management is not available through the store")]
    fn add_new_claim_mapping(&self, mapping: &ClaimMapping) -> Result<(), ClaimMetadataError>;

    /// Always fails: the store does not support management operations.
    ///
    /// # Errors
    ///
    /// - `UnsupportedOperation`, unconditionally
    #[deprecated(note = "claim management is not available through the store")]
    fn update_claim_mapping(&self, mapping: &ClaimMapping) -> Result<(), ClaimMetadataError>;

    /// Always fails: the store does not support management operations.
    ///
    /// # Errors
    ///
    /// - `UnsupportedOperation`, unconditionally
    #[deprecated(note = "claim management is not available through the store")]
    fn delete_claim_mapping(&self, mapping: &ClaimMapping) -> Result<(), ClaimMetadataError>;
}
