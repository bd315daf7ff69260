//! Projection of the claim model into the legacy flat shape.

use claim_metadata_sdk::{Claim, ClaimMapping, ExternalClaim, LocalClaim};

/// Projects a local claim.
///
/// `primary_domain` selects the single mapped attribute; when the claim has
/// no mapping there, the default-attribute property is used instead.
#[must_use]
pub fn convert_local_claim(local: &LocalClaim, primary_domain: &str) -> ClaimMapping {
    let props = &local.properties;
    let claim = Claim {
        claim_uri: local.claim_uri.clone(),
        dialect_uri: local.dialect_uri().to_owned(),
        display_tag: props.display_name.clone(),
        description: props.description.clone(),
        regex: props.regex.clone(),
        display_order: props.display_order.unwrap_or_default(),
        supported_by_default: props.supported_by_default.unwrap_or_default(),
        required: props.required.unwrap_or_default(),
        read_only: props.read_only.unwrap_or_default(),
    };

    let mapped_attribute = local
        .mapped_attribute(primary_domain)
        .or_else(|| props.default_attribute())
        .map(ToOwned::to_owned);

    ClaimMapping {
        claim,
        mapped_attribute,
        mapped_attributes: local
            .attribute_mappings()
            .iter()
            .map(|m| (m.domain_name.clone(), m.attribute_name.clone()))
            .collect(),
    }
}

/// Projects an external claim through the local claim it refers to.
///
/// The result carries the local claim's metadata and attributes under the
/// external claim's own URI and dialect. When the referenced local claim is
/// not in `local_claims`, only the external URIs are filled in.
#[must_use]
pub fn convert_external_claim(
    external: &ExternalClaim,
    local_claims: &[LocalClaim],
    primary_domain: &str,
) -> ClaimMapping {
    let mut mapping = local_claims
        .iter()
        .find(|local| external.refers_to(local))
        .map(|local| convert_local_claim(local, primary_domain))
        .unwrap_or_default();
    mapping.claim.claim_uri.clone_from(&external.claim_uri);
    mapping.claim.dialect_uri.clone_from(&external.dialect_uri);
    mapping
}
