//! Domain models for the claim metadata module.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{LOCAL_CLAIM_DIALECT_URI, property};

/// Unique identifier for a tenant.
pub type TenantId = Uuid;

/// Returns `true` if `dialect_uri` names the local dialect (case-insensitive).
#[must_use]
pub fn is_local_dialect(dialect_uri: &str) -> bool {
    dialect_uri.eq_ignore_ascii_case(LOCAL_CLAIM_DIALECT_URI)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A claim dialect: a URI namespace grouping claim URIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dialect {
    /// Dialect URI.
    pub uri: String,
}

impl Dialect {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// The reserved local dialect.
    #[must_use]
    pub fn local() -> Self {
        Self::new(LOCAL_CLAIM_DIALECT_URI)
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        is_local_dialect(&self.uri)
    }
}

/// Binding of a claim to the physical attribute storing it in one user-store domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeMapping {
    /// User-store domain name.
    pub domain_name: String,
    /// Attribute name inside that domain.
    pub attribute_name: String,
}

impl AttributeMapping {
    #[must_use]
    pub fn new(domain_name: impl Into<String>, attribute_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            attribute_name: attribute_name.into(),
        }
    }

    /// Domain names compare case-insensitively.
    #[must_use]
    pub fn is_for_domain(&self, domain_name: &str) -> bool {
        self.domain_name.eq_ignore_ascii_case(domain_name)
    }
}

/// Typed claim metadata.
///
/// Every recognised legacy property has a named field. Keys the model does not
/// know about are preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimProperties {
    /// Human-readable name shown in UIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordering hint for UIs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    /// Validation pattern for claim values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_by_default: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// Attribute used when a claim has no mapping for the requested domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_attribute: Option<String>,
    /// Dialect-specific keys with no typed counterpart.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// Legacy boolean parsing: only `"true"` (any case) is true.
fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

impl ClaimProperties {
    /// Builds typed properties from a legacy string map.
    ///
    /// Unknown keys, and a display order that is not an integer, are kept in `extra`.
    #[must_use]
    pub fn from_property_map(map: BTreeMap<String, String>) -> Self {
        let mut props = Self::default();
        for (key, value) in map {
            match key.as_str() {
                property::DISPLAY_NAME => props.display_name = Some(value),
                property::DESCRIPTION => props.description = Some(value),
                property::REGULAR_EXPRESSION => props.regex = Some(value),
                property::DEFAULT_ATTRIBUTE => props.default_attribute = Some(value),
                property::SUPPORTED_BY_DEFAULT => {
                    props.supported_by_default = Some(parse_flag(&value));
                }
                property::REQUIRED => props.required = Some(parse_flag(&value)),
                property::READ_ONLY => props.read_only = Some(parse_flag(&value)),
                property::DISPLAY_ORDER => match value.trim().parse::<i32>() {
                    Ok(order) => props.display_order = Some(order),
                    Err(_) => {
                        props.extra.insert(key, value);
                    }
                },
                _ => {
                    props.extra.insert(key, value);
                }
            }
        }
        props
    }

    /// Projects back to the legacy string map.
    #[must_use]
    pub fn to_property_map(&self) -> BTreeMap<String, String> {
        let mut map = self.extra.clone();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                map.insert(key.to_owned(), value);
            }
        };
        put(property::DISPLAY_NAME, self.display_name.clone());
        put(property::DESCRIPTION, self.description.clone());
        put(property::REGULAR_EXPRESSION, self.regex.clone());
        put(property::DEFAULT_ATTRIBUTE, self.default_attribute.clone());
        put(
            property::DISPLAY_ORDER,
            self.display_order.map(|o| o.to_string()),
        );
        put(
            property::SUPPORTED_BY_DEFAULT,
            self.supported_by_default.map(|b| b.to_string()),
        );
        put(property::REQUIRED, self.required.map(|b| b.to_string()));
        put(property::READ_ONLY, self.read_only.map(|b| b.to_string()));
        map
    }

    /// Non-blank default attribute, if any.
    #[must_use]
    pub fn default_attribute(&self) -> Option<&str> {
        non_blank(self.default_attribute.as_deref())
    }
}

/// A claim in the local dialect with one attribute mapping per user-store domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalClaim {
    /// Claim URI inside the local dialect.
    pub claim_uri: String,
    attribute_mappings: Vec<AttributeMapping>,
    pub properties: ClaimProperties,
}

impl LocalClaim {
    #[must_use]
    pub fn new(claim_uri: impl Into<String>, properties: ClaimProperties) -> Self {
        Self {
            claim_uri: claim_uri.into(),
            attribute_mappings: Vec::new(),
            properties,
        }
    }

    /// Adds `mapping`, replacing any existing mapping for the same domain.
    ///
    /// Returns the replaced mapping. Position of a replaced entry is kept.
    pub fn set_attribute_mapping(&mut self, mapping: AttributeMapping) -> Option<AttributeMapping> {
        if let Some(existing) = self
            .attribute_mappings
            .iter_mut()
            .find(|m| m.is_for_domain(&mapping.domain_name))
        {
            return Some(std::mem::replace(existing, mapping));
        }
        self.attribute_mappings.push(mapping);
        None
    }

    #[must_use]
    pub fn with_attribute_mapping(mut self, mapping: AttributeMapping) -> Self {
        self.set_attribute_mapping(mapping);
        self
    }

    #[must_use]
    pub fn attribute_mappings(&self) -> &[AttributeMapping] {
        &self.attribute_mappings
    }

    /// Non-blank attribute mapped for `domain_name`.
    #[must_use]
    pub fn mapped_attribute(&self, domain_name: &str) -> Option<&str> {
        let found = self
            .attribute_mappings
            .iter()
            .find(|m| m.is_for_domain(domain_name))
            .map(|m| m.attribute_name.as_str());
        non_blank(found)
    }

    #[must_use]
    pub fn dialect_uri(&self) -> &'static str {
        LOCAL_CLAIM_DIALECT_URI
    }

    #[must_use]
    pub fn matches_uri(&self, claim_uri: &str) -> bool {
        self.claim_uri.eq_ignore_ascii_case(claim_uri)
    }
}

/// A claim in a non-local dialect, bound to exactly one local claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalClaim {
    pub dialect_uri: String,
    pub claim_uri: String,
    /// URI of the local claim this claim stands for.
    pub mapped_local_claim_uri: String,
    pub properties: ClaimProperties,
}

impl ExternalClaim {
    #[must_use]
    pub fn new(
        dialect_uri: impl Into<String>,
        claim_uri: impl Into<String>,
        mapped_local_claim_uri: impl Into<String>,
        properties: ClaimProperties,
    ) -> Self {
        Self {
            dialect_uri: dialect_uri.into(),
            claim_uri: claim_uri.into(),
            mapped_local_claim_uri: mapped_local_claim_uri.into(),
            properties,
        }
    }

    #[must_use]
    pub fn matches_uri(&self, claim_uri: &str) -> bool {
        self.claim_uri.eq_ignore_ascii_case(claim_uri)
    }

    /// Returns `true` if `local` is the claim this external claim refers to.
    #[must_use]
    pub fn refers_to(&self, local: &LocalClaim) -> bool {
        local.matches_uri(&self.mapped_local_claim_uri)
    }
}

/// Legacy flat view of a claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_uri: String,
    pub dialect_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub supported_by_default: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
}

/// Legacy flat view of a claim together with its attribute mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimMapping {
    pub claim: Claim,
    /// Attribute in the tenant's primary domain (or the default attribute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_attribute: Option<String>,
    /// Attribute per user-store domain.
    #[serde(default)]
    pub mapped_attributes: BTreeMap<String, String>,
}

impl ClaimMapping {
    /// Attribute mapped for `domain_name` (case-insensitive).
    #[must_use]
    pub fn mapped_attribute_for(&self, domain_name: &str) -> Option<&str> {
        self.mapped_attributes
            .iter()
            .find(|(domain, _)| domain.eq_ignore_ascii_case(domain_name))
            .map(|(_, attr)| attr.as_str())
    }
}
