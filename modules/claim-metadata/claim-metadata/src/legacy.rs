//! Flat legacy claim configuration.
//!
//! Older deployments describe every claim, local or external, as one flat
//! entry carrying its dialect, mapped attributes and a string property map.
//! The importer turns these entries into dialects, local claims and external
//! claims the first time a tenant is initialized.
//!
//! ```yaml
//! claims:
//!   - claim_uri: "http://wso2.org/claims/emailaddress"
//!     dialect_uri: "http://wso2.org/claims"
//!     mapped_attribute: "mail"
//!     mapped_attributes:
//!       LDAP: "email"
//!     properties:
//!       DisplayName: "Email"
//!       Required: ""
//!   - claim_uri: "email"
//!     dialect_uri: "urn:oasis:names:tc:SAML:2.0:attrname-format:basic"
//!     properties:
//!       MappedLocalClaim: "http://wso2.org/claims/emailaddress"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use claim_metadata_sdk::constants::property;
use claim_metadata_sdk::is_local_dialect;
use serde::{Deserialize, Serialize};

/// The whole legacy claim map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegacyClaimConfig {
    pub claims: Vec<LegacyClaimEntry>,
}

/// One legacy claim entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyClaimEntry {
    pub claim_uri: String,
    pub dialect_uri: String,

    /// Attribute in the process-wide primary domain.
    #[serde(default)]
    pub mapped_attribute: Option<String>,

    /// Attribute per user-store domain.
    #[serde(default)]
    pub mapped_attributes: BTreeMap<String, String>,

    /// Free-form claim properties, including structural keys.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl LegacyClaimEntry {
    #[must_use]
    pub fn new(claim_uri: impl Into<String>, dialect_uri: impl Into<String>) -> Self {
        Self {
            claim_uri: claim_uri.into(),
            dialect_uri: dialect_uri.into(),
            mapped_attribute: None,
            mapped_attributes: BTreeMap::new(),
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_mapped_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.mapped_attribute = Some(attribute.into());
        self
    }

    #[must_use]
    pub fn with_domain_attribute(
        mut self,
        domain_name: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        self.mapped_attributes
            .insert(domain_name.into(), attribute.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_local(&self) -> bool {
        is_local_dialect(&self.dialect_uri)
    }

    /// Local claim URI an external entry points at, if declared.
    #[must_use]
    pub fn mapped_local_claim(&self) -> Option<&str> {
        self.properties
            .get(property::MAPPED_LOCAL_CLAIM)
            .map(String::as_str)
    }
}

impl LegacyClaimConfig {
    #[must_use]
    pub fn new(claims: Vec<LegacyClaimEntry>) -> Self {
        Self { claims }
    }

    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid legacy claim map.
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| anyhow::anyhow!("invalid legacy claim config: {e}"))
    }

    /// Reads and parses a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read legacy claim config {}", path.display()))?;
        Self::from_yaml_str(&yaml)
            .with_context(|| format!("failed to parse legacy claim config {}", path.display()))
    }
}
