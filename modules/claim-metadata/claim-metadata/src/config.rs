//! Configuration for the claim metadata module.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::legacy::LegacyClaimConfig;

/// Module configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClaimMetadataConfig {
    /// Process-wide primary user-store domain name.
    pub primary_domain: String,

    /// Cache settings for repository reads.
    pub cache: CacheConfig,

    /// What the importer does when a legacy entry maps the same domain twice.
    pub duplicate_domain_mapping: DuplicateDomainPolicy,

    /// What the importer does with external claims whose dialect could not be created.
    pub orphan_external_claims: OrphanPolicy,

    /// Legacy claim map used to seed uninitialized tenants.
    pub legacy_claims: Option<LegacyClaimConfig>,
}

impl Default for ClaimMetadataConfig {
    fn default() -> Self {
        Self {
            primary_domain: "PRIMARY".to_owned(),
            cache: CacheConfig::default(),
            duplicate_domain_mapping: DuplicateDomainPolicy::default(),
            orphan_external_claims: OrphanPolicy::default(),
            legacy_claims: None,
        }
    }
}

impl ClaimMetadataConfig {
    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a valid configuration.
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| anyhow::anyhow!("invalid claim metadata config: {e}"))
    }
}

/// Repository read cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Time-to-live for cached entries.
    #[serde(deserialize_with = "deserialize_duration")]
    pub ttl: Duration,

    /// Maximum number of entries per cache.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 10_000,
        }
    }
}

/// Policy for a legacy entry that maps one domain both through its primary
/// attribute and through its explicit domain map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateDomainPolicy {
    /// The explicit domain map replaces the primary attribute (logged as a warning).
    #[default]
    LastWriteWins,
    /// The local claim is not imported (logged as an error).
    Reject,
}

/// Policy for external claims whose dialect failed to be created during import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Skip those claims so none are stored under a missing dialect.
    #[default]
    Skip,
    /// Try to store them anyway.
    Attempt,
}

fn deserialize_duration<'de, D>(d: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    humantime::parse_duration(&raw).map_err(|e| {
        serde::de::Error::custom(format!("invalid duration {raw:?}: {e}"))
    })
}
