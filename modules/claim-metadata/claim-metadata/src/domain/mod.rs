//! Domain layer for the claim metadata module.
//!
//! Contains resolution and legacy import logic, error types, repository
//! traits and the ports for realm configuration.

pub mod error;
pub mod importer;
pub mod init;
pub mod ports;
pub mod projection;
pub mod properties;
pub mod repo;
pub mod service;

#[cfg(test)]
mod service_test;

pub use error::DomainError;
pub use importer::{ImportPolicies, ImportReport, LegacyImporter};
pub use init::{InitOutcome, TenantInitializer};
pub use ports::{PrimaryDomainNameProvider, RealmConfigurationProvider, StaticRealmConfiguration};
pub use repo::{DialectRepository, ExternalClaimRepository, LocalClaimRepository, RepositorySet};
pub use service::Service;
