//! Per-tenant initialization.
//!
//! A tenant with no dialects is seeded from the legacy claim map. The
//! emptiness check and the import run under a lock keyed by tenant, so two
//! callers initializing the same tenant never both import.

use std::sync::Arc;

use claim_metadata_sdk::TenantId;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, error};

use super::importer::{ImportReport, LegacyImporter};
use super::repo::DialectRepository;
use crate::legacy::LegacyClaimConfig;

/// Result of [`TenantInitializer::ensure_initialized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The tenant already had dialects; nothing was imported.
    AlreadyInitialized,
    /// The tenant was seeded.
    Imported(ImportReport),
    /// The dialect check failed; the tenant was left as is.
    CheckFailed,
}

impl InitOutcome {
    fn tenant_has_dialects(&self) -> bool {
        match self {
            Self::AlreadyInitialized => true,
            Self::Imported(report) => report.dialects_created > 0,
            Self::CheckFailed => false,
        }
    }
}

pub struct TenantInitializer {
    dialects: Arc<dyn DialectRepository>,
    importer: LegacyImporter,
    legacy: LegacyClaimConfig,
    locks: DashMap<TenantId, Arc<Mutex<()>>>,
}

impl TenantInitializer {
    /// `dialects` must be the direct repository so the check never sees a stale cache.
    #[must_use]
    pub fn new(
        dialects: Arc<dyn DialectRepository>,
        importer: LegacyImporter,
        legacy: LegacyClaimConfig,
    ) -> Self {
        Self {
            dialects,
            importer,
            legacy,
            locks: DashMap::new(),
        }
    }

    /// Imports the legacy claim map into `tenant_id` if it has no dialects yet.
    ///
    /// Failures are logged and never escape.
    #[must_use]
    pub fn ensure_initialized(&self, tenant_id: TenantId) -> InitOutcome {
        // Clone the lock out so the map shard is not held during import.
        let lock = self.locks.entry(tenant_id).or_default().clone();
        let _guard = lock.lock();

        let outcome = match self.dialects.list(tenant_id) {
            Ok(dialects) if !dialects.is_empty() => {
                debug!(tenant_id = %tenant_id, dialects = dialects.len(), "tenant already initialized");
                InitOutcome::AlreadyInitialized
            }
            Ok(_) => InitOutcome::Imported(self.importer.import(&self.legacy, tenant_id)),
            Err(e) => {
                error!(tenant_id = %tenant_id, error = %e, "failed to read claim dialects");
                InitOutcome::CheckFailed
            }
        };

        // The lock only guards tenants that may still be empty.
        if outcome.tenant_has_dialects() {
            self.locks.remove(&tenant_id);
        }
        outcome
    }
}
