// 🔎 Lookup Service
// RUC lookups try the registry first and fall back to the sample store.
// Name searches only ever touch the sample store.

use crate::external::{ExternalResult, OfflineSource, RegistrySource};
use crate::record::Record;
use crate::store::RecordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct LookupService {
    store: Arc<RecordStore>,
    source: Arc<dyn RegistrySource>,
}

impl LookupService {
    pub fn new(store: RecordStore, source: Arc<dyn RegistrySource>) -> Self {
        LookupService {
            store: Arc::new(store),
            source,
        }
    }

    /// Service that never leaves the process
    pub fn offline(store: RecordStore) -> Self {
        Self::new(store, Arc::new(OfflineSource))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Whether RUC lookups consult a registry before the sample store
    pub fn is_external(&self) -> bool {
        !self.source.is_offline()
    }

    /// At most one record for `ruc`; `source` on the result says where it came from
    pub async fn lookup_by_ruc(&self, ruc: &str) -> Option<Record> {
        match self.source.fetch_by_ruc(ruc).await {
            ExternalResult::Found(record) => {
                tracing::info!(ruc, source = self.source.name(), "RUC resolved by registry");
                return Some(record);
            }
            ExternalResult::NotFound => {
                tracing::debug!(ruc, source = self.source.name(), "Registry has no such RUC");
            }
            ExternalResult::Unavailable => {
                tracing::debug!(ruc, source = self.source.name(), "Registry unavailable, using sample store");
            }
        }

        let record = self.store.find_by_ruc(ruc).cloned();
        if record.is_some() {
            tracing::info!(ruc, "RUC resolved from sample store");
        }
        record
    }

    /// All sample records whose razón social contains `fragment`, case-insensitively
    pub fn lookup_by_name(&self, fragment: &str) -> Vec<Record> {
        self.store
            .search_by_name(fragment)
            .into_iter()
            .cloned()
            .collect()
    }
}

impl Default for LookupService {
    fn default() -> Self {
        Self::offline(RecordStore::sample())
    }
}
