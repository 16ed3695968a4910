// libs/diagnostics-cell/src/services/health.rs
use std::sync::Arc;

use tracing::warn;

use shared_config::KioskConfig;
use shared_database::store::DocumentStoreClient;

use crate::models::{StoreDiagnostics, StoreStatus};

/// How many collection names the report includes at most.
const MAX_COLLECTIONS_SHOWN: usize = 10;

pub struct StoreHealthService {
    store: Arc<DocumentStoreClient>,
    config: KioskConfig,
}

impl StoreHealthService {
    pub fn new(config: &KioskConfig) -> Self {
        Self {
            store: Arc::new(DocumentStoreClient::new(config)),
            config: config.clone(),
        }
    }

    /// Probes the store by listing collections. Never fails: whatever
    /// goes wrong is folded into the report.
    pub async fn diagnose(&self) -> StoreDiagnostics {
        let database_url_set = !self.config.database_url.is_empty();
        let database_name_set = !self.config.database_name.is_empty();

        if !self.config.is_configured() {
            return StoreDiagnostics {
                backend: "running",
                store: StoreStatus::NotConfigured,
                database_url_set,
                database_name_set,
                connection_status: "not connected",
                collections: Vec::new(),
                error: None,
            };
        }

        match self.store.list_collection_names().await {
            Ok(mut collections) => {
                collections.truncate(MAX_COLLECTIONS_SHOWN);
                StoreDiagnostics {
                    backend: "running",
                    store: StoreStatus::Connected,
                    database_url_set,
                    database_name_set,
                    connection_status: "connected",
                    collections,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Store diagnostic probe failed: {}", e);
                StoreDiagnostics {
                    backend: "running",
                    store: StoreStatus::Unreachable,
                    database_url_set,
                    database_name_set,
                    connection_status: "not connected",
                    collections: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
