// libs/diagnostics-cell/src/models.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    Connected,
    Unreachable,
    NotConfigured,
}

/// Connectivity report for the `/test` endpoint. A store failure lands
/// in `error`, never in the HTTP status.
#[derive(Debug, Clone, Serialize)]
pub struct StoreDiagnostics {
    pub backend: &'static str,
    pub store: StoreStatus,
    pub database_url_set: bool,
    pub database_name_set: bool,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
