use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Firestore configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// GCP project id
    pub project_id: String,

    /// Database id, `(default)` unless overridden
    pub database_id: String,

    /// Bearer token for the REST API; unset against the emulator
    pub auth_token: Option<String>,

    /// REST API base URL, overridable to point at an emulator
    pub base_url: String,
}

impl FirestoreConfig {
    pub fn from_env() -> Arc<Self> {
        Arc::new(Self {
            project_id: std::env::var("FIRESTORE_PROJECT_ID")
                .expect("FIRESTORE_PROJECT_ID must be set"),
            database_id: std::env::var("FIRESTORE_DATABASE_ID")
                .unwrap_or_else(|_| "(default)".to_string()),
            auth_token: std::env::var("FIRESTORE_AUTH_TOKEN").ok(),
            base_url: std::env::var("FIRESTORE_BASE_URL")
                .unwrap_or_else(|_| "https://firestore.googleapis.com/v1".to_string()),
        })
    }

    /// Resource prefix shared by every document path in this database
    pub fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database_id
        )
    }
}
