//! Shared state for the REST handlers.

use std::sync::Arc;

use crate::credentials::ServiceAccount;
use crate::store::DocumentStore;

/// Collection names for the two document kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNames {
    pub users: String,
    pub partner_requests: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            users: "user".to_string(),
            partner_requests: "partnerRequest".to_string(),
        }
    }
}

/// State shared by every request for the process lifetime
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub collections: CollectionNames,

    /// Authentication-service account loaded at startup. Not consulted by any route.
    pub credentials: Option<Arc<ServiceAccount>>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            collections: CollectionNames::default(),
            credentials: None,
        }
    }

    pub fn with_collections(mut self, collections: CollectionNames) -> Self {
        self.collections = collections;
        self
    }

    pub fn with_credentials(mut self, credentials: Option<Arc<ServiceAccount>>) -> Self {
        self.credentials = credentials;
        self
    }
}
