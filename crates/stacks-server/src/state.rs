use std::sync::Arc;

use stacks_auth::IdentityRegistry;
use stacks_catalog::{CatalogStore, QueryEngine, ReviewManager};

/// Shared application state threaded through every handler.
///
/// The stores are explicit objects passed by `Arc`, not globals: the query
/// engine and review manager each hold their own handle to the same
/// catalog, and handlers reach everything through axum's `State`.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub registry: Arc<IdentityRegistry>,
    pub queries: Arc<QueryEngine>,
    pub reviews: Arc<ReviewManager>,
}

impl AppState {
    pub fn new(catalog: CatalogStore, registry: IdentityRegistry) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            queries: Arc::new(QueryEngine::new(Arc::clone(&catalog))),
            reviews: Arc::new(ReviewManager::new(Arc::clone(&catalog))),
            registry: Arc::new(registry),
            catalog,
        }
    }
}
