use std::sync::Arc;

use stringlens_core::StringRepo;
use stringlens_query::QueryParser;
use stringlens_store::MemoryStore;

/// Shared handler state, built once by the composition root.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StringRepo>,
    pub parser: Arc<QueryParser>,
}

impl AppState {
    pub fn new(store: Arc<dyn StringRepo>) -> anyhow::Result<Self> {
        Ok(Self {
            store,
            parser: Arc::new(QueryParser::with_defaults()?),
        })
    }

    /// State backed by a fresh, empty [`MemoryStore`].
    pub fn in_memory() -> anyhow::Result<Self> {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
