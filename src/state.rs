use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::{Config, SessionBackend};
use crate::error::Result;
use crate::repositories::session::{FileStorage, MemoryStorage, SessionStorage};
use crate::search::SearchGate;
use crate::services::token::TokenManager;

/// The application's state.
///
/// Owns the session and the API client; every page controller receives it.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The API client.
    pub api: ApiClient,
    /// The session store.
    pub tokens: TokenManager,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub fn new(config: &Config) -> Result<Self> {
        let storage: Arc<dyn SessionStorage> = match &config.session_backend {
            SessionBackend::Memory => {
                tracing::info!("✅ Session storage: in-memory");
                Arc::new(MemoryStorage::new())
            }
            SessionBackend::File(path) => {
                tracing::info!("✅ Session storage: {}", path.display());
                Arc::new(FileStorage::new(path.clone()))
            }
        };

        Self::with_storage(config, storage)
    }

    /// Creates an `AppState` over an existing storage.
    pub fn with_storage(config: &Config, storage: Arc<dyn SessionStorage>) -> Result<Self> {
        let tokens = TokenManager::new(storage);
        let api = ApiClient::new(config.api_base_url.clone(), tokens.clone())?;
        tracing::info!("✅ API client initialized for {}", api.base_url());

        Ok(AppState {
            api,
            tokens,
            config: config.clone(),
        })
    }

    /// A search gate for course and blog search boxes.
    pub fn catalog_search_gate(&self) -> SearchGate {
        SearchGate::new(self.config.search_debounce)
    }

    /// A search gate for the dictionary search box.
    pub fn dictionary_search_gate(&self) -> SearchGate {
        SearchGate::new(self.config.dictionary_debounce)
    }
}
