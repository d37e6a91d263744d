use std::sync::Arc;

use anyhow::Result;
use tracing::info;

pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod guard;
pub mod query;
pub mod session;
pub mod store;

pub use config::{load_settings, PaginationMode, Settings};
pub use error::{ClientError, ClientResult};
pub use form::{FieldErrors, FormField, ProductForm};
pub use gateway::{CatalogGateway, HttpCatalogGateway};
pub use guard::{GuardDecision, GuardState, SessionGuard};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use store::{CatalogStore, InitialLoad, LoadOutcome, PageInfo, PageState, StoreEvent};

/// Everything a front end needs for one user session, wired from [`Settings`].
pub struct CatalogClient {
    pub settings: Settings,
    pub session: Arc<dyn SessionStore>,
    pub store: Arc<CatalogStore>,
    pub guard: SessionGuard,
    pub initial_load: InitialLoad,
}

impl CatalogClient {
    /// Uses the configured session file, or the platform default location.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let path = match &settings.session_file {
            Some(path) => path.clone(),
            None => config::default_session_file()?,
        };
        let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(path));
        Self::with_session(settings, session)
    }

    pub fn with_session(settings: Settings, session: Arc<dyn SessionStore>) -> Result<Self> {
        let gateway: Arc<dyn CatalogGateway> =
            Arc::new(HttpCatalogGateway::from_settings(&settings, session.clone())?);
        Ok(Self::with_gateway(settings, session, gateway))
    }

    pub fn with_gateway(
        settings: Settings,
        session: Arc<dyn SessionStore>,
        gateway: Arc<dyn CatalogGateway>,
    ) -> Self {
        info!(
            api_url = %settings.api_url,
            pagination = ?settings.pagination,
            items_per_page = settings.items_per_page,
            "catalog client configured"
        );
        let store = CatalogStore::with_options(gateway, settings.pagination, settings.items_per_page);
        let guard = SessionGuard::new(session.clone());
        Self {
            settings,
            session,
            store,
            guard,
            initial_load: InitialLoad::new(),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
