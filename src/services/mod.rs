//! Business logic services

pub mod catalog;
pub mod populate;
pub mod search;
pub mod sessions;
pub mod visits;

use std::sync::Arc;

use crate::{config::SearchConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub search: search::SearchService,
    pub visits: visits::VisitsService,
}

impl Services {
    /// Create all services with the given repository and session store
    pub fn new(
        repository: Repository,
        search_config: SearchConfig,
        session_store: Arc<dyn sessions::SessionStore>,
    ) -> AppResult<Self> {
        Ok(Self {
            catalog: catalog::CatalogService::new(repository),
            search: search::SearchService::new(search_config)?,
            visits: visits::VisitsService::new(session_store),
        })
    }
}
