//! Business logic services

pub mod catalog;
pub mod ledger;
pub mod library;
pub mod stats;

use crate::{config::AppConfig, error::AppResult};

use ledger::{Ledger, LoadOutcome};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub library: library::LibraryService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Build the services, loading the save file first when configured to
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let mut ledger = Ledger::new(config.lending.clone());

        if config.storage.load_on_start {
            match ledger.load(&config.storage.data_file)? {
                LoadOutcome::Loaded => tracing::info!(
                    books = ledger.books().len(),
                    loans = ledger.loans().len(),
                    "Restored ledger from save file"
                ),
                LoadOutcome::Missing => {}
            }
        }

        Ok(Self {
            library: library::LibraryService::new(ledger, config.storage.clone()),
            catalog: catalog::CatalogService::new(),
        })
    }
}
