//! Shared application state for the Timeghost server.
//!
//! Everything here is read-only after startup, so handlers share it through
//! a plain `Arc` with no locking.

use timeghost_catalog::Catalog;
use timeghost_core::NUM_TRIES;

use crate::config::ServerSettings;
use crate::error::StartupError;
use crate::pages::Pages;

/// State shared by every request handler.
#[derive(Debug)]
pub struct AppState {
    /// The loaded event catalog.
    pub catalog: Catalog,
    /// Pre-loaded page templates.
    pub pages: Pages,
    /// Attempt budget for each selector run.
    pub max_tries: u32,
}

impl AppState {
    /// Build state from an already loaded catalog and templates, with the
    /// default attempt budget.
    pub const fn new(catalog: Catalog, pages: Pages) -> Self {
        Self {
            catalog,
            pages,
            max_tries: NUM_TRIES,
        }
    }

    /// Override the attempt budget.
    #[must_use]
    pub const fn with_max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Load the catalog and templates named by the settings.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if either cannot be loaded.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, StartupError> {
        let catalog = Catalog::from_path(&settings.catalog.path)?;
        let pages = Pages::from_dir(&settings.templates.dir)?;
        Ok(Self::new(catalog, pages).with_max_tries(settings.search.max_tries))
    }
}
