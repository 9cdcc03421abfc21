pub mod makers;
pub mod products;
pub mod top;
pub mod vote;

use std::path::{Path, PathBuf};

use crate::catalog::{
    CatalogSource, FileCatalog, Maker, MakerDirectory, Product, StaticCatalog,
};
use crate::config::{default_ledger_path, AppConfig, ConfigLoader};
use crate::votes::{JsonFileStore, VoteLedger, VoteToggle};
use crate::{MakerboardError, Result};

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Execute the command
    fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Loaded configuration plus the data it points at
pub struct Workspace {
    config: AppConfig,
}

impl Workspace {
    /// Load from an explicit config file, or discover one from `project_root`
    pub fn load(config_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let loader = ConfigLoader::new(project_root);
        let config = match config_path {
            Some(path) => loader.load_file(path)?,
            None => loader.discover()?,
        };
        Ok(Self { config })
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Products from the configured source; a failed fetch is an empty catalog
    pub fn products(&self) -> Result<Vec<Product>> {
        Ok(match &self.config.catalog.products {
            Some(path) => FileCatalog::new(path).fetch_products(),
            None => StaticCatalog::bundled()?.fetch_products(),
        }
        .into_data_or_default())
    }

    pub fn makers(&self) -> Result<Vec<Maker>> {
        Ok(match (&self.config.catalog.products, &self.config.catalog.makers) {
            (Some(products), Some(makers)) => FileCatalog::new(products).with_makers(makers).makers(),
            _ => StaticCatalog::bundled()?.makers(),
        })
    }

    pub fn ledger_path(&self) -> Result<PathBuf> {
        self.config
            .ledger
            .path
            .clone()
            .or_else(default_ledger_path)
            .ok_or_else(|| {
                MakerboardError::Config(
                    "No ledger.path configured and no user data directory available".to_string(),
                )
            })
    }

    pub fn open_ledger(&self) -> Result<VoteLedger<JsonFileStore>> {
        let path = self.ledger_path()?;
        tracing::debug!("Opening vote ledger at {}", path.display());
        Ok(VoteLedger::new(JsonFileStore::open(path)?))
    }
}

/// The count a product card shows: stored votes plus today's local vote
pub fn displayed_votes(product: &Product, voted_today: bool) -> u64 {
    let mut shown = product.clone();
    if voted_today {
        shown.apply_vote(VoteToggle::cast());
    }
    shown.votes
}

/// Cut long text for table cells
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
