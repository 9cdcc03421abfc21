pub mod loader;
pub mod types;

pub use loader::{default_ledger_path, user_config_path, ConfigLoader, CONFIG_FILE_NAME};
pub use types::{AppConfig, CatalogConfig, DisplayConfig, LedgerConfig};
