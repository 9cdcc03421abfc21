use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level `makerboard.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where catalog records come from
///
/// When `products` is unset the bundled demo catalog is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub products: Option<PathBuf>,
    #[serde(default)]
    pub makers: Option<PathBuf>,
}

/// Where the vote ledger lives on this device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// How many products the `top` view ranks
    #[serde(default = "default_home_limit")]
    pub home_limit: usize,
}

fn default_home_limit() -> usize {
    5
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            home_limit: default_home_limit(),
        }
    }
}
