use super::types::AppConfig;
use crate::{MakerboardError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// File name looked up in the project directory and the user config dir
pub const CONFIG_FILE_NAME: &str = "makerboard.yaml";

/// Loads `makerboard.yaml`
pub struct ConfigLoader {
    /// Directory searched first
    project_root: PathBuf,
    /// Also look in the user config directory
    user_fallback: bool,
}

impl ConfigLoader {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            user_fallback: true,
        }
    }

    /// Only consult the project directory
    pub fn without_user_fallback(mut self) -> Self {
        self.user_fallback = false;
        self
    }

    /// Load an explicit file; it must exist
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<AppConfig> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MakerboardError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config: AppConfig = serde_yaml_ng::from_str(&contents).map_err(|e| {
            MakerboardError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        self.validate(&config, path)?;

        // Relative data paths are relative to the config file
        if let Some(base) = path.parent() {
            resolve_relative(&mut config, base);
        }

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Discover a config: project first, then the user config dir, else defaults
    pub fn discover(&self) -> Result<AppConfig> {
        let project_path = self.project_root.join(CONFIG_FILE_NAME);
        if project_path.exists() {
            return self.load_file(project_path);
        }

        if self.user_fallback {
            if let Some(user_path) = user_config_path() {
                if user_path.exists() {
                    return self.load_file(user_path);
                }
            }
        }

        tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(AppConfig::default())
    }

    fn validate(&self, config: &AppConfig, path: &Path) -> Result<()> {
        if config.display.home_limit == 0 {
            return Err(MakerboardError::Config(format!(
                "{}: display.home_limit must be at least 1",
                path.display()
            )));
        }

        if config.catalog.makers.is_some() && config.catalog.products.is_none() {
            return Err(MakerboardError::Config(format!(
                "{}: catalog.makers requires catalog.products",
                path.display()
            )));
        }

        Ok(())
    }
}

fn resolve_relative(config: &mut AppConfig, base: &Path) {
    for path in [
        &mut config.catalog.products,
        &mut config.catalog.makers,
        &mut config.ledger.path,
    ]
    .into_iter()
    .flatten()
    {
        if path.is_relative() {
            *path = base.join(&*path);
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "makerboard")
}

/// `makerboard.yaml` in the user config directory
pub fn user_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Default ledger location in the user data directory
pub fn default_ledger_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("ledger.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigLoader::new(temp_dir.path())
            .without_user_fallback()
            .discover()
            .unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.display.home_limit, 5);
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "catalog:\n  products: data/products.json\nledger:\n  path: /var/tmp/ledger.json\n",
        )
        .unwrap();

        let config = ConfigLoader::new(temp_dir.path())
            .without_user_fallback()
            .discover()
            .unwrap();

        assert_eq!(
            config.catalog.products,
            Some(temp_dir.path().join("data/products.json"))
        );
        assert_eq!(
            config.ledger.path,
            Some(PathBuf::from("/var/tmp/ledger.json"))
        );
        assert_eq!(config.catalog.makers, None);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.yaml");

        std::fs::write(&path, "display:\n  home_limit: 0\n").unwrap();
        let err = ConfigLoader::new(temp_dir.path()).load_file(&path).unwrap_err();
        assert!(matches!(err, MakerboardError::Config(_)));

        std::fs::write(&path, "unknown_section: true\n").unwrap();
        let err = ConfigLoader::new(temp_dir.path()).load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
