//! Catalog data sources
//!
//! The query engine only ever sees a slice of records. These types supply
//! that slice: `CatalogSource` answers with a success/failure envelope, and
//! a failed fetch becomes an empty collection at the boundary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{Maker, Product};
use crate::{MakerboardError, Result};

/// Outcome of a product fetch, serialized as `{ "success": .., "data" | "error": .. }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchResult<T> {
    Success { success: SuccessFlag<true>, data: T },
    Failure { success: SuccessFlag<false>, error: String },
}

/// Literal `true` / `false` tag for the untagged envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuccessFlag<const V: bool>;

impl<const V: bool> Serialize for SuccessFlag<V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bool(V)
    }
}

impl<'de, const V: bool> Deserialize<'de> for SuccessFlag<V> {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = bool::deserialize(deserializer)?;
        if value == V {
            Ok(SuccessFlag)
        } else {
            Err(serde::de::Error::custom(format!("expected success = {V}")))
        }
    }
}

impl<T> FetchResult<T> {
    pub fn success(data: T) -> Self {
        FetchResult::Success {
            success: SuccessFlag,
            data,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        FetchResult::Failure {
            success: SuccessFlag,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }
}

impl<T: Default> FetchResult<T> {
    /// The fetched data, or an empty collection when the fetch failed
    pub fn into_data_or_default(self) -> T {
        match self {
            FetchResult::Success { data, .. } => data,
            FetchResult::Failure { error, .. } => {
                tracing::warn!("Product fetch failed, showing empty catalog: {}", error);
                T::default()
            }
        }
    }
}

/// Supplies the product catalog
pub trait CatalogSource {
    fn fetch_products(&self) -> FetchResult<Vec<Product>>;
}

/// Supplies the maker directory; there is no failure channel
pub trait MakerDirectory {
    fn makers(&self) -> Vec<Maker>;
}

/// In-memory catalog, used for bundled data and tests
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
    makers: Vec<Maker>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>, makers: Vec<Maker>) -> Self {
        Self { products, makers }
    }

    /// The demo catalog compiled into the binary
    pub fn bundled() -> Result<Self> {
        let products = serde_json::from_str(include_str!("../../data/products.json"))?;
        let makers = serde_json::from_str(include_str!("../../data/makers.json"))?;
        Ok(Self { products, makers })
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch_products(&self) -> FetchResult<Vec<Product>> {
        FetchResult::success(self.products.clone())
    }
}

impl MakerDirectory for StaticCatalog {
    fn makers(&self) -> Vec<Maker> {
        self.makers.clone()
    }
}

/// Catalog backed by JSON or YAML files, chosen by extension
#[derive(Debug, Clone)]
pub struct FileCatalog {
    products_path: PathBuf,
    makers_path: Option<PathBuf>,
}

impl FileCatalog {
    pub fn new(products_path: impl Into<PathBuf>) -> Self {
        Self {
            products_path: products_path.into(),
            makers_path: None,
        }
    }

    pub fn with_makers(mut self, makers_path: impl Into<PathBuf>) -> Self {
        self.makers_path = Some(makers_path.into());
        self
    }

    pub fn products_path(&self) -> &Path {
        &self.products_path
    }
}

impl CatalogSource for FileCatalog {
    fn fetch_products(&self) -> FetchResult<Vec<Product>> {
        match load_records(&self.products_path) {
            Ok(products) => {
                tracing::debug!(
                    "Loaded {} products from {}",
                    products.len(),
                    self.products_path.display()
                );
                FetchResult::success(products)
            }
            Err(e) => FetchResult::failure(e.to_string()),
        }
    }
}

impl MakerDirectory for FileCatalog {
    fn makers(&self) -> Vec<Maker> {
        let Some(path) = &self.makers_path else {
            return Vec::new();
        };
        match load_records(path) {
            Ok(makers) => makers,
            Err(e) => {
                tracing::warn!("Failed to load makers from {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}

/// Read a list of records, picking the format from the file extension
pub fn load_records<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        MakerboardError::Catalog(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );

    if is_yaml {
        Ok(serde_yaml_ng::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_envelope_serialization() {
        let ok: FetchResult<Vec<u32>> = FetchResult::success(vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({ "success": true, "data": [1, 2] })
        );

        let failed: FetchResult<Vec<u32>> =
            serde_json::from_str(r#"{ "success": false, "error": "timeout" }"#).unwrap();
        assert!(!failed.is_success());
        assert!(failed.into_data_or_default().is_empty());
    }

    #[test]
    fn test_missing_file_is_a_failed_fetch() {
        let temp_dir = TempDir::new().unwrap();
        let source = FileCatalog::new(temp_dir.path().join("missing.json"));

        let result = source.fetch_products();
        assert!(!result.is_success());
        assert!(result.into_data_or_default().is_empty());
    }

    #[test]
    fn test_yaml_products_and_makers() {
        let temp_dir = TempDir::new().unwrap();
        let products = temp_dir.path().join("products.yaml");
        let makers = temp_dir.path().join("makers.yml");
        fs::write(
            &products,
            "- id: p1\n  name: Quill\n  votes: 3\n  externalLinks:\n    website: https://quill.dev\n",
        )
        .unwrap();
        fs::write(
            &makers,
            "- id: m1\n  name: Rosa Vidal\n  role: Founder\n  category: Marketing\n",
        )
        .unwrap();

        let source = FileCatalog::new(&products).with_makers(&makers);
        let loaded = source.fetch_products().into_data_or_default();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Quill");
        assert_eq!(source.makers().len(), 1);
    }

    #[test]
    fn test_unreadable_makers_degrade_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let makers = temp_dir.path().join("makers.json");
        fs::write(&makers, "{ not json").unwrap();

        let source = FileCatalog::new(temp_dir.path().join("p.json")).with_makers(&makers);
        assert!(source.makers().is_empty());
    }

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = StaticCatalog::bundled().unwrap();
        assert!(!catalog.fetch_products().into_data_or_default().is_empty());
        assert!(!catalog.makers().is_empty());
    }
}
