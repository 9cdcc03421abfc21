//! Makerboard catalog - products, makers and the query engine
//!
//! # Overview
//!
//! The catalog module turns a raw collection of records into what a
//! directory page shows:
//! - Filter products by platform and makers by category
//! - Search names, descriptions, tags and bios
//! - Sort by votes or name, stably, in either direction
//! - Paginate, and count every filter bucket over the whole catalog
//!
//! # Architecture
//!
//! ```text
//! CatalogSource / MakerDirectory   ← files, bundled data
//!            │  FetchResult (failure → empty)
//!            ▼
//!     &[Product] / &[Maker]        ← never mutated
//!            │  FilterState
//!            ▼
//!      query_catalog()  ──► CatalogPage { items, total_pages, facet_counts }
//! ```

mod filter;
mod query;
mod source;
mod types;

pub use filter::{CategoryFilter, FilterState, PlatformFilter, SortKey};
pub use query::{
    facet_counts, query_catalog, sorted_matches, top_ranked, CatalogItem, CatalogPage,
    FacetCount, RankedList, MAKERS_PER_PAGE, PRODUCTS_PER_PAGE,
};
pub use source::{
    load_records, CatalogSource, FetchResult, FileCatalog, MakerDirectory, StaticCatalog,
};
pub use types::{Badge, ExternalLinks, Maker, MakerCategory, MakerSummary, Product};
