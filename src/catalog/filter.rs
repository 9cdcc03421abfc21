//! Filter state owned by the presentation layer
//!
//! A `FilterState` is a plain value: the caller mutates it through the
//! transition methods below and hands it to the query engine on every
//! change. Any change that alters which items match, or their order, sends
//! the caller back to page 1. Moving between pages touches nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::types::MakerCategory;

/// Platform facet for products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFilter {
    #[default]
    All,
    Web,
    Ios,
    Android,
    Others,
}

impl PlatformFilter {
    pub const ALL: [PlatformFilter; 5] = [
        PlatformFilter::All,
        PlatformFilter::Web,
        PlatformFilter::Ios,
        PlatformFilter::Android,
        PlatformFilter::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformFilter::All => "all",
            PlatformFilter::Web => "web",
            PlatformFilter::Ios => "ios",
            PlatformFilter::Android => "android",
            PlatformFilter::Others => "others",
        }
    }

    /// Human label for the facet button
    pub fn label(&self) -> &'static str {
        match self {
            PlatformFilter::All => "All",
            PlatformFilter::Web => "Web",
            PlatformFilter::Ios => "iOS",
            PlatformFilter::Android => "Android",
            PlatformFilter::Others => "Others",
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatformFilter::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown platform '{s}' (expected all, web, ios, android or others)")
            })
    }
}

/// Category facet for makers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(MakerCategory),
}

impl CategoryFilter {
    /// All buckets in display order, `All` first
    pub fn buckets() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(MakerCategory::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryFilter::buckets()
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown category '{s}' (expected All, Developer, Designer, Marketing or Other)"
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Votes,
    Name,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "votes" => Ok(SortKey::Votes),
            "name" => Ok(SortKey::Name),
            _ => Err(format!("unknown sort key '{s}' (expected votes or name)")),
        }
    }
}

/// Everything the presentation layer controls about a catalog view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub platform: PlatformFilter,
    pub category: CategoryFilter,
    pub search_query: String,
    pub sort_key: SortKey,
    pub sort_ascending: bool,
    page: usize,
}

impl Default for FilterState {
    /// Most-voted first, first page, no filters
    fn default() -> Self {
        Self {
            platform: PlatformFilter::All,
            category: CategoryFilter::All,
            search_query: String::new(),
            sort_key: SortKey::Votes,
            sort_ascending: false,
            page: 1,
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current 1-based page
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.page = 1;
    }

    pub fn set_platform(&mut self, platform: PlatformFilter) {
        self.platform = platform;
        self.page = 1;
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_sort(&mut self, key: SortKey, ascending: bool) {
        self.sort_key = key;
        self.sort_ascending = ascending;
        self.page = 1;
    }

    /// Clicking the active sort key again flips its direction
    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
        self.page = 1;
    }

    /// Jump to a page; zero is read as page 1
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = self.page.saturating_add(1).min(total_pages.max(1));
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Clear platform and category, keeping search and sort
    pub fn reset_filters(&mut self) {
        self.platform = PlatformFilter::All;
        self.category = CategoryFilter::All;
        self.page = 1;
    }

    // Builder helpers used when the state is assembled in one go.

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.set_search(query);
        self
    }

    pub fn with_platform(mut self, platform: PlatformFilter) -> Self {
        self.set_platform(platform);
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.set_category(category);
        self
    }

    pub fn with_sort(mut self, key: SortKey, ascending: bool) -> Self {
        self.set_sort(key, ascending);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.go_to_page(page);
        self
    }
}
