//! Catalog query engine
//!
//! `query_catalog` turns a collection plus a [`FilterState`] into one
//! displayed page and the facet counts for the filter bar. It never fails
//! and never mutates the collection.
//!
//! Facet counts and the page are derived along two separate paths: facets
//! always describe the whole collection, so narrowing the platform, the
//! category or the search text only changes the page.

use feruca::Collator;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use super::filter::{CategoryFilter, FilterState, PlatformFilter, SortKey};
use super::types::{ExternalLinks, Maker, Product};

/// Products shown per page
pub const PRODUCTS_PER_PAGE: usize = 8;

/// Makers shown per page
pub const MAKERS_PER_PAGE: usize = 12;

/// A record the query engine knows how to filter, search and sort
pub trait CatalogItem {
    /// The bucket type shown in the filter bar
    type Facet: Copy + Eq + Hash + Debug + Serialize;

    const PAGE_SIZE: usize;

    /// Every bucket in display order; the first is the "everything" bucket
    fn facets() -> Vec<Self::Facet>;

    fn facet_label(facet: Self::Facet) -> &'static str;

    /// The bucket currently selected in `filters`
    fn selected_facet(filters: &FilterState) -> Self::Facet;

    fn in_facet(&self, facet: Self::Facet) -> bool;

    /// `needle` is already lower-cased and non-empty
    fn matches_search(&self, needle: &str) -> bool;

    fn sort_name(&self) -> &str;

    fn vote_count(&self) -> u64 {
        0
    }
}

impl CatalogItem for Product {
    type Facet = PlatformFilter;

    const PAGE_SIZE: usize = PRODUCTS_PER_PAGE;

    fn facets() -> Vec<PlatformFilter> {
        PlatformFilter::ALL.to_vec()
    }

    fn facet_label(facet: PlatformFilter) -> &'static str {
        facet.label()
    }

    fn selected_facet(filters: &FilterState) -> PlatformFilter {
        filters.platform
    }

    fn in_facet(&self, facet: PlatformFilter) -> bool {
        let links = self.external_links.as_ref();
        match facet {
            PlatformFilter::All => true,
            PlatformFilter::Web => links.is_some_and(ExternalLinks::has_website),
            PlatformFilter::Ios => links.is_some_and(ExternalLinks::has_app_store),
            PlatformFilter::Android => links.is_some_and(ExternalLinks::has_play_store),
            PlatformFilter::Others => links.map_or(true, ExternalLinks::has_no_platform),
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle)
            || contains_folded(&self.description, needle)
            || self.tags.iter().any(|tag| contains_folded(tag, needle))
    }

    fn sort_name(&self) -> &str {
        &self.name
    }

    fn vote_count(&self) -> u64 {
        self.votes
    }
}

impl CatalogItem for Maker {
    type Facet = CategoryFilter;

    const PAGE_SIZE: usize = MAKERS_PER_PAGE;

    fn facets() -> Vec<CategoryFilter> {
        CategoryFilter::buckets()
    }

    fn facet_label(facet: CategoryFilter) -> &'static str {
        facet.label()
    }

    fn selected_facet(filters: &FilterState) -> CategoryFilter {
        filters.category
    }

    fn in_facet(&self, facet: CategoryFilter) -> bool {
        match facet {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => self.category == category,
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_folded(&self.name, needle)
            || contains_folded(&self.role, needle)
            || contains_folded(&self.bio, needle)
            || contains_folded(self.category.as_str(), needle)
    }

    fn sort_name(&self) -> &str {
        &self.name
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Count of catalog members in one filter-bar bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount<F> {
    pub facet: F,
    pub label: &'static str,
    pub count: usize,
}

/// One rendered page of a catalog query
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "T: Serialize"))]
pub struct CatalogPage<'a, T: CatalogItem> {
    pub items: Vec<&'a T>,
    /// The 1-based page that was requested
    pub page: usize,
    pub total_pages: usize,
    pub match_count: usize,
    pub facet_counts: Vec<FacetCount<<T as CatalogItem>::Facet>>,
}

impl<T: CatalogItem> CatalogPage<'_, T> {
    /// Nothing matched the current filters
    pub fn is_empty(&self) -> bool {
        self.match_count == 0
    }

    pub fn facet_count(&self, facet: T::Facet) -> usize {
        self.facet_counts
            .iter()
            .find(|f| f.facet == facet)
            .map(|f| f.count)
            .unwrap_or(0)
    }
}

/// Top of the sorted catalog with 1-based ranks, as shown on the home page
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "T: Serialize"))]
pub struct RankedList<'a, T> {
    pub entries: Vec<(usize, &'a T)>,
    /// More matches exist beyond the limit
    pub has_more: bool,
}

/// Filter, search, sort and paginate `items`
pub fn query_catalog<'a, T: CatalogItem>(
    items: &'a [T],
    filters: &FilterState,
) -> CatalogPage<'a, T> {
    let facet_counts = facet_counts(items);
    let matched = sorted_matches(items, filters);

    let match_count = matched.len();
    let total_pages = match_count.div_ceil(T::PAGE_SIZE);
    let page = filters.page().max(1);
    let start = (page - 1).saturating_mul(T::PAGE_SIZE);

    let page_items: Vec<&T> = matched
        .into_iter()
        .skip(start)
        .take(T::PAGE_SIZE)
        .collect();

    tracing::debug!(
        match_count,
        total_pages,
        page,
        shown = page_items.len(),
        "catalog query"
    );

    CatalogPage {
        items: page_items,
        page,
        total_pages,
        match_count,
        facet_counts,
    }
}

/// The first `limit` items of the sorted, filtered catalog
pub fn top_ranked<'a, T: CatalogItem>(
    items: &'a [T],
    filters: &FilterState,
    limit: usize,
) -> RankedList<'a, T> {
    let matched = sorted_matches(items, filters);
    let has_more = matched.len() > limit;

    RankedList {
        entries: matched
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, item)| (i + 1, item))
            .collect(),
        has_more,
    }
}

/// Bucket sizes over the whole collection
pub fn facet_counts<T: CatalogItem>(items: &[T]) -> Vec<FacetCount<T::Facet>> {
    T::facets()
        .into_iter()
        .map(|facet| FacetCount {
            facet,
            label: T::facet_label(facet),
            count: items.iter().filter(|item| item.in_facet(facet)).count(),
        })
        .collect()
}

/// Every match for `filters`, in display order
pub fn sorted_matches<'a, T: CatalogItem>(items: &'a [T], filters: &FilterState) -> Vec<&'a T> {
    let selected = T::selected_facet(filters);
    let needle = filters.search_query.to_lowercase();

    let mut matched: Vec<&T> = items
        .iter()
        .filter(|item| item.in_facet(selected))
        .filter(|item| needle.is_empty() || item.matches_search(&needle))
        .collect();

    let mut collator = Collator::default();

    // sort_by is stable, and reversing an Equal ordering keeps it Equal, so
    // ties stay in input order in both directions.
    matched.sort_by(|a, b| {
        let ordering = match filters.sort_key {
            SortKey::Votes => a.vote_count().cmp(&b.vote_count()),
            SortKey::Name => compare_names(&mut collator, a.sort_name(), b.sort_name()),
        };
        if filters.sort_ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    matched
}

/// Unicode collation (CLDR root order), so accented and differently cased
/// letters sort next to their base letter. Raw byte order only settles names
/// the collator still considers equal.
fn compare_names(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn product(name: &str, links: Option<ExternalLinks>) -> Product {
        Product {
            id: name.to_lowercase(),
            name: name.to_string(),
            tagline: String::new(),
            description: String::new(),
            image_url: None,
            votes: 0,
            comments_count: 0,
            tags: Vec::new(),
            badges: Vec::new(),
            external_links: links,
            makers: Vec::new(),
        }
    }

    #[test]
    fn test_compare_names_ignores_case_first() {
        let mut collator = Collator::default();
        assert_eq!(compare_names(&mut collator, "alpha", "Beta"), Ordering::Less);
        assert_eq!(compare_names(&mut collator, "Zeta", "alpha"), Ordering::Greater);
        assert_eq!(compare_names(&mut collator, "same", "same"), Ordering::Equal);
        assert_ne!(compare_names(&mut collator, "Same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let mut collator = Collator::default();
        assert_eq!(compare_names(&mut collator, "Ávila", "Beta"), Ordering::Less);
        assert_eq!(compare_names(&mut collator, "Zeta", "Ávila"), Ordering::Greater);
        assert_eq!(compare_names(&mut collator, "Ana López", "Ana Lopez"), Ordering::Greater);

        let products = vec![
            product("Zeta", None),
            product("Ávila", None),
            product("Beta", None),
            product("Íñigo", None),
            product("diego Marín", None),
        ];
        let filters = FilterState::new().with_sort(SortKey::Name, true);
        let names: Vec<&str> = sorted_matches(&products, &filters)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ávila", "Beta", "diego Marín", "Íñigo", "Zeta"]);

        let descending = FilterState::new().with_sort(SortKey::Name, false);
        let names: Vec<&str> = sorted_matches(&products, &descending)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zeta", "Íñigo", "diego Marín", "Beta", "Ávila"]);
    }

    #[test]
    fn test_missing_links_count_as_others_only() {
        let bare = product("Bare", None);
        let web = product(
            "Web",
            Some(ExternalLinks {
                website: Some("https://web.example".to_string()),
                ..Default::default()
            }),
        );

        assert!(bare.in_facet(PlatformFilter::Others));
        assert!(bare.in_facet(PlatformFilter::All));
        assert!(!bare.in_facet(PlatformFilter::Web));
        assert!(!bare.in_facet(PlatformFilter::Android));
        assert!(web.in_facet(PlatformFilter::Web));
        assert!(!web.in_facet(PlatformFilter::Others));
    }

    #[test]
    fn test_contains_folded() {
        assert!(contains_folded("Focus Timer", "timer"));
        assert!(!contains_folded("Focus Timer", "clock"));
    }
}
