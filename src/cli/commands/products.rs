use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use super::{displayed_votes, truncate, CommandHandler, Workspace};
use crate::catalog::{query_catalog, Badge, CatalogPage, FilterState, Product};
use crate::votes::{JsonFileStore, VoteLedger};
use crate::Result;

/// Handler for the `products` command
pub struct ProductsCommand {
    workspace: Workspace,
    filters: FilterState,
    json: bool,
}

/// Table row for one product
#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Votes")]
    votes: String,
    #[tabled(rename = "Platforms")]
    platforms: String,
    #[tabled(rename = "Badges")]
    badges: String,
    #[tabled(rename = "Tagline")]
    tagline: String,
}

impl ProductsCommand {
    pub fn new(workspace: Workspace, filters: FilterState, json: bool) -> Self {
        Self {
            workspace,
            filters,
            json,
        }
    }

    fn print_json(
        &self,
        page: &CatalogPage<'_, Product>,
        ledger: &VoteLedger<JsonFileStore>,
    ) -> Result<()> {
        let items: Vec<serde_json::Value> = page
            .items
            .iter()
            .map(|product| {
                let voted = ledger.has_voted_today(&product.id);
                serde_json::json!({
                    "id": product.id,
                    "name": product.name,
                    "tagline": product.tagline,
                    "votes": displayed_votes(product, voted),
                    "votedToday": voted,
                    "platforms": product.platform_labels(),
                    "badges": product.badges,
                    "tags": product.tags,
                })
            })
            .collect();

        let output = serde_json::json!({
            "page": page.page,
            "totalPages": page.total_pages,
            "matchCount": page.match_count,
            "facets": page.facet_counts,
            "items": items,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn print_table(&self, page: &CatalogPage<'_, Product>, ledger: &VoteLedger<JsonFileStore>) {
        let facets: Vec<String> = page
            .facet_counts
            .iter()
            .map(|f| {
                let marker = if f.facet == self.filters.platform { "*" } else { "" };
                format!("{marker}{} ({})", f.label, f.count)
            })
            .collect();
        println!("{}\n", facets.join("  "));

        if page.items.is_empty() {
            println!("No products found for the current filters.");
            return;
        }

        let rows: Vec<ProductRow> = page
            .items
            .iter()
            .map(|product| {
                let voted = ledger.has_voted_today(&product.id);
                let votes = displayed_votes(product, voted);
                ProductRow {
                    id: product.id.clone(),
                    name: product.name.clone(),
                    votes: if voted {
                        format!("{votes} ▲")
                    } else {
                        votes.to_string()
                    },
                    platforms: product.platform_labels().join(", "),
                    badges: badge_labels(product),
                    tagline: truncate(&product.tagline, 40),
                }
            })
            .collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();
        println!("{table}");
        println!("\nPage {} of {}", page.page, page.total_pages);
    }
}

impl CommandHandler for ProductsCommand {
    fn execute(&self) -> Result<()> {
        let products = self.workspace.products()?;
        let ledger = self.workspace.open_ledger()?;
        let page = query_catalog(&products, &self.filters);

        if self.json {
            self.print_json(&page, &ledger)
        } else {
            self.print_table(&page, &ledger);
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "products"
    }
}

fn badge_labels(product: &Product) -> String {
    let mut labels = Vec::new();
    if product.has_badge(Badge::Trending) {
        labels.push("Trending");
    }
    if product.has_badge(Badge::New) {
        labels.push("New");
    }
    labels.join(", ")
}
