use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use super::{truncate, CommandHandler, Workspace};
use crate::catalog::{query_catalog, FilterState};
use crate::Result;

/// Handler for the `makers` command
pub struct MakersCommand {
    workspace: Workspace,
    filters: FilterState,
    json: bool,
}

#[derive(Tabled)]
struct MakerRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Profile")]
    profile: String,
    #[tabled(rename = "Bio")]
    bio: String,
}

impl MakersCommand {
    pub fn new(workspace: Workspace, filters: FilterState, json: bool) -> Self {
        Self {
            workspace,
            filters,
            json,
        }
    }
}

impl CommandHandler for MakersCommand {
    fn execute(&self) -> Result<()> {
        let makers = self.workspace.makers()?;
        let page = query_catalog(&makers, &self.filters);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&page)?);
            return Ok(());
        }

        let facets: Vec<String> = page
            .facet_counts
            .iter()
            .map(|f| {
                let marker = if f.facet == self.filters.category { "*" } else { "" };
                format!("{marker}{} ({})", f.label, f.count)
            })
            .collect();
        println!("{}\n", facets.join("  "));

        if page.items.is_empty() {
            println!("No makers found for the current filters.");
            return Ok(());
        }

        let rows: Vec<MakerRow> = page
            .items
            .iter()
            .map(|maker| MakerRow {
                name: maker.name.clone(),
                role: maker.role.clone(),
                category: maker.category.to_string(),
                profile: format!("/maker/{}", maker.slug()),
                bio: truncate(&maker.bio, 40),
            })
            .collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();
        println!("{table}");
        println!("\nPage {} of {}", page.page, page.total_pages);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "makers"
    }
}
