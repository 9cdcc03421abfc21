use super::{displayed_votes, CommandHandler, Workspace};
use crate::catalog::{top_ranked, FilterState};
use crate::Result;

/// Handler for the `top` command: the home page ranking
pub struct TopCommand {
    workspace: Workspace,
    limit: Option<usize>,
}

impl TopCommand {
    pub fn new(workspace: Workspace, limit: Option<usize>) -> Self {
        Self { workspace, limit }
    }
}

impl CommandHandler for TopCommand {
    fn execute(&self) -> Result<()> {
        let products = self.workspace.products()?;
        let ledger = self.workspace.open_ledger()?;
        let limit = self
            .limit
            .unwrap_or(self.workspace.config().display.home_limit);

        let ranked = top_ranked(&products, &FilterState::new(), limit);
        if ranked.entries.is_empty() {
            println!("No products yet.");
            return Ok(());
        }

        for (rank, product) in &ranked.entries {
            let voted = ledger.has_voted_today(&product.id);
            println!(
                "#{rank:<3} {:<24} {:>6}{}  {}",
                product.name,
                displayed_votes(product, voted),
                if voted { " ▲" } else { "  " },
                product.tagline
            );
        }

        if ranked.has_more {
            println!("\nSee all products with `makerboard products`.");
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "top"
    }
}
