use super::{displayed_votes, CommandHandler, Workspace};
use crate::catalog::Product;
use crate::{MakerboardError, Result};

/// Handler for the `vote` command
pub struct VoteCommand {
    workspace: Workspace,
    product_id: String,
}

impl VoteCommand {
    pub fn new(workspace: Workspace, product_id: String) -> Self {
        Self {
            workspace,
            product_id,
        }
    }
}

impl CommandHandler for VoteCommand {
    fn execute(&self) -> Result<()> {
        let product = find_product(&self.workspace, &self.product_id)?;
        let mut ledger = self.workspace.open_ledger()?;

        let mut shown = product.clone();
        shown.votes = displayed_votes(&product, ledger.has_voted_today(&product.id));

        let toggle = ledger.toggle(&product.id);
        shown.apply_vote(toggle);

        if toggle.voted {
            println!("Upvoted {} ({} votes)", product.name, shown.votes);
        } else {
            println!("Removed upvote from {} ({} votes)", product.name, shown.votes);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "vote"
    }
}

/// Handler for the `status` command
pub struct StatusCommand {
    workspace: Workspace,
    product_id: String,
}

impl StatusCommand {
    pub fn new(workspace: Workspace, product_id: String) -> Self {
        Self {
            workspace,
            product_id,
        }
    }
}

impl CommandHandler for StatusCommand {
    fn execute(&self) -> Result<()> {
        let product = find_product(&self.workspace, &self.product_id)?;
        let ledger = self.workspace.open_ledger()?;

        if ledger.has_voted_today(&product.id) {
            println!("You upvoted {} today.", product.name);
        } else {
            println!("You have not upvoted {} today.", product.name);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "status"
    }
}

fn find_product(workspace: &Workspace, id: &str) -> Result<Product> {
    workspace
        .products()?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| MakerboardError::Catalog(format!("Unknown product '{id}'")))
}
