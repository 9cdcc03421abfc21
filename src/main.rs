use anyhow::{Context, Result};
use clap::Parser;
use makerboard::{
    catalog::FilterState,
    cli::commands::{
        makers::MakersCommand,
        products::ProductsCommand,
        top::TopCommand,
        vote::{StatusCommand, VoteCommand},
        CommandHandler, Workspace,
    },
    cli::{Cli, Commands, LogLevel},
};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so `--json` output on stdout stays parseable
fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let workspace = Workspace::load(cli.config.as_deref(), &current_dir)
        .context("Failed to load makerboard configuration")?;

    let command: Box<dyn CommandHandler> = match cli.command {
        Commands::Products {
            search,
            platform,
            sort,
            asc,
            page,
            json,
        } => {
            let filters = FilterState::new()
                .with_search(search)
                .with_platform(platform)
                .with_sort(sort, asc)
                .with_page(page);
            Box::new(ProductsCommand::new(workspace, filters, json))
        }
        Commands::Makers {
            search,
            category,
            page,
            json,
        } => {
            let filters = FilterState::new()
                .with_search(search)
                .with_category(category)
                .with_page(page);
            Box::new(MakersCommand::new(workspace, filters, json))
        }
        Commands::Top { limit } => Box::new(TopCommand::new(workspace, limit)),
        Commands::Vote { id } => Box::new(VoteCommand::new(workspace, id)),
        Commands::Status { id } => Box::new(StatusCommand::new(workspace, id)),
    };

    tracing::debug!(command = command.name(), "running command");
    command
        .execute()
        .with_context(|| format!("{} command failed", command.name()))?;

    Ok(())
}
