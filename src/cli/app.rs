use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::catalog::{CategoryFilter, PlatformFilter, SortKey};

/// makerboard: browse products and makers, upvote once a day
#[derive(Parser)]
#[command(name = "makerboard")]
#[command(version)]
#[command(about = "Browse the product and maker directory and cast daily upvotes")]
#[command(
    long_about = "makerboard lists products and makers with filtering, search, sorting and pagination, and keeps a local ledger of one upvote per product per day."
)]
pub struct Cli {
    /// Config file (defaults to ./makerboard.yaml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Set log level
    #[arg(long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List products
    Products {
        /// Search name, description and tags
        #[arg(short, long, default_value = "")]
        search: String,

        /// Platform filter (all, web, ios, android, others)
        #[arg(short, long, default_value = "all")]
        platform: PlatformFilter,

        /// Sort key (votes, name)
        #[arg(long, default_value = "votes")]
        sort: SortKey,

        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List makers
    Makers {
        /// Search name, role, bio and category
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category filter (All, Developer, Designer, Marketing, Other)
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the most-voted products
    Top {
        /// How many products to rank (defaults to display.home_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Toggle today's upvote for a product
    Vote {
        /// Product id
        id: String,
    },

    /// Show whether a product was upvoted today
    Status {
        /// Product id
        id: String,
    },
}
