//! newsgate CLI
//!
//! Exercises the gateway against the live provider from the command line.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use newsgate::{
    error::Result,
    gateway::NewsGateway,
    models::{Category, DateRange, FeedOptions, GatewayConfig, SortOrder},
};

/// newsgate - Quota-aware news gateway
#[derive(Parser, Debug)]
#[command(name = "newsgate", version, about = "Quota-aware news gateway")]
struct Cli {
    /// Path to the gateway configuration file
    #[arg(short, long, default_value = "gateway.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one category page
    Category {
        category: Category,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        page_size: u32,

        /// Earliest publication date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Latest publication date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// newest, oldest, or relevance
        #[arg(long)]
        sort: Option<SortOrder>,
    },

    /// Merge several categories into one feed page
    Preferences {
        /// Comma-separated category list (e.g. technology,business)
        categories: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        page_size: u32,

        #[arg(long)]
        sort: Option<SortOrder>,
    },

    /// Free-text search
    Search {
        query: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },

    /// Resolve a single article by provider id or URL
    Article { id_or_url: String },

    /// Show quota usage
    Stats,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn feed_options(
    page: u32,
    page_size: u32,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    sort: Option<SortOrder>,
) -> FeedOptions {
    let date_range = if from.is_some() || to.is_some() {
        Some(DateRange { from, to })
    } else {
        None
    };
    FeedOptions {
        page,
        page_size,
        date_range,
        sort,
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = GatewayConfig::load_or_default(&cli.config);

    if let Command::Validate = cli.command {
        config.validate()?;
        log::info!("Config OK");
        return Ok(());
    }

    let gateway = NewsGateway::new(&config)?;
    gateway.start_cache_cleanup();

    match cli.command {
        Command::Category {
            category,
            page,
            page_size,
            from,
            to,
            sort,
        } => {
            let feed = gateway
                .fetch_by_category(category, &feed_options(page, page_size, from, to, sort))
                .await?;
            print_json(&feed)?;
        }

        Command::Preferences {
            categories,
            page,
            page_size,
            sort,
        } => {
            let categories = categories
                .split(',')
                .map(str::parse)
                .collect::<Result<Vec<Category>>>()?;
            let feed = gateway
                .fetch_by_preferences(&categories, &feed_options(page, page_size, None, None, sort))
                .await?;
            print_json(&feed)?;
        }

        Command::Search {
            query,
            page,
            page_size,
        } => {
            let feed = gateway
                .search(&query, &feed_options(page, page_size, None, None, None))
                .await?;
            print_json(&feed)?;
        }

        Command::Article { id_or_url } => {
            let article = gateway.fetch_by_id(&id_or_url).await?;
            print_json(&article)?;
        }

        Command::Stats => {
            print_json(&gateway.rate_limit_stats())?;
        }

        Command::Validate => unreachable!("handled before gateway construction"),
    }

    gateway.stop_cache_cleanup();
    Ok(())
}
