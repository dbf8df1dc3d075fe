//! Shopdesk CLI - storefront and admin tool for the shopdesk REST API.
//!
//! Commands:
//! - `shopdesk products` - List, show, create, update and delete products
//! - `shopdesk users` - Same, for users
//! - `shopdesk route` - Show which page a path resolves to
//! - `shopdesk image-check` - Check whether a URL points at an image
//! - `shopdesk shop` - Interactive storefront session
//! - `shopdesk config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, ImageCheckArgs, ProductsArgs, RouteArgs, UsersArgs};

/// Shopdesk CLI - browse the store and manage products and users
#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// API base URL (overrides config file and SHOPDESK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage products
    Products(ProductsArgs),

    /// Manage users
    Users(UsersArgs),

    /// Resolve a path against the route table
    Route(RouteArgs),

    /// Check whether a URL points at an image
    ImageCheck(ImageCheckArgs),

    /// Start an interactive shopping session
    Shop,

    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Products(_) => "products",
            Commands::Users(_) => "users",
            Commands::Route(_) => "route",
            Commands::ImageCheck(_) => "image-check",
            Commands::Shop => "shop",
            Commands::Config(_) => "config",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.api_url.as_deref(), output)?;

    // Logging goes to stderr so stdout stays machine-readable
    let filter = if cli.verbose {
        "shopdesk=debug"
    } else {
        ctx.config.logging.filter.as_str()
    };
    if let Err(e) = shopdesk_observability::init_tracing(filter, ctx.config.logging.format) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    // Execute command
    tracing::debug!(
        command = cli.command.name(),
        config = ?ctx.config_path,
        api = %ctx.app.api.base_url,
        "dispatching command"
    );
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Users(args) => commands::users::run(args, &ctx).await,
        Commands::Route(args) => commands::route::run(args, &ctx).await,
        Commands::ImageCheck(args) => commands::image_check::run(args, &ctx).await,
        Commands::Shop => commands::shop::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
