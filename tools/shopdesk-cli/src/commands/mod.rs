//! CLI command implementations.

pub mod config;
pub mod image_check;
pub mod products;
pub mod route;
pub mod shop;
pub mod users;

use clap::{Args, Subcommand};
use shopdesk_commerce::{ProductId, UserId};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List all products.
    List,
    /// Show one product.
    Get {
        /// Product id.
        id: ProductId,
    },
    /// Create a product.
    Create(ProductFields),
    /// Update a product. Only the given fields change.
    Update {
        /// Product id.
        id: ProductId,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product.
    Delete {
        /// Product id.
        id: ProductId,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Product fields settable from the command line.
#[derive(Args, Debug, Default)]
pub struct ProductFields {
    /// Product name.
    #[arg(long)]
    pub name: Option<String>,

    /// Unit price.
    #[arg(long)]
    pub price: Option<f64>,

    /// Description.
    #[arg(long)]
    pub description: Option<String>,

    /// Image URL.
    #[arg(long)]
    pub image: Option<String>,

    /// Category.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the users command.
#[derive(Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List all users.
    List,
    /// Show one user.
    Get {
        /// User id.
        id: UserId,
    },
    /// Create a user.
    Create(UserFields),
    /// Update a user. Only the given fields change.
    Update {
        /// User id.
        id: UserId,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user.
    Delete {
        /// User id.
        id: UserId,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// User fields settable from the command line.
#[derive(Args, Debug, Default)]
pub struct UserFields {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,

    /// Avatar URL.
    #[arg(long)]
    pub avatar: Option<String>,
}

/// Arguments for the route command.
#[derive(Args)]
pub struct RouteArgs {
    /// Path to resolve, e.g. /products/5 or /dashboard/users.
    pub path: String,
}

/// Arguments for the image-check command.
#[derive(Args)]
pub struct ImageCheckArgs {
    /// Absolute URL to check.
    pub url: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
