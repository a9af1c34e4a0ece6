//! CLI command implementations.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use upenergy_auth::Role;
use upenergy_commerce::search::{SortOption, StatusFilter};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add tonnes of a token to the cart.
    Add(AddArgs),
    /// Remove a token from the cart.
    Remove {
        /// Token id.
        token_id: String,
    },
    /// Set the quantity of a token already in the cart; 0 or less removes it.
    Set {
        /// Token id.
        token_id: String,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the cart and its totals.
    Show,
}

/// Arguments for `cart add`.
#[derive(Args)]
pub struct AddArgs {
    /// Token id.
    pub token_id: String,

    /// Tonnes to add.
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,

    /// Price per tonne in USD.
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Display name.
    #[arg(long)]
    pub name: Option<String>,

    /// Project type, used for the name when none is given.
    #[arg(long)]
    pub project_type: Option<String>,

    /// Mark as a verified credit rather than a forward credit.
    #[arg(long)]
    pub verified: bool,

    /// Vintage year.
    #[arg(long)]
    pub vintage: Option<String>,

    /// Project location.
    #[arg(long)]
    pub location: Option<String>,

    /// Crediting methodology.
    #[arg(long)]
    pub methodology: Option<String>,

    /// Registry.
    #[arg(long)]
    pub registry: Option<String>,

    /// Tonnes available.
    #[arg(long)]
    pub available: Option<u32>,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// JSON file holding an array of token records.
    pub file: PathBuf,

    /// Search token id, serial, name and village.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only tokens from this country.
    #[arg(long)]
    pub country: Option<String>,

    /// for_sale, owned or available.
    #[arg(long)]
    pub status: Option<StatusFilter>,

    /// Only tokens distributed in this year.
    #[arg(long)]
    pub vintage: Option<i32>,

    /// newest, oldest, price_low_high, price_high_low or rating.
    #[arg(long, default_value = "newest")]
    pub sort: SortOption,

    /// Show only the first N tokens.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// List the countries and vintages present in the file.
    #[arg(long)]
    pub facets: bool,

    /// Add this token from the file to the cart.
    #[arg(long, value_name = "TOKEN_ID")]
    pub add: Option<String>,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Display name (prompted for when omitted).
    #[arg(short, long)]
    pub name: Option<String>,

    /// Email address (prompted for when omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// investor or admin.
    #[arg(short, long, default_value = "investor")]
    pub role: Role,
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
