//! Storefront cart CLI - browse the catalog and manage the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! cart-cli products --category Clothes --search hooded
//! cart-cli categories
//!
//! # Manage the cart
//! cart-cli add 7
//! cart-cli set 7 3
//! cart-cli remove 7
//! cart-cli clear
//! cart-cli show
//! ```
//!
//! # Commands
//!
//! - `show` - Print the cart and its totals
//! - `add` - Fetch a product from the catalog and add one unit
//! - `remove` - Remove a product's line
//! - `set` - Set a line's quantity (0 or less removes it)
//! - `clear` - Empty the cart
//! - `products` - List catalog products, optionally filtered
//! - `categories` - List catalog categories
//!
//! Configuration comes from the environment; see `storefront_cart::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use storefront_cart::CartConfig;
use storefront_cart::catalog::ProductFilter;
use storefront_cart_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(author, version, about = "Storefront cart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart and its totals
    Show,
    /// Add one unit of a catalog product
    Add {
        /// Catalog product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product ID
        product_id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Catalog product ID
        product_id: ProductId,

        /// New quantity (0 or less removes the product)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every product from the cart
    Clear,
    /// List catalog products
    Products {
        /// Only show products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only show products whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List catalog categories
    Categories,
}

#[tokio::main]
async fn main() {
    // Initialize tracing, defaulting to info for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_cart=info,storefront_cart_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::from_env()?;

    match cli.command {
        Commands::Show => commands::cart::show(&config),
        Commands::Add { product_id } => commands::cart::add(&config, product_id).await?,
        Commands::Remove { product_id } => commands::cart::remove(&config, product_id)?,
        Commands::Set {
            product_id,
            quantity,
        } => commands::cart::set_quantity(&config, product_id, quantity)?,
        Commands::Clear => commands::cart::clear(&config)?,
        Commands::Products { category, search } => {
            let filter = ProductFilter { category, search };
            commands::catalog::products(&config, &filter).await?;
        }
        Commands::Categories => commands::catalog::categories(&config).await?,
    }
    Ok(())
}
