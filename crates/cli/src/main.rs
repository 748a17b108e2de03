//! Pustaka CLI - drive the storefront cart and session from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! pustaka catalog
//!
//! # Log in, fill the cart and check out
//! pustaka login budi@example.com
//! pustaka add 1
//! pustaka update 1 3
//! pustaka cart
//! pustaka checkout
//!
//! # Log in with the admin role
//! pustaka login "Siti" --role admin
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products
//! - `cart` - Show cart lines and totals
//! - `add`, `update`, `remove`, `checkout` - Cart actions
//! - `login`, `logout`, `whoami` - Session record
//!
//! State is read from and written to the same data directory as the
//! storefront server (`STOREFRONT_DATA_DIR`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pustaka_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "pustaka")]
#[command(author, version, about = "Pustaka storefront CLI")]
struct Cli {
    /// Data directory holding the cart and session records
    /// (overrides `STOREFRONT_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Catalog,
    /// Show cart lines and totals
    Cart,
    /// Add one unit of a product to the cart
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Set the quantity of a cart line (0 or less removes it)
    Update {
        /// Product ID
        product_id: ProductId,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Check out and empty the cart
    Checkout,
    /// Log in with a name or email
    Login {
        /// Name or email address
        identity: String,

        /// Session role (`admin` unlocks the admin table)
        #[arg(short, long)]
        role: Option<String>,
    },
    /// Log out and clear the cart
    Logout,
    /// Show the logged-in user
    Whoami,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pustaka_storefront=warn".into()),
        )
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
    let mut ctx = commands::Context::load(cli.data_dir)?;

    match cli.command {
        Commands::Catalog => commands::catalog::list(&ctx).await,
        Commands::Cart => commands::cart::show(&ctx),
        Commands::Add { product_id } => commands::cart::add(&mut ctx, product_id).await?,
        Commands::Update {
            product_id,
            quantity,
        } => commands::cart::update(&mut ctx, product_id, quantity).await?,
        Commands::Remove { product_id } => commands::cart::remove(&mut ctx, product_id).await?,
        Commands::Checkout => commands::cart::checkout(&mut ctx).await?,
        Commands::Login { identity, role } => {
            commands::session::login(&mut ctx, &identity, role)?;
        }
        Commands::Logout => commands::session::logout(&mut ctx).await?,
        Commands::Whoami => commands::session::whoami(&ctx),
    }
    Ok(())
}
