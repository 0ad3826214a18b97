//! RocketShoes CLI - Cart management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with line subtotals and total
//! rocket-cli cart show
//!
//! # Add one unit of product 1
//! rocket-cli cart add 1
//!
//! # Set product 1 to 3 units
//! rocket-cli cart update 1 3
//!
//! # Remove product 1
//! rocket-cli cart remove 1
//! ```
//!
//! # Commands
//!
//! - `cart show` - Print the persisted cart
//! - `cart add` - Add one unit of a product
//! - `cart update` - Set the amount held for a product
//! - `cart remove` - Remove a product from the cart
//!
//! Configuration comes from the environment (see `StorefrontConfig`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rocketshoes_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "rocket-cli")]
#[command(author, version, about = "RocketShoes cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set the amount held for a product
    Update {
        /// Product ID
        product_id: ProductId,

        /// New amount (zero or negative leaves the cart unchanged)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter
    // Defaults to warnings only so command output stays readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_storefront=warn,rocketshoes_cli=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::cart::CartCommandError> {
    match cli.command {
        Commands::Cart { action } => {
            let state = commands::cart::open().await?;
            match action {
                CartAction::Show => commands::cart::show(&state)?,
                CartAction::Add { product_id } => commands::cart::add(&state, product_id).await?,
                CartAction::Remove { product_id } => {
                    commands::cart::remove(&state, product_id).await?;
                }
                CartAction::Update { product_id, amount } => {
                    commands::cart::update(&state, product_id, amount).await?;
                }
            }
        }
    }
    Ok(())
}
