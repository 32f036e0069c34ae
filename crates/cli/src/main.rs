//! Kiosk CLI - the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! kiosk products list --category electronics
//! kiosk products show 1
//! kiosk categories
//! kiosk search backpack
//!
//! # Drive the cart
//! kiosk cart add 1 --quantity 2
//! kiosk cart show
//! kiosk cart set 1 5
//! kiosk cart remove 1
//! kiosk cart clear
//!
//! # Accounts (demo user: johnd / m38rmF$)
//! kiosk auth login -u johnd -p 'm38rmF$'
//! kiosk auth whoami
//! kiosk auth logout
//! ```
//!
//! Session and cart state persist in `KIOSK_DATA_DIR` (default `.kiosk`)
//! between invocations, so each command behaves like one UI event against
//! the same running storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]
// This binary's whole job is user-facing terminal output.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

use kiosk_storefront::AppState;
use kiosk_storefront::config::StorefrontConfig;
use kiosk_storefront::storage::{JsonFileStorage, SharedStorage};

#[derive(Parser)]
#[command(name = "kiosk")]
#[command(author, version, about = "Kiosk storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: commands::catalog::ProductsAction,
    },
    /// List product categories
    Categories,
    /// Search products by title, description, or category
    Search {
        /// Search terms
        query: String,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Log in, register, and manage the profile
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; env vars may come from the shell.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let storage = SharedStorage::new(JsonFileStorage::open(config.data_dir.join("storage.json")));
    let mut state = AppState::new(&config, storage);

    match cli.command {
        Commands::Products { action } => commands::catalog::products(&state, action).await?,
        Commands::Categories => commands::catalog::categories(&state).await?,
        Commands::Search { query } => commands::catalog::search(&state, &query).await?,
        Commands::Cart { action } => commands::cart::run(&mut state, action).await?,
        Commands::Auth { action } => commands::auth::run(&mut state, action).await?,
    }

    Ok(())
}
