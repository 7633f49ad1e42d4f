//! Cafe CLI - Terminal menu and cart pages.
//!
//! # Usage
//!
//! ```bash
//! # Browse the menu, optionally filtered by category
//! cafe menu --category coffee
//!
//! # Add two iced lattes
//! cafe add latte --variant iced --quantity 2
//!
//! # Show the cart, then adjust rows by their position
//! cafe cart
//! cafe increase 1
//! cafe decrease 2
//! cafe remove 1
//!
//! # Place the order
//! cafe checkout --payment gcash
//! ```
//!
//! # Environment Variables
//!
//! - `CAFE_CART_FILE` - Storage file (default: `.cafe/storage.json`)
//! - `CAFE_CART_KEY` - Storage key (default: `cart`)
//! - `RUST_LOG` - Log filter (default: `warn`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use cafe_cart::{BadgeCounter, CartConfig, CartStore, CategoryFilter, JsonFileStorage};
use cafe_cart_core::PaymentMethod;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "cafe")]
#[command(author, version, about = "Cafe Cart ordering from the terminal")]
struct Cli {
    /// Storage file (overrides `CAFE_CART_FILE`)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Storage key (overrides `CAFE_CART_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu
    Menu {
        /// Category to show (`all`, `coffee`, `tea`, `pastry`, `meal`)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Print the menu as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a menu item to the cart
    Add {
        /// Menu item slug (see `cafe menu`)
        slug: String,

        /// Variant, e.g. `hot` or `iced`
        #[arg(short, long)]
        variant: Option<String>,

        /// Number of units
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    /// Show the cart
    Cart {
        /// Print the cart as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one unit to the cart row at POSITION
    Increase { position: usize },
    /// Remove one unit from the cart row at POSITION
    Decrease { position: usize },
    /// Remove the cart row at POSITION
    Remove { position: usize },
    /// Empty the cart
    Clear,
    /// Place the order
    Checkout {
        /// Payment method (`cash`, `card`, `gcash`, `paymaya`)
        #[arg(short, long)]
        payment: Option<PaymentMethod>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(file) = cli.file {
        config.storage_file = file;
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }
    tracing::debug!(?config, "Configuration loaded");

    let storage = JsonFileStorage::new(&config.storage_file);
    let mut store = CartStore::open(storage, config.storage_key);
    let badge = BadgeCounter::new();
    badge.attach(&mut store);

    match cli.command {
        Commands::Menu { category, json } => commands::menu::show(category, json)?,
        Commands::Add {
            slug,
            variant,
            quantity,
        } => commands::cart::add(&mut store, &slug, variant.as_deref(), quantity)?,
        Commands::Cart { json } => commands::cart::show(&store, json)?,
        Commands::Increase { position } => commands::cart::increase(&mut store, position)?,
        Commands::Decrease { position } => commands::cart::decrease(&mut store, position)?,
        Commands::Remove { position } => commands::cart::remove(&mut store, position)?,
        Commands::Clear => commands::cart::clear(&mut store)?,
        Commands::Checkout { payment } => commands::checkout::place(&mut store, payment)?,
    }

    render::badge(badge.count());
    Ok(())
}
