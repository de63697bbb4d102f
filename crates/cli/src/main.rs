//! Erasto CLI - Browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List beans, cheapest first
//! erasto catalog list --category beans --sort price-low
//!
//! # Show a product with its related products
//! erasto catalog show tanzanian-peaberry
//!
//! # Add two 500g bags, espresso grind
//! erasto cart add tanzanian-peaberry -q 2 --size 500g --grind Espresso
//!
//! # Change or remove a line
//! erasto cart update coffee-003 3
//! erasto cart remove coffee-003 --size 500g --grind Espresso
//!
//! # Track an order
//! erasto order status "Out for Delivery"
//! ```
//!
//! # Commands
//!
//! - `catalog list` / `catalog show` - Browse products
//! - `cart show|add|remove|update|clear` - Manage the persisted cart
//! - `order status` / `order reference` - Order tracking helpers
//!
//! The cart is stored under `ERASTO_DATA_DIR` (default `.erasto`) and survives
//! between runs.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use erasto_core::{Category, LineKey, LineSelection, Product, ProductId, RoastLevel};
use erasto_storefront::catalog::SortOption;
use erasto_storefront::config::StorefrontConfig;
use erasto_storefront::{AppState, Result};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "erasto")]
#[command(author, version, about = "Erasto Coffee storefront CLI")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Order tracking helpers
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, filtered and sorted
    List {
        /// Only show this category (`beans`, `ground`, `instant`, `accessories`)
        #[arg(short, long)]
        category: Option<Category>,

        /// Only show these roast levels (repeatable)
        #[arg(short, long)]
        roast: Vec<RoastLevel>,

        /// Lowest price to show
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Highest price to show (defaults to `ERASTO_PRICE_CEILING`)
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Sort order (`featured`, `newest`, `price-low`, `price-high`)
        #[arg(short, long, default_value = "featured")]
        sort: SortOption,
    },
    /// Show one product and related products
    Show {
        /// Product slug, e.g. `kilimanjaro-morning-blend`
        slug: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product slug
        slug: String,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Package size (defaults to the first size offered)
        #[arg(long)]
        size: Option<String>,

        /// Grind (defaults to whole bean for beans)
        #[arg(long)]
        grind: Option<String>,
    },
    /// Remove a line from the cart
    Remove {
        /// Product ID, e.g. `coffee-001`
        product_id: String,

        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Set the quantity of a line
    Update {
        /// Product ID, e.g. `coffee-001`
        product_id: String,

        /// New quantity; values below 1 are ignored
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Remove everything from the cart
    Clear,
}

/// Variant selector. When either flag is given, the command targets exactly
/// the line with that `(product, grind, size)` identity instead of the first
/// line for the product. A flag left out takes the product's default, the
/// same one `cart add` fills in.
#[derive(clap::Args)]
struct VariantArgs {
    /// Package size of the line (defaults to the first size offered)
    #[arg(long)]
    size: Option<String>,

    /// Grind of the line (defaults to whole bean for beans)
    #[arg(long)]
    grind: Option<String>,
}

impl VariantArgs {
    fn into_key(self, product_id: &ProductId, product: Option<&Product>) -> Option<LineKey> {
        if self.size.is_none() && self.grind.is_none() {
            return None;
        }
        let default_size = || product.and_then(Product::default_size).map(str::to_owned);
        let default_grind = || product.and_then(Product::default_grind).map(str::to_owned);
        Some(LineKey::new(
            product_id.clone(),
            self.grind.or_else(default_grind),
            self.size.or_else(default_size),
        ))
    }
}

#[derive(Subcommand)]
enum OrderAction {
    /// Show tracking progress for a status label
    Status {
        /// Status label, e.g. "Roasting"
        label: String,
    },
    /// Generate an order reference and delivery window
    Reference,
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr so command output on stdout stays clean.
///
/// Defaults to warnings only if `RUST_LOG` is not set.
fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "erasto_storefront=warn,erasto_cli=warn".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = StorefrontConfig::from_env()?;
    let mut state = AppState::new(config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    dispatch(&mut state, cli.command, &mut out)?;
    out.flush()?;
    Ok(())
}

fn dispatch<S: erasto_storefront::cart::SnapshotStorage>(
    state: &mut AppState<S>,
    command: Commands,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                roast,
                min_price,
                max_price,
                sort,
            } => {
                let mut query = state.default_query();
                query.category = category;
                for level in roast {
                    if !query.roast_levels.contains(&level) {
                        query.toggle_roast(level);
                    }
                }
                if let Some(min) = min_price {
                    query.price_range.min = min;
                }
                if let Some(max) = max_price {
                    query.price_range.max = max;
                }
                query.sort = sort;
                commands::catalog::list(state, &query, out)?;
            }
            CatalogAction::Show { slug } => commands::catalog::show(state, &slug, out)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(state, out)?,
            CartAction::Add {
                slug,
                quantity,
                size,
                grind,
            } => {
                let selection = LineSelection {
                    quantity,
                    size,
                    grind,
                };
                commands::cart::add(state, &slug, &selection, out)?;
            }
            CartAction::Remove {
                product_id,
                variant,
            } => {
                let product_id = ProductId::new(product_id);
                let key = variant.into_key(&product_id, state.catalog().by_id(&product_id));
                commands::cart::remove(state, &product_id, key.as_ref(), out)?;
            }
            CartAction::Update {
                product_id,
                quantity,
                variant,
            } => {
                let product_id = ProductId::new(product_id);
                let key = variant.into_key(&product_id, state.catalog().by_id(&product_id));
                commands::cart::update(state, &product_id, key.as_ref(), quantity, out)?;
            }
            CartAction::Clear => commands::cart::clear(state, out)?,
        },
        Commands::Order { action } => match action {
            OrderAction::Status { label } => commands::order::status(&label, out)?,
            OrderAction::Reference => commands::order::reference(out)?,
        },
    }
    Ok(())
}
