//! # Seed Data Generator
//!
//! Writes a demo catalog file, reads it back and prints the catalog report.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default) into the configured data file
//! cargo run -p shelf-store --bin seed
//!
//! # Generate custom amount
//! cargo run -p shelf-store --bin seed -- --count 1000
//!
//! # Specify the output file
//! cargo run -p shelf-store --bin seed -- --file ./data/produtos.csv
//! ```
//!
//! ## Generated Products
//! Products are spread over a handful of categories, each with a sector.
//! Values vary deterministically with the product's position, so two runs
//! on the same day produce the same file:
//! - Code: `{PREFIX}{INDEX:05}`, e.g. `LIM00042`
//! - Manufactured 1 to 90 days ago
//! - Shelf life of 10 to 209 days, so some products are already expired
//! - Purchase price 0.99 to 8.98, sold at a 10% to 69% markup
//! - Stock 0 to 60

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use chrono::{Days, Local, NaiveDate};
use tracing::{info, warn};

use shelf_core::{Category, Money, Product, ProductDraft};
use shelf_store::{Catalog, ImportMode, StoreConfig};

const DEFAULT_COUNT: usize = 200;

/// Largest count that still fits the 5-digit code suffix.
const MAX_COUNT: usize = 99_999;

/// (code prefix, category, sector, product names)
const CATEGORIES: &[(&str, &str, &str, &[&str])] = &[
    (
        "LIM",
        "Limpeza",
        "Casa",
        &["Sabao em barra", "Detergente", "Agua sanitaria", "Desinfetante", "Esponja"],
    ),
    (
        "LAT",
        "Laticinios",
        "Frios",
        &["Leite integral", "Queijo minas", "Iogurte natural", "Manteiga", "Requeijao"],
    ),
    (
        "BEB",
        "Bebidas",
        "Mercearia",
        &["Suco de laranja", "Agua mineral", "Refrigerante", "Cha gelado", "Cafe torrado"],
    ),
    (
        "HIG",
        "Higiene",
        "Casa",
        &["Creme dental", "Sabonete", "Shampoo", "Desodorante", "Fio dental"],
    ),
    (
        "PAD",
        "Padaria",
        "Mercearia",
        &["Pao de forma", "Bolo de milho", "Biscoito", "Torrada", "Rosca doce"],
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    shelf_store::init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let config = StoreConfig::load_or_default(None);
    let mut count = DEFAULT_COUNT;
    let mut file: PathBuf = config.data_file.clone();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    file = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Shelf Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -f, --file <PATH>   Catalog file path (default: from config)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    if count > MAX_COUNT {
        warn!(count, max = MAX_COUNT, "Count too large, clamping");
        count = MAX_COUNT;
    }

    info!(count, file = %file.display(), "Seeding catalog");

    let today = Local::now().date_naive();
    let start = Instant::now();
    let catalog = Catalog::new();

    for seed in 0..count {
        let product = generate_product(seed, today)?;
        catalog.add(product)?;
    }

    let written = catalog.export_to_path(&file)?;
    info!(written, elapsed = ?start.elapsed(), "Wrote catalog file");

    // Read the file back the way the application would on startup
    let reloaded = Catalog::new();
    let loaded = reloaded.import_from_path(&file, ImportMode::Replace)?;
    info!(loaded, "Reloaded catalog file");

    let report = reloaded.report(today, config.near_expiry_days, config.low_stock_threshold);
    info!(
        expired = report.expired.len(),
        near_expiry = report.near_expiry.len(),
        low_stock = report.low_stock.len(),
        "Seed complete"
    );
    println!("{report}");

    Ok(())
}

/// Generates the product at position `seed`.
fn generate_product(seed: usize, today: NaiveDate) -> Result<Product, Box<dyn std::error::Error>> {
    let (prefix, category, sector, names) = CATEGORIES[seed % CATEGORIES.len()];
    let name = names[(seed / CATEGORIES.len()) % names.len()];

    let manufacture_date = today
        .checked_sub_days(Days::new(1 + (seed % 90) as u64))
        .ok_or("manufacture date out of range")?;
    let expiry_date = manufacture_date
        .checked_add_days(Days::new(10 + ((seed * 37) % 200) as u64))
        .ok_or("expiry date out of range")?;

    let purchase_cents = 99 + ((seed * 17) % 800) as i64;
    let markup_pct = 10 + (seed % 60) as i64;
    let sell_cents = purchase_cents + purchase_cents * markup_pct / 100;

    let draft = ProductDraft {
        code: format!("{prefix}{seed:05}"),
        name: name.to_string(),
        description: format!("{name} ({category})"),
        manufacture_date,
        expiry_date,
        purchase_price: Money::from_cents(purchase_cents),
        sell_price: Money::from_cents(sell_cents),
        stock_quantity: ((seed * 13) % 61) as i64,
        category: Category::new(category).with_sector(sector),
    };

    Ok(draft.validate(today)?)
}
