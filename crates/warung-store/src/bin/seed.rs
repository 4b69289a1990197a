//! # Seed Data Generator
//!
//! Populates a data directory with a sample warung catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed into ./data (default)
//! cargo run -p warung-store --bin seed
//!
//! # Specify the data directory
//! cargo run -p warung-store --bin seed -- --data ./scratch
//! ```
//!
//! Creates `stok.txt` with a typical small-shop catalog (drinks, instant
//! noodles, snacks, staples) and an empty `laporan_penjualan.txt`. Skips
//! seeding when the catalog already has products, so it is safe to run on
//! an existing data directory.

use std::env;
use std::path::PathBuf;

use tracing::info;
use warung_core::NewProduct;
use warung_store::{ProductStore, TransactionStore};

/// Sample catalog: name, unit price (Rupiah), opening stock.
const CATALOG: &[(&str, i64, i64)] = &[
    ("Kopi Hitam", 5000, 40),
    ("Kopi Susu", 7000, 40),
    ("Es Teh Manis", 4000, 50),
    ("Teh Tawar", 2000, 50),
    ("Indomie Goreng", 3500, 120),
    ("Indomie Soto", 3500, 80),
    ("Nasi Uduk", 10000, 15),
    ("Gorengan", 1000, 60),
    ("Kerupuk", 2000, 45),
    ("Air Mineral 600ml", 4000, 72),
    ("Teh Botol", 5000, 48),
    ("Roti Bakar", 8000, 12),
    ("Gula Pasir 1kg", 16000, 20),
    ("Minyak Goreng 1L", 18000, 18),
    ("Telur (per butir)", 2500, 90),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut data_dir = PathBuf::from("./data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Warung POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <DIR>   Data directory (default: ./data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(data_dir = %data_dir.display(), "seeding warung catalog");

    let products = ProductStore::open(data_dir.join("stok.txt")).await?;
    // Ensures the sales file exists with its header too.
    let _sales = TransactionStore::open(data_dir.join("laporan_penjualan.txt")).await?;

    let existing = products.list_all().await?;
    if !existing.is_empty() {
        info!(
            count = existing.len(),
            "catalog already has products, skipping seed"
        );
        return Ok(());
    }

    for (name, price, stock) in CATALOG {
        let product = products
            .create(&NewProduct {
                name: (*name).to_string(),
                price: *price,
                stock: *stock,
            })
            .await?;
        info!(id = product.id, name = %product.name, "seeded product");
    }

    info!(count = CATALOG.len(), "seed complete");
    Ok(())
}
