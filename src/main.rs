//! YDK Converter - deck-list to readable text web service
//!
//! Loads the card directory once at startup, then serves the upload form,
//! conversion endpoint and report downloads.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use ydk_converter::{ygoprodeck, CardDirectory};

/// YDK deck-list converter - web upload form with card name resolution
#[derive(Parser, Debug)]
#[command(name = "ydk_converter")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the cardinfo.json card database dump
    #[arg(long, default_value = "cardinfo.json")]
    card_db: PathBuf,

    /// Directory for generated deck reports
    #[arg(long, default_value = "downloads")]
    output_dir: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Download a fresh card database dump to --card-db before starting
    #[arg(long, default_value_t = false)]
    fetch_card_db: bool,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Starting ydk_converter...");

    if args.fetch_card_db {
        match ygoprodeck::fetch_card_database().await {
            Ok(json) => {
                if let Err(e) = std::fs::write(&args.card_db, json) {
                    log::error!("Failed to write card database: {}", e);
                    std::process::exit(1);
                }
                log::info!("Wrote card database to {}", args.card_db.display());
            }
            Err(e) => {
                log::error!("Failed to download card database: {}", e);
                std::process::exit(1);
            }
        }
    }

    // A missing dataset is not fatal: every identifier then goes through
    // the API fallback.
    let directory = match CardDirectory::load_from_file(&args.card_db) {
        Ok(directory) => directory,
        Err(e) => {
            log::error!(
                "Failed to load card database from {}: {}",
                args.card_db.display(),
                e
            );
            CardDirectory::new()
        }
    };
    if directory.is_empty() {
        log::warn!("Card directory is empty; every identifier will go through the API fallback");
    } else {
        log::info!("Card directory ready with {} entries", directory.len());
    }
    let directory = Arc::new(directory);

    if let Err(e) = ydk_converter::web::serve(directory, &args.output_dir, args.port).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
