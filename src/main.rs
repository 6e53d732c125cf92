//! Word4Word - handwriting recognition panel
//!
//! Draw on a canvas, send the drawing to an OCR endpoint, and rate how well
//! it was read.

mod canvas;
mod config;
mod feedback;
mod panel;
mod recognition;
mod session;
mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::AppConfig;
use crate::recognition::{image_to_data_url, HttpBackend, RecognitionClient};
use crate::session::ERROR_PREFIX;

/// Word4Word - handwriting recognition panel
#[derive(Parser, Debug)]
#[command(name = "word4word")]
#[command(about = "Draw handwriting and send it to an OCR endpoint")]
struct Args {
    /// Recognition endpoint URL (overrides the config file)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Recognize a PNG file without opening the window
    #[arg(long, value_name = "PNG")]
    recognize_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config_path = match &args.config {
        Some(path) => Some(path.clone()),
        None => storage::default_config_path().ok(),
    };
    let mut config = load_or_default_config(config_path.as_deref());
    if let Some(endpoint) = &args.endpoint {
        config.recognition.endpoint = endpoint.clone();
    }

    if args.write_default_config {
        let path = config_path.context("No configuration path available")?;
        config::save_config(&config, &path)?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let backend = HttpBackend::new(&config.recognition)
        .context("Failed to create HTTP client")?;
    info!("Recognition endpoint: {}", backend.endpoint());
    let client = RecognitionClient::new(Arc::new(backend))?;

    if let Some(path) = &args.recognize_file {
        return recognize_file(&client, path);
    }

    info!("Word4Word starting...");
    if let Err(e) = panel::run_panel(&config, client) {
        tracing::error!("Panel error: {}", e);
    }
    info!("Word4Word shutdown complete");

    Ok(())
}

/// Load configuration from file or fall back to defaults
fn load_or_default_config(path: Option<&Path>) -> AppConfig {
    if let Some(path) = path {
        if path.exists() {
            match config::load_config(path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", path);
                    return config;
                }
                Err(e) => warn!("Ignoring configuration {:?}: {:#}", path, e),
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

/// Headless mode: send one image file and print what would be displayed
fn recognize_file(client: &RecognitionClient, path: &Path) -> Result<()> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open image {:?}", path))?
        .to_rgba8();
    let data_url = image_to_data_url(&image)?;

    match client.recognize_blocking(&data_url) {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}{}", ERROR_PREFIX, e.user_message());
            std::process::exit(1);
        }
    }
}
