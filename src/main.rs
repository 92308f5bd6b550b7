//! HRMS Lite - Desktop client for employee and attendance management.

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use hrms_lite as app;

use app::client::ApiClient;
use app::config::{AppConfig, ConfigLoadResult};
use app::ui::App;

/// Desktop client for the HRMS Lite employee and attendance API.
#[derive(Parser)]
#[command(name = "hrms-lite")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Override the configured API base URL for this launch
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("HRMS Lite starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let mut config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, using defaults");
            AppConfig::default()
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults: {e}");
            AppConfig::default()
        }
    };

    if let Some(api_url) = cli.api_url {
        tracing::info!("API URL overridden on command line: {api_url}");
        config.api.base_url = api_url;
    }
    tracing::info!("API server: {}", config.api.base_url);

    // Create tokio runtime for async operations
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {e}");
            return Ok(());
        }
    };

    let client = match ApiClient::new(&config.api.base_url, config.api.timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {e}");
            return Ok(());
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HRMS Lite")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([850.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HRMS Lite",
        options,
        Box::new(move |cc| {
            // Icon font for the phosphor glyphs used across the panels
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(App::new(client, config, config_path, rt)))
        }),
    )
}
