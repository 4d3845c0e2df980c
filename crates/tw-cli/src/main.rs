//! Tenderwatch command line
//!
//! Generates mock procurement data and runs listing queries, entity roll-ups
//! and risk statistics over JSON collections.

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tw_core::config::{AppConfig, LogFormat, LoggingConfig};

mod cli;
mod commands;
mod output;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let (config, config_error) = match AppConfig::from_env() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config.logging);
    if let Some(e) = config_error {
        warn!("Failed to load config from env: {}, using defaults", e);
    }

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        default_page_size = config.query.default_page_size,
        "Starting tenderwatch"
    );

    commands::run(cli, &config)
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}
