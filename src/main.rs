//! Payweb main entry point

use anyhow::Context;
use clap::Parser;
use payweb_api::start_server;
use payweb_client::{HttpPaymentSource, SourceRef};
use payweb_config::{default_config_path, Config, ConfigSource};
use payweb_core::TransactionsService;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "payweb")]
#[command(version = "0.1.0")]
#[command(about = "Sortable, paginated web view of payment transactions", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, source) = match Config::load_or_default(&args.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            for suggestion in e.suggestions() {
                eprintln!("  - {}", suggestion);
            }
            return Err(e).context("Failed to load configuration");
        }
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    match source {
        ConfigSource::File(path) => log::info!("Config loaded from {}", path.display()),
        ConfigSource::Defaults => {
            log::warn!("Config file {} not found, using defaults", args.config.display())
        }
    }

    let source: SourceRef = Arc::new(HttpPaymentSource::new(config.base_url()));
    let service = Arc::new(TransactionsService::new(&config, source));

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, service))?;

    Ok(())
}
