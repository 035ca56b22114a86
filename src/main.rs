use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod segmentation;
mod server;
mod storage;

#[derive(Parser, Debug)]
#[command(name = "equation-segmenter-server")]
#[command(about = "Symbol segmentation server for handwritten math expressions")]
#[command(version)]
pub struct Args {
    /// Host address to bind to
    #[arg(long, env = "SEGMENTER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "SEGMENTER_PORT", default_value = "8000")]
    pub port: u16,

    /// Directory that holds per-request input images and symbol tiles
    #[arg(long, env = "SEGMENTER_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Maximum request body size in bytes (default: 10MB)
    #[arg(long, env = "SEGMENTER_MAX_BODY_SIZE", default_value = "10485760")]
    pub max_body_size: usize,

    /// Remove tiles left over from a previous run before writing new ones
    #[arg(long, env = "SEGMENTER_CLEAR_OUTPUT")]
    pub clear_output: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from(args);

    tracing::info!(
        "Starting equation-segmenter-server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Binding to {}:{}", config.host, config.port);

    server::run(config).await
}
