//! Sections transformer HTTP server entry point
//!
//! Loads configuration, kicks off the initial TME load in the
//! background and serves the REST API.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sections_transformer::core::config::{Config, LogFormat};
use sections_transformer::core::services::Services;
use sections_transformer::http;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "sections-transformer", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "SECTIONS_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind (overrides configuration)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    port: Option<u16>,
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sections_transformer=info,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    init_logging(config.logging.format);

    tracing::info!("Starting sections transformer");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    config.log_config();

    let services = Arc::new(Services::new(config.clone())?);

    // Initial load runs in the background; lookups answer 404 until it lands
    let store = Arc::clone(&services.store);
    tokio::spawn(async move {
        if let Err(e) = store.reload().await {
            tracing::error!(error = %e, "Initial load from TME failed, waiting for a reload");
        }
    });

    let app = http::router(services);

    // Bind to address and start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/__health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
