//! Vibent Backend Binary
//!
//! Main entry point for the Vibent wallet authentication service.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use vibent_backend_lib::{
    api::create_app, config::Config, data::MemoryStore, log::initialize_logging,
    services::Services,
};

#[derive(Parser, Debug)]
#[command(name = "vibent-backend")]
#[command(about = "Vibent wallet authentication service", long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the session signing secret
    #[arg(long, env = "VIBENT_JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Override the session cookie name
    #[arg(long, env = "VIBENT_COOKIE_NAME")]
    cookie_name: Option<String>,

    /// Include diagnostic detail in error responses
    #[arg(long, env = "VIBENT_DEBUG_ERRORS")]
    debug_errors: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone();
    let config = load_config(args)?;

    // Tracing starts after config load because the log format is
    // config-driven
    initialize_logging(config.log_format);

    info!("Starting Vibent Backend");
    if config_path.is_none() {
        debug!("No config file specified, using defaults");
    }

    let store = Arc::new(MemoryStore::new());
    let services = Services::new(store, &config);

    // Start server
    let app = create_app(services);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .context("Failed to bind TCP listener")?;

    info!("Server listening on http://{}:{}", config.host, config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn load_config(args: Args) -> Result<Config> {
    let mut config = match args.config {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => Config::default(),
    };

    // Apply CLI overrides
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(jwt_secret) = args.jwt_secret {
        config.auth.jwt_secret = jwt_secret;
    }
    if let Some(cookie_name) = args.cookie_name {
        config.auth.cookie_name = cookie_name;
    }
    if args.debug_errors {
        config.auth.debug_errors = true;
    }

    config.validate().context("Invalid configuration")?;

    Ok(config)
}
