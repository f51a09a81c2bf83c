pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            config.validate()?;
            run_server(config).await
        }
        Commands::Initdb { drop } => cli::cmd_initdb(&config, drop).await,
        Commands::Forge => cli::cmd_forge(&config).await,
        Commands::Admin { username } => cli::cmd_admin(&config, username).await,
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists.");
            }
            Ok(())
        }
    }
}

/// Parses the command line and loads configuration (with `.env` applied).
pub fn load() -> anyhow::Result<(Cli, Config)> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::load()?;
    Ok((cli, config))
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Watchlist v{} starting...", env!("CARGO_PKG_VERSION"));

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let addr = config.listen_address();
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
