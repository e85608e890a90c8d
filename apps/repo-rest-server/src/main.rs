//! Repository REST server.

mod config;
mod logging;
mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use static_authn_plugin::StaticAuthNPlugin;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "repo-rest-server", version, about = "Repository REST API server")]
struct Cli {
    /// YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", config::render(cli.config.as_deref())?);
        return Ok(());
    }

    let cfg = config::load(cli.config.as_deref())?;
    logging::init(&cfg.logging)?;

    let plugin = StaticAuthNPlugin::new(&cfg.static_authn)?;
    let app = routes::router(routes::auth_state(&plugin, &cfg.authn));

    let listener = tokio::net::TcpListener::bind(cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    info!(addr = %cfg.server.bind_addr, realm = %cfg.authn.realm, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
