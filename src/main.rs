use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use repotutor::{create_app, logging, Config};

/// Turn a public GitHub repository into an AI-generated, chaptered tutorial
#[derive(Debug, Parser)]
#[command(name = "repotutor", version, about)]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, env = "REPOTUTOR_BIND", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "REPOTUTOR_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let config = Config::load().context("failed to load configuration")?;
    let app = create_app(&config).context("failed to build application")?;

    info!("repotutor starting");
    info!("Server will be available at http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
