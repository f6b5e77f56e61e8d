use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fakeazure::{api, cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut cfg = config::load()?;
    let args = cli::Cli::parse();

    let json_layer = cfg
        .log_json
        .then(|| tracing_subscriber::fmt::layer().json());
    let text_layer = (!cfg.log_json).then(|| tracing_subscriber::fmt::layer());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "fakeazure=debug,tower_http=debug".into()),
        ))
        .with(json_layer)
        .with(text_layer)
        .init();

    if let Some(cli::Commands::Serve { host, port }) = args.command {
        if let Some(host) = host {
            cfg.host = host;
        }
        if let Some(port) = port {
            cfg.port = port;
        }
    }

    let result = run_server(cfg).await;
    if let Err(ref e) = result {
        tracing::error!("fakeazure exited: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config) -> anyhow::Result<()> {
    let addr = cfg.listen_addr();
    tracing::info!(
        base_url = %cfg.base_url,
        default_expiry_secs = cfg.default_expiry_secs,
        "Initializing token store..."
    );
    let state = Arc::new(AppState::new(cfg));
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting fakeazure server on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("fakeazure stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
