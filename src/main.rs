use clap::Parser;
use std::sync::Arc;

use forage::api::{self, AppState};
use forage::config::CONFIG;

/// Search gateway over DuckDuckGo and Wikipedia.
#[derive(Parser)]
struct Args {
    /// Listening port; overrides the PORT environment variable.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let args = Args::parse();
    let port = args.port.unwrap_or(CONFIG.port);

    let state = Arc::new(AppState::new()?);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
