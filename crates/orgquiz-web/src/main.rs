//! orgquiz web server
//!
//! Run with: cargo run -p orgquiz-web

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use orgquiz_web::config::Config;
use orgquiz_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orgquiz=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting orgquiz...");

    let config = Config::load()?;
    let addr = config.socket_addr()?;
    let state = Arc::new(AppState::new(config));

    let app = orgquiz_web::router::build_router(Arc::clone(&state));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Requests before this finishes are told the data is still loading.
    tokio::spawn(async move { state.load_data().await });

    axum::serve(listener, app).await?;
    Ok(())
}
