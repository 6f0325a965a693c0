use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use pitchbook::config::AppConfig;
use pitchbook::db;
use pitchbook::router::build_router;
use pitchbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    tracing::info!(
        price_per_hour = config.price_per_hour,
        min_hours = config.min_hours,
        "opened booking database at {}",
        config.database_url
    );

    let state = Arc::new(AppState::with_sqlite(config.clone(), conn));
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
