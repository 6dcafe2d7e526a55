use std::sync::Arc;

use anyhow::Context;

use movie_api_rust::auth::TokenService;
use movie_api_rust::config::AppConfig;
use movie_api_rust::store::mongo::MongoMovieStore;
use movie_api_rust::store::MovieStore;
use movie_api_rust::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, DB_USERNAME, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_api_rust=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;

    // A missing or empty signing secret is fatal here, never per-request.
    let tokens =
        TokenService::new(&config.auth.jwt_secret).context("initializing token service")?;

    let store = MongoMovieStore::connect(&config.database)
        .await
        .context("building database client")?;

    // A dead database at startup is logged but not fatal; requests will
    // surface storage errors individually until it comes back.
    match store.ping().await {
        Ok(()) => tracing::info!("connected to database"),
        Err(err) => tracing::warn!("database unreachable at startup, continuing: {err}"),
    }

    let port = config.port;
    let state = AppState {
        config: Arc::new(config),
        tokens,
        store: Arc::new(store),
    };

    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    tracing::info!("listening on http://{bind_addr}");
    axum::serve(listener, app(state)).await.context("server")?;

    Ok(())
}
