use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use trendboard::api;
use trendboard::config::Config;
use trendboard::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let state = AppState::new(config.clone())?;

    let app = Router::new()
        .route("/api/trending", get(api::rankings::trending))
        .route("/api/leaderboard", get(api::rankings::leaderboard))
        .route("/api/users/search", get(api::search::search_users))
        .route("/api/users/check", get(api::accounts::check_username))
        .route("/api/register", post(api::accounts::register))
        .route("/api/login", post(api::accounts::login))
        .route("/api/verify", post(api::accounts::verify))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // ConnectInfo feeds the registration rate limiter its client addresses.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
