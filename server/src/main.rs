//! Catalog proxy for the Tune Teaser game.
//!
//! Two JSON routes: `/random-song?category={slug}` returns one randomly
//! sampled track for the decade, `/auth-check` verifies the configured
//! catalog credentials. Configuration comes from the environment:
//! `CATALOG_CLIENT_ID` / `CATALOG_CLIENT_SECRET` (required), `HOST` /
//! `PORT`, and `LOG_LEVEL` in env-filter syntax.

mod catalog;
mod routes;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing::info;

use catalog::CatalogClient;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let client_id = env::var("CATALOG_CLIENT_ID").context("CATALOG_CLIENT_ID env var not set")?;
    let client_secret =
        env::var("CATALOG_CLIENT_SECRET").context("CATALOG_CLIENT_SECRET env var not set")?;
    let listen_host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let listen_port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .context("invalid PORT")?;

    let catalog = Arc::new(
        CatalogClient::new(client_id, client_secret).context("failed to build catalog client")?,
    );

    let app = Router::new()
        .route("/random-song", get(routes::random_song))
        .route("/auth-check", get(routes::auth_check))
        .with_state(catalog);

    let addr: SocketAddr = format!("{listen_host}:{listen_port}")
        .parse()
        .context("failed to parse listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind TCP listener")?;
    info!(address = %addr, "starting catalog proxy");
    axum::serve(listener, app.into_make_service())
        .await
        .context("axum server error")?;

    Ok(())
}

fn init_logging() {
    let env_filter = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
