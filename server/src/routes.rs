//! HTTP surface of the proxy.
//!
//! Invalid input is rejected before any network call; every upstream failure
//! mode (auth, search, transport, empty result set) collapses into one
//! generic 500 body. Details go to the log, not the client.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use tune_teaser::Category;

use crate::catalog::CatalogClient;

#[derive(Deserialize)]
pub struct RandomSongParams {
    category: Option<String>,
}

pub async fn random_song(
    State(catalog): State<Arc<CatalogClient>>,
    Query(params): Query<RandomSongParams>,
) -> Response {
    let Some(category) = params.category.as_deref().and_then(Category::from_slug) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid category" })),
        )
            .into_response();
    };

    match catalog.random_track(category).await {
        Ok(track) => Json(track).into_response(),
        Err(err) => {
            error!(category = category.slug(), error = %err, "random song lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error fetching random song" })),
            )
                .into_response()
        }
    }
}

/// Credentials smoke check: performs one token grant and reports the result.
pub async fn auth_check(State(catalog): State<Arc<CatalogClient>>) -> Response {
    match catalog.access_token().await {
        Ok(_) => Json(json!({ "message": "Authentication successful" })).into_response(),
        Err(err) => {
            error!(error = %err, "catalog authentication failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Authentication failed" })),
            )
                .into_response()
        }
    }
}
