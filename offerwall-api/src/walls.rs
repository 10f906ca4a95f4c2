use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use offerwall_core::offer::provider_names;
use offerwall_core::wall::{normalize_url, WallView};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OfferNamesResponse {
    pub offer_names: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/offerwalls/offer-names", get(list_offer_names))
        .route("/offerwalls/{token}", get(get_wall))
        .route("/offerwalls/by_url/{url}", get(get_wall_by_url))
}

/// GET /api/offerwalls/{token}
async fn get_wall(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> Result<Json<WallView>, AppError> {
    let wall = state.walls.get_by_token(token).await?;
    Ok(Json(wall.into()))
}

/// GET /api/offerwalls/by_url/{url}
///
/// The path segment is percent-encoded by callers; it is normalized to the
/// stored form before the substring lookup.
async fn get_wall_by_url(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> Result<Json<WallView>, AppError> {
    let normalized = normalize_url(&url);
    let wall = state.walls.find_by_url(&normalized).await?;
    Ok(Json(wall.into()))
}

/// GET /api/offerwalls/offer-names
///
/// The static provider catalog, independent of store contents.
async fn list_offer_names() -> Json<OfferNamesResponse> {
    Json(OfferNamesResponse {
        offer_names: provider_names(),
    })
}
