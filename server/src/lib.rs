//! HTTP surface for the Herodex gateway.
//!
//! Thin handlers over the catalog service: a list endpoint backed by the
//! incremental sync and a single-character passthrough. Domain errors are
//! translated to HTTP statuses only here, at the boundary.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use herodex_catalog::{CatalogService, SnapshotCache};
use herodex_common::{Character, Error};
use herodex_upstream::Fetcher;

/// JSON body returned for any failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wrapper translating domain errors into HTTP responses.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "request failed");

        let status = match &self.0 {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Error::Transport(_) | Error::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

async fn list_characters<F, C>(
    State(service): State<Arc<CatalogService<F, C>>>,
) -> Result<Json<Vec<u64>>, ApiError>
where
    F: Fetcher + ?Sized,
    C: SnapshotCache + ?Sized,
{
    let ids = service.list_known_ids().await?;
    Ok(Json(ids))
}

async fn get_character<F, C>(
    State(service): State<Arc<CatalogService<F, C>>>,
    Path(id): Path<String>,
) -> Result<Json<Character>, ApiError>
where
    F: Fetcher + ?Sized,
    C: SnapshotCache + ?Sized,
{
    let id: u64 = id
        .parse()
        .map_err(|_| Error::BadRequest("invalid id".to_string()))?;

    let character = service.get_entity(id).await?;
    Ok(Json(character))
}

/// Build the HTTP API router over the given catalog service.
pub fn build_router<F, C>(service: Arc<CatalogService<F, C>>) -> Router
where
    F: Fetcher + ?Sized + 'static,
    C: SnapshotCache + ?Sized + 'static,
{
    Router::new()
        .route("/characters", get(list_characters::<F, C>))
        .route("/characters/{id}", get(get_character::<F, C>))
        .with_state(service)
}
