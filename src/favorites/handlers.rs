use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    favorites::{dto::CreateFavoriteRequest, repo_types::Favorite},
    state::AppState,
};

pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/favorites",
            get(list_favorites).post(create_favorite),
        )
        .route(
            "/users/:user_id/favorites/:favorite_id",
            delete(delete_favorite),
        )
}

fn bad_path(e: PathRejection) -> AppError {
    AppError::BadRequest(e.body_text())
}

#[instrument(skip(state, path))]
pub async fn list_favorites(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<Favorite>>> {
    let Path(user_id) = path.map_err(bad_path)?;
    let favorites = Favorite::list_for_user(&state.db, user_id).await?;
    Ok(Json(favorites))
}

#[instrument(skip(state, path, payload))]
pub async fn create_favorite(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
    payload: std::result::Result<Json<CreateFavoriteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Favorite>)> {
    let Path(user_id) = path.map_err(bad_path)?;
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let favorite = Favorite::create(&state.db, user_id, payload.product_id).await?;
    info!(favorite_id = %favorite.id, %user_id, product_id = %favorite.product_id, "favorite added");
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Idempotent: answers 204 whether or not a row matched.
#[instrument(skip(state, path))]
pub async fn delete_favorite(
    State(state): State<AppState>,
    path: std::result::Result<Path<(Uuid, Uuid)>, PathRejection>,
) -> Result<StatusCode> {
    let Path((user_id, favorite_id)) = path.map_err(bad_path)?;
    let removed = Favorite::delete(&state.db, user_id, favorite_id).await?;
    if removed == 0 {
        debug!(%user_id, %favorite_id, "delete matched no favorite");
    } else {
        info!(%user_id, %favorite_id, "favorite removed");
    }
    Ok(StatusCode::NO_CONTENT)
}
