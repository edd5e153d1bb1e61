use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::{AppError, Result},
    products::{dto::CreateProductRequest, repo_types::Product},
    state::AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new().route("/products", get(list_products).post(create_product))
}

#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = Product::list(&state.db).await?;
    Ok(Json(products))
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>)> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let payload = payload.validate()?;

    let product = Product::create(&state.db, &payload.name, payload.price).await?;
    info!(product_id = %product.id, price = %product.price, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}
