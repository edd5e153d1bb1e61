use serde::Deserialize;
use uuid::Uuid;

/// Request body for favoriting a product.
#[derive(Debug, Deserialize)]
pub struct CreateFavoriteRequest {
    pub product_id: Uuid,
}
