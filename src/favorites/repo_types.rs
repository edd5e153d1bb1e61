use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A user's favorite product; `(user_id, product_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
}
