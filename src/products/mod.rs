use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub use repo_types::Product;

pub fn router() -> Router<AppState> {
    handlers::product_routes()
}
