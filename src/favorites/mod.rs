use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub use repo_types::Favorite;

pub fn router() -> Router<AppState> {
    handlers::favorite_routes()
}
