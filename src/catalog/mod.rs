mod dto;
pub mod handlers;
pub mod repo;
pub mod scale;

pub use repo::FoodProfile;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
