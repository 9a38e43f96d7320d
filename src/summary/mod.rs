mod dto;
pub mod handlers;
pub mod repo;

pub use dto::SummaryResponse;
pub use repo::DailyTotalsRow;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::read_routes())
}
