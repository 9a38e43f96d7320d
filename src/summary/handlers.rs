use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{auth::AuthUser, dates, error::AppError, state::AppState};

use super::dto::{RangeQuery, SummaryResponse};
use super::repo;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(read_range))
        .route("/summary/:date", get(read_day))
}

/// A day with no aggregate row reads as all-zero totals, matching how the
/// dashboard treats an unlogged day.
#[instrument(skip(state))]
pub async fn read_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(date): Path<String>,
) -> Result<Json<SummaryResponse>, AppError> {
    let day = dates::parse_date(&date)?;
    let row = repo::get_day(&state.db, user_id, day).await?;
    let resp = match &row {
        Some(row) => SummaryResponse::from(row),
        None => SummaryResponse {
            day: day.to_string(),
            totals: Default::default(),
            manual_water_ml: 0,
        },
    };
    Ok(Json(resp))
}

/// Raw range read: only days that actually have a row come back.
#[instrument(skip(state))]
pub async fn read_range(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<RangeQuery>,
) -> Result<Json<Vec<SummaryResponse>>, AppError> {
    let start = dates::parse_date(&p.start)?;
    let end = dates::parse_date(&p.end)?;
    if end < start {
        return Err(AppError::InvalidQuantity(format!(
            "range end {end} precedes start {start}"
        )));
    }
    let rows = repo::read_range(&state.db, user_id, start, end).await?;
    Ok(Json(rows.iter().map(SummaryResponse::from).collect()))
}
