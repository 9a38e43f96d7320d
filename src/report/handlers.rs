use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use time::Duration;
use tracing::instrument;

use crate::{auth::AuthUser, dates, error::AppError, goals, state::AppState, summary};

use super::analyzer::{analyze, Thresholds};
use super::dto::{NutritionReport, ReportQuery};

pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/nutrition", get(nutrition_report))
}

/// N-day rolling analysis ending today. Pure reads; safe to run while meals
/// are being logged, at worst one commit behind on the current day.
#[instrument(skip(state))]
pub async fn nutrition_report(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<ReportQuery>,
) -> Result<Json<NutritionReport>, AppError> {
    let days = p.days.unwrap_or(7);
    if days <= 0 {
        return Err(AppError::invalid_quantity(days));
    }
    let end = dates::today_utc();
    let start = end - Duration::days(days - 1);

    let rows = summary::repo::read_range(&state.db, user_id, start, end).await?;
    let totals: Vec<_> = rows.iter().map(|r| r.reported()).collect();
    let goal = goals::repo::get_or_default(&state.db, user_id).await?;

    let analysis = analyze(days, &totals, &goal, &Thresholds::default());
    Ok(Json(NutritionReport {
        period_days: days,
        start: start.to_string(),
        end: end.to_string(),
        nutrients: analysis.findings,
        recommendations: analysis.recommendations,
        has_dangerous: analysis.has_dangerous,
    }))
}
