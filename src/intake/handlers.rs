use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::AuthUser, dates, error::AppError, state::AppState};

use super::dto::{
    AddIntakeRequest, AddIntakeResponse, AddWaterRequest, IntakeListItem, IntakeQuery,
    ResetDayRequest,
};
use super::{repo, service};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/intake", post(add_intake))
        .route("/intake", get(list_intake))
        .route("/intake/:id", delete(remove_intake))
        .route("/intake/water", post(add_water))
        .route("/intake/reset", post(reset_day))
}

#[instrument(skip(state, body))]
pub async fn add_intake(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AddIntakeRequest>,
) -> Result<(StatusCode, Json<AddIntakeResponse>), AppError> {
    let date = body.date.as_deref().map(dates::parse_date).transpose()?;
    let outcome = service::add_consumption(
        &state.db,
        user_id,
        body.food_id,
        body.quantity,
        body.unit,
        body.meal_class,
        date,
    )
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(AddIntakeResponse {
            event_id: outcome.event_id,
            day: outcome.day.to_string(),
            contribution: outcome.contribution,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn remove_intake(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service::remove_consumption(&state.db, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn list_intake(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<IntakeQuery>,
) -> Result<Json<Vec<IntakeListItem>>, AppError> {
    let day = match p.date.as_deref() {
        Some(d) => dates::parse_date(d)?,
        None => dates::today_utc(),
    };
    let rows = repo::list_for_date(&state.db, user_id, day).await?;
    Ok(Json(rows.into_iter().map(IntakeListItem::from).collect()))
}

#[instrument(skip(state, body))]
pub async fn add_water(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AddWaterRequest>,
) -> Result<StatusCode, AppError> {
    let day = match body.date.as_deref() {
        Some(d) => dates::parse_date(d)?,
        None => dates::today_utc(),
    };
    service::add_water(&state.db, user_id, day, body.amount_ml).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, body))]
pub async fn reset_day(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<ResetDayRequest>,
) -> Result<StatusCode, AppError> {
    let day = match body.date.as_deref() {
        Some(d) => dates::parse_date(d)?,
        None => dates::today_utc(),
    };
    service::reset_day(&state.db, user_id, day).await?;
    Ok(StatusCode::NO_CONTENT)
}
