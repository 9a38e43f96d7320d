use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::AuthUser,
    error::AppError,
    nutrients::{Nutrient, Nutrients},
    state::AppState,
};

use super::repo;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(get_goals))
        .route("/goals", put(put_goals))
}

/// Never 404s: a user without a stored row gets the defaults.
#[instrument(skip(state))]
pub async fn get_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Nutrients>, AppError> {
    let goals = repo::get_or_default(&state.db, user_id).await?;
    Ok(Json(goals))
}

#[instrument(skip(state, body))]
pub async fn put_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<Nutrients>,
) -> Result<Json<Nutrients>, AppError> {
    for n in Nutrient::ALL {
        if body.get(n) < 0 {
            return Err(AppError::InvalidQuantity(format!(
                "{} target must not be negative, got {}",
                n.key(),
                body.get(n)
            )));
        }
    }
    repo::upsert(&state.db, user_id, &body).await?;
    info!(user_id = %user_id, "nutrition goals updated");
    Ok(Json(body))
}
