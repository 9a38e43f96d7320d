use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::AppError,
    state::AppState,
};

use super::dto::{FoodProfileBody, SearchQuery};
use super::repo::{self, FoodProfile};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", get(search_foods))
        .route("/foods/:id", get(get_food))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/foods", post(create_food))
        .route("/foods/:id", put(update_food))
        .route("/foods/:id", delete(delete_food))
}

#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(p): Query<SearchQuery>,
) -> Result<Json<Vec<FoodProfile>>, AppError> {
    let limit = p.limit.clamp(1, 200);
    let foods = repo::search(&state.db, p.query.trim(), limit).await?;
    Ok(Json(foods))
}

#[instrument(skip(state))]
pub async fn get_food(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<FoodProfile>, AppError> {
    let food = repo::get(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("food"))?;
    Ok(Json(food))
}

#[instrument(skip(state, body))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<FoodProfileBody>,
) -> Result<(StatusCode, Json<FoodProfile>), AppError> {
    body.validate()?;
    if repo::get_by_name(&state.db, body.name.trim()).await?.is_some() {
        return Err(AppError::InvalidCatalogEntry(format!(
            "a food named '{}' already exists",
            body.name.trim()
        )));
    }
    let profile = profile_from_body(Uuid::new_v4(), body);
    repo::insert(&state.db, &profile).await?;
    info!(user_id = %user_id, food_id = %profile.id, name = %profile.name, "food created");
    Ok((StatusCode::CREATED, Json(profile)))
}

#[instrument(skip(state, body))]
pub async fn update_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<FoodProfileBody>,
) -> Result<Json<FoodProfile>, AppError> {
    body.validate()?;
    if let Some(existing) = repo::get_by_name(&state.db, body.name.trim()).await? {
        if existing.id != id {
            return Err(AppError::InvalidCatalogEntry(format!(
                "a food named '{}' already exists",
                body.name.trim()
            )));
        }
    }
    let profile = profile_from_body(id, body);
    if !repo::update(&state.db, &profile).await? {
        return Err(AppError::NotFound("food"));
    }
    info!(user_id = %user_id, food_id = %id, "food updated");
    Ok(Json(profile))
}

/// Deletion is refused while logged meals still reference the profile, so
/// historical events never lose their nutrient source.
#[instrument(skip(state))]
pub async fn delete_food(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if repo::is_referenced(&state.db, id).await? {
        return Err(AppError::ProfileInUse(id));
    }
    if !repo::delete(&state.db, id).await? {
        return Err(AppError::NotFound("food"));
    }
    info!(user_id = %user_id, food_id = %id, "food deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn profile_from_body(id: Uuid, body: FoodProfileBody) -> FoodProfile {
    FoodProfile {
        id,
        name: body.name.trim().to_string(),
        food_group: body.food_group,
        base_quantity: body.base_quantity,
        calories: body.calories,
        protein_g: body.protein_g,
        carbs_g: body.carbs_g,
        fats_g: body.fats_g,
        water_ml: body.water_ml,
        calcium_mg: body.calcium_mg,
        potassium_mg: body.potassium_mg,
        sodium_mg: body.sodium_mg,
        magnesium_mg: body.magnesium_mg,
        iron_mg: body.iron_mg,
        zinc_mg: body.zinc_mg,
        vitamin_a_iu: body.vitamin_a_iu,
        vitamin_d_iu: body.vitamin_d_iu,
        vitamin_e_iu: body.vitamin_e_iu,
        vitamin_k_mcg: body.vitamin_k_mcg,
        created_at: OffsetDateTime::now_utc(),
    }
}
