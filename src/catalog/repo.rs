use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A cataloged food with nutrient content per `base_quantity` units.
///
/// Fractional columns mirror the catalog schema; everything else is whole
/// units. Contributions derived from a profile are always whole units, see
/// [`crate::catalog::scale`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodProfile {
    pub id: Uuid,
    pub name: String,
    pub food_group: String,
    pub base_quantity: i64,
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub water_ml: i64,
    pub calcium_mg: i64,
    pub potassium_mg: i64,
    pub sodium_mg: i64,
    pub magnesium_mg: i64,
    pub iron_mg: f64,
    pub zinc_mg: f64,
    pub vitamin_a_iu: i64,
    pub vitamin_d_iu: i64,
    pub vitamin_e_iu: f64,
    pub vitamin_k_mcg: f64,
    pub created_at: OffsetDateTime,
}

const PROFILE_COLUMNS: &str = r#"
    id, name, food_group, base_quantity, calories, protein_g, carbs_g, fats_g,
    water_ml, calcium_mg, potassium_mg, sodium_mg, magnesium_mg, iron_mg,
    zinc_mg, vitamin_a_iu, vitamin_d_iu, vitamin_e_iu, vitamin_k_mcg, created_at
"#;

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<FoodProfile>, sqlx::Error> {
    sqlx::query_as::<_, FoodProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM food_profiles WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn get_by_name(db: &PgPool, name: &str) -> Result<Option<FoodProfile>, sqlx::Error> {
    sqlx::query_as::<_, FoodProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM food_profiles WHERE name = $1"
    ))
    .bind(name)
    .fetch_optional(db)
    .await
}

/// Name search; empty query lists the catalog. Capped at `limit` rows.
pub async fn search(
    db: &PgPool,
    query: &str,
    limit: i64,
) -> Result<Vec<FoodProfile>, sqlx::Error> {
    if query.is_empty() {
        sqlx::query_as::<_, FoodProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM food_profiles ORDER BY name ASC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(db)
        .await
    } else {
        sqlx::query_as::<_, FoodProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM food_profiles WHERE name ILIKE $1 ORDER BY name ASC LIMIT $2"
        ))
        .bind(format!("%{query}%"))
        .bind(limit)
        .fetch_all(db)
        .await
    }
}

pub async fn insert(db: &PgPool, p: &FoodProfile) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO food_profiles (id, name, food_group, base_quantity, calories,
            protein_g, carbs_g, fats_g, water_ml, calcium_mg, potassium_mg,
            sodium_mg, magnesium_mg, iron_mg, zinc_mg, vitamin_a_iu,
            vitamin_d_iu, vitamin_e_iu, vitamin_k_mcg, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20)
        "#,
    )
    .bind(p.id)
    .bind(&p.name)
    .bind(&p.food_group)
    .bind(p.base_quantity)
    .bind(p.calories)
    .bind(p.protein_g)
    .bind(p.carbs_g)
    .bind(p.fats_g)
    .bind(p.water_ml)
    .bind(p.calcium_mg)
    .bind(p.potassium_mg)
    .bind(p.sodium_mg)
    .bind(p.magnesium_mg)
    .bind(p.iron_mg)
    .bind(p.zinc_mg)
    .bind(p.vitamin_a_iu)
    .bind(p.vitamin_d_iu)
    .bind(p.vitamin_e_iu)
    .bind(p.vitamin_k_mcg)
    .bind(p.created_at)
    .execute(db)
    .await?;
    Ok(())
}

/// Returns false when no profile with this id exists.
pub async fn update(db: &PgPool, p: &FoodProfile) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE food_profiles SET name = $2, food_group = $3, base_quantity = $4,
            calories = $5, protein_g = $6, carbs_g = $7, fats_g = $8,
            water_ml = $9, calcium_mg = $10, potassium_mg = $11, sodium_mg = $12,
            magnesium_mg = $13, iron_mg = $14, zinc_mg = $15, vitamin_a_iu = $16,
            vitamin_d_iu = $17, vitamin_e_iu = $18, vitamin_k_mcg = $19
        WHERE id = $1
        "#,
    )
    .bind(p.id)
    .bind(&p.name)
    .bind(&p.food_group)
    .bind(p.base_quantity)
    .bind(p.calories)
    .bind(p.protein_g)
    .bind(p.carbs_g)
    .bind(p.fats_g)
    .bind(p.water_ml)
    .bind(p.calcium_mg)
    .bind(p.potassium_mg)
    .bind(p.sodium_mg)
    .bind(p.magnesium_mg)
    .bind(p.iron_mg)
    .bind(p.zinc_mg)
    .bind(p.vitamin_a_iu)
    .bind(p.vitamin_d_iu)
    .bind(p.vitamin_e_iu)
    .bind(p.vitamin_k_mcg)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// True when any consumption event still references the profile.
pub async fn is_referenced(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let (referenced,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM food_events WHERE food_id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;
    Ok(referenced)
}

/// Returns false when no profile with this id exists.
pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM food_profiles WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
