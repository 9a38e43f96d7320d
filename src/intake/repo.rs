use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::catalog::FoodProfile;

/// One consumption event. Immutable once written, except for deletion.
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_id: Uuid,
    pub quantity: i64,
    pub unit: String,
    pub meal_class: String,
    pub consumed_at: OffsetDateTime,
    /// UTC calendar date of `consumed_at`; the aggregate this event feeds.
    pub day: Date,
}

/// Event joined with the display slice of its food profile.
#[derive(Debug, Clone, FromRow)]
pub struct EventListRow {
    pub id: Uuid,
    pub consumed_at: OffsetDateTime,
    pub meal_class: String,
    pub food_name: String,
    pub quantity: i64,
    pub unit: String,
    pub base_quantity: i64,
    pub calories: i64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

/// Event quantity joined with its full profile, for recalculation.
#[derive(Debug, Clone, FromRow)]
pub struct ContributionRow {
    pub quantity: i64,
    #[sqlx(flatten)]
    pub profile: FoodProfile,
}

pub async fn insert_tx(
    tx: &mut Transaction<'_, Postgres>,
    event: &EventRow,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO food_events (id, user_id, food_id, quantity, unit,
            meal_class, consumed_at, day)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(event.id)
    .bind(event.user_id)
    .bind(event.food_id)
    .bind(event.quantity)
    .bind(&event.unit)
    .bind(&event.meal_class)
    .bind(event.consumed_at)
    .bind(event.day)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn get_for_user_tx(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
    user_id: Uuid,
) -> Result<Option<EventRow>, sqlx::Error> {
    sqlx::query_as::<_, EventRow>(
        r#"
        SELECT id, user_id, food_id, quantity, unit, meal_class, consumed_at, day
        FROM food_events
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(event_id)
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await
}

/// Returns false when the event was already gone.
pub async fn delete_tx(
    tx: &mut Transaction<'_, Postgres>,
    event_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM food_events WHERE id = $1")
        .bind(event_id)
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_for_day_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    day: Date,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM food_events WHERE user_id = $1 AND day = $2")
        .bind(user_id)
        .bind(day)
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

/// The day's events, newest first. A plain re-query, so repeated calls see
/// current state rather than a frozen snapshot.
pub async fn list_for_date(
    db: &PgPool,
    user_id: Uuid,
    day: Date,
) -> Result<Vec<EventListRow>, sqlx::Error> {
    sqlx::query_as::<_, EventListRow>(
        r#"
        SELECT fe.id, fe.consumed_at, fe.meal_class, p.name AS food_name,
               fe.quantity, fe.unit, p.base_quantity, p.calories,
               p.protein_g, p.carbs_g, p.fats_g
        FROM food_events fe
        JOIN food_profiles p ON p.id = fe.food_id
        WHERE fe.user_id = $1 AND fe.day = $2
        ORDER BY fe.consumed_at DESC
        "#,
    )
    .bind(user_id)
    .bind(day)
    .fetch_all(db)
    .await
}

/// Every remaining event for the day with its profile, for a full resum.
pub async fn contributions_for_day_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    day: Date,
) -> Result<Vec<ContributionRow>, sqlx::Error> {
    sqlx::query_as::<_, ContributionRow>(
        r#"
        SELECT fe.quantity, p.id, p.name, p.food_group, p.base_quantity,
               p.calories, p.protein_g, p.carbs_g, p.fats_g, p.water_ml,
               p.calcium_mg, p.potassium_mg, p.sodium_mg, p.magnesium_mg,
               p.iron_mg, p.zinc_mg, p.vitamin_a_iu, p.vitamin_d_iu,
               p.vitamin_e_iu, p.vitamin_k_mcg, p.created_at
        FROM food_events fe
        JOIN food_profiles p ON p.id = fe.food_id
        WHERE fe.user_id = $1 AND fe.day = $2
        "#,
    )
    .bind(user_id)
    .bind(day)
    .fetch_all(&mut **tx)
    .await
}
