use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::Date;
use uuid::Uuid;

use crate::nutrients::Nutrients;

/// One materialized `(user, day)` totals row.
///
/// `totals` holds the ledger-derived sums; `manual_water_ml` is the only
/// manually-sourced column and has no backing consumption event.
#[derive(Debug, Clone, FromRow)]
pub struct DailyTotalsRow {
    pub user_id: Uuid,
    pub day: Date,
    #[sqlx(flatten)]
    pub totals: Nutrients,
    pub manual_water_ml: i64,
}

impl DailyTotalsRow {
    /// Totals as reported to callers: manual water folded into the water field.
    pub fn reported(&self) -> Nutrients {
        let mut n = self.totals;
        n.water_ml += self.manual_water_ml;
        n
    }
}

const TOTALS_COLUMNS: &str = r#"
    user_id, day, calories, protein_g, carbs_g, fats_g, water_ml, calcium_mg,
    potassium_mg, sodium_mg, magnesium_mg, iron_mg, zinc_mg, vitamin_a_iu,
    vitamin_d_iu, vitamin_e_iu, vitamin_k_mcg, manual_water_ml
"#;

fn bind_nutrients<'q>(
    query: sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments>,
    n: &Nutrients,
) -> sqlx::query::Query<'q, Postgres, sqlx::postgres::PgArguments> {
    query
        .bind(n.calories)
        .bind(n.protein_g)
        .bind(n.carbs_g)
        .bind(n.fats_g)
        .bind(n.water_ml)
        .bind(n.calcium_mg)
        .bind(n.potassium_mg)
        .bind(n.sodium_mg)
        .bind(n.magnesium_mg)
        .bind(n.iron_mg)
        .bind(n.zinc_mg)
        .bind(n.vitamin_a_iu)
        .bind(n.vitamin_d_iu)
        .bind(n.vitamin_e_iu)
        .bind(n.vitamin_k_mcg)
}

/// Field-wise add of one contribution. Creates the row (manual water zero)
/// when absent. Only valid on the append path, where summation is monotonic.
pub async fn incremental_add(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    day: Date,
    contribution: &Nutrients,
) -> Result<(), sqlx::Error> {
    let query = sqlx::query(
        r#"
        INSERT INTO daily_totals (user_id, day, calories, protein_g, carbs_g,
            fats_g, water_ml, calcium_mg, potassium_mg, sodium_mg, magnesium_mg,
            iron_mg, zinc_mg, vitamin_a_iu, vitamin_d_iu, vitamin_e_iu,
            vitamin_k_mcg, manual_water_ml)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, 0)
        ON CONFLICT (user_id, day) DO UPDATE SET
            calories = daily_totals.calories + EXCLUDED.calories,
            protein_g = daily_totals.protein_g + EXCLUDED.protein_g,
            carbs_g = daily_totals.carbs_g + EXCLUDED.carbs_g,
            fats_g = daily_totals.fats_g + EXCLUDED.fats_g,
            water_ml = daily_totals.water_ml + EXCLUDED.water_ml,
            calcium_mg = daily_totals.calcium_mg + EXCLUDED.calcium_mg,
            potassium_mg = daily_totals.potassium_mg + EXCLUDED.potassium_mg,
            sodium_mg = daily_totals.sodium_mg + EXCLUDED.sodium_mg,
            magnesium_mg = daily_totals.magnesium_mg + EXCLUDED.magnesium_mg,
            iron_mg = daily_totals.iron_mg + EXCLUDED.iron_mg,
            zinc_mg = daily_totals.zinc_mg + EXCLUDED.zinc_mg,
            vitamin_a_iu = daily_totals.vitamin_a_iu + EXCLUDED.vitamin_a_iu,
            vitamin_d_iu = daily_totals.vitamin_d_iu + EXCLUDED.vitamin_d_iu,
            vitamin_e_iu = daily_totals.vitamin_e_iu + EXCLUDED.vitamin_e_iu,
            vitamin_k_mcg = daily_totals.vitamin_k_mcg + EXCLUDED.vitamin_k_mcg
        "#,
    )
    .bind(user_id)
    .bind(day);
    bind_nutrients(query, contribution)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Replace the ledger-derived fields with freshly computed sums.
///
/// `manual_water_ml` is deliberately outside the update set, so manual
/// additions survive every recalculation.
pub async fn replace_derived(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    day: Date,
    totals: &Nutrients,
) -> Result<(), sqlx::Error> {
    let query = sqlx::query(
        r#"
        INSERT INTO daily_totals (user_id, day, calories, protein_g, carbs_g,
            fats_g, water_ml, calcium_mg, potassium_mg, sodium_mg, magnesium_mg,
            iron_mg, zinc_mg, vitamin_a_iu, vitamin_d_iu, vitamin_e_iu,
            vitamin_k_mcg, manual_water_ml)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, 0)
        ON CONFLICT (user_id, day) DO UPDATE SET
            calories = EXCLUDED.calories,
            protein_g = EXCLUDED.protein_g,
            carbs_g = EXCLUDED.carbs_g,
            fats_g = EXCLUDED.fats_g,
            water_ml = EXCLUDED.water_ml,
            calcium_mg = EXCLUDED.calcium_mg,
            potassium_mg = EXCLUDED.potassium_mg,
            sodium_mg = EXCLUDED.sodium_mg,
            magnesium_mg = EXCLUDED.magnesium_mg,
            iron_mg = EXCLUDED.iron_mg,
            zinc_mg = EXCLUDED.zinc_mg,
            vitamin_a_iu = EXCLUDED.vitamin_a_iu,
            vitamin_d_iu = EXCLUDED.vitamin_d_iu,
            vitamin_e_iu = EXCLUDED.vitamin_e_iu,
            vitamin_k_mcg = EXCLUDED.vitamin_k_mcg
        "#,
    )
    .bind(user_id)
    .bind(day);
    bind_nutrients(query, totals).execute(&mut **tx).await?;
    Ok(())
}

/// Record water drunk without a backing event.
pub async fn add_manual_water(
    db: &PgPool,
    user_id: Uuid,
    day: Date,
    amount_ml: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO daily_totals (user_id, day, manual_water_ml)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, day) DO UPDATE SET
            manual_water_ml = daily_totals.manual_water_ml + EXCLUDED.manual_water_ml
        "#,
    )
    .bind(user_id)
    .bind(day)
    .bind(amount_ml)
    .execute(db)
    .await?;
    Ok(())
}

/// Drop the aggregate row. Leaves the underlying events alone; a full day
/// reset must also clear the ledger in the same transaction.
pub async fn reset_date(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    day: Date,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM daily_totals WHERE user_id = $1 AND day = $2")
        .bind(user_id)
        .bind(day)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn get_day(
    db: &PgPool,
    user_id: Uuid,
    day: Date,
) -> Result<Option<DailyTotalsRow>, sqlx::Error> {
    sqlx::query_as::<_, DailyTotalsRow>(&format!(
        "SELECT {TOTALS_COLUMNS} FROM daily_totals WHERE user_id = $1 AND day = $2"
    ))
    .bind(user_id)
    .bind(day)
    .fetch_optional(db)
    .await
}

/// Rows present in `[start, end]`. Dates without a row are absent, not zero;
/// averaging callers default them to zero themselves.
pub async fn read_range(
    db: &PgPool,
    user_id: Uuid,
    start: Date,
    end: Date,
) -> Result<Vec<DailyTotalsRow>, sqlx::Error> {
    sqlx::query_as::<_, DailyTotalsRow>(&format!(
        r#"
        SELECT {TOTALS_COLUMNS} FROM daily_totals
        WHERE user_id = $1 AND day >= $2 AND day <= $3
        ORDER BY day ASC
        "#
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn reported_folds_manual_water_into_totals() {
        let row = DailyTotalsRow {
            user_id: Uuid::new_v4(),
            day: date!(2024 - 01 - 01),
            totals: Nutrients {
                calories: 195,
                water_ml: 102,
                ..Default::default()
            },
            manual_water_ml: 500,
        };
        let reported = row.reported();
        assert_eq!(reported.water_ml, 602);
        assert_eq!(reported.calories, 195);
        // the derived column itself stays untouched
        assert_eq!(row.totals.water_ml, 102);
    }
}
