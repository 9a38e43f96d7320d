use sqlx::PgPool;
use uuid::Uuid;

use crate::nutrients::Nutrients;

/// Baseline daily targets handed to users who never set their own.
pub fn default_goals() -> Nutrients {
    Nutrients {
        calories: 2000,
        protein_g: 150,
        carbs_g: 250,
        fats_g: 65,
        water_ml: 2000,
        calcium_mg: 1000,
        potassium_mg: 3500,
        sodium_mg: 2300,
        magnesium_mg: 400,
        iron_mg: 18,
        zinc_mg: 11,
        vitamin_a_iu: 5000,
        vitamin_d_iu: 600,
        vitamin_e_iu: 22,
        vitamin_k_mcg: 120,
    }
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<Nutrients>, sqlx::Error> {
    sqlx::query_as::<_, Nutrients>(
        r#"
        SELECT calories, protein_g, carbs_g, fats_g, water_ml, calcium_mg,
               potassium_mg, sodium_mg, magnesium_mg, iron_mg, zinc_mg,
               vitamin_a_iu, vitamin_d_iu, vitamin_e_iu, vitamin_k_mcg
        FROM nutrition_goals
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Stored goals, or the defaults when the user never set any.
pub async fn get_or_default(db: &PgPool, user_id: Uuid) -> Result<Nutrients, sqlx::Error> {
    Ok(get(db, user_id).await?.unwrap_or_else(default_goals))
}

pub async fn upsert(db: &PgPool, user_id: Uuid, goals: &Nutrients) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO nutrition_goals (user_id, calories, protein_g, carbs_g,
            fats_g, water_ml, calcium_mg, potassium_mg, sodium_mg, magnesium_mg,
            iron_mg, zinc_mg, vitamin_a_iu, vitamin_d_iu, vitamin_e_iu,
            vitamin_k_mcg)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16)
        ON CONFLICT (user_id) DO UPDATE SET
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
    .bind(goals.calories)
    .bind(goals.protein_g)
    .bind(goals.carbs_g)
    .bind(goals.fats_g)
    .bind(goals.water_ml)
    .bind(goals.calcium_mg)
    .bind(goals.potassium_mg)
    .bind(goals.sodium_mg)
    .bind(goals.magnesium_mg)
    .bind(goals.iron_mg)
    .bind(goals.zinc_mg)
    .bind(goals.vitamin_a_iu)
    .bind(goals.vitamin_d_iu)
    .bind(goals.vitamin_e_iu)
    .bind(goals.vitamin_k_mcg)
    .execute(db)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrients::Nutrient;

    #[test]
    fn defaults_are_positive_for_every_nutrient() {
        let goals = default_goals();
        for n in Nutrient::ALL {
            assert!(goals.get(n) > 0, "{} default must be positive", n.key());
        }
        assert_eq!(goals.calories, 2000);
        assert_eq!(goals.water_ml, 2000);
        assert_eq!(goals.vitamin_k_mcg, 120);
    }
}
