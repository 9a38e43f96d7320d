use crate::catalog::FoodProfile;
use crate::error::AppError;
use crate::nutrients::Nutrients;

/// Absolute nutrient contribution of consuming `quantity` units of a food.
///
/// Every field is scaled independently as `floor(field * quantity / base)`
/// with truncating division; fractional catalog fields lose their remainder.
/// This asymmetry is why removal recalculates instead of subtracting.
pub fn contribution(profile: &FoodProfile, quantity: i64) -> Result<Nutrients, AppError> {
    if profile.base_quantity <= 0 {
        return Err(AppError::InvalidCatalogEntry(format!(
            "base_quantity must be positive, got {} ({})",
            profile.base_quantity, profile.name
        )));
    }
    if quantity <= 0 {
        return Err(AppError::invalid_quantity(quantity));
    }
    let base = profile.base_quantity;
    Ok(Nutrients {
        calories: scale_whole(profile.calories, quantity, base),
        protein_g: scale_fractional(profile.protein_g, quantity, base),
        carbs_g: scale_fractional(profile.carbs_g, quantity, base),
        fats_g: scale_fractional(profile.fats_g, quantity, base),
        water_ml: scale_whole(profile.water_ml, quantity, base),
        calcium_mg: scale_whole(profile.calcium_mg, quantity, base),
        potassium_mg: scale_whole(profile.potassium_mg, quantity, base),
        sodium_mg: scale_whole(profile.sodium_mg, quantity, base),
        magnesium_mg: scale_whole(profile.magnesium_mg, quantity, base),
        iron_mg: scale_fractional(profile.iron_mg, quantity, base),
        zinc_mg: scale_fractional(profile.zinc_mg, quantity, base),
        vitamin_a_iu: scale_whole(profile.vitamin_a_iu, quantity, base),
        vitamin_d_iu: scale_whole(profile.vitamin_d_iu, quantity, base),
        vitamin_e_iu: scale_fractional(profile.vitamin_e_iu, quantity, base),
        vitamin_k_mcg: scale_fractional(profile.vitamin_k_mcg, quantity, base),
    })
}

/// Whole-unit fields: exact integer arithmetic, truncation via integer division.
pub(crate) fn scale_whole(value: i64, quantity: i64, base: i64) -> i64 {
    value * quantity / base
}

/// Fractional fields: scale in f64, then truncate toward zero.
pub(crate) fn scale_fractional(value: f64, quantity: i64, base: i64) -> i64 {
    (value * quantity as f64 / base as f64).trunc() as i64
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    pub(crate) fn profile(base_quantity: i64) -> FoodProfile {
        FoodProfile {
            id: Uuid::new_v4(),
            name: "Rice".into(),
            food_group: "Grains".into(),
            base_quantity,
            calories: 130,
            protein_g: 2.7,
            carbs_g: 28.2,
            fats_g: 0.3,
            water_ml: 68,
            calcium_mg: 10,
            potassium_mg: 35,
            sodium_mg: 1,
            magnesium_mg: 12,
            iron_mg: 0.2,
            zinc_mg: 0.49,
            vitamin_a_iu: 0,
            vitamin_d_iu: 0,
            vitamin_e_iu: 0.04,
            vitamin_k_mcg: 0.1,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn scales_whole_and_fractional_fields_with_truncation() {
        let p = profile(100);
        let c = contribution(&p, 150).unwrap();
        assert_eq!(c.calories, 195); // floor(130 * 150 / 100)
        assert_eq!(c.protein_g, 4); // floor(2.7 * 1.5) = floor(4.05)
        assert_eq!(c.carbs_g, 42); // floor(28.2 * 1.5) = floor(42.3)
        assert_eq!(c.fats_g, 0); // floor(0.3 * 1.5) = floor(0.45)
        assert_eq!(c.water_ml, 102);
        assert_eq!(c.potassium_mg, 52); // floor(35 * 1.5)
    }

    #[test]
    fn small_quantities_truncate_toward_zero() {
        let p = profile(100);
        let c = contribution(&p, 50).unwrap();
        assert_eq!(c.calories, 65);
        assert_eq!(c.protein_g, 1); // floor(1.35)
        assert_eq!(c.sodium_mg, 0); // floor(0.5)
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let p = profile(100);
        assert!(matches!(
            contribution(&p, 0),
            Err(AppError::InvalidQuantity(_))
        ));
        assert!(matches!(
            contribution(&p, -10),
            Err(AppError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn rejects_bad_base_quantity_before_dividing() {
        let p = profile(0);
        assert!(matches!(
            contribution(&p, 100),
            Err(AppError::InvalidCatalogEntry(_))
        ));
        let p = profile(-5);
        assert!(matches!(
            contribution(&p, 100),
            Err(AppError::InvalidCatalogEntry(_))
        ));
    }

    #[test]
    fn quantity_equal_to_base_returns_profile_magnitudes_truncated() {
        let p = profile(100);
        let c = contribution(&p, 100).unwrap();
        assert_eq!(c.calories, 130);
        assert_eq!(c.protein_g, 2); // 2.7 truncated
        assert_eq!(c.zinc_mg, 0); // 0.49 truncated
    }
}
