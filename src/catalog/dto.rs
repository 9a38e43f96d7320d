use serde::Deserialize;

use crate::error::AppError;

/// Body for creating or replacing a food profile.
#[derive(Debug, Deserialize)]
pub struct FoodProfileBody {
    pub name: String,
    #[serde(default)]
    pub food_group: String,
    pub base_quantity: i64,
    #[serde(default)]
    pub calories: i64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fats_g: f64,
    #[serde(default)]
    pub water_ml: i64,
    #[serde(default)]
    pub calcium_mg: i64,
    #[serde(default)]
    pub potassium_mg: i64,
    #[serde(default)]
    pub sodium_mg: i64,
    #[serde(default)]
    pub magnesium_mg: i64,
    #[serde(default)]
    pub iron_mg: f64,
    #[serde(default)]
    pub zinc_mg: f64,
    #[serde(default)]
    pub vitamin_a_iu: i64,
    #[serde(default)]
    pub vitamin_d_iu: i64,
    #[serde(default)]
    pub vitamin_e_iu: f64,
    #[serde(default)]
    pub vitamin_k_mcg: f64,
}

impl FoodProfileBody {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidCatalogEntry("name must not be blank".into()));
        }
        if self.base_quantity <= 0 {
            return Err(AppError::InvalidCatalogEntry(format!(
                "base_quantity must be positive, got {}",
                self.base_quantity
            )));
        }
        let whole = [
            ("calories", self.calories),
            ("water_ml", self.water_ml),
            ("calcium_mg", self.calcium_mg),
            ("potassium_mg", self.potassium_mg),
            ("sodium_mg", self.sodium_mg),
            ("magnesium_mg", self.magnesium_mg),
            ("vitamin_a_iu", self.vitamin_a_iu),
            ("vitamin_d_iu", self.vitamin_d_iu),
        ];
        for (field, value) in whole {
            if value < 0 {
                return Err(AppError::InvalidCatalogEntry(format!(
                    "{field} must not be negative, got {value}"
                )));
            }
        }
        let fractional = [
            ("protein_g", self.protein_g),
            ("carbs_g", self.carbs_g),
            ("fats_g", self.fats_g),
            ("iron_mg", self.iron_mg),
            ("zinc_mg", self.zinc_mg),
            ("vitamin_e_iu", self.vitamin_e_iu),
            ("vitamin_k_mcg", self.vitamin_k_mcg),
        ];
        for (field, value) in fractional {
            if value < 0.0 {
                return Err(AppError::InvalidCatalogEntry(format!(
                    "{field} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> FoodProfileBody {
        serde_json::from_value(serde_json::json!({
            "name": "Rice",
            "base_quantity": 100,
            "calories": 130,
            "protein_g": 2.7
        }))
        .unwrap()
    }

    #[test]
    fn omitted_nutrients_default_to_zero() {
        let b = body();
        assert_eq!(b.fats_g, 0.0);
        assert_eq!(b.vitamin_k_mcg, 0.0);
        assert_eq!(b.food_group, "");
        assert!(b.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_name_and_bad_base() {
        let mut b = body();
        b.name = "   ".into();
        assert!(b.validate().is_err());

        let mut b = body();
        b.base_quantity = 0;
        assert!(matches!(
            b.validate(),
            Err(AppError::InvalidCatalogEntry(_))
        ));
    }

    #[test]
    fn validate_rejects_negative_magnitudes() {
        let mut b = body();
        b.sodium_mg = -1;
        assert!(b.validate().is_err());

        let mut b = body();
        b.iron_mg = -0.1;
        assert!(b.validate().is_err());
    }
}
