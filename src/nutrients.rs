use serde::{Deserialize, Serialize};

pub const NUTRIENT_COUNT: usize = 15;

/// The tracked nutrients, in the order they appear in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbs,
    Fats,
    Water,
    Calcium,
    Potassium,
    Sodium,
    Magnesium,
    Iron,
    Zinc,
    VitaminA,
    VitaminD,
    VitaminE,
    VitaminK,
}

impl Nutrient {
    pub const ALL: [Nutrient; NUTRIENT_COUNT] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fats,
        Nutrient::Water,
        Nutrient::Calcium,
        Nutrient::Potassium,
        Nutrient::Sodium,
        Nutrient::Magnesium,
        Nutrient::Iron,
        Nutrient::Zinc,
        Nutrient::VitaminA,
        Nutrient::VitaminD,
        Nutrient::VitaminE,
        Nutrient::VitaminK,
    ];

    /// Column/key name used in storage and API payloads.
    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein_g",
            Nutrient::Carbs => "carbs_g",
            Nutrient::Fats => "fats_g",
            Nutrient::Water => "water_ml",
            Nutrient::Calcium => "calcium_mg",
            Nutrient::Potassium => "potassium_mg",
            Nutrient::Sodium => "sodium_mg",
            Nutrient::Magnesium => "magnesium_mg",
            Nutrient::Iron => "iron_mg",
            Nutrient::Zinc => "zinc_mg",
            Nutrient::VitaminA => "vitamin_a_iu",
            Nutrient::VitaminD => "vitamin_d_iu",
            Nutrient::VitaminE => "vitamin_e_iu",
            Nutrient::VitaminK => "vitamin_k_mcg",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein",
            Nutrient::Carbs => "Carbohydrates",
            Nutrient::Fats => "Fats",
            Nutrient::Water => "Water",
            Nutrient::Calcium => "Calcium",
            Nutrient::Potassium => "Potassium",
            Nutrient::Sodium => "Sodium",
            Nutrient::Magnesium => "Magnesium",
            Nutrient::Iron => "Iron",
            Nutrient::Zinc => "Zinc",
            Nutrient::VitaminA => "Vitamin A",
            Nutrient::VitaminD => "Vitamin D",
            Nutrient::VitaminE => "Vitamin E",
            Nutrient::VitaminK => "Vitamin K",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Calories => "kcal",
            Nutrient::Protein | Nutrient::Carbs | Nutrient::Fats => "g",
            Nutrient::Water => "ml",
            Nutrient::Calcium
            | Nutrient::Potassium
            | Nutrient::Sodium
            | Nutrient::Magnesium
            | Nutrient::Iron
            | Nutrient::Zinc => "mg",
            Nutrient::VitaminA | Nutrient::VitaminD | Nutrient::VitaminE => "IU",
            Nutrient::VitaminK => "mcg",
        }
    }
}

/// A whole-unit nutrient vector: one value per tracked nutrient.
///
/// Used for event contributions, daily totals and goal targets alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Nutrients {
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
    pub water_ml: i64,
    pub calcium_mg: i64,
    pub potassium_mg: i64,
    pub sodium_mg: i64,
    pub magnesium_mg: i64,
    pub iron_mg: i64,
    pub zinc_mg: i64,
    pub vitamin_a_iu: i64,
    pub vitamin_d_iu: i64,
    pub vitamin_e_iu: i64,
    pub vitamin_k_mcg: i64,
}

impl Nutrients {
    pub fn get(&self, nutrient: Nutrient) -> i64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein_g,
            Nutrient::Carbs => self.carbs_g,
            Nutrient::Fats => self.fats_g,
            Nutrient::Water => self.water_ml,
            Nutrient::Calcium => self.calcium_mg,
            Nutrient::Potassium => self.potassium_mg,
            Nutrient::Sodium => self.sodium_mg,
            Nutrient::Magnesium => self.magnesium_mg,
            Nutrient::Iron => self.iron_mg,
            Nutrient::Zinc => self.zinc_mg,
            Nutrient::VitaminA => self.vitamin_a_iu,
            Nutrient::VitaminD => self.vitamin_d_iu,
            Nutrient::VitaminE => self.vitamin_e_iu,
            Nutrient::VitaminK => self.vitamin_k_mcg,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: i64) {
        match nutrient {
            Nutrient::Calories => self.calories = value,
            Nutrient::Protein => self.protein_g = value,
            Nutrient::Carbs => self.carbs_g = value,
            Nutrient::Fats => self.fats_g = value,
            Nutrient::Water => self.water_ml = value,
            Nutrient::Calcium => self.calcium_mg = value,
            Nutrient::Potassium => self.potassium_mg = value,
            Nutrient::Sodium => self.sodium_mg = value,
            Nutrient::Magnesium => self.magnesium_mg = value,
            Nutrient::Iron => self.iron_mg = value,
            Nutrient::Zinc => self.zinc_mg = value,
            Nutrient::VitaminA => self.vitamin_a_iu = value,
            Nutrient::VitaminD => self.vitamin_d_iu = value,
            Nutrient::VitaminE => self.vitamin_e_iu = value,
            Nutrient::VitaminK => self.vitamin_k_mcg = value,
        }
    }
}

impl std::ops::AddAssign<&Nutrients> for Nutrients {
    fn add_assign(&mut self, other: &Nutrients) {
        for n in Nutrient::ALL {
            self.set(n, self.get(n) + other.get(n));
        }
    }
}

impl std::ops::Add<&Nutrients> for Nutrients {
    type Output = Nutrients;

    fn add(mut self, other: &Nutrients) -> Nutrients {
        self += other;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_cover_every_field() {
        let mut totals = Nutrients::default();
        for (i, n) in Nutrient::ALL.iter().enumerate() {
            totals.set(*n, i as i64 + 1);
        }
        for (i, n) in Nutrient::ALL.iter().enumerate() {
            assert_eq!(totals.get(*n), i as i64 + 1);
        }
    }

    #[test]
    fn add_assign_is_field_wise() {
        let mut a = Nutrients {
            calories: 195,
            protein_g: 4,
            ..Default::default()
        };
        let b = Nutrients {
            calories: 65,
            protein_g: 1,
            water_ml: 250,
            ..Default::default()
        };
        a += &b;
        assert_eq!(a.calories, 260);
        assert_eq!(a.protein_g, 5);
        assert_eq!(a.water_ml, 250);
        assert_eq!(a.zinc_mg, 0);
    }

    #[test]
    fn keys_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for n in Nutrient::ALL {
            assert!(seen.insert(n.key()));
        }
        assert_eq!(seen.len(), NUTRIENT_COUNT);
    }
}
