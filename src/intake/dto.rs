use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::catalog::scale;
use crate::intake::repo::EventListRow;
use crate::nutrients::Nutrients;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealClass {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MealClass::Breakfast => "Breakfast",
            MealClass::Lunch => "Lunch",
            MealClass::Dinner => "Dinner",
            MealClass::Snack => "Snack",
        }
    }

    /// Stored values come from our own enum; anything else (hand-edited
    /// rows) falls back to the schema default.
    pub fn parse(value: &str) -> MealClass {
        match value {
            "Breakfast" => MealClass::Breakfast,
            "Lunch" => MealClass::Lunch,
            "Dinner" => MealClass::Dinner,
            _ => MealClass::Snack,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddIntakeRequest {
    pub food_id: Uuid,
    pub quantity: i64,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub meal_class: MealClass,
    /// `YYYY-MM-DD`; omitted means today (UTC).
    pub date: Option<String>,
}

fn default_unit() -> String {
    "grams".into()
}

#[derive(Debug, Serialize)]
pub struct AddIntakeResponse {
    pub event_id: Uuid,
    pub day: String,
    pub contribution: Nutrients,
}

#[derive(Debug, Deserialize)]
pub struct AddWaterRequest {
    pub amount_ml: i64,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetDayRequest {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IntakeQuery {
    pub date: Option<String>,
}

/// One logged meal as shown in the day's log, with the macro part of its
/// contribution precomputed for display.
#[derive(Debug, Serialize)]
pub struct IntakeListItem {
    pub id: Uuid,
    pub consumed_at: OffsetDateTime,
    pub meal_class: MealClass,
    pub food_name: String,
    pub quantity: i64,
    pub unit: String,
    pub calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fats_g: i64,
}

impl From<EventListRow> for IntakeListItem {
    fn from(row: EventListRow) -> Self {
        Self {
            id: row.id,
            consumed_at: row.consumed_at,
            meal_class: MealClass::parse(&row.meal_class),
            food_name: row.food_name,
            quantity: row.quantity,
            unit: row.unit,
            calories: scale::scale_whole(row.calories, row.quantity, row.base_quantity),
            protein_g: scale::scale_fractional(row.protein_g, row.quantity, row.base_quantity),
            carbs_g: scale::scale_fractional(row.carbs_g, row.quantity, row.base_quantity),
            fats_g: scale::scale_fractional(row.fats_g, row.quantity, row.base_quantity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_class_round_trips_through_storage_strings() {
        for m in [
            MealClass::Breakfast,
            MealClass::Lunch,
            MealClass::Dinner,
            MealClass::Snack,
        ] {
            assert_eq!(MealClass::parse(m.as_str()), m);
        }
        assert_eq!(MealClass::parse("brunch"), MealClass::Snack);
    }

    #[test]
    fn add_request_defaults_unit_to_grams() {
        let req: AddIntakeRequest = serde_json::from_value(serde_json::json!({
            "food_id": "8f2a9af1-7a90-4f7c-9c3e-111111111111",
            "quantity": 150,
            "meal_class": "Lunch"
        }))
        .unwrap();
        assert_eq!(req.unit, "grams");
        assert_eq!(req.meal_class, MealClass::Lunch);
        assert!(req.date.is_none());
    }

    #[test]
    fn list_item_scales_display_macros() {
        let row = EventListRow {
            id: Uuid::new_v4(),
            consumed_at: OffsetDateTime::UNIX_EPOCH,
            meal_class: "Breakfast".into(),
            food_name: "Rice".into(),
            quantity: 150,
            unit: "grams".into(),
            base_quantity: 100,
            calories: 130,
            protein_g: 2.7,
            carbs_g: 28.2,
            fats_g: 0.3,
        };
        let item = IntakeListItem::from(row);
        assert_eq!(item.calories, 195);
        assert_eq!(item.protein_g, 4);
        assert_eq!(item.carbs_g, 42);
        assert_eq!(item.fats_g, 0);
    }
}
