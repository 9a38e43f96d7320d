use serde::{Deserialize, Serialize};

use crate::nutrients::Nutrients;
use crate::summary::repo::DailyTotalsRow;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub day: String,
    pub totals: Nutrients,
    pub manual_water_ml: i64,
}

impl From<&DailyTotalsRow> for SummaryResponse {
    fn from(row: &DailyTotalsRow) -> Self {
        Self {
            day: row.day.to_string(),
            totals: row.reported(),
            manual_water_ml: row.manual_water_ml,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
}
