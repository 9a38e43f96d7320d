use serde::{Deserialize, Serialize};

use crate::report::analyzer::NutrientFinding;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub days: Option<i64>,
}

/// The analyzer's output over a window, handed to the external renderer.
#[derive(Debug, Serialize)]
pub struct NutritionReport {
    pub period_days: i64,
    pub start: String,
    pub end: String,
    pub nutrients: Vec<NutrientFinding>,
    pub recommendations: Vec<String>,
    pub has_dangerous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrients::Nutrients;
    use crate::report::analyzer::{analyze, Thresholds};

    #[test]
    fn report_serializes_renderer_tuples() {
        let analysis = analyze(7, &[], &Nutrients::default(), &Thresholds::default());
        let report = NutritionReport {
            period_days: 7,
            start: "2024-01-01".into(),
            end: "2024-01-07".into(),
            nutrients: analysis.findings,
            recommendations: analysis.recommendations,
            has_dangerous: analysis.has_dangerous,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["period_days"], 7);
        let first = &json["nutrients"][0];
        assert_eq!(first["nutrient"], "calories");
        assert_eq!(first["recommended"], 2000);
        assert_eq!(first["status"], "NEEDS_IMPROVEMENT");
        assert_eq!(first["is_dangerous"], false);
        assert!(json["recommendations"].as_array().unwrap().len() > 0);
    }
}
