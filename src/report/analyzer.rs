use serde::Serialize;

use crate::nutrients::{Nutrient, Nutrients};

/// Classification of an N-day average against the dual threshold tables,
/// ordered by severity of the finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntakeStatus {
    Dangerous,
    SignificantlyHigh,
    AboveTarget,
    Excellent,
    Good,
    Adequate,
    NeedsImprovement,
}

/// Per-nutrient recommended daily values and maximum safe daily values.
/// The defaults are the published reference tables; both are per-day
/// magnitudes in the same units as [`Nutrients`].
#[derive(Debug, Clone)]
pub struct Thresholds {
    pub recommended: Nutrients,
    pub maximum_safe: Nutrients,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            recommended: Nutrients {
                calories: 2000,
                protein_g: 50,
                carbs_g: 300,
                fats_g: 70,
                water_ml: 2000,
                calcium_mg: 1000,
                potassium_mg: 3500,
                sodium_mg: 2300,
                magnesium_mg: 400,
                iron_mg: 18,
                zinc_mg: 11,
                vitamin_a_iu: 5000,
                vitamin_d_iu: 600,
                vitamin_e_iu: 15,
                vitamin_k_mcg: 120,
            },
            maximum_safe: Nutrients {
                calories: 3500,
                protein_g: 200,
                carbs_g: 500,
                fats_g: 150,
                water_ml: 5000,
                calcium_mg: 2500,
                potassium_mg: 6000,
                sodium_mg: 5000,
                magnesium_mg: 700,
                iron_mg: 45,
                zinc_mg: 40,
                vitamin_a_iu: 10000,
                vitamin_d_iu: 4000,
                vitamin_e_iu: 1000,
                vitamin_k_mcg: 1000,
            },
        }
    }
}

/// One nutrient's analyzed window, renderer-ready.
#[derive(Debug, Clone, Serialize)]
pub struct NutrientFinding {
    pub nutrient: Nutrient,
    pub display_name: &'static str,
    pub unit: &'static str,
    pub average: f64,
    pub recommended: i64,
    pub maximum_safe: i64,
    pub goal: i64,
    pub status: IntakeStatus,
    pub is_dangerous: bool,
    pub health_impact: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WindowAnalysis {
    pub findings: Vec<NutrientFinding>,
    pub recommendations: Vec<String>,
    pub has_dangerous: bool,
}

/// Classify an average against one nutrient's thresholds.
pub fn classify(average: f64, recommended: i64, maximum_safe: i64) -> IntakeStatus {
    let rec = recommended as f64;
    if average > maximum_safe as f64 {
        IntakeStatus::Dangerous
    } else if average > 1.5 * rec {
        IntakeStatus::SignificantlyHigh
    } else if average > 1.2 * rec {
        IntakeStatus::AboveTarget
    } else if average >= 0.9 * rec {
        IntakeStatus::Excellent
    } else if average >= 0.7 * rec {
        IntakeStatus::Good
    } else if average >= 0.5 * rec {
        IntakeStatus::Adequate
    } else {
        IntakeStatus::NeedsImprovement
    }
}

/// Analyze an N-day window of daily totals.
///
/// `rows` holds the totals of the days that have any; days without a row
/// contribute zero to the numerator while `days` stays the denominator.
pub fn analyze(
    days: i64,
    rows: &[Nutrients],
    goal: &Nutrients,
    thresholds: &Thresholds,
) -> WindowAnalysis {
    let days_f = days as f64;
    let mut findings = Vec::with_capacity(Nutrient::ALL.len());
    for n in Nutrient::ALL {
        let sum: i64 = rows.iter().map(|r| r.get(n)).sum();
        let average = sum as f64 / days_f;
        let recommended = thresholds.recommended.get(n);
        let maximum_safe = thresholds.maximum_safe.get(n);
        let status = classify(average, recommended, maximum_safe);
        let is_dangerous = status == IntakeStatus::Dangerous;
        findings.push(NutrientFinding {
            nutrient: n,
            display_name: n.display_name(),
            unit: n.unit(),
            average,
            recommended,
            maximum_safe,
            goal: goal.get(n),
            status,
            is_dangerous,
            health_impact: health_impact(n, average, recommended, status),
        });
    }
    let recommendations = recommendations(&findings);
    let has_dangerous = findings.iter().any(|f| f.is_dangerous);
    WindowAnalysis {
        findings,
        recommendations,
        has_dangerous,
    }
}

/// Impact text for intake above the recommended value. Dangerous levels use
/// the per-nutrient table; the rest is banded by how far over they sit.
fn health_impact(
    nutrient: Nutrient,
    average: f64,
    recommended: i64,
    status: IntakeStatus,
) -> Option<String> {
    let rec = recommended as f64;
    if average <= rec {
        return None;
    }
    if status == IntakeStatus::Dangerous {
        return Some(dangerous_impact(nutrient).to_string());
    }
    let percent_over = (average - rec) / rec * 100.0;
    let text = if percent_over < 20.0 {
        "Slightly elevated, monitor"
    } else if percent_over < 50.0 {
        "Moderately high, adjust intake"
    } else {
        "Significantly high, reduce intake"
    };
    Some(text.to_string())
}

fn dangerous_impact(nutrient: Nutrient) -> &'static str {
    match nutrient {
        Nutrient::Calories => "Risk of weight gain, obesity",
        Nutrient::Sodium => "High blood pressure risk",
        Nutrient::Fats => "Cardiovascular risk",
        Nutrient::Protein => "Kidney strain, dehydration",
        Nutrient::VitaminA => "Liver damage, bone issues",
        Nutrient::Iron => "Organ damage risk",
        Nutrient::Calcium => "Kidney stones, constipation",
        _ => "Potential toxicity",
    }
}

/// Ordered advice: dangerous findings first (discovery order), then
/// reduce-intake advice, then increase-intake advice. A clean window gets a
/// single affirmation.
fn recommendations(findings: &[NutrientFinding]) -> Vec<String> {
    let mut urgent = Vec::new();
    let mut reduce = Vec::new();
    let mut increase = Vec::new();
    for f in findings {
        let rec = f.recommended as f64;
        match f.status {
            IntakeStatus::Dangerous => {
                let max = f.maximum_safe as f64;
                urgent.push(format!(
                    "URGENT: Reduce {} intake immediately ({:.0}% above safe limit)",
                    f.display_name,
                    (f.average - max) / max * 100.0
                ));
            }
            IntakeStatus::SignificantlyHigh | IntakeStatus::AboveTarget => {
                reduce.push(format!(
                    "Reduce {} intake (currently at {:.0}% of recommended)",
                    f.display_name,
                    f.average / rec * 100.0
                ));
            }
            IntakeStatus::NeedsImprovement => {
                increase.push(format!(
                    "Increase {} intake (currently at {:.0}% of recommended)",
                    f.display_name,
                    f.average / rec * 100.0
                ));
            }
            _ => {}
        }
    }
    if urgent.is_empty() && reduce.is_empty() && increase.is_empty() {
        return vec!["Your nutrition intake is well-balanced. Keep up your current habits.".into()];
    }
    urgent.extend(reduce);
    urgent.extend(increase);
    urgent
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Thresholds {
        Thresholds::default()
    }

    #[test]
    fn classification_thresholds_for_calories() {
        // Recommended 2000, maximum safe 3500.
        assert_eq!(classify(3600.0, 2000, 3500), IntakeStatus::Dangerous);
        assert_eq!(classify(3100.0, 2000, 3500), IntakeStatus::SignificantlyHigh);
        assert_eq!(classify(2500.0, 2000, 3500), IntakeStatus::AboveTarget);
        assert_eq!(classify(1850.0, 2000, 3500), IntakeStatus::Excellent);
        assert_eq!(classify(1500.0, 2000, 3500), IntakeStatus::Good);
        assert_eq!(classify(1000.0, 2000, 3500), IntakeStatus::Adequate);
        assert_eq!(classify(900.0, 2000, 3500), IntakeStatus::NeedsImprovement);
    }

    #[test]
    fn band_edges_are_inclusive_below_and_exclusive_above() {
        // Exactly 1.5x and 1.2x are not "above"; 0.9x, 0.7x, 0.5x are "at least".
        assert_eq!(classify(3000.0, 2000, 3500), IntakeStatus::AboveTarget);
        assert_eq!(classify(2400.0, 2000, 3500), IntakeStatus::Excellent);
        assert_eq!(classify(1800.0, 2000, 3500), IntakeStatus::Excellent);
        assert_eq!(classify(1400.0, 2000, 3500), IntakeStatus::Good);
        assert_eq!(classify(1000.0, 2000, 3500), IntakeStatus::Adequate);
        assert_eq!(classify(999.9, 2000, 3500), IntakeStatus::NeedsImprovement);
    }

    #[test]
    fn missing_days_count_as_zero_in_the_denominator() {
        // Three logged days of 2800 kcal in a 7-day window: the average is
        // 8400/7 = 1200, not 8400/3.
        let day = Nutrients {
            calories: 2800,
            ..Default::default()
        };
        let rows = vec![day; 3];
        let analysis = analyze(7, &rows, &Nutrients::default(), &defaults());
        let calories = &analysis.findings[0];
        assert_eq!(calories.nutrient, Nutrient::Calories);
        assert!((calories.average - 1200.0).abs() < f64::EPSILON);
        assert_eq!(calories.status, IntakeStatus::Adequate);
    }

    #[test]
    fn dangerous_findings_lead_then_reduce_then_increase() {
        // Sodium over its safe limit, calories significantly high, iron low.
        let mut day = Thresholds::default().recommended;
        day.sodium_mg = 5200;
        day.calories = 3100;
        day.iron_mg = 5;
        let rows = vec![day; 7];
        let analysis = analyze(7, &rows, &Nutrients::default(), &defaults());

        let recs = &analysis.recommendations;
        assert!(recs[0].starts_with("URGENT: Reduce Sodium"));
        assert!(recs.iter().any(|r| r.starts_with("Reduce Calories")));
        assert!(recs.iter().any(|r| r.starts_with("Increase Iron")));
        let reduce_pos = recs.iter().position(|r| r.starts_with("Reduce")).unwrap();
        let increase_pos = recs.iter().position(|r| r.starts_with("Increase")).unwrap();
        assert!(reduce_pos < increase_pos);
        assert!(analysis.has_dangerous);
    }

    #[test]
    fn balanced_window_gets_a_single_affirmation() {
        // Every day exactly on the recommended values: all Excellent.
        let day = Thresholds::default().recommended;
        let rows = vec![day; 7];
        let analysis = analyze(7, &rows, &Nutrients::default(), &defaults());
        assert!(analysis
            .findings
            .iter()
            .all(|f| f.status == IntakeStatus::Excellent));
        assert_eq!(analysis.recommendations.len(), 1);
        assert!(analysis.recommendations[0].contains("well-balanced"));
        assert!(!analysis.has_dangerous);
    }

    #[test]
    fn health_impact_uses_fixed_table_when_dangerous() {
        let mut day = Thresholds::default().recommended;
        day.calories = 3600;
        let rows = vec![day; 7];
        let analysis = analyze(7, &rows, &Nutrients::default(), &defaults());
        let calories = &analysis.findings[0];
        assert!(calories.is_dangerous);
        assert_eq!(
            calories.health_impact.as_deref(),
            Some("Risk of weight gain, obesity")
        );
    }

    #[test]
    fn health_impact_bands_by_percentage_over_otherwise() {
        // 25% over recommended, below the safe limit.
        let mut day = Thresholds::default().recommended;
        day.calories = 2500;
        let rows = vec![day; 7];
        let analysis = analyze(7, &rows, &Nutrients::default(), &defaults());
        let calories = &analysis.findings[0];
        assert!(!calories.is_dangerous);
        assert_eq!(
            calories.health_impact.as_deref(),
            Some("Moderately high, adjust intake")
        );

        // At or under recommended: no impact text at all.
        let vitamin_d = analysis
            .findings
            .iter()
            .find(|f| f.nutrient == Nutrient::VitaminD)
            .unwrap();
        assert!(vitamin_d.health_impact.is_none());
    }

    #[test]
    fn goal_values_pass_through_for_the_renderer() {
        let goal = Nutrients {
            calories: 1800,
            ..crate::goals::repo::default_goals()
        };
        let analysis = analyze(7, &[], &goal, &defaults());
        assert_eq!(analysis.findings[0].goal, 1800);
    }
}
