//! Result report view models.
//!
//! Turns a raw [`PredictionResponse`] into render-ready groupings: a
//! styled decision banner, formatted probability cards, feature impact
//! rows, priority-tiered recommendation cards, and labeled what-if
//! scenario cards. The presenter never mutates, reorders, or filters the
//! source data; ordering is whatever the service returned.

use serde::Serialize;

use super::prediction::{FeatureValue, PredictionResponse};

/// Banner styling variants. There are exactly two; any decision string
/// other than "approved" takes the rejected path rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerStyle {
    Approved,
    Rejected,
}

/// The decision banner shown at the top of the result view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionBanner {
    pub style: BannerStyle,
    /// e.g. "LOAN APPROVED" (uppercased from the raw decision tag).
    pub headline: String,
    pub subtitle: &'static str,
}

/// One probability card: label, formatted value, qualitative caption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityCard {
    pub label: &'static str,
    /// One-decimal percentage, e.g. "71.4%".
    pub display: String,
    pub caption: &'static str,
}

/// The three probability cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilitySummary {
    pub approval: ProbabilityCard,
    pub rejection: ProbabilityCard,
    pub confidence: ProbabilityCard,
}

/// Badge styling for a feature impact direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactBadge {
    Positive,
    Negative,
}

impl ImpactBadge {
    /// The direction glyph rendered next to the magnitude.
    pub fn glyph(&self) -> char {
        match self {
            ImpactBadge::Positive => '↑',
            ImpactBadge::Negative => '↓',
        }
    }
}

/// One row of the feature impact table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImpactRow {
    pub feature: String,
    /// Numeric values at two decimals, textual values passed through.
    pub value_display: String,
    pub badge: ImpactBadge,
    /// Absolute impact at three decimals, e.g. "0.325".
    pub magnitude_display: String,
    pub description: String,
}

/// Emphasis tiers for recommendations. High and medium are the only
/// special-cased priorities; everything else maps to the lowest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityEmphasis {
    High,
    Medium,
    Low,
}

/// One recommendation card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCard {
    pub emphasis: PriorityEmphasis,
    /// Raw priority label from the service.
    pub priority: String,
    pub message: String,
    pub action: String,
    pub category: String,
}

/// The recommendations section, with a heading that follows the decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSection {
    pub heading: &'static str,
    pub cards: Vec<RecommendationCard>,
}

/// One what-if scenario card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioCard {
    /// Scenario key with underscores replaced by spaces.
    pub label: String,
    pub current_display: String,
    pub target_display: String,
    /// One-decimal percentage.
    pub probability_display: String,
    pub impact: String,
}

/// The complete render-ready report for one prediction result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultReport {
    pub application_id: String,
    pub banner: DecisionBanner,
    pub probabilities: ProbabilitySummary,
    pub impacts: Vec<FeatureImpactRow>,
    pub recommendations: RecommendationSection,
    pub scenarios: Vec<ScenarioCard>,
}

impl ResultReport {
    /// Derives the report from a raw response without consuming it.
    pub fn from_response(response: &PredictionResponse) -> Self {
        let approved = response.decision == "approved";

        let banner = DecisionBanner {
            style: if approved {
                BannerStyle::Approved
            } else {
                BannerStyle::Rejected
            },
            headline: format!("LOAN {}", response.decision.to_uppercase()),
            subtitle: if approved {
                "Congratulations! Your application shows strong approval likelihood."
            } else {
                "Your application needs improvement. See recommendations below."
            },
        };

        let probabilities = ProbabilitySummary {
            approval: ProbabilityCard {
                label: "Approval Probability",
                display: format_percentage(response.approval_probability),
                caption: if response.approval_probability > 50.0 {
                    "High confidence"
                } else {
                    "Needs improvement"
                },
            },
            rejection: ProbabilityCard {
                label: "Rejection Probability",
                display: format_percentage(response.rejection_probability),
                caption: if response.rejection_probability < 50.0 {
                    "Low risk"
                } else {
                    "High risk"
                },
            },
            confidence: ProbabilityCard {
                label: "Model Confidence",
                display: format_percentage(response.model_confidence),
                caption: "Prediction reliability",
            },
        };

        let impacts = response
            .feature_impacts
            .iter()
            .map(|impact| FeatureImpactRow {
                feature: impact.feature.clone(),
                value_display: match &impact.value {
                    FeatureValue::Number(n) => format!("{:.2}", n),
                    FeatureValue::Text(s) => s.clone(),
                },
                badge: if impact.direction == "positive" {
                    ImpactBadge::Positive
                } else {
                    ImpactBadge::Negative
                },
                magnitude_display: format!("{:.3}", impact.impact.abs()),
                description: impact.description.clone(),
            })
            .collect();

        let recommendations = RecommendationSection {
            heading: if approved {
                "Ways to Maintain/Improve"
            } else {
                "Priority Action Items"
            },
            cards: response
                .recommendations
                .iter()
                .map(|rec| RecommendationCard {
                    emphasis: match rec.priority.as_str() {
                        "high" => PriorityEmphasis::High,
                        "medium" => PriorityEmphasis::Medium,
                        _ => PriorityEmphasis::Low,
                    },
                    priority: rec.priority.clone(),
                    message: rec.message.clone(),
                    action: rec.action.clone(),
                    category: rec.category.clone(),
                })
                .collect(),
        };

        let scenarios = response
            .what_if_scenarios
            .iter()
            .map(|(key, scenario)| ScenarioCard {
                label: key.replace('_', " "),
                current_display: format_number(scenario.current),
                target_display: format_number(scenario.target),
                probability_display: format_percentage(scenario.new_probability),
                impact: scenario.impact.clone(),
            })
            .collect();

        Self {
            application_id: response.loan_id.clone(),
            banner,
            probabilities,
            impacts,
            recommendations,
            scenarios,
        }
    }
}

fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Plain number display: whole values without a decimal point, anything
/// else with its natural precision.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
