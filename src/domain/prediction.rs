//! Prediction service response types.
//!
//! These mirror the JSON payload returned by the remote prediction
//! service. The client deserializes the payload once and performs no
//! further structural validation; field presence and ranges are trusted to
//! the service.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Full prediction result for one submitted application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Service-minted application identifier (e.g. "LP042917").
    pub loan_id: String,
    /// Approval probability, 0-100.
    pub approval_probability: f64,
    /// Rejection probability, 0-100. Reported independently of the
    /// approval probability; the two are not required to sum to 100.
    pub rejection_probability: f64,
    /// Model confidence, 0-100.
    pub model_confidence: f64,
    /// Decision tag; "approved" or "rejected".
    pub decision: String,
    /// Per-feature impact analysis, in service order.
    pub feature_impacts: Vec<FeatureImpact>,
    /// Personalized recommendations, in service order.
    pub recommendations: Vec<Recommendation>,
    /// What-if scenarios keyed by scenario name, in service order.
    pub what_if_scenarios: ScenarioMap,
}

/// How one input feature contributed to the prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub feature: String,
    pub value: FeatureValue,
    /// Signed impact magnitude.
    pub impact: f64,
    /// "positive" or "negative".
    pub direction: String,
    pub description: String,
}

/// A feature value as reported by the service: numeric for engineered or
/// encoded features, textual for raw categoricals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Text(String),
}

/// A personalized recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    /// "high", "medium", or "low".
    pub priority: String,
    pub message: String,
    pub action: String,
}

/// One what-if scenario: what the probability becomes if the applicant
/// moves a value from `current` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfScenario {
    pub current: f64,
    pub target: f64,
    pub new_probability: f64,
    /// Qualitative impact label (e.g. "+25%").
    pub impact: String,
}

/// Insertion-ordered map of scenario key to scenario.
///
/// The service controls scenario ordering, so a plain `HashMap` would lose
/// information the UI relies on. Entries deserialize in the order they
/// appear in the JSON object and serialize back in the same order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioMap(Vec<(String, WhatIfScenario)>);

impl ScenarioMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from pre-ordered entries.
    pub fn from_entries(entries: Vec<(String, WhatIfScenario)>) -> Self {
        Self(entries)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WhatIfScenario)> {
        self.0.iter().map(|(key, scenario)| (key.as_str(), scenario))
    }

    /// Looks up a scenario by key.
    pub fn get(&self, key: &str) -> Option<&WhatIfScenario> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, scenario)| scenario)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ScenarioMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, scenario) in &self.0 {
            map.serialize_entry(key, scenario)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScenarioMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScenarioMapVisitor;

        impl<'de> Visitor<'de> for ScenarioMapVisitor {
            type Value = ScenarioMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of scenario key to what-if scenario")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, scenario)) = access.next_entry()? {
                    entries.push((key, scenario));
                }
                Ok(ScenarioMap(entries))
            }
        }

        deserializer.deserialize_map(ScenarioMapVisitor)
    }
}
