//! Mock prediction service for testing.
//!
//! Configurable to return queued responses or errors without a network,
//! and records every submitted application for verification.
//!
//! # Example
//!
//! ```ignore
//! let service = MockPredictionService::new()
//!     .with_response(approved_fixture());
//!
//! let response = service.predict(&LoanApplication::default()).await?;
//! assert_eq!(response.decision, "approved");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::application::LoanApplication;
use crate::domain::prediction::{
    FeatureImpact, FeatureValue, PredictionResponse, Recommendation, ScenarioMap, WhatIfScenario,
};
use crate::ports::{PredictionError, PredictionService};

/// Mock prediction service.
///
/// Queued results are consumed in order; once the queue is empty every
/// call returns the approved fixture.
#[derive(Debug, Clone, Default)]
pub struct MockPredictionService {
    results: Arc<Mutex<VecDeque<Result<PredictionResponse, PredictionError>>>>,
    calls: Arc<Mutex<Vec<LoanApplication>>>,
}

impl MockPredictionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, response: PredictionResponse) -> Self {
        self.results.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: PredictionError) -> Self {
        self.results.lock().unwrap().push_back(Err(error));
        self
    }

    /// Applications submitted so far, in call order.
    pub fn calls(&self) -> Vec<LoanApplication> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of predict calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PredictionService for MockPredictionService {
    async fn predict(
        &self,
        application: &LoanApplication,
    ) -> Result<PredictionResponse, PredictionError> {
        self.calls.lock().unwrap().push(application.clone());

        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(approved_fixture()))
    }
}

/// A realistic approved response, shaped like the live service's output
/// for the default draft.
pub fn approved_fixture() -> PredictionResponse {
    PredictionResponse {
        loan_id: "LP042917".to_string(),
        approval_probability: 71.4,
        rejection_probability: 28.6,
        model_confidence: 71.4,
        decision: "approved".to_string(),
        feature_impacts: vec![
            FeatureImpact {
                feature: "Credit_History".to_string(),
                value: FeatureValue::Number(1.0),
                impact: 0.325,
                direction: "positive".to_string(),
                description: "Credit history is a strong indicator of loan repayment reliability"
                    .to_string(),
            },
            FeatureImpact {
                feature: "TotalIncome".to_string(),
                value: FeatureValue::Number(5000.0),
                impact: 0.198,
                direction: "positive".to_string(),
                description: "Combined income affects loan repayment capacity".to_string(),
            },
            FeatureImpact {
                feature: "LoanAmount".to_string(),
                value: FeatureValue::Number(150.0),
                impact: -0.112,
                direction: "negative".to_string(),
                description: "Loan amount relative to income impacts approval".to_string(),
            },
        ],
        recommendations: vec![
            Recommendation {
                category: "credit".to_string(),
                priority: "high".to_string(),
                message: "Maintain excellent credit history".to_string(),
                action: "Continue making timely payments on all debts to preserve your good standing"
                    .to_string(),
            },
            Recommendation {
                category: "financial".to_string(),
                priority: "low".to_string(),
                message: "Consider loan insurance".to_string(),
                action: "Protect your loan with insurance to cover unexpected events".to_string(),
            },
        ],
        what_if_scenarios: ScenarioMap::from_entries(vec![
            (
                "increase_coapplicant_income".to_string(),
                WhatIfScenario {
                    current: 0.0,
                    target: 2500.0,
                    new_probability: 79.4,
                    impact: "+8%".to_string(),
                },
            ),
            (
                "reduce_loan_amount".to_string(),
                WhatIfScenario {
                    current: 150.0,
                    target: 112.5,
                    new_probability: 77.4,
                    impact: "+6%".to_string(),
                },
            ),
        ]),
    }
}

/// A realistic rejected response for an applicant with bad credit.
pub fn rejected_fixture() -> PredictionResponse {
    PredictionResponse {
        loan_id: "LP118204".to_string(),
        approval_probability: 23.9,
        rejection_probability: 76.1,
        model_confidence: 76.1,
        decision: "rejected".to_string(),
        feature_impacts: vec![FeatureImpact {
            feature: "Credit_History".to_string(),
            value: FeatureValue::Number(0.0),
            impact: -0.325,
            direction: "negative".to_string(),
            description: "Credit history is a strong indicator of loan repayment reliability"
                .to_string(),
        }],
        recommendations: vec![
            Recommendation {
                category: "credit".to_string(),
                priority: "high".to_string(),
                message: "Improve credit history immediately".to_string(),
                action: "Pay all outstanding debts and maintain 6+ months of clean credit history"
                    .to_string(),
            },
            Recommendation {
                category: "income".to_string(),
                priority: "medium".to_string(),
                message: "Add a coapplicant to strengthen application".to_string(),
                action: "Including a coapplicant with stable income can significantly improve approval chances"
                    .to_string(),
            },
        ],
        what_if_scenarios: ScenarioMap::from_entries(vec![(
            "improve_credit_history".to_string(),
            WhatIfScenario {
                current: 0.0,
                target: 1.0,
                new_probability: 48.9,
                impact: "+25%".to_string(),
            },
        )]),
    }
}
