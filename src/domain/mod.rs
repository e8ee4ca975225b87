//! Domain layer: the application draft, the wizard state machine, the
//! prediction result types, and the result report view models.

pub mod application;
pub mod prediction;
pub mod report;
pub mod wizard;

pub use application::{
    CreditHistory, Dependents, Education, Gender, LoanApplication, LoanTerm, MaritalStatus,
    PropertyArea, SelfEmployed, LOAN_TERMS, NUMERIC_FIELDS,
};
pub use prediction::{
    FeatureImpact, FeatureValue, PredictionResponse, Recommendation, ScenarioMap, WhatIfScenario,
};
pub use report::ResultReport;
pub use wizard::{WizardError, WizardPhase, WizardSession, WizardStep};
