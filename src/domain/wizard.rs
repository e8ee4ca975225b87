//! Wizard session state machine.
//!
//! The session is the single owned, exclusively-mutated state container
//! for one application flow: the current phase, the accumulated draft, and
//! the optional prediction result. The phase enum structurally enforces
//! the single-in-flight-request invariant; only the final collecting step
//! accepts a submission, and nothing else can start one while a submission
//! is loading.
//!
//! ```text
//! Step1 <-> Step2 <-> Step3 <-> Step4 --submit--> Loading --ok--> ResultShown
//!                                 ^                  |                |
//!                                 +------failure-----+     reset     |
//! Step1 <----------------------------------------------------------+
//! ```

use thiserror::Error;

use super::application::LoanApplication;
use super::prediction::PredictionResponse;

/// The four ordered input stages of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    PersonalInfo,
    Employment,
    LoanDetails,
    CreditProperty,
}

impl WizardStep {
    /// All steps in wizard order.
    pub const ALL: [WizardStep; 4] = [
        WizardStep::PersonalInfo,
        WizardStep::Employment,
        WizardStep::LoanDetails,
        WizardStep::CreditProperty,
    ];

    /// One-based step number, 1..=4.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::PersonalInfo => 1,
            WizardStep::Employment => 2,
            WizardStep::LoanDetails => 3,
            WizardStep::CreditProperty => 4,
        }
    }

    /// Human-readable step title.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::PersonalInfo => "Personal Information",
            WizardStep::Employment => "Employment & Income",
            WizardStep::LoanDetails => "Loan Details",
            WizardStep::CreditProperty => "Credit & Property",
        }
    }

    /// The following step, if any.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::PersonalInfo => Some(WizardStep::Employment),
            WizardStep::Employment => Some(WizardStep::LoanDetails),
            WizardStep::LoanDetails => Some(WizardStep::CreditProperty),
            WizardStep::CreditProperty => None,
        }
    }

    /// The preceding step, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::PersonalInfo => None,
            WizardStep::Employment => Some(WizardStep::PersonalInfo),
            WizardStep::LoanDetails => Some(WizardStep::Employment),
            WizardStep::CreditProperty => Some(WizardStep::LoanDetails),
        }
    }

    /// True for the submission step.
    pub fn is_final(&self) -> bool {
        self.next().is_none()
    }
}

/// The session phase. Exactly one of collecting, loading, or result-shown
/// holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    /// Mid-wizard on the given step.
    Collecting(WizardStep),
    /// A submission is in flight; no other operation is accepted.
    Loading,
    /// A prediction result is available for rendering.
    ResultShown,
}

/// Errors for operations invalid in the current wizard state. These are
/// programming/integration defects, not user-facing conditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("cannot advance from step {step}")]
    CannotAdvance { step: u8 },

    #[error("cannot retreat from step {step}")]
    CannotRetreat { step: u8 },

    #[error("unknown application field '{name}'")]
    UnknownField { name: String },

    #[error("invalid value '{raw}' for field '{field}'")]
    InvalidValue { field: &'static str, raw: String },

    #[error("submit is only available on the final step")]
    SubmitUnavailable,

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("cannot {operation} after a result is shown")]
    ResultAlreadyShown { operation: &'static str },

    #[error("no submission in flight")]
    NoSubmissionInFlight,
}

/// One user's application session: phase, draft, and optional result.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSession {
    phase: WizardPhase,
    draft: LoanApplication,
    result: Option<PredictionResponse>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    /// Starts a fresh session on step 1 with a default draft.
    pub fn new() -> Self {
        Self {
            phase: WizardPhase::Collecting(WizardStep::PersonalInfo),
            draft: LoanApplication::default(),
            result: None,
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// The current input step, if mid-wizard.
    pub fn current_step(&self) -> Option<WizardStep> {
        match self.phase {
            WizardPhase::Collecting(step) => Some(step),
            _ => None,
        }
    }

    pub fn draft(&self) -> &LoanApplication {
        &self.draft
    }

    pub fn result(&self) -> Option<&PredictionResponse> {
        self.result.as_ref()
    }

    /// Moves to the next step. Valid only from steps 1-3.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.phase {
            WizardPhase::Collecting(step) => match step.next() {
                Some(next) => {
                    self.phase = WizardPhase::Collecting(next);
                    Ok(next)
                }
                None => Err(WizardError::CannotAdvance { step: step.number() }),
            },
            WizardPhase::Loading => Err(WizardError::SubmissionInFlight),
            WizardPhase::ResultShown => Err(WizardError::ResultAlreadyShown {
                operation: "advance",
            }),
        }
    }

    /// Moves to the previous step. Valid only from steps 2-4. Already
    /// entered values are never discarded.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        match self.phase {
            WizardPhase::Collecting(step) => match step.previous() {
                Some(previous) => {
                    self.phase = WizardPhase::Collecting(previous);
                    Ok(previous)
                }
                None => Err(WizardError::CannotRetreat { step: step.number() }),
            },
            WizardPhase::Loading => Err(WizardError::SubmissionInFlight),
            WizardPhase::ResultShown => Err(WizardError::ResultAlreadyShown {
                operation: "retreat",
            }),
        }
    }

    /// Applies a raw field update to the draft. Valid only mid-wizard.
    pub fn update_field(&mut self, name: &str, raw: &str) -> Result<(), WizardError> {
        match self.phase {
            WizardPhase::Collecting(_) => self.draft.set_field(name, raw),
            WizardPhase::Loading => Err(WizardError::SubmissionInFlight),
            WizardPhase::ResultShown => Err(WizardError::ResultAlreadyShown {
                operation: "update a field",
            }),
        }
    }

    /// Enters the loading phase and hands out the draft to submit. Valid
    /// only on the final step; this is the structural guard that keeps at
    /// most one request in flight per session.
    pub fn begin_submission(&mut self) -> Result<LoanApplication, WizardError> {
        match self.phase {
            WizardPhase::Collecting(step) if step.is_final() => {
                self.phase = WizardPhase::Loading;
                Ok(self.draft.clone())
            }
            WizardPhase::Collecting(_) => Err(WizardError::SubmitUnavailable),
            WizardPhase::Loading => Err(WizardError::SubmissionInFlight),
            WizardPhase::ResultShown => Err(WizardError::ResultAlreadyShown {
                operation: "submit",
            }),
        }
    }

    /// Stores the prediction result and shows it. Valid only while
    /// loading.
    pub fn complete_submission(
        &mut self,
        response: PredictionResponse,
    ) -> Result<&PredictionResponse, WizardError> {
        match self.phase {
            WizardPhase::Loading => {
                self.phase = WizardPhase::ResultShown;
                Ok(&*self.result.insert(response))
            }
            _ => Err(WizardError::NoSubmissionInFlight),
        }
    }

    /// Returns to the final input step after a failed submission, keeping
    /// every entered value so the user can retry.
    pub fn fail_submission(&mut self) -> Result<(), WizardError> {
        match self.phase {
            WizardPhase::Loading => {
                self.phase = WizardPhase::Collecting(WizardStep::CreditProperty);
                Ok(())
            }
            _ => Err(WizardError::NoSubmissionInFlight),
        }
    }

    /// Starts a new application: clears the result and restores the
    /// default draft on step 1. Not available while a submission is in
    /// flight (there is no cancellation path).
    pub fn reset(&mut self) -> Result<(), WizardError> {
        if self.phase == WizardPhase::Loading {
            return Err(WizardError::SubmissionInFlight);
        }
        *self = Self::new();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::approved_fixture;

    #[test]
    fn new_session_starts_on_step_one_with_default_draft() {
        let session = WizardSession::new();
        assert_eq!(session.current_step(), Some(WizardStep::PersonalInfo));
        assert_eq!(session.draft(), &LoanApplication::default());
        assert!(session.result().is_none());
    }

    #[test]
    fn advance_walks_all_four_steps_in_order() {
        let mut session = WizardSession::new();
        assert_eq!(session.advance(), Ok(WizardStep::Employment));
        assert_eq!(session.advance(), Ok(WizardStep::LoanDetails));
        assert_eq!(session.advance(), Ok(WizardStep::CreditProperty));
    }

    #[test]
    fn advance_is_rejected_on_the_final_step() {
        let mut session = WizardSession::new();
        for _ in 0..3 {
            session.advance().unwrap();
        }
        assert_eq!(session.advance(), Err(WizardError::CannotAdvance { step: 4 }));
        assert_eq!(session.current_step(), Some(WizardStep::CreditProperty));
    }

    #[test]
    fn retreat_is_rejected_on_the_first_step() {
        let mut session = WizardSession::new();
        assert_eq!(session.retreat(), Err(WizardError::CannotRetreat { step: 1 }));
        assert_eq!(session.current_step(), Some(WizardStep::PersonalInfo));
    }

    #[test]
    fn retreat_keeps_entered_values() {
        let mut session = WizardSession::new();
        session.advance().unwrap();
        session.update_field("ApplicantIncome", "9000").unwrap();
        session.retreat().unwrap();
        assert_eq!(session.draft().applicant_income, 9000.0);
    }

    #[test]
    fn submission_is_only_available_on_the_final_step() {
        let mut session = WizardSession::new();
        assert_eq!(session.begin_submission(), Err(WizardError::SubmitUnavailable));

        for _ in 0..3 {
            session.advance().unwrap();
        }
        let draft = session.begin_submission().unwrap();
        assert_eq!(draft, LoanApplication::default());
        assert_eq!(session.phase(), WizardPhase::Loading);
    }

    #[test]
    fn loading_phase_blocks_every_other_operation() {
        let mut session = WizardSession::new();
        for _ in 0..3 {
            session.advance().unwrap();
        }
        session.begin_submission().unwrap();

        assert_eq!(session.advance(), Err(WizardError::SubmissionInFlight));
        assert_eq!(session.retreat(), Err(WizardError::SubmissionInFlight));
        assert_eq!(
            session.update_field("LoanAmount", "200"),
            Err(WizardError::SubmissionInFlight)
        );
        assert_eq!(session.begin_submission(), Err(WizardError::SubmissionInFlight));
        assert_eq!(session.reset(), Err(WizardError::SubmissionInFlight));
    }

    #[test]
    fn failed_submission_returns_to_the_final_step() {
        let mut session = WizardSession::new();
        for _ in 0..3 {
            session.advance().unwrap();
        }
        session.update_field("LoanAmount", "275").unwrap();
        session.begin_submission().unwrap();
        session.fail_submission().unwrap();

        assert_eq!(session.current_step(), Some(WizardStep::CreditProperty));
        // Draft kept for retry
        assert_eq!(session.draft().loan_amount, 275.0);
        assert!(session.result().is_none());
    }

    #[test]
    fn successful_submission_shows_the_result() {
        let mut session = WizardSession::new();
        for _ in 0..3 {
            session.advance().unwrap();
        }
        session.begin_submission().unwrap();
        session.complete_submission(approved_fixture()).unwrap();

        assert_eq!(session.phase(), WizardPhase::ResultShown);
        assert!(session.result().is_some());
    }

    #[test]
    fn completion_outside_loading_is_rejected() {
        let mut session = WizardSession::new();
        assert_eq!(
            session.complete_submission(approved_fixture()),
            Err(WizardError::NoSubmissionInFlight)
        );
        assert_eq!(session.fail_submission(), Err(WizardError::NoSubmissionInFlight));
    }

    #[test]
    fn reset_restores_a_fresh_session() {
        let mut session = WizardSession::new();
        session.update_field("Gender", "Female").unwrap();
        for _ in 0..3 {
            session.advance().unwrap();
        }
        session.begin_submission().unwrap();
        session.complete_submission(approved_fixture()).unwrap();

        session.reset().unwrap();
        assert_eq!(session.current_step(), Some(WizardStep::PersonalInfo));
        assert_eq!(session.draft(), &LoanApplication::default());
        assert!(session.result().is_none());
    }

    #[test]
    fn step_numbers_and_titles_line_up() {
        let numbers: Vec<u8> = WizardStep::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(WizardStep::PersonalInfo.title(), "Personal Information");
        assert!(WizardStep::CreditProperty.is_final());
        assert!(!WizardStep::LoanDetails.is_final());
    }
}
