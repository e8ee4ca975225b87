//! WizardController - orchestrates one application session against the
//! prediction service.
//!
//! The controller owns the session and delegates state transitions to it;
//! `submit` is the only suspension point and performs exactly one service
//! call per invocation. All failure kinds are converted to a single
//! human-readable message for display, and the session returns to the
//! final step with loading cleared so the user can retry.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::prediction::PredictionResponse;
use crate::domain::wizard::{WizardError, WizardSession, WizardStep};
use crate::ports::{PredictionError, PredictionService};

/// Errors surfaced by [`WizardController::submit`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    /// The submission was attempted from an invalid wizard state.
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// The prediction exchange failed; the session is back on the final
    /// step for a retry.
    #[error("{0}")]
    Prediction(#[from] PredictionError),
}

/// Drives one user's wizard session.
pub struct WizardController {
    session: WizardSession,
    service: Arc<dyn PredictionService>,
}

impl WizardController {
    /// Creates a controller with a fresh session.
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            session: WizardSession::new(),
            service,
        }
    }

    /// Read access to the session state.
    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Moves to the next input step.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        self.session.advance()
    }

    /// Moves to the previous input step.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        self.session.retreat()
    }

    /// Applies a raw field update to the draft.
    pub fn update_field(&mut self, name: &str, raw: &str) -> Result<(), WizardError> {
        self.session.update_field(name, raw)
    }

    /// Submits the draft to the prediction service.
    ///
    /// Valid only on the final step with no submission in flight. On
    /// success the session shows the result; on failure it returns to the
    /// final step and the error carries the user-facing message.
    pub async fn submit(&mut self) -> Result<&PredictionResponse, SubmitError> {
        let draft = self.session.begin_submission()?;
        info!("submitting loan application");

        match self.service.predict(&draft).await {
            Ok(response) => {
                info!(loan_id = %response.loan_id, decision = %response.decision, "prediction received");
                Ok(self.session.complete_submission(response)?)
            }
            Err(err) => {
                warn!(error = %err, "prediction failed; returning to the final step");
                self.session.fail_submission()?;
                Err(err.into())
            }
        }
    }

    /// Starts a new application.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        self.session.reset()
    }
}
