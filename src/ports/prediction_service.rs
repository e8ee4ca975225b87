//! Prediction Service Port - interface to the remote loan prediction
//! service.
//!
//! The port abstracts the single request/response exchange so the wizard
//! controller can be exercised against a mock without a network. One call
//! to [`PredictionService::predict`] corresponds to exactly one network
//! attempt; retries, if any, are the user's responsibility.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::application::LoanApplication;
use crate::domain::prediction::PredictionResponse;

/// Port for the remote prediction service.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Submits one application and returns the parsed prediction, or a
    /// descriptive failure. Never retries.
    async fn predict(
        &self,
        application: &LoanApplication,
    ) -> Result<PredictionResponse, PredictionError>;
}

/// Failure taxonomy for the prediction exchange.
///
/// All three kinds are caught at the submission boundary, converted to a
/// human-readable message via `Display`, and surfaced to the user; the
/// wizard stays on the final step so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// Transport-level failure; no response reached us.
    #[error("network error: {cause}")]
    Network { cause: String },

    /// The service responded with a non-success status. The message is
    /// the extracted `detail` or a synthesized status + truncated-body
    /// string.
    #[error("{message}")]
    Rejected { message: String },

    /// Success status but unparsable body (e.g. a garbled upstream
    /// response from a proxy).
    #[error("malformed response: {message}")]
    Malformed { message: String },
}

impl PredictionError {
    pub fn network(cause: impl Into<String>) -> Self {
        PredictionError::Network { cause: cause.into() }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        PredictionError::Rejected { message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        PredictionError::Malformed { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_displays_the_bare_message() {
        let err = PredictionError::rejected("income too low");
        assert_eq!(err.to_string(), "income too low");
    }

    #[test]
    fn network_and_malformed_are_prefixed() {
        assert_eq!(
            PredictionError::network("connection refused").to_string(),
            "network error: connection refused"
        );
        assert!(PredictionError::malformed("not json")
            .to_string()
            .starts_with("malformed response:"));
    }
}
