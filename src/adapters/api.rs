//! HTTP adapter for the remote prediction service.
//!
//! Performs exactly one `POST {base_url}/api/predict` per call and
//! guarantees the caller never sees a malformed or partially-parsed
//! payload. The response body is always read as text first: failure
//! responses may be HTML or plain text from an intermediary, so assuming
//! well-formed JSON would turn a proxy hiccup into an unactionable error.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::domain::application::LoanApplication;
use crate::domain::prediction::PredictionResponse;
use crate::ports::{PredictionError, PredictionService};

/// How much of a raw body to quote back in synthesized error messages.
const BODY_PREVIEW_CHARS: usize = 100;

/// Prediction service client over HTTP.
pub struct HttpPredictionService {
    base_url: String,
    client: Client,
}

impl HttpPredictionService {
    /// Creates a client from API configuration. The base URL keeps no
    /// trailing slash; the transport timeout comes from configuration.
    pub fn new(config: &ApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: config.normalized_base_url().to_string(),
            client,
        }
    }

    fn predict_url(&self) -> String {
        format!("{}/api/predict", self.base_url)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(
        &self,
        application: &LoanApplication,
    ) -> Result<PredictionResponse, PredictionError> {
        let url = self.predict_url();
        debug!(%url, "submitting loan application");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(application)
            .send()
            .await
            .map_err(|err| {
                warn!(%url, error = %err, "prediction request failed to reach the service");
                PredictionError::network(err.to_string())
            })?;

        let status = response.status();

        // Read the body as text unconditionally; only then decide how to
        // interpret it.
        let body = response
            .text()
            .await
            .map_err(|err| PredictionError::network(err.to_string()))?;

        if !status.is_success() {
            let message = rejection_message(status.as_u16(), &body);
            warn!(status = status.as_u16(), %message, "prediction request rejected");
            return Err(PredictionError::rejected(message));
        }

        serde_json::from_str(&body).map_err(|err| {
            warn!(error = %err, "prediction response was not parsable");
            PredictionError::malformed(format!(
                "response body was not valid JSON: {}",
                truncate(&body)
            ))
        })
    }
}

/// Error body shape for well-behaved rejections.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Extracts the `detail` message from a failure body, falling back to a
/// synthesized status + truncated-body message when the body is not the
/// expected JSON shape.
fn rejection_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { detail: Some(detail) }) => detail,
        _ => format!(
            "request failed with status {}: {}",
            status,
            truncate(body)
        ),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
