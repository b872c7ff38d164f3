//! Client for a remote analyze endpoint
//!
//! Callers that need a suggestion but must not fail when the service is
//! down get a fixed Medium fallback instead of an error.

use lepriorite::{Priority, ScoreInput, ScoreResult};
use std::time::Duration;
use tracing::warn;

use crate::requests::AnalyzeRequest;

/// Reason attached to the fallback suggestion
pub const FALLBACK_REASON: &str = "Priority service unavailable";

/// Confidence attached to the fallback suggestion
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Suggestion returned when the service cannot be reached
pub fn fallback_result() -> ScoreResult {
    ScoreResult {
        suggested_priority: Priority::Medium,
        reason: FALLBACK_REASON.to_string(),
        confidence: FALLBACK_CONFIDENCE,
    }
}

/// HTTP client for `POST /analyze`
#[derive(Debug, Clone)]
pub struct AnalyzerClient {
    base_url: String,
    http: reqwest::Client,
}

impl AnalyzerClient {
    /// Client for the service rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a suggestion, falling back on any failure
    pub async fn analyze(&self, input: &ScoreInput) -> ScoreResult {
        match self.try_analyze(input).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Priority service call failed: {}", e);
                fallback_result()
            }
        }
    }

    /// Request a suggestion, surfacing transport and status errors
    pub async fn try_analyze(&self, input: &ScoreInput) -> Result<ScoreResult, reqwest::Error> {
        self.http
            .post(format!("{}/analyze", self.base_url))
            .json(&AnalyzeRequest::from(input))
            .send()
            .await?
            .error_for_status()?
            .json::<ScoreResult>()
            .await
    }
}
