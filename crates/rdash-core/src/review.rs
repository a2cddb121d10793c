//! Mock AI review service.
//!
//! Every call waits a fixed latency, then draws one of four outcomes with
//! equal probability. Nothing is sent over the network.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub const REVIEW_RESULT_TEXT: &str = "Code review results will be shown here...";

/// Failure categories reported by the review service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewErrorKind {
    SystemError,
    NoToken,
    InvalidToken,
    /// Any code the client does not recognize.
    Unknown,
}

impl ReviewErrorKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "SYSTEM_ERROR" => ReviewErrorKind::SystemError,
            "NO_TOKEN" => ReviewErrorKind::NoToken,
            "INVALID_TOKEN" => ReviewErrorKind::InvalidToken,
            _ => ReviewErrorKind::Unknown,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ReviewErrorKind::SystemError => "SYSTEM_ERROR",
            ReviewErrorKind::NoToken => "NO_TOKEN",
            ReviewErrorKind::InvalidToken => "INVALID_TOKEN",
            ReviewErrorKind::Unknown => "UNKNOWN",
        }
    }

    /// Message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            ReviewErrorKind::SystemError => {
                "The code review system ran into a problem. Please try again later."
            }
            ReviewErrorKind::NoToken => {
                "This project needs an onboarding request. Please submit the request form first."
            }
            ReviewErrorKind::InvalidToken => {
                "The BitBucket token is invalid. Please contact an administrator."
            }
            ReviewErrorKind::Unknown => "An unknown error occurred.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("{}", .0.message())]
    Service(ReviewErrorKind),
    #[error("review cancelled")]
    Cancelled,
}

/// Response envelope of the review endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockApiResponse {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl MockApiResponse {
    fn failure(kind: ReviewErrorKind) -> Self {
        Self {
            error: true,
            error_type: Some(kind.code().to_string()),
            result: None,
        }
    }

    fn success(result: &str) -> Self {
        Self {
            error: false,
            error_type: None,
            result: Some(result.to_string()),
        }
    }

    /// # Errors
    /// Returns [`ReviewError::Service`] when the envelope flags an error.
    pub fn into_result(self) -> Result<String, ReviewError> {
        if self.error {
            let kind = self
                .error_type
                .as_deref()
                .map_or(ReviewErrorKind::Unknown, ReviewErrorKind::from_code);
            return Err(ReviewError::Service(kind));
        }
        Ok(self.result.unwrap_or_default())
    }
}

/// Maps a uniform sample in `[0, 1)` onto a response.
///
/// Quarters map, in order, to system error, missing token, invalid token and
/// success.
pub fn outcome_for(sample: f64) -> MockApiResponse {
    if sample < 0.25 {
        MockApiResponse::failure(ReviewErrorKind::SystemError)
    } else if sample < 0.5 {
        MockApiResponse::failure(ReviewErrorKind::NoToken)
    } else if sample < 0.75 {
        MockApiResponse::failure(ReviewErrorKind::InvalidToken)
    } else {
        MockApiResponse::success(REVIEW_RESULT_TEXT)
    }
}

/// What the user asked to have reviewed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub pull_request_url: String,
    pub prompt: String,
}

/// In-process stand-in for the review backend.
#[derive(Debug)]
pub struct MockReviewClient {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl MockReviewClient {
    pub fn new(delay: Duration, rng: StdRng) -> Self {
        Self {
            delay,
            rng: Mutex::new(rng),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn sample(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0.0..1.0)
    }

    /// Waits the configured latency, then returns one sampled outcome.
    ///
    /// # Errors
    /// Returns [`ReviewError::Cancelled`] if `cancel` fires before the
    /// latency elapses (no outcome is drawn), or the sampled service error.
    pub async fn request_review(
        &self,
        request: &ReviewRequest,
        cancel: &CancellationToken,
    ) -> Result<String, ReviewError> {
        tracing::debug!(
            pull_request_url = %request.pull_request_url,
            prompt_len = request.prompt.len(),
            "review requested"
        );

        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("review cancelled before completion");
                Err(ReviewError::Cancelled)
            }
            () = tokio::time::sleep(self.delay) => {
                outcome_for(self.sample()).into_result()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(
            outcome_for(0.0).into_result(),
            Err(ReviewError::Service(ReviewErrorKind::SystemError))
        );
        assert_eq!(
            outcome_for(0.25).into_result(),
            Err(ReviewError::Service(ReviewErrorKind::NoToken))
        );
        assert_eq!(
            outcome_for(0.5).into_result(),
            Err(ReviewError::Service(ReviewErrorKind::InvalidToken))
        );
        assert_eq!(
            outcome_for(0.75).into_result(),
            Ok(REVIEW_RESULT_TEXT.to_string())
        );
        assert_eq!(
            outcome_for(0.999).into_result(),
            Ok(REVIEW_RESULT_TEXT.to_string())
        );
    }

    #[test]
    fn test_unknown_code_uses_fallback_message() {
        let response = MockApiResponse {
            error: true,
            error_type: Some("RATE_LIMITED".into()),
            result: None,
        };
        let err = response.into_result().unwrap_err();
        assert_eq!(err, ReviewError::Service(ReviewErrorKind::Unknown));
        assert_eq!(err.to_string(), "An unknown error occurred.");
    }

    #[test]
    fn test_envelope_wire_format() {
        let json = serde_json::to_value(outcome_for(0.3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": true, "errorType": "NO_TOKEN"})
        );
    }

    #[test]
    fn test_outcome_distribution() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 4];
        let draws = 10_000;
        for _ in 0..draws {
            let idx = match outcome_for(rng.gen_range(0.0..1.0)).into_result() {
                Err(ReviewError::Service(ReviewErrorKind::SystemError)) => 0,
                Err(ReviewError::Service(ReviewErrorKind::NoToken)) => 1,
                Err(ReviewError::Service(ReviewErrorKind::InvalidToken)) => 2,
                Ok(_) => 3,
                Err(other) => panic!("unexpected outcome {other:?}"),
            };
            counts[idx] += 1;
        }
        for count in counts {
            let share = count as f64 / draws as f64;
            assert!((share - 0.25).abs() < 0.05, "share {share} outside 25% +/- 5%");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_waits_delay() {
        let client = MockReviewClient::new(Duration::from_millis(1000), StdRng::seed_from_u64(1));
        let started = tokio::time::Instant::now();
        let result = client
            .request_review(&ReviewRequest::default(), &CancellationToken::new())
            .await;
        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_ne!(result, Err(ReviewError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_delay() {
        let client = MockReviewClient::new(Duration::from_secs(5), StdRng::seed_from_u64(1));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });
        let result = client
            .request_review(&ReviewRequest::default(), &cancel)
            .await;
        assert_eq!(result, Err(ReviewError::Cancelled));
    }
}
