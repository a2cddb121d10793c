//! Effect handlers for the runtimes.
//!
//! Handlers are pure async functions that return a `UiEvent`. They perform
//! the slow work and never touch state; the runtime spawns them and feeds
//! the result back through the reducer.

use rdash_core::auth::AdminAuthority;
use rdash_core::review::{MockReviewClient, ReviewRequest};
use tokio_util::sync::CancellationToken;

use crate::events::UiEvent;

pub async fn verify_admin(authority: &AdminAuthority, password: &str) -> UiEvent {
    UiEvent::AdminVerified(authority.verify(password).await)
}

pub async fn run_review(
    client: &MockReviewClient,
    request: &ReviewRequest,
    cancel: &CancellationToken,
) -> UiEvent {
    UiEvent::ReviewFinished(client.request_review(request, cancel).await)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rdash_core::auth::hash_password;
    use rdash_core::review::ReviewError;
    use rdash_core::seed;

    use super::*;

    #[tokio::test]
    async fn test_verify_admin_wraps_verdict() {
        let authority = AdminAuthority::new(hash_password("demodemo"));
        let event = verify_admin(&authority, "demodemo").await;
        assert!(matches!(event, UiEvent::AdminVerified(Ok(_))));
        let event = verify_admin(&authority, "nope").await;
        assert!(matches!(event, UiEvent::AdminVerified(Err(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_review_reports_cancellation() {
        let client = MockReviewClient::new(Duration::from_secs(2), seed::rng_from(Some(1)));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let event = run_review(&client, &ReviewRequest::default(), &cancel).await;
        assert!(matches!(
            event,
            UiEvent::ReviewFinished(Err(ReviewError::Cancelled))
        ));
    }
}
