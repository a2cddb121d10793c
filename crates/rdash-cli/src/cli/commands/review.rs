//! `rdash review`: one mock review from the command line.

use anyhow::Result;
use rdash_core::config::Config;
use rdash_core::review::{MockReviewClient, ReviewRequest};
use rdash_core::seed;
use tokio_util::sync::CancellationToken;

pub async fn run(pull_request_url: String, prompt: String, config: &Config) -> Result<()> {
    let client = MockReviewClient::new(config.review_delay(), seed::rng_from(config.mock.seed));
    let request = ReviewRequest {
        pull_request_url,
        prompt,
    };
    let cancel = CancellationToken::new();

    match client.request_review(&request, &cancel).await {
        Ok(result) => {
            println!("{result}");
            Ok(())
        }
        Err(err) => anyhow::bail!("{err}"),
    }
}
