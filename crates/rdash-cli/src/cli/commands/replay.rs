//! `rdash replay`: drive the dashboard store from a JSON-lines script.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rdash_core::auth::AdminAuthority;
use rdash_core::config::Config;
use rdash_core::review::MockReviewClient;
use rdash_core::seed;
use rdash_tui::HeadlessRuntime;

pub async fn run(script_path: &Path, config: &Config) -> Result<()> {
    let script = fs::read_to_string(script_path)
        .with_context(|| format!("read script {}", script_path.display()))?;

    let mut runtime = HeadlessRuntime::new(
        AdminAuthority::from_config(config),
        MockReviewClient::new(config.review_delay(), seed::rng_from(config.mock.seed)),
    );
    runtime
        .run_script(&script)
        .await
        .with_context(|| format!("replay {}", script_path.display()))?;

    let state =
        serde_json::to_string_pretty(&runtime.state).context("serialize dashboard state")?;
    println!("{state}");
    if runtime.skipped > 0 {
        eprintln!("Skipped {} unknown or malformed action(s)", runtime.skipped);
    }
    Ok(())
}
