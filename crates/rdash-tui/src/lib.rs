//! Full-screen dashboard for the code review access system.

pub mod common;
pub mod dashboard;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod tabs;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use chrono::Utc;
use rdash_core::config::Config;
use rdash_core::review::MockReviewClient;
use rdash_core::seed::{self, MockData};
use rdash_core::stats::StatsSnapshot;
pub use runtime::TuiRuntime;
pub use runtime::headless::HeadlessRuntime;

/// Builds the mock data and runs the dashboard until the user quits.
///
/// # Errors
/// Fails without a terminal or if the terminal cannot be driven.
pub fn run_dashboard(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `rdash replay <script>` to drive it without one."
        );
    }

    let mut rng = seed::rng_from(config.mock.seed);
    let now = Utc::now();
    let data = MockData::generate(&mut rng, now);
    let stats = StatsSnapshot::generate(&mut rng, now);
    let client = MockReviewClient::new(config.review_delay(), rng);
    tracing::info!(
        tokens = data.tokens.len(),
        requests = data.requests.len(),
        projects = data.projects.len(),
        "starting dashboard"
    );

    let mut runtime = TuiRuntime::new(config.clone(), data, stats, client)?;
    runtime.run()?;

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
