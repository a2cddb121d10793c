//! `rdash migrate`: convert legacy project exports to the current shape.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rdash_core::project::{self, LegacyProject};

pub fn run(input: &Path) -> Result<()> {
    let contents =
        fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?;
    let records: Vec<LegacyProject> = serde_json::from_str(&contents)
        .with_context(|| format!("parse legacy projects from {}", input.display()))?;

    let count = records.len();
    let projects = project::migrate_all(records)?;
    let json = serde_json::to_string_pretty(&projects).context("serialize projects")?;
    println!("{json}");
    tracing::info!(count, "migrated legacy projects");
    Ok(())
}
