//! `rdash stats`: summary of the seeded statistics.

use chrono::Utc;
use comfy_table::{ContentArrangement, Table};
use rdash_core::config::Config;
use rdash_core::seed::{self, MockData};
use rdash_core::stats::{NamedCount, StatsSnapshot};

pub fn run(config: &Config) {
    let mut rng = seed::rng_from(config.mock.seed);
    let now = Utc::now();
    // Same draw order as the dashboard, so a fixed seed shows the same numbers.
    let _ = MockData::generate(&mut rng, now);
    let stats = StatsSnapshot::generate(&mut rng, now);

    let mut summary = Table::new();
    summary.set_content_arrangement(ContentArrangement::Dynamic);
    summary.set_header(vec!["Metric", "Value"]);
    summary.add_row(vec!["Total reviews".to_string(), stats.total_reviews.to_string()]);
    summary.add_row(vec!["Projects".to_string(), stats.total_projects.to_string()]);
    summary.add_row(vec!["Active users".to_string(), stats.active_users.to_string()]);
    for metric in &stats.metrics {
        summary.add_row(vec![metric.name.clone(), metric.value.clone()]);
    }
    println!("{summary}");

    println!("{}", shares_table("Project status", &stats.project_status));
    println!("{}", shares_table("Language", &stats.languages));

    let mut reviewers = Table::new();
    reviewers.set_content_arrangement(ContentArrangement::Dynamic);
    reviewers.set_header(vec!["Reviewer", "Reviews", "Comments", "Approvals"]);
    for r in &stats.reviewers {
        reviewers.add_row(vec![
            r.name.clone(),
            r.reviews.to_string(),
            r.comments.to_string(),
            r.approvals.to_string(),
        ]);
    }
    println!("{reviewers}");
}

fn shares_table(title: &str, counts: &[NamedCount]) -> Table {
    let total: u32 = counts.iter().map(|c| c.value).sum();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![title, "Count", "Share"]);
    for c in counts {
        let share = if total == 0 {
            0.0
        } else {
            f64::from(c.value) * 100.0 / f64::from(total)
        };
        table.add_row(vec![
            c.name.clone(),
            c.value.to_string(),
            format!("{share:.0}%"),
        ]);
    }
    table
}
