//! Usage statistics shown on the admin statistics tab.

use chrono::{DateTime, Duration, Months, Utc};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyUsage {
    pub date: String,
    pub reviews: u32,
    pub projects: u32,
    pub comments: u32,
    pub approvals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub reviews: u32,
    pub users: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyReviews {
    pub hour: u8,
    pub reviews: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerStats {
    pub name: String,
    pub reviews: u32,
    pub comments: u32,
    pub approvals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewMetric {
    pub name: String,
    pub value: String,
}

/// Monthly review counts per language, in [`LANGUAGES`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageTrend {
    pub month: String,
    pub counts: Vec<u32>,
}

pub const LANGUAGES: [&str; 5] = ["JavaScript", "TypeScript", "Python", "Java", "Go"];

const BUSINESS_HOURS: std::ops::RangeInclusive<u8> = 9..=18;

/// One generated set of statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub daily: Vec<DailyUsage>,
    pub project_status: Vec<NamedCount>,
    pub top_projects: Vec<NamedCount>,
    pub monthly_trend: Vec<MonthlyTrend>,
    pub hourly: Vec<HourlyReviews>,
    pub languages: Vec<NamedCount>,
    pub reviewers: Vec<ReviewerStats>,
    pub metrics: Vec<ReviewMetric>,
    pub language_trend: Vec<LanguageTrend>,
    pub review_sizes: Vec<NamedCount>,
    pub total_reviews: u32,
    pub total_projects: u32,
    pub active_users: u32,
}

fn named(pairs: &[(&str, u32)]) -> Vec<NamedCount> {
    pairs
        .iter()
        .map(|(name, value)| NamedCount {
            name: (*name).to_string(),
            value: *value,
        })
        .collect()
}

/// Short month label `k` months before `now`.
fn month_label(now: DateTime<Utc>, months_back: u32) -> String {
    now.checked_sub_months(Months::new(months_back))
        .unwrap_or(now)
        .format("%b")
        .to_string()
}

impl StatsSnapshot {
    pub fn generate(rng: &mut impl Rng, now: DateTime<Utc>) -> Self {
        let daily: Vec<DailyUsage> = (0..7)
            .map(|i| DailyUsage {
                date: (now - Duration::days(6 - i)).format("%m-%d").to_string(),
                reviews: rng.gen_range(10..60),
                projects: rng.gen_range(1..=10),
                comments: rng.gen_range(50..250),
                approvals: rng.gen_range(5..35),
            })
            .collect();

        let project_status = named(&[("Active", 15), ("Waiting", 8), ("Inactive", 5)]);

        let top_projects = named(&[
            ("Project A", 156),
            ("Project B", 132),
            ("Project C", 98),
            ("Project D", 85),
            ("Project E", 74),
        ]);

        let monthly_trend = (0..6u32)
            .map(|i| MonthlyTrend {
                month: month_label(now, 5 - i),
                reviews: rng.gen_range(200..700),
                users: rng.gen_range(20..70),
            })
            .collect();

        let hourly = (0..24u8)
            .map(|hour| {
                let weight = if BUSINESS_HOURS.contains(&hour) { 20 } else { 5 };
                HourlyReviews {
                    hour,
                    reviews: rng.gen_range(0..30) + weight,
                }
            })
            .collect();

        let languages = named(&[
            ("JavaScript", 456),
            ("TypeScript", 389),
            ("Python", 234),
            ("Java", 178),
            ("Go", 145),
        ]);

        let mut reviewers: Vec<ReviewerStats> = [
            ("Kim", 156, 423, 89),
            ("Lee", 132, 356, 76),
            ("Park", 98, 289, 65),
            ("Choi", 85, 234, 52),
            ("Jung", 74, 198, 45),
        ]
        .into_iter()
        .map(|(name, reviews, comments, approvals)| ReviewerStats {
            name: name.to_string(),
            reviews,
            comments,
            approvals,
        })
        .collect();
        reviewers.sort_by(|a, b| b.reviews.cmp(&a.reviews));

        let metrics = [
            ("Average review time", "2.5h"),
            ("Average comments", "8.3"),
            ("Approval rate", "78%"),
            ("Change request rate", "45%"),
        ]
        .into_iter()
        .map(|(name, value)| ReviewMetric {
            name: name.to_string(),
            value: value.to_string(),
        })
        .collect();

        let language_trend = (0..6u32)
            .map(|i| LanguageTrend {
                month: month_label(now, 5 - i),
                counts: [50, 40, 30, 20, 10]
                    .into_iter()
                    .map(|base| rng.gen_range(0..100) + base)
                    .collect(),
            })
            .collect();

        let review_sizes = named(&[
            ("< 50 lines", 234),
            ("50-200 lines", 345),
            ("200-500 lines", 167),
            ("500-1000 lines", 56),
            ("> 1000 lines", 23),
        ]);

        let total_reviews = daily.iter().map(|d| d.reviews).sum();
        let total_projects = project_status.iter().map(|s| s.value).sum();
        let active_users = rng.gen_range(30..80);

        Self {
            daily,
            project_status,
            top_projects,
            monthly_trend,
            hourly,
            languages,
            reviewers,
            metrics,
            language_trend,
            review_sizes,
            total_reviews,
            total_projects,
            active_users,
        }
    }
}
