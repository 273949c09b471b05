//! Analytics report shapes and the non-authoritative series behind them.
//!
//! Only [`PerformanceMetrics`](super::PerformanceMetrics) comes from real
//! data. [`placeholder_demographics`] returns fixed illustrative numbers
//! and [`synthetic_trends`] draws random ones; both are labelled as such
//! in every report through [`DataQuality`].

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

use super::{PerformanceMetrics, PollId};

/// Length of the synthetic trend series, in days.
pub const TREND_DAYS: u32 = 30;

/// Share of respondents in one segment.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SegmentShare {
    /// Segment label.
    pub label: &'static str,
    /// Percentage of respondents (segments of one breakdown sum to 100).
    pub percentage: u32,
}

/// Respondent breakdowns by region, age group and device.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    /// By region of Cameroon.
    pub regions: Vec<SegmentShare>,
    /// By age bracket.
    pub age_groups: Vec<SegmentShare>,
    /// By device type.
    pub devices: Vec<SegmentShare>,
}

/// One day of the trend series.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Calendar day (`YYYY-MM-DD`).
    #[schema(value_type = String)]
    pub date: NaiveDate,
    /// Votes cast that day.
    pub votes: u32,
    /// Views recorded that day.
    pub views: u32,
    /// Engagement percentage.
    pub engagement: f64,
    /// Completion-rate percentage.
    pub completion_rate: f64,
}

/// Provenance labels attached to every analytics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    /// Source of `overview`.
    pub overview: &'static str,
    /// Source of `demographics`.
    pub demographics: &'static str,
    /// Source of `trends`.
    pub trends: &'static str,
    /// Number of vote rows fetched for the poll.
    pub vote_sample_size: usize,
    /// Number of view-log rows fetched for the poll.
    pub view_sample_size: usize,
}

impl DataQuality {
    /// Labels for a report built from the given sample sizes.
    #[must_use]
    pub const fn new(vote_sample_size: usize, view_sample_size: usize) -> Self {
        Self {
            overview: "measured",
            demographics: "placeholder",
            trends: "synthetic",
            vote_sample_size,
            view_sample_size,
        }
    }
}

/// Full `GET /analytics` report for one poll.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Measured performance metrics.
    pub overview: PerformanceMetrics,
    /// Placeholder breakdowns.
    pub demographics: Demographics,
    /// Synthetic daily series.
    pub trends: Vec<TrendPoint>,
    /// Poll the report is about.
    pub poll_id: PollId,
    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Provenance of each section.
    pub data_quality: DataQuality,
}

const fn share(label: &'static str, percentage: u32) -> SegmentShare {
    SegmentShare { label, percentage }
}

/// Fixed illustrative breakdowns. Not derived from any stored row.
#[must_use]
pub fn placeholder_demographics() -> Demographics {
    Demographics {
        regions: vec![
            share("Centre", 24),
            share("Littoral", 21),
            share("West", 14),
            share("Northwest", 11),
            share("Southwest", 10),
            share("Other", 20),
        ],
        age_groups: vec![
            share("18-24", 28),
            share("25-34", 32),
            share("35-44", 20),
            share("45-54", 12),
            share("55+", 8),
        ],
        devices: vec![share("mobile", 68), share("desktop", 24), share("tablet", 8)],
    }
}

/// Generates a random [`TREND_DAYS`]-day series ending on `today`, oldest
/// day first.
pub fn synthetic_trends<R: Rng>(rng: &mut R, today: NaiveDate) -> Vec<TrendPoint> {
    (0..TREND_DAYS)
        .rev()
        .map(|days_ago| {
            let votes = rng.gen_range(10..=110);
            TrendPoint {
                date: today - Duration::days(i64::from(days_ago)),
                votes,
                views: votes + rng.gen_range(50..=250),
                engagement: round2(rng.gen_range(20.0..80.0)),
                completion_rate: round2(rng.gen_range(60.0..95.0)),
            }
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
