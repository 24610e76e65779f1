//! Text report of self time per bucket.
//!
//! Buckets are listed smallest first so the dominant one ends up last, right
//! above the grand total:
//!
//! ```text
//! paint, self time: 3ms (1.2% of total time)
//! v8, self time: 180ms (72.0% of total time)
//! Total self time: 250ms from 10432 events
//! ```

use crate::aggregator::CategoryTotals;
use crate::utils::config::MICROS_PER_MILLI;
use serde::{Deserialize, Serialize};

/// One bucket line of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLine {
    pub bucket: String,

    /// Self time in microseconds
    pub self_time_us: u64,

    /// Share of the grand total, 0.0 when the total is zero
    pub percentage: f64,
}

impl CategoryLine {
    pub fn self_time_ms(&self) -> u64 {
        micros_to_millis(self.self_time_us)
    }

    pub fn to_line(&self) -> String {
        format!(
            "{}, self time: {}ms ({:.1}% of total time)",
            self.bucket,
            self.self_time_ms(),
            self.percentage
        )
    }
}

/// Sorted summary built from the run's totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Ascending by self time, ties alphabetical by bucket
    pub categories: Vec<CategoryLine>,

    pub total_self_time_us: u64,
    pub event_count: u64,
}

impl Report {
    /// Build the report from accumulated totals
    ///
    /// **Public** - main entry point for reporting
    pub fn from_totals(totals: &CategoryTotals) -> Self {
        let total = totals.total_self_time();

        let mut categories: Vec<CategoryLine> = totals
            .iter()
            .map(|(bucket, self_time_us)| CategoryLine {
                bucket: bucket.to_string(),
                self_time_us,
                percentage: percentage_of(self_time_us, total),
            })
            .collect();

        categories.sort_by(|a, b| {
            a.self_time_us
                .cmp(&b.self_time_us)
                .then_with(|| a.bucket.cmp(&b.bucket))
        });

        Self {
            categories,
            total_self_time_us: total,
            event_count: totals.event_count(),
        }
    }

    pub fn total_line(&self) -> String {
        format!(
            "Total self time: {}ms from {} events",
            micros_to_millis(self.total_self_time_us),
            self.event_count
        )
    }

    /// Render the full text report, one line per bucket then the total
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.categories {
            out.push_str(&line.to_line());
            out.push('\n');
        }
        out.push_str(&self.total_line());
        out.push('\n');
        out
    }
}

/// Microseconds to whole milliseconds, rounding half away from zero
pub fn micros_to_millis(us: u64) -> u64 {
    (us as f64 / MICROS_PER_MILLI).round() as u64
}

fn percentage_of(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
