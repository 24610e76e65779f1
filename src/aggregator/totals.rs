//! Per-bucket self time accumulation.
//!
//! One `CategoryTotals` is threaded through the whole run: each file's
//! contributions are added to it, and totals built independently (one per
//! file) can be merged in any order with the same result.

use super::stack_builder::{reconstruct, Contribution};
use crate::categorizer::Categorizer;
use crate::parser::RawEvent;
use log::debug;
use std::collections::HashMap;

/// Accumulated self time per bucket plus the number of resolved events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    totals: HashMap<String, u64>,
    event_count: u64,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one resolved event's self time (µs) to a bucket
    pub fn add(&mut self, bucket: &str, self_time: u64) {
        let total = self.totals.entry(bucket.to_string()).or_insert(0);
        *total = total.saturating_add(self_time);
        self.event_count += 1;
    }

    /// Categorize a contribution and add it
    pub fn record(&mut self, contribution: &Contribution, categorizer: &Categorizer) {
        let bucket = categorizer.categorize(&contribution.name, &contribution.category);
        self.add(bucket, contribution.self_time);
    }

    /// Fold another accumulator into this one
    pub fn merge(&mut self, other: CategoryTotals) {
        for (bucket, self_time) in other.totals {
            let total = self.totals.entry(bucket).or_insert(0);
            *total = total.saturating_add(self_time);
        }
        self.event_count = self.event_count.saturating_add(other.event_count);
    }

    /// Self time of one bucket (0 if absent)
    pub fn get(&self, bucket: &str) -> u64 {
        self.totals.get(bucket).copied().unwrap_or(0)
    }

    pub fn total_self_time(&self) -> u64 {
        self.totals.values().copied().fold(0, u64::saturating_add)
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// (bucket, self time) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals.iter().map(|(bucket, time)| (bucket.as_str(), *time))
    }
}

/// Reconstruct stacks for one file's events and add them to `totals`
///
/// **Public** - main entry point for aggregation
///
/// The accumulator is taken by value and handed back so callers can either
/// chain files through one instance or build one per file and `merge` them.
pub fn process_events(
    events: &[RawEvent],
    categorizer: &Categorizer,
    mut totals: CategoryTotals,
) -> CategoryTotals {
    let reconstruction = reconstruct(events);

    for contribution in &reconstruction.contributions {
        totals.record(contribution, categorizer);
    }

    debug!(
        "Aggregated {} frames, {}µs self time",
        reconstruction.contributions.len(),
        reconstruction.total_self_time()
    );

    totals
}
