//! Map trace events to reporting buckets.
//!
//! Categorization is a pure, ordered lookup: the first rule whose matcher
//! accepts the (name, category) pair decides the bucket, and events no rule
//! accepts go to `unknown`. Every event therefore lands in exactly one bucket.

pub mod rules;

pub use rules::{default_rules, load_rules, Matcher, Rule};

use crate::utils::config::UNKNOWN_BUCKET;

/// Ordered rule list
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<Rule>,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Categorizer {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Bucket label for an event; first matching rule wins
    pub fn categorize(&self, name: &str, category: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(name, category))
            .map(|rule| rule.bucket.as_str())
            .unwrap_or(UNKNOWN_BUCKET)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
