//! Categorization rules.
//!
//! A rule pairs a matcher over the event name or category string with the
//! bucket label it assigns. Rules are evaluated in list order and the first
//! match wins, so the order of [`default_rules`] is significant: an event
//! named "Layout" in category "v8" lands in `stylelayout`, not `v8`.

use crate::utils::error::RulesError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Predicate over an event's name or category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    /// Event name contains the substring
    NameContains(String),

    /// Raw category string contains the substring
    CategoryContains(String),

    /// One of the comma-separated category tags equals the value
    CategoryTag(String),
}

impl Matcher {
    pub fn matches(&self, name: &str, category: &str) -> bool {
        match self {
            Self::NameContains(needle) => name.contains(needle.as_str()),
            Self::CategoryContains(needle) => category.contains(needle.as_str()),
            Self::CategoryTag(tag) => category.split(',').map(str::trim).any(|t| t == tag),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameContains(s) => write!(f, "name contains \"{}\"", s),
            Self::CategoryContains(s) => write!(f, "category contains \"{}\"", s),
            Self::CategoryTag(s) => write!(f, "category tag \"{}\"", s),
        }
    }
}

/// A matcher and the bucket it assigns
///
/// JSON form: `{"name_contains": "Layout", "bucket": "stylelayout"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(flatten)]
    pub matcher: Matcher,
    pub bucket: String,
}

impl Rule {
    pub fn new(matcher: Matcher, bucket: impl Into<String>) -> Self {
        Self {
            matcher,
            bucket: bucket.into(),
        }
    }
}

fn name(needle: &str, bucket: &str) -> Rule {
    Rule::new(Matcher::NameContains(needle.to_string()), bucket)
}

fn category(needle: &str, bucket: &str) -> Rule {
    Rule::new(Matcher::CategoryContains(needle.to_string()), bucket)
}

fn tag(tag: &str, bucket: &str) -> Rule {
    Rule::new(Matcher::CategoryTag(tag.to_string()), bucket)
}

/// Built-in rules for Chromium renderer traces, highest priority first
///
/// **Public** - used by `Categorizer::default`
pub fn default_rules() -> Vec<Rule> {
    vec![
        name("Layout", "stylelayout"),
        name("Style", "stylelayout"),
        name("Paint", "paint"),
        name("Composit", "compositing"),
        category("v8", "v8"),
        name("Script", "v8"),
        name("ParseHTML", "parsing"),
        category("loading", "loading"),
        category("mojom", "ipc"),
        tag("cc", "compositing"),
        tag("gpu", "gpu"),
        tag("blink", "blink"),
        tag("other", "other"),
        tag("toplevel", "unknown task"),
    ]
}

/// Load a rule list from a JSON file
///
/// **Public** - backs the `--rules` CLI option
///
/// # Errors
/// * `RulesError::Io` - file cannot be read
/// * `RulesError::JsonError` - not a JSON array of rules
/// * `RulesError::Empty` - the array has no rules
pub fn load_rules(path: impl AsRef<Path>) -> Result<Vec<Rule>, RulesError> {
    let path = path.as_ref();
    debug!("Loading categorization rules from: {}", path.display());

    let file = File::open(path)?;
    let rules: Vec<Rule> = serde_json::from_reader(BufReader::new(file))?;

    if rules.is_empty() {
        return Err(RulesError::Empty);
    }

    debug!("Loaded {} rules", rules.len());
    Ok(rules)
}
