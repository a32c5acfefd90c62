//! Tracker configuration and its validation.
//!
//! Configuration is plain serde data with defaults for every field. It is
//! compiled once at startup; compilation checks every field and reports all
//! problems together instead of stopping at the first one.

use crate::builder::BuildError;
use crate::dom::{Selector, SelectorError};
use crate::extract::ExtractionConfig;
use crate::navigation::LocationPattern;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single configuration problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid selector for {field}: {source}")]
    InvalidSelector {
        field: &'static str,
        source: SelectorError,
    },

    #[error("invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: &'static str,
        source: regex::Error,
    },

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("malformed configuration: {0}")]
    Malformed(String),

    #[error("invalid rule table: {0}")]
    InvalidRules(BuildError),
}

/// Every problem found while compiling a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} configuration error(s): {}", .0.len(), join(.0))]
pub struct ConfigErrors(pub Vec<ConfigError>);

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigErrors {
    pub fn errors(&self) -> &[ConfigError] {
        &self.0
    }
}

impl From<ConfigError> for ConfigErrors {
    fn from(error: ConfigError) -> Self {
        Self(vec![error])
    }
}

pub(crate) type Check = Validation<(), NonEmptyVec<ConfigError>>;

pub(crate) fn compile_selector(field: &'static str, source: &str) -> Result<Selector, ConfigError> {
    Selector::parse(source).map_err(|source| ConfigError::InvalidSelector { field, source })
}

pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::EmptyField { field })
    } else {
        Ok(())
    }
}

pub(crate) fn check<T>(result: &Result<T, ConfigError>) -> Check {
    match result {
        Ok(_) => Validation::success(()),
        Err(error) => Validation::fail(error.clone()),
    }
}

/// Combine checks, accumulating ALL failures.
pub(crate) fn accumulate(checks: Vec<Check>) -> Result<(), ConfigErrors> {
    match Validation::all_vec(checks).map(|_| ()) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(errors) => Err(ConfigErrors(errors.iter().cloned().collect())),
    }
}

/// Top-level configuration for an [`Orchestrator`](crate::Orchestrator).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Where entries are listed.
    pub feed: LocationPattern,
    /// Where a new post is composed; any of these counts.
    pub composer: Vec<LocationPattern>,
    /// Element that appears once the feed has rendered; the fine watcher is
    /// attached to it.
    pub feed_anchor: String,
    /// Element that appears once the composer has rendered.
    pub composer_anchor: String,
    /// Label of the host command offered in the composer.
    pub command_label: String,
    /// Host key under which the latest record is persisted.
    pub store_key: String,
    /// Armed entries kept awaiting completion; the oldest are dropped first.
    pub max_pending: usize,
    pub extraction: ExtractionConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            feed: LocationPattern::new("/search").with_query("KEEB_PD"),
            composer: vec![
                LocationPattern::new("/compose/post"),
                LocationPattern::new("/compose/tweet"),
            ],
            feed_anchor: r#"div[data-testid="primaryColumn"] section[role="region"]"#.into(),
            composer_anchor: r#"div[data-testid="app-bar-close"]"#.into(),
            command_label: "copy to clipboard".into(),
            store_key: "entry".into(),
            max_pending: 256,
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Anchors and labels after validation.
#[derive(Clone, Debug)]
pub struct CompiledTracker {
    pub feed: LocationPattern,
    pub composer: Vec<LocationPattern>,
    pub feed_anchor: Selector,
    pub composer_anchor: Selector,
    pub command_label: String,
    pub store_key: String,
    pub max_pending: usize,
}

impl TrackerConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Validate navigation settings, reporting every problem at once.
    ///
    /// Extraction settings are compiled separately by
    /// [`EntryParser::new`](crate::extract::EntryParser::new).
    pub fn compile(&self) -> Result<CompiledTracker, ConfigErrors> {
        let feed_path = non_empty("feed.path", &self.feed.path);
        let composer = if self.composer.is_empty() {
            Err(ConfigError::EmptyField { field: "composer" })
        } else {
            Ok(())
        };
        let feed_anchor = compile_selector("feed_anchor", &self.feed_anchor);
        let composer_anchor = compile_selector("composer_anchor", &self.composer_anchor);
        let label = non_empty("command_label", &self.command_label);
        let store_key = non_empty("store_key", &self.store_key);
        let max_pending = if self.max_pending == 0 {
            Err(ConfigError::Zero {
                field: "max_pending",
            })
        } else {
            Ok(())
        };

        accumulate(vec![
            check(&feed_path),
            check(&composer),
            check(&feed_anchor),
            check(&composer_anchor),
            check(&label),
            check(&store_key),
            check(&max_pending),
        ])?;

        Ok(CompiledTracker {
            feed: self.feed.clone(),
            composer: self.composer.clone(),
            feed_anchor: feed_anchor?,
            composer_anchor: composer_anchor?,
            command_label: self.command_label.clone(),
            store_key: self.store_key.clone(),
            max_pending: self.max_pending,
        })
    }
}
