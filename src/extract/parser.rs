//! Turns a candidate node into an [`EntryRecord`].

use chrono::{DateTime, Utc};
use regex::Regex;
use thiserror::Error;

use crate::config::{accumulate, check, compile_selector, ConfigError, ConfigErrors};
use crate::dom::{Query, Selector, TreeNode};
use crate::extract::classify::Classifier;
use crate::extract::config::ExtractionConfig;
use crate::extract::record::EntryRecord;

/// Why a node did not yield a record.
///
/// Checks run in declaration order and the first failing one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FailureReason {
    #[error("node is not an entry container")]
    NotContainer,

    #[error("entry is promotional")]
    Promotional,

    #[error("entry quotes another entry")]
    QuotedRepost,

    #[error("favorite count is missing or not numeric")]
    MissingFavoriteCount,

    #[error("repost count is missing or not numeric")]
    MissingRepostCount,

    #[error("author block is missing")]
    MissingAuthorBlock,

    #[error("author name is missing")]
    MissingAuthorName,

    #[error("permalink is missing")]
    MissingPermalink,

    #[error("series id is missing")]
    MissingSeriesId,
}

/// Compiled extraction paths.
#[derive(Clone, Debug)]
pub struct EntryParser {
    classifier: Classifier,
    favorite: Selector,
    repost: Selector,
    unrepost: Selector,
    author_block: Selector,
    author_name: Selector,
    permalink: Selector,
    time: Selector,
    body_text: Selector,
    series: Regex,
}

fn series_pattern(prefix: &str) -> Result<Regex, ConfigError> {
    if prefix.is_empty() {
        return Err(ConfigError::EmptyField {
            field: "series_prefix",
        });
    }
    Regex::new(&format!("{}([0-9]+)", regex::escape(prefix))).map_err(|source| {
        ConfigError::InvalidPattern {
            field: "series_prefix",
            source,
        }
    })
}

impl EntryParser {
    /// Compile every extraction path, reporting all invalid ones together.
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigErrors> {
        let classifier = Classifier::new(config);
        let favorite = compile_selector("favorite_count", &config.favorite_count);
        let repost = compile_selector("repost_count", &config.repost_count);
        let unrepost = compile_selector("unrepost_count", &config.unrepost_count);
        let author_block = compile_selector("author_block", &config.author_block);
        let author_name = compile_selector("author_name", &config.author_name);
        let permalink = compile_selector("permalink", &config.permalink);
        let body_text = compile_selector("body_text", &config.body_text);
        let series = series_pattern(&config.series_prefix);

        let mut errors = match &classifier {
            Ok(_) => Vec::new(),
            Err(errors) => errors.errors().to_vec(),
        };
        if let Err(rest) = accumulate(vec![
            check(&favorite),
            check(&repost),
            check(&unrepost),
            check(&author_block),
            check(&author_name),
            check(&permalink),
            check(&body_text),
            check(&series),
        ]) {
            errors.extend(rest.0);
        }
        if !errors.is_empty() {
            return Err(ConfigErrors(errors));
        }

        Ok(Self {
            classifier: classifier?,
            favorite: favorite?,
            repost: repost?,
            unrepost: unrepost?,
            author_block: author_block?,
            author_name: author_name?,
            permalink: permalink?,
            time: compile_selector("time", "time[datetime]")?,
            body_text: body_text?,
            series: series?,
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Extract a record from `node`.
    ///
    /// Never panics on malformed input; the first failing check decides the
    /// reason and later checks are not evaluated.
    pub fn parse<N: Query>(&self, node: &N) -> Result<EntryRecord, FailureReason> {
        if !self.classifier.is_entry_container(node) {
            return Err(FailureReason::NotContainer);
        }
        if self.classifier.is_promotional(node) {
            return Err(FailureReason::Promotional);
        }
        if self.classifier.is_quoted_repost(node) {
            return Err(FailureReason::QuotedRepost);
        }

        let favorite_count = node
            .query(&self.favorite)
            .and_then(|el| parse_count(&el.text_content()))
            .ok_or(FailureReason::MissingFavoriteCount)?;

        let repost_count = node
            .query(&self.repost)
            .or_else(|| node.query(&self.unrepost))
            .and_then(|el| parse_count(&el.text_content()))
            .ok_or(FailureReason::MissingRepostCount)?;

        let block = node
            .query(&self.author_block)
            .ok_or(FailureReason::MissingAuthorBlock)?;

        let author_name = block
            .query(&self.author_name)
            .map(|el| compose_name(&el))
            .filter(|name| !name.is_empty())
            .ok_or(FailureReason::MissingAuthorName)?;

        let anchor = block
            .query(&self.permalink)
            .ok_or(FailureReason::MissingPermalink)?;
        let permalink = anchor.attribute("href").map(str::to_owned);
        let published_at = anchor
            .query(&self.time)
            .and_then(|time| time.attribute("datetime").and_then(parse_timestamp));

        let series_id = node
            .query(&self.body_text)
            .and_then(|body| {
                self.series
                    .captures(&body.text_content())
                    .and_then(|caps| caps.get(1))
                    .map(|digits| digits.as_str().to_owned())
            })
            .ok_or(FailureReason::MissingSeriesId)?;

        Ok(EntryRecord {
            published_at,
            favorite_count,
            repost_count,
            permalink,
            author_name,
            series_id,
        })
    }
}

/// ASCII digits with optional `,` separators; blank text counts as zero.
fn parse_count(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }
    if !text.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return None;
    }
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

fn compose_name<N: TreeNode>(node: &N) -> String {
    let mut name = String::new();
    push_name_parts(node, &mut name);
    name.trim().to_owned()
}

fn push_name_parts<N: TreeNode>(node: &N, out: &mut String) {
    for child in node.child_nodes() {
        if let Some(text) = child.text_value() {
            out.push_str(text);
        } else if child.element_name() == Some("img") {
            out.push_str(child.attribute("alt").unwrap_or_default());
        } else {
            push_name_parts(&child, out);
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|stamp| stamp.with_timezone(&Utc))
}
