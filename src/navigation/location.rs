//! Page locations and the patterns that recognize them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path and query of the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub path: String,
    /// Query string without the leading `?`.
    pub query: String,
}

impl Locator {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// Split an address into path and query.
    ///
    /// Accepts absolute addresses (`https://host/path?q`) and bare paths.
    /// The fragment is dropped; an empty path becomes `/`.
    pub fn parse(address: &str) -> Self {
        let rest = match address.find("://") {
            Some(scheme_end) => {
                let after = &address[scheme_end + 3..];
                after.find(['/', '?', '#']).map_or("", |i| &after[i..])
            }
            None => address,
        };
        let rest = rest.split('#').next().unwrap_or_default();
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        let path = if path.is_empty() { "/" } else { path };
        Self::new(path, query)
    }

    /// Same path, no query.
    pub fn path_only(&self) -> Self {
        Self::new(self.path.clone(), "")
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

/// Recognizes a family of locations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPattern {
    /// Exact path to match.
    pub path: String,
    /// Text the query string must contain, if any.
    #[serde(default)]
    pub query_contains: Option<String>,
}

impl LocationPattern {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query_contains: None,
        }
    }

    pub fn with_query(mut self, term: impl Into<String>) -> Self {
        self.query_contains = Some(term.into());
        self
    }

    pub fn matches(&self, locator: &Locator) -> bool {
        locator.path == self.path
            && self
                .query_contains
                .as_deref()
                .is_none_or(|term| locator.query.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_absolute_address() {
        let locator = Locator::parse("https://x.com/search?q=%23KEEB_PD&f=live#top");
        assert_eq!(locator.path, "/search");
        assert_eq!(locator.query, "q=%23KEEB_PD&f=live");
    }

    #[test]
    fn parse_bare_path_and_host_only() {
        assert_eq!(Locator::parse("/compose/post"), Locator::new("/compose/post", ""));
        assert_eq!(Locator::parse("https://x.com"), Locator::new("/", ""));
        assert_eq!(Locator::parse("https://x.com?a=1"), Locator::new("/", "a=1"));
    }

    #[test]
    fn display_round_trips_path_and_query() {
        let locator = Locator::new("/search", "q=KEEB_PD");
        assert_eq!(locator.to_string(), "/search?q=KEEB_PD");
        assert_eq!(locator.path_only().to_string(), "/search");
    }

    #[test]
    fn pattern_requires_exact_path_and_query_term() {
        let feed = LocationPattern::new("/search").with_query("KEEB_PD");

        assert!(feed.matches(&Locator::new("/search", "q=%23KEEB_PD")));
        assert!(!feed.matches(&Locator::new("/search", "q=other")));
        assert!(!feed.matches(&Locator::new("/search/live", "q=KEEB_PD")));
    }

    #[test]
    fn pattern_without_query_ignores_query() {
        let composer = LocationPattern::new("/compose/post");
        assert!(composer.matches(&Locator::new("/compose/post", "text=hi")));
    }
}
