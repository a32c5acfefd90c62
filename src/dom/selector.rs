//! Compiled CSS selectors.
//!
//! Parsing and matching are delegated to `scraper`, so anything it accepts
//! (type, attribute and structural pseudo-class selectors with descendant
//! and child combinators) can be used as an extraction path.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while compiling a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("selector is empty")]
    Empty,

    #[error("invalid selector '{selector}': {reason}")]
    Invalid { selector: String, reason: String },
}

/// A compiled selector together with its source text.
///
/// ```rust
/// use entry_tracker::dom::Selector;
///
/// let selector: Selector = r#"article > div:nth-child(2) a[role="link"]"#.parse().unwrap();
/// assert_eq!(selector.as_str(), r#"article > div:nth-child(2) a[role="link"]"#);
/// assert!(Selector::parse("div >").is_err());
/// ```
#[derive(Clone)]
pub struct Selector {
    source: String,
    compiled: scraper::Selector,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }
        let compiled =
            scraper::Selector::parse(source).map_err(|error| SelectorError::Invalid {
                selector: source.to_string(),
                reason: error.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn compiled(&self) -> &scraper::Selector {
        &self.compiled
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Selector {}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({:?})", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_default_path_shape() {
        for source in [
            r#"article div[data-testid="User-Name"] > span"#,
            "div:first-child>div:nth-child(3) > div:last-child",
            "div[data-testid=attachments] [tabindex]",
            "time[datetime]",
        ] {
            assert!(Selector::parse(source).is_ok(), "{source}");
        }
    }

    #[test]
    fn source_is_trimmed() {
        let selector = Selector::parse("  div  time ").unwrap();
        assert_eq!(selector.as_str(), "div  time");
        assert_eq!(selector, Selector::parse("div  time").unwrap());
    }

    #[test]
    fn display_round_trips_source() {
        let source = r#"button[data-testid="like"] span"#;
        assert_eq!(Selector::parse(source).unwrap().to_string(), source);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        for source in ["div >", "> div", "!!", "li:nth-child(x)"] {
            assert!(
                matches!(Selector::parse(source), Err(SelectorError::Invalid { .. })),
                "{source}"
            );
        }
    }

    #[test]
    fn errors_name_the_offending_selector() {
        let Err(SelectorError::Invalid { selector, reason }) = Selector::parse("div >") else {
            panic!("expected an invalid selector");
        };
        assert_eq!(selector, "div >");
        assert!(!reason.is_empty());
    }
}
