//! Structural paths used to recognize and read timeline entries.

use serde::{Deserialize, Serialize};

/// Where each piece of an entry lives inside its container.
///
/// Selectors are relative to the container node, except `author_name` and
/// `permalink` which are relative to the author block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Element name of an entry container.
    pub container_element: String,
    /// `data-testid` value of an entry container.
    pub container_test_id: String,
    pub promo_label_path: String,
    /// Label texts marking an entry as promotional.
    pub promo_labels: Vec<String>,
    pub quoted_timestamp_path: String,
    pub favorite_count: String,
    pub repost_count: String,
    pub unrepost_count: String,
    pub author_block: String,
    pub author_name: String,
    pub permalink: String,
    pub body_text: String,
    /// Literal text immediately preceding the series digits.
    pub series_prefix: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            container_element: "div".into(),
            container_test_id: "cellInnerDiv".into(),
            promo_label_path: concat!(
                r#"article[data-testid="tweet"] > div > div > div:last-child"#,
                " > div > div:last-child > div > div > span"
            )
            .into(),
            promo_labels: vec!["プロモーション".into(), "Promoted".into(), "Ad".into()],
            quoted_timestamp_path: concat!(
                "article > div > div > div:nth-child(2) > div:nth-child(2)",
                r#" > div:nth-child(3) > div > div[tabindex="0"] > div time"#
            )
            .into(),
            favorite_count: r#"button[data-testid="like"] span[data-testid="app-text-transition-container"]"#
                .into(),
            repost_count: r#"button[data-testid="retweet"] span[data-testid="app-text-transition-container"]"#
                .into(),
            unrepost_count: r#"button[data-testid="unretweet"] span[data-testid="app-text-transition-container"]"#
                .into(),
            author_block: r#"article div[data-testid="User-Name"]"#.into(),
            author_name: r#"div:first-child > div > a[role="link"] > div:first-child > div:first-child > span"#
                .into(),
            permalink: r#"div:nth-child(2) > div > div:nth-child(3) > a[role="link"]"#.into(),
            body_text: r#"div[data-testid="tweetText"]"#.into(),
            series_prefix: "KEEB_PD_R".into(),
        }
    }
}
