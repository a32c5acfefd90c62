//! Structural predicates over candidate nodes.
//!
//! Every predicate is a pure query: no node is modified and a missing
//! descendant simply makes the predicate false.

use crate::config::{accumulate, check, compile_selector, non_empty, ConfigErrors};
use crate::dom::{Query, Selector, TreeNode};
use crate::extract::config::ExtractionConfig;

/// Decides which structural shape a node has.
#[derive(Clone, Debug)]
pub struct Classifier {
    container_element: String,
    container_test_id: String,
    promo_label_path: Selector,
    promo_labels: Vec<String>,
    quoted_timestamp_path: Selector,
}

impl Classifier {
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigErrors> {
        let element = non_empty("container_element", &config.container_element);
        let test_id = non_empty("container_test_id", &config.container_test_id);
        let promo = compile_selector("promo_label_path", &config.promo_label_path);
        let quoted = compile_selector("quoted_timestamp_path", &config.quoted_timestamp_path);

        accumulate(vec![
            check(&element),
            check(&test_id),
            check(&promo),
            check(&quoted),
        ])?;

        Ok(Self {
            container_element: config.container_element.to_ascii_lowercase(),
            container_test_id: config.container_test_id.clone(),
            promo_label_path: promo?,
            promo_labels: config.promo_labels.clone(),
            quoted_timestamp_path: quoted?,
        })
    }

    /// Whether `node` is a timeline entry container.
    pub fn is_entry_container<N: TreeNode>(&self, node: &N) -> bool {
        node.element_name() == Some(self.container_element.as_str())
            && node.attribute("data-testid") == Some(self.container_test_id.as_str())
    }

    /// Whether `node` is a container carrying a promotional label.
    pub fn is_promotional<N: Query>(&self, node: &N) -> bool {
        if !self.is_entry_container(node) {
            return false;
        }
        node.query(&self.promo_label_path).is_some_and(|label| {
            let text = label.text_content();
            self.promo_labels.iter().any(|wanted| wanted == text.trim())
        })
    }

    /// Whether `node` is a container embedding a quoted entry.
    pub fn is_quoted_repost<N: Query>(&self, node: &N) -> bool {
        self.is_entry_container(node) && node.matches_any(&self.quoted_timestamp_path)
    }
}
