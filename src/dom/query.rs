//! Selector queries over document nodes.
//!
//! Matching follows `querySelector`: the whole selector is evaluated against
//! the full document, so ancestors of the query root take part, but only
//! descendants of the root are returned.

use crate::dom::node::{Node, TreeNode};
use crate::dom::selector::Selector;

/// Node query capability.
pub trait Query: TreeNode {
    /// First matching descendant in document order.
    fn query(&self, selector: &Selector) -> Option<Self>;

    /// All matching descendants in document order.
    fn query_all(&self, selector: &Selector) -> Vec<Self>;

    fn matches_any(&self, selector: &Selector) -> bool {
        self.query(selector).is_some()
    }
}

impl Query for Node {
    fn query(&self, selector: &Selector) -> Option<Self> {
        let element = self.element_ref()?;
        let found = element.select(selector.compiled()).next()?;
        Some(self.handle(found.id()))
    }

    fn query_all(&self, selector: &Selector) -> Vec<Self> {
        let Some(element) = self.element_ref() else {
            return Vec::new();
        };
        element
            .select(selector.compiled())
            .map(|found| self.handle(found.id()))
            .collect()
    }
}
