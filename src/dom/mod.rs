//! Document tree abstraction and structural queries.
//!
//! The extraction pipeline is written against [`TreeNode`] and [`Query`],
//! never against a concrete host API. [`Node`] is a handle into a tree parsed
//! by `scraper`, which also compiles and matches every [`Selector`].

mod node;
mod query;
mod selector;

pub use node::{ElementBuilder, Markup, Node, TreeNode};
pub use query::Query;
pub use selector::{Selector, SelectorError};
