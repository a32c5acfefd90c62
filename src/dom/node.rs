//! Tree abstraction and the parsed node handle.

use std::fmt;
use std::rc::Rc;

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html};

/// Read-only view of a node in a document tree.
///
/// The classifier and the parser only use this trait and [`Query`], so any
/// host tree representation can be plugged in.
///
/// [`Query`]: crate::dom::Query
pub trait TreeNode: Clone {
    /// Lower-case element name, or `None` for text nodes.
    fn element_name(&self) -> Option<&str>;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Child nodes in document order, text nodes included.
    fn child_nodes(&self) -> Vec<Self>;

    /// Content of a text node; `None` for elements.
    fn text_value(&self) -> Option<&str>;

    fn is_element(&self) -> bool {
        self.element_name().is_some()
    }

    /// Concatenated text of all descendant text nodes.
    fn text_content(&self) -> String {
        match self.text_value() {
            Some(text) => text.to_string(),
            None => self
                .child_nodes()
                .iter()
                .map(TreeNode::text_content)
                .collect(),
        }
    }
}

/// Handle to a node inside a parsed [`scraper::Html`] tree.
///
/// Cloning is cheap: every handle shares the parsed document.
#[derive(Clone)]
pub struct Node {
    document: Rc<Html>,
    id: NodeId,
}

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Node {
    /// Start building an element.
    ///
    /// ```rust
    /// use entry_tracker::dom::{Node, TreeNode};
    ///
    /// let node: Node = Node::element("div")
    ///     .attr("data-testid", "tweetText")
    ///     .text("hello ")
    ///     .child(Node::element("span").text("world"))
    ///     .build();
    ///
    /// assert_eq!(node.attribute("data-testid"), Some("tweetText"));
    /// assert_eq!(node.text_content(), "hello world");
    /// ```
    pub fn element(name: impl Into<String>) -> ElementBuilder {
        ElementBuilder {
            name: name.into().to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A free-standing text node.
    ///
    /// Empty text yields a node with no name, no text and no children.
    pub fn text_node(text: impl AsRef<str>) -> Node {
        let document = Rc::new(Html::parse_fragment(&escape_text(text.as_ref())));
        let id = first_fragment_child(&document).unwrap_or_else(|| document.tree.root().id());
        Node { document, id }
    }

    /// Parse a full page; the handle points at the `html` element.
    pub fn parse_document(markup: &str) -> Node {
        let document = Html::parse_document(markup);
        let id = document.root_element().id();
        Node {
            document: Rc::new(document),
            id,
        }
    }

    /// Parse a fragment in a `body` context and return its top-level nodes.
    pub fn parse_fragment(markup: &str) -> Vec<Node> {
        let document = Rc::new(Html::parse_fragment(markup));
        let ids: Vec<NodeId> = document
            .root_element()
            .children()
            .filter(|child| child.value().is_element() || child.value().is_text())
            .map(|child| child.id())
            .collect();
        ids.into_iter().map(|id| Node::at(&document, id)).collect()
    }

    fn at(document: &Rc<Html>, id: NodeId) -> Node {
        Node {
            document: Rc::clone(document),
            id,
        }
    }

    /// Another node of the same document.
    pub(crate) fn handle(&self, id: NodeId) -> Node {
        Node::at(&self.document, id)
    }

    fn node_ref(&self) -> Option<NodeRef<'_, scraper::Node>> {
        self.document.tree.get(self.id)
    }

    /// The element behind this handle, `None` for text nodes.
    pub(crate) fn element_ref(&self) -> Option<ElementRef<'_>> {
        self.node_ref().and_then(ElementRef::wrap)
    }

    /// True if both handles point at the same node of the same document.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.document, &other.document) && self.id == other.id
    }

    /// Serialize the subtree as HTML.
    pub fn to_markup(&self) -> String {
        if let Some(element) = self.element_ref() {
            return element.html();
        }
        self.text_value().map(escape_text).unwrap_or_default()
    }
}

fn first_fragment_child(document: &Html) -> Option<NodeId> {
    document
        .root_element()
        .children()
        .find(|child| child.value().is_element() || child.value().is_text())
        .map(|child| child.id())
}

impl TreeNode for Node {
    fn element_name(&self) -> Option<&str> {
        self.node_ref()?.value().as_element().map(|el| el.name())
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.node_ref()?.value().as_element()?.attr(name)
    }

    fn child_nodes(&self) -> Vec<Self> {
        let Some(node) = self.node_ref() else {
            return Vec::new();
        };
        node.children()
            .filter(|child| child.value().is_element() || child.value().is_text())
            .map(|child| self.handle(child.id()))
            .collect()
    }

    fn text_value(&self) -> Option<&str> {
        self.node_ref()?.value().as_text().map(|text| &**text)
    }

    fn text_content(&self) -> String {
        match self.element_ref() {
            Some(element) => element.text().collect(),
            None => self.text_value().unwrap_or_default().to_string(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.to_markup())
    }
}

/// Rendered HTML for one child of an [`ElementBuilder`].
#[derive(Clone, Debug)]
pub struct Markup(String);

impl From<ElementBuilder> for Markup {
    fn from(builder: ElementBuilder) -> Self {
        Markup(builder.to_markup())
    }
}

impl From<Node> for Markup {
    fn from(node: Node) -> Self {
        Markup(node.to_markup())
    }
}

impl From<&Node> for Markup {
    fn from(node: &Node) -> Self {
        Markup(node.to_markup())
    }
}

/// Fluent builder that renders markup and parses it with `scraper`.
///
/// An `html` root is parsed as a full document, anything else as a fragment.
#[derive(Clone, Debug)]
pub struct ElementBuilder {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Markup>,
}

impl ElementBuilder {
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Markup>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    pub fn text(mut self, text: impl AsRef<str>) -> Self {
        self.children.push(Markup(escape_text(text.as_ref())));
        self
    }

    pub fn to_markup(&self) -> String {
        let mut out = format!("<{}", self.name);
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.name.as_str()) {
            return out;
        }
        for child in &self.children {
            out.push_str(&child.0);
        }
        out.push_str(&format!("</{}>", self.name));
        out
    }

    pub fn build(self) -> Node {
        let markup = self.to_markup();
        if self.name == "html" {
            return Node::parse_document(&markup);
        }
        let document = Rc::new(Html::parse_fragment(&markup));
        let id = document
            .root_element()
            .children()
            .find(|child| child.value().is_element())
            .map(|child| child.id())
            .unwrap_or_else(|| document.root_element().id());
        Node::at(&document, id)
    }
}

impl From<ElementBuilder> for Node {
    fn from(builder: ElementBuilder) -> Self {
        builder.build()
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_names_are_lower_cased() {
        let node = Node::element("DIV").build();
        assert_eq!(node.element_name(), Some("div"));
        assert!(node.is_element());
    }

    #[test]
    fn text_nodes_have_no_name_or_attributes() {
        let node = Node::text_node("hi");
        assert_eq!(node.element_name(), None);
        assert_eq!(node.attribute("id"), None);
        assert_eq!(node.text_value(), Some("hi"));
        assert!(node.child_nodes().is_empty());
    }

    #[test]
    fn empty_text_node_is_inert() {
        let node = Node::text_node("");
        assert_eq!(node.element_name(), None);
        assert_eq!(node.text_content(), "");
    }

    #[test]
    fn text_content_concatenates_in_document_order() {
        let node = Node::element("div")
            .text("a")
            .child(Node::element("b").text("b").child(Node::element("i").text("c")))
            .text("d")
            .build();

        assert_eq!(node.text_content(), "abcd");
    }

    #[test]
    fn special_characters_survive_parsing() {
        let node = Node::element("span")
            .attr("title", "a \"b\" & c")
            .text("<KEEB> & co")
            .build();

        assert_eq!(node.attribute("title"), Some("a \"b\" & c"));
        assert_eq!(node.text_content(), "<KEEB> & co");
    }

    #[test]
    fn children_include_text_runs() {
        let node = Node::element("span")
            .text("An")
            .child(Node::element("img").attr("alt", "x"))
            .text("n")
            .build();
        let children = node.child_nodes();

        assert_eq!(children.len(), 3);
        assert_eq!(children[0].text_value(), Some("An"));
        assert_eq!(children[1].element_name(), Some("img"));
        assert_eq!(children[2].text_value(), Some("n"));
    }

    #[test]
    fn clones_share_identity() {
        let node = Node::element("div").build();
        let other = Node::element("div").build();

        assert!(node.ptr_eq(&node.clone()));
        assert!(!node.ptr_eq(&other));
    }

    #[test]
    fn html_roots_are_parsed_as_documents() {
        let page = Node::element("html")
            .child(Node::element("body").child(Node::element("main")))
            .build();

        assert_eq!(page.element_name(), Some("html"));
        let names: Vec<_> = page
            .child_nodes()
            .iter()
            .filter_map(|n| n.element_name().map(String::from))
            .collect();
        assert_eq!(names, vec!["head", "body"]);
    }

    #[test]
    fn fragments_keep_top_level_order() {
        let nodes = Node::parse_fragment(r#"<div id="a"></div>loading<span id="b"></span>"#);

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].attribute("id"), Some("a"));
        assert_eq!(nodes[1].text_value(), Some("loading"));
        assert_eq!(nodes[2].attribute("id"), Some("b"));
    }

    #[test]
    fn markup_includes_attributes() {
        let node = Node::element("a").attr("href", "/x").text("go").build();
        assert_eq!(node.to_markup(), "<a href=\"/x\">go</a>");
    }
}
