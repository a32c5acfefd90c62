//! In-memory host and page builders shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use entry_tracker::dom::{ElementBuilder, Node};
use entry_tracker::host::{
    ChangeSource, Clipboard, CommandId, CommandRegistry, CompletionSink, CompletionToken,
    DocumentSource, HostError, LocationSource, ValueStore, WatchHandle, WatchOptions, WatchTarget,
};
use entry_tracker::navigation::Locator;

#[derive(Debug)]
pub struct Subscription {
    pub handle: WatchHandle,
    pub document: bool,
}

/// Records every call so tests can assert on what the tracker asked for.
#[derive(Default)]
pub struct MockHost {
    pub location: RefCell<Locator>,
    pub document: RefCell<Option<Node>>,
    pub subscriptions: RefCell<Vec<Subscription>>,
    pub unsubscribed: RefCell<Vec<WatchHandle>>,
    pub commands: RefCell<Vec<(CommandId, String, String)>>,
    pub unregistered: RefCell<Vec<CommandId>>,
    pub clipboard: RefCell<Vec<String>>,
    pub clipboard_fails: Cell<bool>,
    pub values: RefCell<HashMap<String, String>>,
    pub store_fails: Cell<bool>,
    pub writes: Cell<usize>,
    pub armed: RefCell<Vec<(Node, CompletionToken)>>,
    next_id: Cell<u64>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&self, address: &str) {
        *self.location.borrow_mut() = Locator::parse(address);
    }

    pub fn show(&self, document: Node) {
        *self.document.borrow_mut() = Some(document);
    }

    fn next(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    /// Handles that have not been unsubscribed.
    pub fn live_handles(&self) -> Vec<WatchHandle> {
        let gone = self.unsubscribed.borrow();
        self.subscriptions
            .borrow()
            .iter()
            .map(|s| s.handle)
            .filter(|h| !gone.contains(h))
            .collect()
    }

    pub fn document_handle(&self) -> Option<WatchHandle> {
        self.subscriptions
            .borrow()
            .iter()
            .find(|s| s.document)
            .map(|s| s.handle)
    }

    /// The most recent subtree subscription, live or not.
    pub fn feed_handle(&self) -> Option<WatchHandle> {
        self.subscriptions
            .borrow()
            .iter()
            .rev()
            .find(|s| !s.document)
            .map(|s| s.handle)
    }

    pub fn armed_tokens(&self) -> Vec<CompletionToken> {
        self.armed.borrow().iter().map(|(_, token)| *token).collect()
    }
}

impl ChangeSource for MockHost {
    fn subscribe(&self, target: WatchTarget, _options: WatchOptions) -> WatchHandle {
        let handle = WatchHandle::new(self.next());
        self.subscriptions.borrow_mut().push(Subscription {
            handle,
            document: matches!(target, WatchTarget::Document),
        });
        handle
    }

    fn unsubscribe(&self, handle: WatchHandle) {
        self.unsubscribed.borrow_mut().push(handle);
    }
}

impl LocationSource for MockHost {
    fn location(&self) -> Locator {
        self.location.borrow().clone()
    }
}

impl DocumentSource for MockHost {
    fn document(&self) -> Node {
        self.document
            .borrow()
            .clone()
            .unwrap_or_else(|| Node::element("html").build())
    }
}

impl CommandRegistry for MockHost {
    fn register_command(&self, label: &str, text: &str) -> CommandId {
        let id = CommandId::new(self.next());
        self.commands
            .borrow_mut()
            .push((id, label.to_owned(), text.to_owned()));
        id
    }

    fn unregister_command(&self, id: CommandId) {
        self.unregistered.borrow_mut().push(id);
    }
}

impl Clipboard for MockHost {
    fn write_text(&self, text: &str) -> Result<(), HostError> {
        if self.clipboard_fails.get() {
            return Err(HostError::Clipboard("denied".into()));
        }
        self.clipboard.borrow_mut().push(text.to_owned());
        Ok(())
    }
}

impl ValueStore for MockHost {
    fn get_value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set_value(&self, key: &str, value: String) -> Result<(), HostError> {
        if self.store_fails.get() {
            return Err(HostError::Store {
                key: key.to_owned(),
                message: "quota exceeded".into(),
            });
        }
        self.writes.set(self.writes.get() + 1);
        self.values.borrow_mut().insert(key.to_owned(), value);
        Ok(())
    }
}

impl CompletionSink for MockHost {
    fn arm(&self, node: &Node, token: CompletionToken) {
        self.armed.borrow_mut().push((node.clone(), token));
    }
}

fn div() -> ElementBuilder {
    Node::element("div")
}

fn counter(test_id: &str, text: &str) -> ElementBuilder {
    Node::element("button").attr("data-testid", test_id).child(
        div().child(
            Node::element("span")
                .attr("data-testid", "app-text-transition-container")
                .text(text),
        ),
    )
}

/// A well-formed timeline entry.
pub fn entry(series: &str, author: &str, favorites: &str) -> Node {
    let name = div().child(
        div().child(
            Node::element("a")
                .attr("role", "link")
                .attr("href", format!("/{author}"))
                .child(div().child(div().child(Node::element("span").text(author)))),
        ),
    );
    let meta = div().child(
        div()
            .child(div().text(format!("@{author}")))
            .child(div().text("\u{b7}"))
            .child(
                div().child(
                    Node::element("a")
                        .attr("role", "link")
                        .attr("href", format!("/{author}/status/{series}"))
                        .child(Node::element("time").attr("datetime", "2024-03-01T12:00:00.000Z")),
                ),
            ),
    );
    let header = div().child(div().attr("data-testid", "User-Name").child(name).child(meta));
    let body = div().child(
        div()
            .attr("data-testid", "tweetText")
            .text(format!("My board for #KEEB_PD_R{series}")),
    );
    let actions = div().child(
        div()
            .attr("role", "group")
            .child(counter("retweet", "2"))
            .child(counter("like", favorites)),
    );

    div()
        .attr("data-testid", "cellInnerDiv")
        .child(
            div().child(
                div().child(
                    Node::element("article").attr("data-testid", "tweet").child(
                        div().child(
                            div()
                                .child(div().attr("class", "avatar"))
                                .child(div().child(header).child(body).child(actions)),
                        ),
                    ),
                ),
            ),
        )
        .build()
}

/// A page whose feed region holds `entries`.
pub fn feed_page(entries: Vec<Node>) -> Node {
    Node::element("html")
        .child(
            Node::element("body").child(
                div().attr("data-testid", "primaryColumn").child(
                    Node::element("section")
                        .attr("role", "region")
                        .child(div().children(entries)),
                ),
            ),
        )
        .build()
}

pub fn composer_page() -> Node {
    Node::element("html")
        .child(Node::element("body").child(div().child(div().attr("data-testid", "app-bar-close"))))
        .build()
}

pub fn blank_page() -> Node {
    Node::element("html").child(Node::element("body")).build()
}
