//! Feed Session
//!
//! Simulates a browsing session against an in-memory page: open the contest
//! feed, let a few entries render, pick one, then open the composer and copy
//! the captured entry.
//!
//! Key concepts:
//! - A host implementing the capability traits with interior mutability
//! - Routing change batches by watch handle
//! - Deferred record updates through completion tokens
//!
//! Run with: RUST_LOG=debug cargo run --example feed_session

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use entry_tracker::dom::{ElementBuilder, Node};
use entry_tracker::host::{
    ChangeBatch, ChangeSource, Clipboard, CommandId, CommandRegistry, CompletionSink,
    CompletionToken, DocumentSource, HostError, LocationSource, ValueStore, WatchHandle,
    WatchOptions, WatchTarget,
};
use entry_tracker::navigation::Locator;
use entry_tracker::{Orchestrator, TrackerConfig};
use tracing_subscriber::EnvFilter;

// A page that only changes when the session says so
#[derive(Default)]
struct Page {
    location: RefCell<Locator>,
    document: RefCell<Option<Node>>,
    watches: RefCell<Vec<(WatchHandle, bool)>>,
    next: Cell<u64>,
    menu: RefCell<HashMap<CommandId, (String, String)>>,
    clipboard: RefCell<Option<String>>,
    storage: RefCell<HashMap<String, String>>,
    armed: RefCell<Vec<(Node, CompletionToken)>>,
}

impl Page {
    fn id(&self) -> u64 {
        self.next.set(self.next.get() + 1);
        self.next.get()
    }

    fn open(&self, address: &str, document: Node) {
        *self.location.borrow_mut() = Locator::parse(address);
        *self.document.borrow_mut() = Some(document);
    }

    fn handle(&self, document: bool) -> Option<WatchHandle> {
        self.watches
            .borrow()
            .iter()
            .rev()
            .find(|(_, is_document)| *is_document == document)
            .map(|(handle, _)| *handle)
    }
}

impl ChangeSource for Page {
    fn subscribe(&self, target: WatchTarget, _options: WatchOptions) -> WatchHandle {
        let handle = WatchHandle::new(self.id());
        let document = matches!(target, WatchTarget::Document);
        self.watches.borrow_mut().push((handle, document));
        handle
    }

    fn unsubscribe(&self, handle: WatchHandle) {
        self.watches.borrow_mut().retain(|(h, _)| *h != handle);
    }
}

impl LocationSource for Page {
    fn location(&self) -> Locator {
        self.location.borrow().clone()
    }
}

impl DocumentSource for Page {
    fn document(&self) -> Node {
        self.document
            .borrow()
            .clone()
            .unwrap_or_else(|| Node::element("html").build())
    }
}

impl CommandRegistry for Page {
    fn register_command(&self, label: &str, text: &str) -> CommandId {
        let id = CommandId::new(self.id());
        self.menu
            .borrow_mut()
            .insert(id, (label.to_owned(), text.to_owned()));
        id
    }

    fn unregister_command(&self, id: CommandId) {
        self.menu.borrow_mut().remove(&id);
    }
}

impl Clipboard for Page {
    fn write_text(&self, text: &str) -> Result<(), HostError> {
        *self.clipboard.borrow_mut() = Some(text.to_owned());
        Ok(())
    }
}

impl ValueStore for Page {
    fn get_value(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    fn set_value(&self, key: &str, value: String) -> Result<(), HostError> {
        self.storage.borrow_mut().insert(key.to_owned(), value);
        Ok(())
    }
}

impl CompletionSink for Page {
    fn arm(&self, node: &Node, token: CompletionToken) {
        self.armed.borrow_mut().push((node.clone(), token));
    }
}

fn div() -> ElementBuilder {
    Node::element("div")
}

fn entry(round: u32, author: &str, likes: u32) -> Node {
    let count = |id: &str, n: u32| {
        Node::element("button").attr("data-testid", id).child(div().child(
            Node::element("span")
                .attr("data-testid", "app-text-transition-container")
                .text(n.to_string()),
        ))
    };
    let user = div()
        .attr("data-testid", "User-Name")
        .child(div().child(div().child(
            Node::element("a").attr("role", "link").child(
                div().child(div().child(Node::element("span").text(author))),
            ),
        )))
        .child(div().child(
            div().child(div()).child(div()).child(
                div().child(
                    Node::element("a")
                        .attr("role", "link")
                        .attr("href", format!("/{author}/status/{round}"))
                        .child(Node::element("time").attr("datetime", "2024-05-04T09:30:00Z")),
                ),
            ),
        ));
    let content = div()
        .child(div().child(user))
        .child(div().child(
            div()
                .attr("data-testid", "tweetText")
                .text(format!("#KEEB_PD_R{round} finished my build")),
        ))
        .child(div().child(count("retweet", 1)).child(count("like", likes)));

    div()
        .attr("data-testid", "cellInnerDiv")
        .child(div().child(div().child(
            Node::element("article")
                .attr("data-testid", "tweet")
                .child(div().child(div().child(div()).child(content))),
        )))
        .build()
}

fn feed(entries: Vec<Node>) -> Node {
    Node::element("html")
        .child(div().attr("data-testid", "primaryColumn").child(
            Node::element("section").attr("role", "region").child(div().children(entries)),
        ))
        .build()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let page = Rc::new(Page::default());
    let mut tracker = match Orchestrator::new(Rc::clone(&page), &TrackerConfig::default()) {
        Ok(tracker) => tracker,
        Err(errors) => {
            eprintln!("{errors}");
            return;
        }
    };
    tracker.add_listener(|result| {
        if let Some(to) = result.to_state() {
            println!("  {} -> {}", result.from_state(), to);
        }
    });

    println!("=== Start ===");
    tracker.start();
    let root = page.handle(true).expect("document watch");

    println!("\n=== Open feed ===");
    let entries = vec![entry(12, "ann", 31), entry(12, "bo", 7)];
    page.open("https://x.com/search?q=%23KEEB_PD_R12&f=live", feed(entries.clone()));
    tracker.handle_batch(root, &ChangeBatch::empty());

    let fine = page.handle(false).expect("feed watch");
    tracker.handle_batch(fine, &ChangeBatch::new(entries));
    println!("armed entries: {}", tracker.pending());

    println!("\n=== Pick the first entry ===");
    let token = page.armed.borrow()[0].1;
    tracker.complete(token);
    if let Some(record) = tracker.context().record() {
        println!("captured: {}", record.summary());
    }

    println!("\n=== Open composer ===");
    page.open(
        "https://x.com/compose/post",
        Node::parse_document(r#"<html><body><div data-testid="app-bar-close"></div></body></html>"#),
    );
    tracker.handle_batch(root, &ChangeBatch::empty());
    tracker.handle_batch(root, &ChangeBatch::empty());
    for (label, text) in page.menu.borrow().values() {
        println!("menu: {label} => {text}");
    }

    if tracker.copy_current() {
        println!("clipboard: {:?}", page.clipboard.borrow());
    }
}
