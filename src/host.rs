//! Capabilities the embedding environment provides.
//!
//! The tracker never touches a page directly. Everything it needs from the
//! outside world (change notifications, the current location, the document,
//! commands, the clipboard, persistent values) comes through these traits.
//! All methods take `&self`; implementations use interior mutability.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::dom::Node;
use crate::navigation::Locator;

/// A live change subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WatchHandle(u64);

impl WatchHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a change subscription observes.
#[derive(Clone, Debug)]
pub enum WatchTarget {
    /// The whole document.
    Document,
    /// A single element and, with `subtree`, its descendants.
    Node(Node),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchOptions {
    /// Report added and removed children.
    pub child_list: bool,
    /// Watch descendants, not only direct children.
    pub subtree: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            child_list: true,
            subtree: true,
        }
    }
}

/// A registered host command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommandId(u64);

impl CommandId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Names one armed record. Single use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionToken(Uuid);

impl CompletionToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompletionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CompletionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Nodes added under a watched target since the last notification.
#[derive(Clone, Debug)]
pub struct ChangeBatch<N = Node> {
    pub added_nodes: Vec<N>,
}

impl<N> ChangeBatch<N> {
    pub fn new(added_nodes: Vec<N>) -> Self {
        Self { added_nodes }
    }

    pub fn empty() -> Self {
        Self {
            added_nodes: Vec::new(),
        }
    }
}

/// Failures reported by host capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("failed to store value under {key}: {message}")]
    Store { key: String, message: String },
}

pub trait ChangeSource {
    fn subscribe(&self, target: WatchTarget, options: WatchOptions) -> WatchHandle;

    /// Stop notifications for `handle`. Takes effect before returning.
    fn unsubscribe(&self, handle: WatchHandle);
}

pub trait LocationSource {
    fn location(&self) -> Locator;
}

pub trait DocumentSource {
    fn document(&self) -> Node;
}

pub trait CommandRegistry {
    fn register_command(&self, label: &str, text: &str) -> CommandId;

    fn unregister_command(&self, id: CommandId);
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), HostError>;
}

pub trait ValueStore {
    fn get_value(&self, key: &str) -> Option<String>;

    fn set_value(&self, key: &str, value: String) -> Result<(), HostError>;
}

/// Lets the host report back when the user acts on an extracted entry.
///
/// The host keeps `token` alongside `node` and later hands it to
/// [`Orchestrator::complete`](crate::Orchestrator::complete).
pub trait CompletionSink {
    fn arm(&self, node: &Node, token: CompletionToken);
}

/// Every capability the tracker uses.
pub trait Host:
    ChangeSource + LocationSource + DocumentSource + CommandRegistry + Clipboard + ValueStore + CompletionSink
{
}

impl<T> Host for T where
    T: ChangeSource
        + LocationSource
        + DocumentSource
        + CommandRegistry
        + Clipboard
        + ValueStore
        + CompletionSink
{
}
