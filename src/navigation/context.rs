//! State owned by the navigation machine and mutated by its effects.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::CompiledTracker;
use crate::core::ChangeTracker;
use crate::dom::Node;
use crate::extract::EntryRecord;
use crate::host::{CommandId, Host, WatchHandle, WatchOptions, WatchTarget};
use crate::snapshot::RecordSnapshot;

/// Renders a record as the text offered to the user.
pub type MessageFormatter = Rc<dyn Fn(&EntryRecord) -> String>;

/// Host handle, live subscriptions and the captured record.
pub struct NavigationContext<H> {
    host: Rc<H>,
    root_watch: Option<WatchHandle>,
    feed_watch: Option<WatchHandle>,
    record: Option<EntryRecord>,
    commands: Vec<CommandId>,
    persisted: ChangeTracker<EntryRecord>,
    store_key: String,
    command_label: String,
    formatter: MessageFormatter,
}

impl<H: Host> NavigationContext<H> {
    pub fn new(host: Rc<H>, settings: &CompiledTracker) -> Self {
        Self {
            host,
            root_watch: None,
            feed_watch: None,
            record: None,
            commands: Vec::new(),
            persisted: ChangeTracker::new(),
            store_key: settings.store_key.clone(),
            command_label: settings.command_label.clone(),
            formatter: Rc::new(EntryRecord::summary),
        }
    }

    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&EntryRecord) -> String + 'static,
    {
        self.formatter = Rc::new(formatter);
        self
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    /// Document-wide subscription, once started.
    pub fn root_watch(&self) -> Option<WatchHandle> {
        self.root_watch
    }

    /// Feed subtree subscription, while monitoring the feed.
    pub fn feed_watch(&self) -> Option<WatchHandle> {
        self.feed_watch
    }

    /// The most recently captured record.
    pub fn record(&self) -> Option<&EntryRecord> {
        self.record.as_ref()
    }

    pub fn commands(&self) -> &[CommandId] {
        &self.commands
    }

    pub fn store_key(&self) -> &str {
        &self.store_key
    }

    pub fn format(&self, record: &EntryRecord) -> String {
        (self.formatter)(record)
    }

    pub(crate) fn subscribe_root(&mut self) {
        if self.root_watch.is_some() {
            return;
        }
        let handle = self
            .host
            .subscribe(WatchTarget::Document, WatchOptions::default());
        debug!(handle = handle.raw(), "watching document");
        self.root_watch = Some(handle);
    }

    pub(crate) fn subscribe_feed(&mut self, anchor: Node) {
        self.unsubscribe_feed();
        let handle = self
            .host
            .subscribe(WatchTarget::Node(anchor), WatchOptions::default());
        debug!(handle = handle.raw(), "watching feed");
        self.feed_watch = Some(handle);
    }

    /// Release the feed subscription. Safe to call when there is none.
    pub(crate) fn unsubscribe_feed(&mut self) {
        if let Some(handle) = self.feed_watch.take() {
            self.host.unsubscribe(handle);
            debug!(handle = handle.raw(), "stopped watching feed");
        }
    }

    /// Keep `record` as the current one and persist it if it changed.
    ///
    /// The record only counts as persisted once the store accepted it, so a
    /// failed write is retried by the next identical record.
    pub(crate) fn store_record(&mut self, record: EntryRecord) {
        if self.persisted.last_seen() != Some(&record) && self.persist(&record) {
            self.persisted.observe(record.clone());
        }
        self.record = Some(record);
    }

    fn persist(&self, record: &EntryRecord) -> bool {
        let snapshot = RecordSnapshot::new(record.clone());
        let stored = snapshot
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.host
                    .set_value(&self.store_key, json)
                    .map_err(|e| e.to_string())
            });
        match stored {
            Ok(()) => {
                debug!(
                    snapshot = %snapshot.id,
                    series = %record.series_id,
                    author = %record.author_name,
                    "record persisted"
                );
                true
            }
            Err(error) => {
                warn!(key = %self.store_key, %error, "failed to persist record");
                false
            }
        }
    }

    /// The in-memory record, or the persisted one from an earlier session.
    pub(crate) fn current_or_persisted(&mut self) -> Option<EntryRecord> {
        if let Some(record) = &self.record {
            return Some(record.clone());
        }
        let raw = self.host.get_value(&self.store_key)?;
        match RecordSnapshot::from_json(&raw) {
            Ok(snapshot) => {
                self.persisted.observe(snapshot.record.clone());
                self.record = Some(snapshot.record.clone());
                Some(snapshot.record)
            }
            Err(error) => {
                warn!(key = %self.store_key, %error, "ignoring unreadable snapshot");
                None
            }
        }
    }

    /// Offer the current record as a host command. Does nothing without one.
    pub(crate) fn register_copy_command(&mut self) {
        let Some(record) = self.current_or_persisted() else {
            debug!("no record to offer");
            return;
        };
        let text = self.format(&record);
        let id = self.host.register_command(&self.command_label, &text);
        debug!(command = id.raw(), "command registered");
        self.commands.push(id);
    }

    pub(crate) fn unregister_commands(&mut self) {
        for id in self.commands.drain(..) {
            self.host.unregister_command(id);
            debug!(command = id.raw(), "command unregistered");
        }
    }
}

impl<H> fmt::Debug for NavigationContext<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationContext")
            .field("root_watch", &self.root_watch)
            .field("feed_watch", &self.feed_watch)
            .field("record", &self.record)
            .field("commands", &self.commands)
            .field("store_key", &self.store_key)
            .field("command_label", &self.command_label)
            .finish_non_exhaustive()
    }
}
