//! Bridges host change notifications to the navigation machine.
//!
//! Document-wide notifications become location and readiness events. Feed
//! notifications are parsed into records, which are armed on the host and
//! only dispatched once the host reports them complete.

use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, info, trace, warn};

use crate::builder::StateMachineBuilder;
use crate::config::{CompiledTracker, ConfigError, ConfigErrors, TrackerConfig};
use crate::core::{ChangeTracker, Event};
use crate::dom::Node;
use crate::extract::{EntryParser, EntryRecord};
use crate::host::{ChangeBatch, CompletionToken, Host, WatchHandle};
use crate::machine::{ListenerId, TransitionResult};
use crate::navigation::{
    navigation_rules, NavEvent, NavTag, NavigationContext, NavigationMachine, NavigationState,
};

/// A parsed entry waiting for the host to fire its token.
struct Armed {
    token: CompletionToken,
    node: Node,
    record: EntryRecord,
}

/// Drives a [`NavigationMachine`] from host notifications.
pub struct Orchestrator<H: Host + 'static> {
    host: Rc<H>,
    machine: NavigationMachine<H>,
    parser: EntryParser,
    settings: CompiledTracker,
    location: ChangeTracker<String>,
    /// Oldest first, at most `settings.max_pending` long.
    pending: VecDeque<Armed>,
}

impl<H: Host + 'static> Orchestrator<H> {
    /// Validate `config` and build the machine with the default formatter.
    pub fn new(host: Rc<H>, config: &TrackerConfig) -> Result<Self, ConfigErrors> {
        Self::with_formatter(host, config, EntryRecord::summary)
    }

    /// Like [`new`](Self::new), rendering records with `formatter`.
    pub fn with_formatter<F>(
        host: Rc<H>,
        config: &TrackerConfig,
        formatter: F,
    ) -> Result<Self, ConfigErrors>
    where
        F: Fn(&EntryRecord) -> String + 'static,
    {
        let (settings, parser) = match (config.compile(), EntryParser::new(&config.extraction)) {
            (Ok(settings), Ok(parser)) => (settings, parser),
            (settings, parser) => {
                let mut errors = Vec::new();
                if let Err(e) = settings {
                    errors.extend(e.0);
                }
                if let Err(e) = parser {
                    errors.extend(e.0);
                }
                return Err(ConfigErrors(errors));
            }
        };

        let context = NavigationContext::new(Rc::clone(&host), &settings).with_formatter(formatter);
        let rules =
            navigation_rules(Rc::clone(&host), &settings).map_err(ConfigError::InvalidRules)?;
        let machine = StateMachineBuilder::new()
            .initial(NavigationState::Initial)
            .context(context)
            .rules(rules)
            .build()
            .map_err(ConfigError::InvalidRules)?;
        debug!(rules = machine.rules().len(), "navigation machine built");

        Ok(Self {
            host,
            machine,
            parser,
            settings,
            location: ChangeTracker::new(),
            pending: VecDeque::new(),
        })
    }

    /// Begin observing the document.
    pub fn start(&mut self) -> TransitionResult<NavigationState, NavEvent> {
        let result = self.machine.dispatch(NavEvent::Begin);
        if result.is_success() {
            info!("tracker started");
        }
        result
    }

    /// Route a notification batch by the subscription it arrived on.
    ///
    /// Batches for handles that are not currently live are ignored.
    pub fn handle_batch(&mut self, handle: WatchHandle, batch: &ChangeBatch<Node>) {
        let context = self.machine.context();
        if context.root_watch() == Some(handle) {
            self.on_document_change();
        } else if context.feed_watch() == Some(handle)
            && self.machine.is(&NavigationState::MonitoringFeed)
        {
            self.on_feed_change(batch);
        } else {
            trace!(handle = handle.raw(), "ignoring batch for stale watch");
        }
    }

    fn on_document_change(&mut self) {
        let locator = self.host.location();
        if self.location.observe(locator.to_string()) {
            debug!(location = %locator, state = %self.machine.state(), "location observed");
        }

        let candidates = [
            NavEvent::DetectFeedLocation {
                locator: locator.clone(),
            },
            NavEvent::FeedReady {
                anchor: self.settings.feed_anchor.clone(),
            },
            NavEvent::DetectComposerLocation {
                locator: locator.clone(),
            },
            NavEvent::ComposerReady {
                anchor: self.settings.composer_anchor.clone(),
            },
        ];
        for event in candidates {
            let tag = event.tag();
            if self.machine.try_dispatch(event) {
                trace!(event = %tag, "candidate accepted");
            }
        }

        if self.machine.can_handle(NavTag::LocationChanged) {
            let locator = match self.machine.state() {
                NavigationState::LoadingComposer | NavigationState::MonitoringComposer => {
                    locator.path_only()
                }
                _ => locator,
            };
            self.machine.dispatch(NavEvent::LocationChanged { locator });
        }

        if !self.machine.is(&NavigationState::MonitoringFeed) && !self.pending.is_empty() {
            debug!(dropped = self.pending.len(), "left feed; dropping armed entries");
            self.pending.clear();
        }
    }

    fn on_feed_change(&mut self, batch: &ChangeBatch<Node>) {
        for node in &batch.added_nodes {
            match self.parser.parse(node) {
                Ok(record) => self.arm(node, record),
                Err(reason) => trace!(%reason, "node skipped"),
            }
        }
    }

    /// Arm `node` with a fresh token, retiring its previous token and the
    /// oldest entries beyond the pending limit.
    fn arm(&mut self, node: &Node, record: EntryRecord) {
        if let Some(index) = self.pending.iter().position(|armed| armed.node.ptr_eq(node)) {
            if let Some(stale) = self.pending.remove(index) {
                trace!(token = %stale.token, "node re-added; previous token retired");
            }
        }
        while self.pending.len() >= self.settings.max_pending {
            let Some(oldest) = self.pending.pop_front() else {
                break;
            };
            debug!(token = %oldest.token, "pending limit reached; oldest token retired");
        }

        let token = CompletionToken::new();
        self.host.arm(node, token);
        info!(
            %token,
            series = %record.series_id,
            author = %record.author_name,
            favorites = record.favorite_count,
            "entry armed"
        );
        self.pending.push_back(Armed {
            token,
            node: node.clone(),
            record,
        });
    }

    /// The host reports that the entry behind `token` was acted on.
    ///
    /// Dispatches `RecordUpdated` with the armed record. Returns `None` for
    /// spent or unknown tokens.
    pub fn complete(
        &mut self,
        token: CompletionToken,
    ) -> Option<TransitionResult<NavigationState, NavEvent>> {
        let Some(armed) = self
            .pending
            .iter()
            .position(|armed| armed.token == token)
            .and_then(|index| self.pending.remove(index))
        else {
            trace!(%token, "unknown or spent token");
            return None;
        };
        Some(self.machine.dispatch(NavEvent::RecordUpdated {
            record: armed.record,
        }))
    }

    /// Write the formatted current record to the host clipboard.
    ///
    /// Returns `false` when there is no record or the clipboard refuses.
    pub fn copy_current(&self) -> bool {
        let context = self.machine.context();
        let Some(record) = context.record() else {
            debug!("nothing to copy");
            return false;
        };
        match self.host.write_text(&context.format(record)) {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "clipboard write failed");
                false
            }
        }
    }

    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TransitionResult<NavigationState, NavEvent>) + 'static,
    {
        self.machine.add_listener(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.machine.remove_listener(id)
    }

    pub fn state(&self) -> NavigationState {
        *self.machine.state()
    }

    pub fn context(&self) -> &NavigationContext<H> {
        self.machine.context()
    }

    /// Number of armed records awaiting completion.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
