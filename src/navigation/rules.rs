//! The navigation rule table.

use std::rc::Rc;

use crate::builder::{BuildError, TransitionBuilder};
use crate::config::CompiledTracker;
use crate::dom::{Node, Query, Selector};
use crate::host::Host;
use crate::machine::{StateMachine, TransitionRule};
use crate::navigation::context::NavigationContext;
use crate::navigation::event::{NavEvent, NavTag, NavigationState};
use crate::navigation::location::{LocationPattern, Locator};

pub type NavigationMachine<H> = StateMachine<NavigationState, NavEvent, NavigationContext<H>>;

pub type NavigationRule<H> = TransitionRule<NavigationState, NavEvent, NavigationContext<H>>;

type Rule<H> = TransitionBuilder<NavigationState, NavEvent, NavigationContext<H>>;

fn any_match(patterns: &[LocationPattern], locator: &Locator) -> bool {
    patterns.iter().any(|p| p.matches(locator))
}

/// Whether the event's anchor currently resolves in the host document.
fn anchor_present<H: Host>(host: &Rc<H>, event: &NavEvent) -> bool {
    event
        .anchor()
        .is_some_and(|anchor| host.document().matches_any(anchor))
}

fn find_anchor<H: Host>(host: &Rc<H>, anchor: &Selector) -> Option<Node> {
    host.document().query(anchor)
}

/// Build the full rule table for `settings`.
///
/// Guards read the host document and the configured location patterns;
/// effects act only through the [`NavigationContext`].
pub fn navigation_rules<H: Host + 'static>(
    host: Rc<H>,
    settings: &CompiledTracker,
) -> Result<Vec<NavigationRule<H>>, BuildError> {
    use NavigationState::*;

    let feed = Rc::new(settings.feed.clone());
    let composer: Rc<[LocationPattern]> = settings.composer.clone().into();

    let on_feed = {
        let feed = Rc::clone(&feed);
        move |event: &NavEvent| event.locator().is_some_and(|l| feed.matches(l))
    };
    let off_feed = {
        let feed = Rc::clone(&feed);
        move |event: &NavEvent| event.locator().is_some_and(|l| !feed.matches(l))
    };
    let on_composer = {
        let composer = Rc::clone(&composer);
        move |event: &NavEvent| event.locator().is_some_and(|l| any_match(&composer, l))
    };
    let off_composer = {
        let composer = Rc::clone(&composer);
        move |event: &NavEvent| event.locator().is_some_and(|l| !any_match(&composer, l))
    };
    let feed_ready = {
        let host = Rc::clone(&host);
        move |event: &NavEvent| anchor_present(&host, event)
    };
    let composer_ready = {
        let host = Rc::clone(&host);
        move |event: &NavEvent| anchor_present(&host, event)
    };

    let rules: Vec<Rule<H>> = vec![
        Rule::new()
            .from(Initial)
            .to(ObservingRoot)
            .on(NavTag::Begin)
            .then(|_, ctx: &mut NavigationContext<H>| ctx.subscribe_root()),
        Rule::new()
            .from(ObservingRoot)
            .to(LoadingFeed)
            .on(NavTag::DetectFeedLocation)
            .when(on_feed),
        Rule::new()
            .from(LoadingFeed)
            .to(MonitoringFeed)
            .on(NavTag::FeedReady)
            .when(feed_ready)
            .then(|event, ctx: &mut NavigationContext<H>| {
                let anchor = event
                    .anchor()
                    .and_then(|anchor| find_anchor(ctx.host(), anchor));
                if let Some(node) = anchor {
                    ctx.subscribe_feed(node);
                }
            }),
        Rule::new()
            .from(LoadingFeed)
            .to(ObservingRoot)
            .on(NavTag::LocationChanged)
            .when(off_feed.clone()),
        Rule::new()
            .from(MonitoringFeed)
            .to(MonitoringFeed)
            .on(NavTag::RecordUpdated)
            .then(|event, ctx: &mut NavigationContext<H>| {
                if let NavEvent::RecordUpdated { record } = event {
                    ctx.store_record(record.clone());
                }
            }),
        Rule::new()
            .from(MonitoringFeed)
            .to(ObservingRoot)
            .on(NavTag::LocationChanged)
            .when(off_feed)
            .then(|_, ctx: &mut NavigationContext<H>| ctx.unsubscribe_feed()),
        Rule::new()
            .from(ObservingRoot)
            .to(LoadingComposer)
            .on(NavTag::DetectComposerLocation)
            .when(on_composer),
        Rule::new()
            .from(LoadingComposer)
            .to(MonitoringComposer)
            .on(NavTag::ComposerReady)
            .when(composer_ready)
            .then(|_, ctx: &mut NavigationContext<H>| ctx.register_copy_command()),
        Rule::new()
            .from(LoadingComposer)
            .to(ObservingRoot)
            .on(NavTag::LocationChanged)
            .when(off_composer.clone()),
        Rule::new()
            .from(MonitoringComposer)
            .to(ObservingRoot)
            .on(NavTag::LocationChanged)
            .when(off_composer)
            .then(|_, ctx: &mut NavigationContext<H>| ctx.unregister_commands()),
    ];

    rules.into_iter().map(TransitionBuilder::build).collect()
}
