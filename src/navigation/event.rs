//! Navigation states and events.

use std::fmt;

use crate::core::Event;
use crate::dom::Selector;
use crate::extract::EntryRecord;
use crate::navigation::Locator;
use crate::state_enum;

state_enum! {
    /// Where the tracker believes the page is.
    pub enum NavigationState {
        /// Nothing observed yet.
        Initial,
        /// Watching the whole document for a recognizable location.
        ObservingRoot,
        /// On the feed, waiting for it to render.
        LoadingFeed,
        /// Feed rendered; new entries are being parsed.
        MonitoringFeed,
        /// On the composer, waiting for it to render.
        LoadingComposer,
        /// Composer rendered; the copy command is registered.
        MonitoringComposer,
    }
}

/// Inputs to the navigation machine.
#[derive(Clone, Debug)]
pub enum NavEvent {
    Begin,
    DetectFeedLocation { locator: Locator },
    FeedReady { anchor: Selector },
    DetectComposerLocation { locator: Locator },
    ComposerReady { anchor: Selector },
    LocationChanged { locator: Locator },
    RecordUpdated { record: EntryRecord },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavTag {
    Begin,
    DetectFeedLocation,
    FeedReady,
    DetectComposerLocation,
    ComposerReady,
    LocationChanged,
    RecordUpdated,
}

impl fmt::Display for NavTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Event for NavEvent {
    type Tag = NavTag;

    fn tag(&self) -> NavTag {
        match self {
            Self::Begin => NavTag::Begin,
            Self::DetectFeedLocation { .. } => NavTag::DetectFeedLocation,
            Self::FeedReady { .. } => NavTag::FeedReady,
            Self::DetectComposerLocation { .. } => NavTag::DetectComposerLocation,
            Self::ComposerReady { .. } => NavTag::ComposerReady,
            Self::LocationChanged { .. } => NavTag::LocationChanged,
            Self::RecordUpdated { .. } => NavTag::RecordUpdated,
        }
    }
}

impl NavEvent {
    /// The locator carried by location events.
    pub fn locator(&self) -> Option<&Locator> {
        match self {
            Self::DetectFeedLocation { locator }
            | Self::DetectComposerLocation { locator }
            | Self::LocationChanged { locator } => Some(locator),
            _ => None,
        }
    }

    /// The anchor carried by readiness events.
    pub fn anchor(&self) -> Option<&Selector> {
        match self {
            Self::FeedReady { anchor } | Self::ComposerReady { anchor } => Some(anchor),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[test]
    fn tags_display_in_camel_case() {
        let event = NavEvent::LocationChanged {
            locator: Locator::new("/home", ""),
        };
        assert_eq!(event.tag().to_string(), "LocationChanged");
        assert_eq!(NavigationState::MonitoringFeed.name(), "MonitoringFeed");
    }

    #[test]
    fn payload_accessors() {
        let anchor = Selector::parse("section").unwrap();
        let ready = NavEvent::FeedReady {
            anchor: anchor.clone(),
        };

        assert_eq!(ready.anchor().map(Selector::as_str), Some("section"));
        assert!(ready.locator().is_none());
        assert!(NavEvent::Begin.anchor().is_none());
    }
}
