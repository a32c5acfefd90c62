//! Entry extraction.
//!
//! A [`Classifier`] decides which structural shape a node has; an
//! [`EntryParser`] runs the classifier and then reads the entry's fields,
//! reporting the first missing piece as a [`FailureReason`].

mod classify;
mod config;
mod parser;
mod record;

#[cfg(test)]
pub(crate) mod fixtures;

pub use classify::Classifier;
pub use config::ExtractionConfig;
pub use parser::{EntryParser, FailureReason};
pub use record::EntryRecord;
