//! Deduction: what a participant knows and what it has asked.
//!
//! - `knowledge`: candidate sets of an automated participant
//! - `history`: the suggestions a participant made and their outcome
//! - `tracker`: a readable report derived from the history

pub mod history;
pub mod knowledge;
pub mod tracker;

pub use history::SuggestionRecord;
pub use knowledge::KnowledgeBase;
pub use tracker::{TrackerEntry, TrackerReport, TRACKER_FILE};
