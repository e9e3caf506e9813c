//! Suggestion history kept by each participant.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Suggestion};
use crate::core::player::PlayerId;

/// One suggestion a participant made and what came back.
///
/// `shown` is private to the participant that made the suggestion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRecord {
    /// Turn number the suggestion was made on.
    pub turn: u32,
    pub suggestion: Suggestion,
    pub refuter: Option<PlayerId>,
    pub shown: Option<CardId>,
}

impl SuggestionRecord {
    #[must_use]
    pub fn new(turn: u32, suggestion: Suggestion, refuter: Option<PlayerId>, shown: Option<CardId>) -> Self {
        Self {
            turn,
            suggestion,
            refuter,
            shown,
        }
    }

    /// Check if someone refuted the suggestion.
    #[must_use]
    pub fn refuted(&self) -> bool {
        self.refuter.is_some()
    }
}
