//! Suggestion and refutation.
//!
//! A suggestion first summons the named character's piece into the named
//! room. The other participants are then asked in seating order starting
//! after the asker; the first one holding any of the three cards refutes by
//! showing one of them, chosen at random from the shared stream.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::{CardId, Suggestion};
use crate::core::participant::Participant;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;

/// What came back from asking around the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefutationOutcome {
    pub refuter: Option<PlayerId>,
    /// Only ever revealed to the asker.
    pub card_shown: Option<CardId>,
    /// Participants asked before the refuter who held none of the cards.
    pub passed: Vec<PlayerId>,
}

impl RefutationOutcome {
    #[must_use]
    pub fn refuted(&self) -> bool {
        self.refuter.is_some()
    }

    /// The outcome as seen by everyone except the asker.
    #[must_use]
    pub fn public(&self) -> Self {
        Self {
            refuter: self.refuter,
            card_shown: None,
            passed: self.passed.clone(),
        }
    }
}

/// Resolve `suggestion` made by `asker`.
///
/// Eliminated participants are still asked. The asker never refutes its own
/// suggestion.
pub fn resolve_suggestion(
    asker: PlayerId,
    suggestion: &Suggestion,
    participants: &mut PlayerMap<Participant>,
    board: &Board,
    rng: &mut GameRng,
) -> RefutationOutcome {
    summon(asker, suggestion, participants, board);

    let mut passed = Vec::new();
    for seat in asker.others_after(participants.player_count()) {
        let matching = suggestion.matching(participants[seat].hand());
        if let Some(&card) = rng.choose(matching.as_slice()) {
            info!("{seat} refutes the suggestion of {asker}");
            return RefutationOutcome {
                refuter: Some(seat),
                card_shown: Some(card),
                passed,
            };
        }
        debug!("{seat} cannot refute");
        passed.push(seat);
    }

    info!("nobody refutes the suggestion of {asker}");
    RefutationOutcome {
        refuter: None,
        card_shown: None,
        passed,
    }
}

/// Move the piece of the suggested character, if someone plays it, into the room.
fn summon(asker: PlayerId, suggestion: &Suggestion, participants: &mut PlayerMap<Participant>, board: &Board) {
    let Some(entry) = board.entry_cell(suggestion.room) else {
        return;
    };
    for (seat, participant) in participants.iter_mut() {
        if seat != asker && participant.character() == suggestion.character {
            debug!("{seat} is summoned to {entry}");
            participant.position = entry;
        }
    }
}
