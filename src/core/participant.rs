//! Per-participant state.
//!
//! A participant owns a seat, a character piece, a hand fixed at the deal,
//! a one-way elimination flag and its suggestion history. Automated
//! participants additionally carry a `KnowledgeBase`.

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::player::PlayerId;
use crate::board::{Board, Position};
use crate::cards::{CardId, Catalog};
use crate::deduction::{KnowledgeBase, SuggestionRecord};

/// Who makes a seat's decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerKind {
    Human,
    Automated,
}

/// One seat at the table.
#[derive(Clone, Debug)]
pub struct Participant {
    id: PlayerId,
    name: String,
    character: CardId,
    /// Current cell. Moves during movement and when summoned by a suggestion.
    pub position: Position,
    hand: Vec<CardId>,
    eliminated: bool,
    kind: ControllerKind,
    knowledge: Option<KnowledgeBase>,
    history: Vec<SuggestionRecord>,
}

impl Participant {
    /// Create a participant with an empty hand.
    pub fn new(
        id: PlayerId,
        character: CardId,
        position: Position,
        kind: ControllerKind,
        catalog: &Catalog,
    ) -> Self {
        let knowledge = match kind {
            ControllerKind::Automated => Some(KnowledgeBase::new(id, catalog)),
            ControllerKind::Human => None,
        };
        Self {
            id,
            name: catalog.name(character).to_string(),
            character,
            position,
            hand: Vec::new(),
            eliminated: false,
            kind,
            knowledge,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name: the character this participant plays.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The character card of this participant's piece.
    #[must_use]
    pub fn character(&self) -> CardId {
        self.character
    }

    #[must_use]
    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    #[must_use]
    pub fn is_automated(&self) -> bool {
        self.kind == ControllerKind::Automated
    }

    /// Cards held, in catalog order.
    #[must_use]
    pub fn hand(&self) -> &[CardId] {
        &self.hand
    }

    #[must_use]
    pub fn holds(&self, card: CardId) -> bool {
        self.hand.binary_search(&card).is_ok()
    }

    /// Take a dealt card. Automated participants rule it out of the solution.
    pub fn receive_card(&mut self, card: CardId) -> Result<(), GameError> {
        if let Err(slot) = self.hand.binary_search(&card) {
            self.hand.insert(slot, card);
        }
        if let Some(kb) = &mut self.knowledge {
            kb.observe_own_card(card)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    /// Eliminate after a wrong accusation. There is no way back.
    pub fn eliminate(&mut self) {
        self.eliminated = true;
    }

    /// The room this participant stands in.
    #[must_use]
    pub fn room(&self, board: &Board) -> Option<CardId> {
        board.room_at(self.position)
    }

    #[must_use]
    pub fn knowledge(&self) -> Option<&KnowledgeBase> {
        self.knowledge.as_ref()
    }

    pub fn knowledge_mut(&mut self) -> Option<&mut KnowledgeBase> {
        self.knowledge.as_mut()
    }

    /// Suggestions this participant made, oldest first.
    #[must_use]
    pub fn history(&self) -> &[SuggestionRecord] {
        &self.history
    }

    pub fn record_suggestion(&mut self, record: SuggestionRecord) {
        self.history.push(record);
    }
}
