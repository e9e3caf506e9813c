//! Participant controllers.
//!
//! A `Controller` makes the decisions of one seat. The turn controller asks
//! it for a `Command` through a `PlayerView`, which exposes only what that
//! participant is entitled to see, and keeps it informed with `Notice`s.
//!
//! - `NarrowingStrategy`: the automated player
//! - `ScriptedController`: replays a fixed command list (tests, demos)

pub mod narrowing;
pub mod scripted;

pub use narrowing::NarrowingStrategy;
pub use scripted::{NoticeLog, ScriptedController};

use crate::board::{Board, Position};
use crate::cards::{CardId, Catalog, Suggestion};
pub use crate::core::command::Command;
use crate::core::error::InputError;
use crate::core::participant::{ControllerKind, Participant};
use crate::core::player::PlayerId;
use crate::deduction::{KnowledgeBase, SuggestionRecord, TrackerReport};
use crate::rules::{GameResult, GameState, RefutationOutcome, TurnPhase};

/// Decision source of one seat.
pub trait Controller {
    /// Human seats get no knowledge base.
    fn kind(&self) -> ControllerKind;

    /// Pick the next command for the current phase.
    fn decide(&mut self, view: &PlayerView<'_>) -> Command;

    /// Receive information. Ignored by default.
    fn notify(&mut self, _notice: &Notice) {}
}

/// Something a controller is told.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    TurnStarted { player: PlayerId, turn: u32 },
    /// An eliminated seat's turn was skipped.
    Skipped(PlayerId),
    Rolled { player: PlayerId, roll: u32 },
    Moved { player: PlayerId, position: Position, room: Option<CardId> },
    /// Reply to `ViewHand`.
    Hand(Vec<CardId>),
    /// Reply to `ViewTracker`.
    Tracker(TrackerReport),
    /// A suggestion was resolved. Only the asker's copy carries the shown card.
    Refutation {
        asker: PlayerId,
        suggestion: Suggestion,
        outcome: RefutationOutcome,
    },
    Accused {
        player: PlayerId,
        accusation: Suggestion,
        correct: bool,
    },
    Eliminated(PlayerId),
    GameOver(GameResult),
    /// The last command was not applied. The controller is asked again.
    Rejected(InputError),
}

/// Public facts about one seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeatInfo<'a> {
    pub id: PlayerId,
    pub name: &'a str,
    pub position: Position,
    pub eliminated: bool,
}

/// What the deciding participant may look at.
///
/// Never exposes the solution or another participant's hand.
#[derive(Clone, Copy)]
pub struct PlayerView<'a> {
    state: &'a GameState,
    player: PlayerId,
    phase: TurnPhase,
    roll: Option<u32>,
}

impl<'a> PlayerView<'a> {
    pub(crate) fn new(state: &'a GameState, player: PlayerId, phase: TurnPhase, roll: Option<u32>) -> Self {
        Self {
            state,
            player,
            phase,
            roll,
        }
    }

    fn me(&self) -> &'a Participant {
        self.state.participant(self.player)
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// This turn's die roll, once rolled.
    #[must_use]
    pub fn roll(&self) -> Option<u32> {
        self.roll
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.state.turn_number()
    }

    #[must_use]
    pub fn catalog(&self) -> &'a Catalog {
        self.state.catalog()
    }

    #[must_use]
    pub fn board(&self) -> &'a Board {
        self.state.board()
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.me().name()
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.me().position
    }

    #[must_use]
    pub fn room(&self) -> Option<CardId> {
        self.me().room(self.board())
    }

    #[must_use]
    pub fn hand(&self) -> &'a [CardId] {
        self.me().hand()
    }

    #[must_use]
    pub fn history(&self) -> &'a [SuggestionRecord] {
        self.me().history()
    }

    /// Own knowledge base, for automated seats.
    #[must_use]
    pub fn knowledge(&self) -> Option<&'a KnowledgeBase> {
        self.me().knowledge()
    }

    #[must_use]
    pub fn tracker(&self) -> TrackerReport {
        self.state.tracker(self.player)
    }

    /// Every seat's public facts, in seating order.
    pub fn seats(&self) -> impl Iterator<Item = SeatInfo<'a>> + 'a {
        self.state.participants().iter().map(|(id, p)| SeatInfo {
            id,
            name: p.name(),
            position: p.position,
            eliminated: p.is_eliminated(),
        })
    }

    /// Display name of a seat.
    #[must_use]
    pub fn seat_name(&self, player: PlayerId) -> &'a str {
        self.state.participant(player).name()
    }
}
