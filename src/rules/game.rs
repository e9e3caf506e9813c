//! Game state: setup, the deal, per-action rules and the terminal status.
//!
//! `GameState` applies one validated action at a time. It knows nothing about
//! turn phases or controllers; `TurnController` sequences the calls.

use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::suggestion::{resolve_suggestion, RefutationOutcome};
use crate::board::{Board, Direction, Position};
use crate::cards::{CardId, Catalog, Category, Solution, Suggestion};
use crate::core::config::{GameConfig, MIN_PLAYERS};
use crate::core::error::{GameError, InputError};
use crate::core::participant::{ControllerKind, Participant};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::deduction::{SuggestionRecord, TrackerReport};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// A correct accusation.
    Winner(PlayerId),
    /// Every participant was eliminated.
    NoWinner,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Over(GameResult),
}

impl GameStatus {
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Over(_))
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self {
            GameStatus::Over(result) => Some(*result),
            GameStatus::InProgress => None,
        }
    }
}

/// Complete state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    config: Arc<GameConfig>,
    solution: Solution,
    participants: PlayerMap<Participant>,
    rng: GameRng,
    active: PlayerId,
    turn_number: u32,
    status: GameStatus,
}

impl GameState {
    /// Seat one participant per entry of `kinds`, draw the solution and deal.
    ///
    /// Seats take the characters in catalog order. Everything random is drawn
    /// from `rng`, which the game keeps for the rest of play.
    pub fn new(config: Arc<GameConfig>, kinds: &[ControllerKind], mut rng: GameRng) -> Result<Self, GameError> {
        Self::check_player_count(&config, kinds.len())?;
        let solution = Solution::draw(config.catalog(), &mut rng);
        Self::with_solution(config, kinds, solution, rng)
    }

    /// Like `new`, with a fixed solution.
    pub fn with_solution(
        config: Arc<GameConfig>,
        kinds: &[ControllerKind],
        solution: Solution,
        rng: GameRng,
    ) -> Result<Self, GameError> {
        Self::check_player_count(&config, kinds.len())?;

        let participants = PlayerMap::from_vec(
            kinds
                .iter()
                .zip(config.starts())
                .enumerate()
                .map(|(seat, (&kind, &(character, start)))| {
                    Participant::new(PlayerId::new(seat as u8), character, start, kind, config.catalog())
                })
                .collect(),
        );

        let mut state = Self {
            config,
            solution,
            participants,
            rng,
            active: PlayerId::new(0),
            turn_number: 1,
            status: GameStatus::InProgress,
        };
        state.deal()?;
        Ok(state)
    }

    fn check_player_count(config: &GameConfig, count: usize) -> Result<(), GameError> {
        let max = config.max_players();
        if !(MIN_PLAYERS..=max).contains(&count) {
            return Err(InputError::PlayerCount {
                count,
                min: MIN_PLAYERS,
                max,
            }
            .into());
        }
        Ok(())
    }

    /// Shuffle everything but the solution and deal round-robin from seat 0.
    fn deal(&mut self) -> Result<(), GameError> {
        let mut deck: Vec<CardId> = self
            .config
            .catalog()
            .ids()
            .filter(|&card| !self.solution.contains(card))
            .collect();
        self.rng.shuffle(&mut deck);

        let count = self.participants.player_count();
        for (i, card) in deck.into_iter().enumerate() {
            self.participants[PlayerId::new((i % count) as u8)].receive_card(card)?;
        }
        info!("dealt {} hands, {} is first", count, self.participants[self.active].name());
        Ok(())
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &Arc<GameConfig> {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.config.catalog()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.config.board()
    }

    /// The hidden solution. Never handed to controllers.
    #[must_use]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    #[must_use]
    pub fn participants(&self) -> &PlayerMap<Participant> {
        &self.participants
    }

    #[must_use]
    pub fn participant(&self, player: PlayerId) -> &Participant {
        &self.participants[player]
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.participants.player_count()
    }

    /// The seat whose turn it is.
    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    /// Turns started so far, counting from 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Tracker report of a participant's suggestions.
    #[must_use]
    pub fn tracker(&self, player: PlayerId) -> TrackerReport {
        TrackerReport::from_history(self.participants[player].history(), self.catalog(), |p| {
            self.participants[p].name().to_string()
        })
    }

    // === Actions ===

    pub fn roll_die(&mut self) -> u32 {
        self.rng.roll_die()
    }

    /// Move `player` in a straight line. `steps` must be within `1..=roll`.
    pub fn move_participant(
        &mut self,
        player: PlayerId,
        direction: Direction,
        steps: u32,
        roll: u32,
    ) -> Result<Position, InputError> {
        if steps == 0 || steps > roll {
            return Err(InputError::StepsOutOfRange { steps, max: roll });
        }
        let participant = &mut self.participants[player];
        let target = self.config.board().step(participant.position, direction, steps)?;
        debug!("{} moves {direction} {steps} to {target}", participant.name());
        participant.position = target;
        Ok(target)
    }

    /// Take the secret passage of the current room.
    pub fn take_passage(&mut self, player: PlayerId, destination: CardId) -> Result<Position, InputError> {
        let participant = &mut self.participants[player];
        let target = self
            .config
            .board()
            .passage_from(participant.position, destination, self.config.catalog())?;
        debug!("{} takes the passage to {target}", participant.name());
        participant.position = target;
        Ok(target)
    }

    /// Check the cards of a suggestion. A missing room means the current room.
    ///
    /// Only automated seats may name a room other than the one they stand in.
    pub fn validate_suggestion(
        &self,
        player: PlayerId,
        character: CardId,
        weapon: CardId,
        room: Option<CardId>,
    ) -> Result<Suggestion, InputError> {
        let participant = &self.participants[player];
        let current = participant.room(self.board());
        let room = match room {
            Some(room) if participant.kind() == ControllerKind::Human && current != Some(room) => {
                return Err(match current {
                    Some(_) => InputError::NotCurrentRoom(self.catalog().name(room).to_string()),
                    None => InputError::NotInRoom,
                });
            }
            Some(room) => room,
            None => current.ok_or(InputError::NotInRoom)?,
        };
        let suggestion = Suggestion::new(character, weapon, room);
        self.check_triple(&suggestion)?;
        Ok(suggestion)
    }

    /// Check that each card of a triple belongs to its category.
    pub fn check_triple(&self, triple: &Suggestion) -> Result<(), InputError> {
        let catalog = self.catalog();
        for category in Category::ALL {
            let card = triple.get(category);
            if catalog.category(card) != Some(category) {
                return Err(match catalog.get(card) {
                    Some(def) => InputError::WrongCategory {
                        name: def.name.clone(),
                        expected: category,
                    },
                    None => InputError::UnknownCard(card.to_string()),
                });
            }
        }
        Ok(())
    }

    /// Resolve a validated suggestion and feed the outcome to every knowledge base.
    ///
    /// The asker learns the shown card. Other automated participants only
    /// learn who could not refute.
    pub fn suggest(&mut self, player: PlayerId, suggestion: Suggestion) -> Result<RefutationOutcome, GameError> {
        let outcome = resolve_suggestion(
            player,
            &suggestion,
            &mut self.participants,
            self.config.board(),
            &mut self.rng,
        );

        let count = self.participants.player_count();
        let asker = &mut self.participants[player];
        if let Some(kb) = asker.knowledge_mut() {
            match (outcome.refuter, outcome.card_shown) {
                (Some(refuter), Some(shown)) => {
                    kb.observe_refutation(&suggestion, refuter, shown, &outcome.passed)?;
                }
                _ => kb.observe_unrefuted(&suggestion, PlayerId::all(count))?,
            }
        }
        asker.record_suggestion(SuggestionRecord::new(
            self.turn_number,
            suggestion,
            outcome.refuter,
            outcome.card_shown,
        ));

        for (seat, other) in self.participants.iter_mut() {
            if seat == player {
                continue;
            }
            if let Some(kb) = other.knowledge_mut() {
                kb.observe_public_refutation(&suggestion, &outcome.passed);
            }
        }
        Ok(outcome)
    }

    /// Judge an accusation. Returns whether it was correct.
    ///
    /// A correct accusation ends the game. A wrong one eliminates the
    /// accuser, and the game ends without a winner once nobody is left.
    pub fn accuse(&mut self, player: PlayerId, accusation: &Suggestion) -> bool {
        if self.solution.matches(accusation) {
            info!("{} accuses correctly", self.participants[player].name());
            self.status = GameStatus::Over(GameResult::Winner(player));
            return true;
        }

        info!("{} accuses wrongly and is eliminated", self.participants[player].name());
        self.participants[player].eliminate();
        if self.participants.values().all(Participant::is_eliminated) {
            info!("every participant is eliminated");
            self.status = GameStatus::Over(GameResult::NoWinner);
        }
        false
    }

    /// Pass the turn to the next seat. Eliminated seats keep their slot.
    pub fn advance_turn(&mut self) {
        self.active = self.active.next(self.participants.player_count());
        self.turn_number += 1;
    }
}
