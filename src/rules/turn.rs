//! Turn controller: the per-turn state machine.
//!
//! ```text
//! Start -> RollDie -> Movement -> RoomEntryCheck -> Suggestion -> Accusation -> TurnEnd
//!                        |              |                                         ^
//!                        |              +------------- not in a room -------------+
//!                        +------------------------ Accuse ------------------------+
//! ```
//!
//! Queries (`ViewHand`, `ViewTracker`) are answered in any phase that asks
//! the controller and never end the phase. A command that cannot be applied
//! is rejected without touching state and the controller is asked again.

use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::game::{GameState, GameStatus};
use crate::cards::Suggestion;
use crate::core::command::Command;
use crate::core::config::GameConfig;
use crate::core::error::{GameError, InputError};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::strategy::{Controller, Notice, PlayerView};

/// Rejections in a row after which a controller is considered stuck.
pub const MAX_REJECTIONS: u32 = 64;

/// Where the active participant is within its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Start,
    RollDie,
    Movement,
    RoomEntryCheck,
    Suggestion,
    Accusation,
    TurnEnd,
}

impl TurnPhase {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TurnPhase::Start => "turn start",
            TurnPhase::RollDie => "the die roll",
            TurnPhase::Movement => "movement",
            TurnPhase::RoomEntryCheck => "room entry",
            TurnPhase::Suggestion => "the suggestion",
            TurnPhase::Accusation => "the accusation window",
            TurnPhase::TurnEnd => "turn end",
        }
    }
}

/// How a phase ended.
enum Step {
    Continue,
    Accused,
}

/// Drives a game: asks controllers for commands and applies them.
pub struct TurnController {
    state: GameState,
    controllers: PlayerMap<Box<dyn Controller>>,
}

impl TurnController {
    /// Start a game with one seat per controller.
    pub fn new(config: Arc<GameConfig>, controllers: Vec<Box<dyn Controller>>, rng: GameRng) -> Result<Self, GameError> {
        let kinds: Vec<_> = controllers.iter().map(|c| c.kind()).collect();
        let state = GameState::new(config, &kinds, rng)?;
        Self::from_state(state, controllers)
    }

    /// Drive an existing game. Needs exactly one controller per seat.
    pub fn from_state(state: GameState, controllers: Vec<Box<dyn Controller>>) -> Result<Self, GameError> {
        let seats = state.player_count();
        if controllers.len() != seats {
            return Err(InputError::PlayerCount {
                count: controllers.len(),
                min: seats,
                max: seats,
            }
            .into());
        }
        Ok(Self {
            state,
            controllers: PlayerMap::from_vec(controllers),
        })
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Play turns until the game is over or `limit` turns have been played.
    pub fn run(&mut self, limit: Option<u32>) -> Result<GameStatus, GameError> {
        let mut played = 0;
        while !self.state.is_over() {
            if limit.is_some_and(|limit| played >= limit) {
                break;
            }
            self.play_turn()?;
            played += 1;
        }
        Ok(self.state.status())
    }

    /// Play the active participant's turn, then pass to the next seat.
    pub fn play_turn(&mut self) -> Result<(), GameError> {
        if self.state.is_over() {
            return Ok(());
        }
        let player = self.state.active();
        let turn = self.state.turn_number();
        info!("turn {turn}: {}", self.state.participant(player).name());
        self.broadcast(&Notice::TurnStarted { player, turn });

        if self.state.participant(player).is_eliminated() {
            self.broadcast(&Notice::Skipped(player));
        } else {
            self.take_turn(player)?;
        }

        if let GameStatus::Over(result) = self.state.status() {
            self.broadcast(&Notice::GameOver(result));
        } else {
            self.state.advance_turn();
        }
        Ok(())
    }

    fn take_turn(&mut self, player: PlayerId) -> Result<(), GameError> {
        let roll = self.state.roll_die();
        self.broadcast(&Notice::Rolled { player, roll });

        let entered = match self.movement(player, roll)? {
            Some(entered) => entered,
            None => return Ok(()),
        };
        if !entered {
            return Ok(());
        }

        if let Step::Accused = self.suggestion(player, roll)? {
            return Ok(());
        }
        self.accusation(player, roll)
    }

    /// Returns whether a room was entered, or `None` after an accusation.
    fn movement(&mut self, player: PlayerId, roll: u32) -> Result<Option<bool>, GameError> {
        let phase = TurnPhase::Movement;
        let mut rejections = 0;
        loop {
            let command = self.ask(player, phase, Some(roll));
            let applied = match command {
                Command::Move { direction, steps } => self
                    .state
                    .move_participant(player, direction, steps, roll),
                Command::SecretPassage { destination } => self.state.take_passage(player, destination),
                Command::Remain => match self.state.participant(player).room(self.state.board()) {
                    Some(_) => Ok(self.state.participant(player).position),
                    None => Err(InputError::NotInRoom),
                },
                Command::Accuse(accusation) => {
                    if self.accuse(player, &accusation, &mut rejections)? {
                        return Ok(None);
                    }
                    continue;
                }
                query if query.is_query() => {
                    self.answer(player, &query);
                    continue;
                }
                other => Err(not_allowed(&other, phase)),
            };

            match applied {
                Ok(position) => {
                    let room = self.state.board().room_at(position);
                    self.broadcast(&Notice::Moved { player, position, room });
                    return Ok(Some(room.is_some()));
                }
                Err(err) => self.reject(player, err, &mut rejections)?,
            }
        }
    }

    fn suggestion(&mut self, player: PlayerId, roll: u32) -> Result<Step, GameError> {
        let phase = TurnPhase::Suggestion;
        let mut rejections = 0;
        loop {
            match self.ask(player, phase, Some(roll)) {
                Command::Suggest { character, weapon, room } => {
                    match self.state.validate_suggestion(player, character, weapon, room) {
                        Ok(suggestion) => {
                            self.resolve(player, suggestion)?;
                            return Ok(Step::Continue);
                        }
                        Err(err) => self.reject(player, err, &mut rejections)?,
                    }
                }
                Command::Accuse(accusation) => {
                    if self.accuse(player, &accusation, &mut rejections)? {
                        return Ok(Step::Accused);
                    }
                }
                query if query.is_query() => self.answer(player, &query),
                other => self.reject(player, not_allowed(&other, phase), &mut rejections)?,
            }
        }
    }

    fn accusation(&mut self, player: PlayerId, roll: u32) -> Result<(), GameError> {
        let phase = TurnPhase::Accusation;
        let mut rejections = 0;
        loop {
            match self.ask(player, phase, Some(roll)) {
                Command::EndTurn => return Ok(()),
                Command::Accuse(accusation) => {
                    if self.accuse(player, &accusation, &mut rejections)? {
                        return Ok(());
                    }
                }
                query if query.is_query() => self.answer(player, &query),
                other => self.reject(player, not_allowed(&other, phase), &mut rejections)?,
            }
        }
    }

    fn resolve(&mut self, player: PlayerId, suggestion: Suggestion) -> Result<(), GameError> {
        info!(
            "{} suggests {}",
            self.state.participant(player).name(),
            suggestion.describe(self.state.catalog())
        );
        let outcome = self.state.suggest(player, suggestion)?;

        // Everyone sees where the summoned piece went.
        for (seat, participant) in self.state.participants().iter() {
            if seat != player && participant.character() == suggestion.character {
                let notice = Notice::Moved {
                    player: seat,
                    position: participant.position,
                    room: Some(suggestion.room),
                };
                for controller in self.controllers.values_mut() {
                    controller.notify(&notice);
                }
            }
        }

        let public = outcome.public();
        for (seat, controller) in self.controllers.iter_mut() {
            let outcome = if seat == player { outcome.clone() } else { public.clone() };
            controller.notify(&Notice::Refutation {
                asker: player,
                suggestion,
                outcome,
            });
        }
        Ok(())
    }

    /// Apply an accusation. Returns `true` once it has been judged.
    fn accuse(&mut self, player: PlayerId, accusation: &Suggestion, rejections: &mut u32) -> Result<bool, GameError> {
        if let Err(err) = self.state.check_triple(accusation) {
            self.reject(player, err, rejections)?;
            return Ok(false);
        }
        let correct = self.state.accuse(player, accusation);
        self.broadcast(&Notice::Accused {
            player,
            accusation: *accusation,
            correct,
        });
        if !correct {
            self.broadcast(&Notice::Eliminated(player));
        }
        Ok(true)
    }

    fn answer(&mut self, player: PlayerId, query: &Command) {
        let notice = match query {
            Command::ViewTracker => Notice::Tracker(self.state.tracker(player)),
            _ => Notice::Hand(self.state.participant(player).hand().to_vec()),
        };
        self.controllers[player].notify(&notice);
    }

    fn ask(&mut self, player: PlayerId, phase: TurnPhase, roll: Option<u32>) -> Command {
        let view = PlayerView::new(&self.state, player, phase, roll);
        self.controllers[player].decide(&view)
    }

    fn reject(&mut self, player: PlayerId, err: InputError, rejections: &mut u32) -> Result<(), GameError> {
        *rejections += 1;
        warn!("{} rejected: {err}", self.state.participant(player).name());
        if *rejections >= MAX_REJECTIONS {
            return Err(GameError::ControllerStalled {
                player,
                attempts: *rejections,
            });
        }
        self.controllers[player].notify(&Notice::Rejected(err));
        Ok(())
    }

    fn broadcast(&mut self, notice: &Notice) {
        for controller in self.controllers.values_mut() {
            controller.notify(notice);
        }
    }
}

fn not_allowed(command: &Command, phase: TurnPhase) -> InputError {
    InputError::NotAllowed {
        command: command.name(),
        phase: phase.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Direction;
    use crate::cards::Solution;
    use crate::core::participant::ControllerKind;
    use crate::rules::GameResult;
    use crate::strategy::{NoticeLog, ScriptedController};

    fn scripted(commands: Vec<Command>) -> (Box<dyn Controller>, NoticeLog) {
        let controller = ScriptedController::new(ControllerKind::Human, commands);
        let log = controller.log();
        (Box::new(controller), log)
    }

    fn game(seats: Vec<Box<dyn Controller>>, solution: [&str; 3], seed: u64) -> TurnController {
        let config = GameConfig::reference().unwrap();
        let kinds: Vec<_> = seats.iter().map(|c| c.kind()).collect();
        let solution = Solution::new(
            Suggestion::from_names(config.catalog(), solution[0], solution[1], solution[2]).unwrap(),
        );
        let state = GameState::with_solution(config, &kinds, solution, GameRng::new(seed)).unwrap();
        TurnController::from_state(state, seats).unwrap()
    }

    fn accuse(config: &GameConfig, names: [&str; 3]) -> Command {
        Command::Accuse(Suggestion::from_names(config.catalog(), names[0], names[1], names[2]).unwrap())
    }

    #[test]
    fn test_correct_accusation_stops_the_game() {
        let config = GameConfig::reference().unwrap();
        let (first, _) = scripted(vec![accuse(&config, ["Ivy", "Bust", "Hall"])]);
        let (second, log) = scripted(vec![]);
        let mut tc = game(vec![first, second], ["Ivy", "Bust", "Hall"], 1);

        let status = tc.run(Some(10)).unwrap();

        assert_eq!(status, GameStatus::Over(GameResult::Winner(PlayerId::new(0))));
        assert_eq!(tc.state().turn_number(), 1);
        assert!(log.contains(&Notice::GameOver(GameResult::Winner(PlayerId::new(0)))));
    }

    #[test]
    fn test_rejected_commands_keep_the_turn() {
        let config = GameConfig::reference().unwrap();
        let (first, log) = scripted(vec![
            Command::EndTurn,
            Command::Remain,
            Command::Move { direction: Direction::Up, steps: 9 },
            Command::ViewHand,
            accuse(&config, ["Ivy", "Bust", "Hall"]),
        ]);
        let (second, _) = scripted(vec![]);
        let mut tc = game(vec![first, second], ["Ivy", "Bust", "Hall"], 1);
        let start = tc.state().participant(PlayerId::new(0)).position;

        tc.play_turn().unwrap();

        let rejected = rejections(&log);
        assert_eq!(rejected.len(), 3);
        assert!(matches!(rejected[0], InputError::NotAllowed { command: "END", .. }));
        assert_eq!(rejected[1], InputError::NotInRoom);
        assert!(matches!(rejected[2], InputError::StepsOutOfRange { steps: 9, .. }));
        assert_eq!(tc.state().participant(PlayerId::new(0)).position, start);
        assert!(tc.state().is_over());
    }

    fn card(config: &GameConfig, name: &str) -> crate::cards::CardId {
        config.catalog().find(name).unwrap()
    }

    fn rejections(log: &NoticeLog) -> Vec<InputError> {
        log.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Rejected(err) => Some(err),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_entering_a_room_forces_a_suggestion() {
        let config = GameConfig::reference().unwrap();
        let (ivy, iron) = (card(&config, "Ivy"), card(&config, "Iron"));
        let (study, kitchen) = (card(&config, "Study"), card(&config, "Kitchen"));
        let (first, log) = scripted(vec![
            // Turn 1: a grid move into the Study.
            Command::Move { direction: Direction::Left, steps: 1 },
            Command::EndTurn,
            Command::Suggest { character: ivy, weapon: iron, room: Some(kitchen) },
            Command::Suggest { character: ivy, weapon: iron, room: None },
            Command::EndTurn,
            // Turn 3: the passage to the Kitchen.
            Command::SecretPassage { destination: kitchen },
            Command::EndTurn,
            Command::Suggest { character: ivy, weapon: iron, room: None },
            Command::EndTurn,
        ]);
        let (second, _) = scripted(vec![Command::Move { direction: Direction::Down, steps: 1 }]);
        let mut tc = game(vec![first, second], ["Ivy", "Bust", "Hall"], 1);
        let seat = PlayerId::new(0);

        tc.play_turn().unwrap();
        assert_eq!(tc.state().participant(seat).room(tc.state().board()), Some(study));
        tc.play_turn().unwrap();
        tc.play_turn().unwrap();

        let participant = tc.state().participant(seat);
        assert_eq!(participant.room(tc.state().board()), Some(kitchen));
        let rooms: Vec<_> = participant.history().iter().map(|r| r.suggestion.room).collect();
        assert_eq!(rooms, vec![study, kitchen]);

        let suggestion = TurnPhase::Suggestion.name();
        let rejected = rejections(&log);
        assert_eq!(rejected.len(), 3);
        assert!(matches!(rejected[0], InputError::NotAllowed { command: "END", phase } if phase == suggestion));
        assert_eq!(rejected[1], InputError::NotCurrentRoom("Kitchen".into()));
        assert!(matches!(rejected[2], InputError::NotAllowed { command: "END", phase } if phase == suggestion));
        assert_eq!(tc.state().active(), PlayerId::new(1));
        assert!(!tc.state().is_over());
    }

    #[test]
    fn test_wrong_accusation_eliminates_and_skips_later_turns() {
        let config = GameConfig::reference().unwrap();
        let (first, _) = scripted(vec![accuse(&config, ["Ivy", "Bust", "Study"])]);
        let (second, log) = scripted(vec![accuse(&config, ["Ivy", "Bust", "Study"])]);
        let mut tc = game(vec![first, second], ["Ivy", "Bust", "Hall"], 1);

        let status = tc.run(None).unwrap();

        assert_eq!(status, GameStatus::Over(GameResult::NoWinner));
        assert!(log.contains(&Notice::Eliminated(PlayerId::new(0))));
        assert!(log.contains(&Notice::Eliminated(PlayerId::new(1))));
    }

    #[test]
    fn test_eliminated_seat_is_skipped_without_roll() {
        let config = GameConfig::reference().unwrap();
        let (first, _) = scripted(vec![accuse(&config, ["Ivy", "Bust", "Study"])]);
        let (second, log) = scripted(vec![Command::Move { direction: Direction::Down, steps: 1 }]);
        let (third, _) = scripted(vec![Command::Move { direction: Direction::Down, steps: 1 }]);
        let mut tc = game(vec![first, second, third], ["Ivy", "Bust", "Hall"], 1);

        tc.run(Some(4)).unwrap();

        assert!(log.contains(&Notice::Skipped(PlayerId::new(0))));
        let rolls = log
            .notices()
            .iter()
            .filter(|n| matches!(n, Notice::Rolled { player, .. } if *player == PlayerId::new(0)))
            .count();
        // Only the turn on which the accusation was made.
        assert_eq!(rolls, 1);
        assert_eq!(tc.state().active(), PlayerId::new(1));
        assert_eq!(tc.state().turn_number(), 5);
    }

    #[test]
    fn test_stalled_controller_is_fatal() {
        let (first, _) = scripted(vec![]);
        let (second, _) = scripted(vec![]);
        let mut tc = game(vec![first, second], ["Ivy", "Bust", "Hall"], 1);

        let err = tc.play_turn().unwrap_err();
        assert!(matches!(
            err,
            GameError::ControllerStalled { player, attempts: MAX_REJECTIONS } if player == PlayerId::new(0)
        ));
    }

    #[test]
    fn test_controller_count_must_match_seats() {
        let config = GameConfig::reference().unwrap();
        let state = GameState::new(
            config,
            &[ControllerKind::Human, ControllerKind::Human],
            GameRng::new(0),
        )
        .unwrap();
        let (only, _) = scripted(vec![]);
        assert!(TurnController::from_state(state, vec![only]).is_err());
    }
}
