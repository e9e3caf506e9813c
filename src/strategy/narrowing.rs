//! The automated player.
//!
//! Walks to the closest candidate room it has not suggested in yet (any
//! candidate room once all have been visited), suggests from the
//! surviving candidates, and accuses as soon as every category is down to a
//! single card. Its own knowledge base lives on the participant and is fed
//! by the game, so the strategy itself only remembers how many commands in a
//! row were rejected.

use log::debug;

use super::{Command, Controller, Notice, PlayerView};
use crate::board::{Direction, Position};
use crate::cards::{CardId, Category};
use crate::deduction::SuggestionRecord;
use crate::core::participant::ControllerKind;
use crate::rules::TurnPhase;

#[derive(Clone, Debug, Default)]
pub struct NarrowingStrategy {
    rejections: usize,
}

impl NarrowingStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn movement(&self, view: &PlayerView<'_>) -> Command {
        let here = view.room();
        let candidates = candidate_rooms(view);

        if let Some(room) = here {
            if candidates.contains(&room) {
                return Command::Remain;
            }
            if let Some(destination) = view.board().secret_passage(room) {
                if candidates.contains(&destination) {
                    return Command::SecretPassage { destination };
                }
            }
        }

        let roll = view.roll().unwrap_or(1);
        let from = view.position();
        if self.rejections == 0 {
            let targets = target_rooms(&candidates, view.history());
            if let Some(target) = nearest_door(view, &targets) {
                if let Some(command) = toward(from, target, roll) {
                    return command;
                }
            }
        }

        // Something went wrong: take any single in-bounds step.
        let offset = self.rejections % Direction::ALL.len();
        let direction = Direction::ALL
            .iter()
            .cycle()
            .skip(offset)
            .take(Direction::ALL.len())
            .copied()
            .find(|&d| !view.board().would_leave_board(from, d, 1))
            .unwrap_or(Direction::Up);
        Command::Move { direction, steps: 1 }
    }

    fn suggestion(view: &PlayerView<'_>) -> Command {
        let Some(kb) = view.knowledge() else {
            return Command::EndTurn;
        };
        let s = kb.choose_suggestion(view.room(), view.hand());
        Command::Suggest {
            character: s.character,
            weapon: s.weapon,
            room: Some(s.room),
        }
    }
}

impl Controller for NarrowingStrategy {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Automated
    }

    fn decide(&mut self, view: &PlayerView<'_>) -> Command {
        let accusation = view.knowledge().and_then(|kb| kb.accusation());
        let command = match (view.phase(), accusation) {
            (_, Some(accusation)) => Command::Accuse(accusation),
            (TurnPhase::Suggestion, None) => Self::suggestion(view),
            (TurnPhase::Movement, None) => self.movement(view),
            _ => Command::EndTurn,
        };
        debug!("{} decides {:?}", view.name(), command);
        command
    }

    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::Rejected(_) => self.rejections += 1,
            Notice::TurnStarted { .. } => self.rejections = 0,
            _ => {}
        }
    }
}

/// Rooms still possible for the solution. Every room without a knowledge base.
fn candidate_rooms(view: &PlayerView<'_>) -> Vec<CardId> {
    match view.knowledge() {
        Some(kb) => kb.candidates(Category::Room).iter().copied().collect(),
        None => view.catalog().in_category(Category::Room).collect(),
    }
}

/// Candidate rooms not suggested in yet, or all of them once each was visited.
fn target_rooms(candidates: &[CardId], history: &[SuggestionRecord]) -> Vec<CardId> {
    let unvisited: Vec<CardId> = candidates
        .iter()
        .copied()
        .filter(|&room| !history.iter().any(|record| record.suggestion.room == room))
        .collect();
    if unvisited.is_empty() {
        candidates.to_vec()
    } else {
        unvisited
    }
}

fn nearest_door(view: &PlayerView<'_>, rooms: &[CardId]) -> Option<Position> {
    let from = view.position();
    rooms
        .iter()
        .flat_map(|&room| view.board().doors(room).iter().copied())
        .min_by_key(|&door| (from.distance(door), door.x, door.y))
}

/// A straight move toward `target`, along the longer axis first.
fn toward(from: Position, target: Position, roll: u32) -> Option<Command> {
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    let (direction, distance) = if dx.abs() >= dy.abs() {
        (if dx > 0 { Direction::Right } else { Direction::Left }, dx.unsigned_abs())
    } else {
        (if dy > 0 { Direction::Down } else { Direction::Up }, dy.unsigned_abs())
    };
    if distance == 0 {
        return None;
    }
    Some(Command::Move {
        direction,
        steps: distance.min(roll),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Solution, Suggestion};
    use crate::core::player::PlayerId;
    use crate::core::{GameConfig, GameRng};
    use crate::rules::GameState;

    fn state(seed: u64) -> GameState {
        let config = GameConfig::reference().unwrap();
        let solution = Solution::new(Suggestion::from_names(config.catalog(), "Ivy", "Bust", "Hall").unwrap());
        GameState::with_solution(config, &[ControllerKind::Automated; 3], solution, GameRng::new(seed)).unwrap()
    }

    #[test]
    fn test_toward_moves_along_longer_axis() {
        let from = Position::new(2, 1);
        assert_eq!(
            toward(from, Position::new(8, 2), 3),
            Some(Command::Move { direction: Direction::Right, steps: 3 })
        );
        assert_eq!(
            toward(from, Position::new(2, 0), 6),
            Some(Command::Move { direction: Direction::Up, steps: 1 })
        );
        assert_eq!(toward(from, from, 6), None);
    }

    #[test]
    fn test_prefers_rooms_not_yet_visited() {
        let config = GameConfig::reference().unwrap();
        let catalog = config.catalog();
        let room = |name| catalog.find(name).unwrap();
        let visit = |name| {
            let s = Suggestion::from_names(catalog, "Ivy", "Bust", name).unwrap();
            SuggestionRecord::new(1, s, Some(PlayerId::new(1)), None)
        };
        let candidates = [room("Study"), room("Hall"), room("Lounge")];

        assert_eq!(target_rooms(&candidates, &[]), candidates.to_vec());
        assert_eq!(
            target_rooms(&candidates, &[visit("Study"), visit("Kitchen")]),
            vec![room("Hall"), room("Lounge")]
        );
        let everywhere = [visit("Study"), visit("Hall"), visit("Lounge")];
        assert_eq!(target_rooms(&candidates, &everywhere), candidates.to_vec());
    }

    #[test]
    fn test_heads_for_a_candidate_door() {
        let state = state(0);
        let view = PlayerView::new(&state, PlayerId::new(0), TurnPhase::Movement, Some(6));
        let mut strategy = NarrowingStrategy::new();

        match strategy.decide(&view) {
            Command::Move { steps, .. } => assert!((1..=6).contains(&steps)),
            other => panic!("expected a move, got {other:?}"),
        }
    }

    #[test]
    fn test_suggests_an_explicit_candidate_triple() {
        let state = state(1);
        let seat = PlayerId::new(1);
        let view = PlayerView::new(&state, seat, TurnPhase::Suggestion, Some(2));
        let mut strategy = NarrowingStrategy::new();

        let Command::Suggest { character, weapon, room: Some(room) } = strategy.decide(&view) else {
            panic!("expected a suggestion with a room");
        };
        let kb = state.participant(seat).knowledge().unwrap();
        for card in [character, weapon, room] {
            assert!(kb.is_candidate(card));
            assert!(!state.participant(seat).holds(card));
        }
    }

    #[test]
    fn test_accuses_when_ready() {
        let mut state = state(2);
        let seat = PlayerId::new(0);
        let solution = *state.solution().triple();
        state.suggest(seat, solution).unwrap();

        let view = PlayerView::new(&state, seat, TurnPhase::Movement, Some(4));
        assert_eq!(NarrowingStrategy::new().decide(&view), Command::Accuse(solution));
    }

    #[test]
    fn test_rejection_switches_to_fallback_step() {
        let state = state(0);
        let view = PlayerView::new(&state, PlayerId::new(0), TurnPhase::Movement, Some(6));
        let mut strategy = NarrowingStrategy::new();
        strategy.notify(&Notice::Rejected(crate::core::InputError::NotInRoom));

        assert!(matches!(strategy.decide(&view), Command::Move { steps: 1, .. }));

        strategy.notify(&Notice::TurnStarted { player: PlayerId::new(0), turn: 2 });
        assert_eq!(strategy.rejections, 0);
    }

    #[test]
    fn test_ends_turn_after_suggesting() {
        let state = state(3);
        let view = PlayerView::new(&state, PlayerId::new(2), TurnPhase::Accusation, Some(1));
        assert_eq!(NarrowingStrategy::new().decide(&view), Command::EndTurn);
    }
}
