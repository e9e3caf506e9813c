//! Whole games between automated participants.
//!
//! These check the properties that only show up over many turns: knowledge
//! stays sound, automated accusations are right, seating rotates strictly
//! and a seed replays the same game.

use std::cell::RefCell;
use std::rc::Rc;

use cluedo_engine::cards::Category;
use cluedo_engine::core::ControllerKind;
use cluedo_engine::{
    Command, Controller, GameConfig, GameRng, GameResult, GameState, GameStatus, NarrowingStrategy, Notice, PlayerId,
    PlayerView, TurnController,
};

const TURN_LIMIT: u32 = 2_000;

fn automated(players: usize) -> Vec<Box<dyn Controller>> {
    (0..players)
        .map(|_| Box::new(NarrowingStrategy::new()) as Box<dyn Controller>)
        .collect()
}

/// Candidate sets of every automated participant still contain the solution.
fn assert_sound(state: &GameState) {
    let solution = state.solution().triple();
    for participant in state.participants().values() {
        let Some(kb) = participant.knowledge() else {
            continue;
        };
        for category in Category::ALL {
            let candidates = kb.candidates(category);
            assert!(!candidates.is_empty());
            assert!(
                candidates.contains(&solution.get(category)),
                "{} lost the solution {category}",
                participant.name()
            );
        }
        for &card in participant.hand() {
            assert!(!kb.is_candidate(card), "{} still suspects its own card", participant.name());
        }
    }
}

#[test]
fn test_automated_games_are_sound_and_won() {
    let config = GameConfig::reference().unwrap();
    for players in 2..=6 {
        for seed in 0..12 {
            let mut game = TurnController::new(config.clone(), automated(players), GameRng::new(seed)).unwrap();

            let mut turns = 0;
            while !game.state().is_over() && turns < TURN_LIMIT {
                game.play_turn().unwrap();
                assert_sound(game.state());
                turns += 1;
            }

            match game.status() {
                GameStatus::Over(GameResult::Winner(winner)) => {
                    assert!(!game.state().participant(winner).is_eliminated());
                }
                other => panic!("{players} seats, seed {seed}: ended as {other:?}"),
            }
            // Nobody is ever eliminated: automated accusations are always right.
            assert!(game.state().participants().values().all(|p| !p.is_eliminated()));
        }
    }
}

#[test]
fn test_same_seed_replays_the_same_game() {
    let config = GameConfig::reference().unwrap();
    let play = |seed| {
        let mut game = TurnController::new(config.clone(), automated(4), GameRng::new(seed)).unwrap();
        let status = game.run(Some(TURN_LIMIT)).unwrap();
        let histories: Vec<_> = game
            .state()
            .participants()
            .values()
            .map(|p| p.history().to_vec())
            .collect();
        (status, game.state().turn_number(), histories)
    };

    for seed in [1, 99, 4242] {
        assert_eq!(play(seed), play(seed));
    }
}

/// Records whose turn each `TurnStarted` announces.
struct Spy {
    inner: Box<dyn Controller>,
    turns: Rc<RefCell<Vec<PlayerId>>>,
}

impl Controller for Spy {
    fn kind(&self) -> ControllerKind {
        self.inner.kind()
    }

    fn decide(&mut self, view: &PlayerView<'_>) -> Command {
        self.inner.decide(view)
    }

    fn notify(&mut self, notice: &Notice) {
        if let Notice::TurnStarted { player, .. } = notice {
            self.turns.borrow_mut().push(*player);
        }
        self.inner.notify(notice);
    }
}

/// A seat that always accuses wrongly on its first turn.
struct Reckless;

impl Controller for Reckless {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Human
    }

    fn decide(&mut self, view: &PlayerView<'_>) -> Command {
        let catalog = view.catalog();
        let first = |category| catalog.in_category(category).next().unwrap();
        let last = catalog.in_category(Category::Room).last().unwrap();
        // Of two different rooms at most one is right.
        let room = if view.turn_number() % 2 == 0 { last } else { first(Category::Room) };
        Command::Accuse(cluedo_engine::Suggestion::new(
            first(Category::Character),
            first(Category::Weapon),
            room,
        ))
    }
}

#[test]
fn test_seating_rotates_with_period_n_despite_eliminations() {
    let config = GameConfig::reference().unwrap();
    let turns = Rc::new(RefCell::new(Vec::new()));
    let players = 4;

    let mut seats: Vec<Box<dyn Controller>> = vec![Box::new(Spy {
        inner: Box::new(NarrowingStrategy::new()),
        turns: turns.clone(),
    })];
    seats.push(Box::new(Reckless));
    seats.extend(automated(players - 2));

    let mut game = TurnController::new(config, seats, GameRng::new(8)).unwrap();
    game.run(Some(40)).unwrap();

    let turns = turns.borrow();
    for (i, player) in turns.iter().enumerate() {
        assert_eq!(player.index(), i % players);
    }
}
