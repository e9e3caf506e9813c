//! End-to-end scenarios on small hand-built tables.

use cluedo_engine::cards::Category;
use cluedo_engine::core::ControllerKind;
use cluedo_engine::rules::resolve_suggestion;
use cluedo_engine::{
    Command, Controller, GameConfig, GameRng, GameResult, GameState, GameStatus, KnowledgeBase, Notice, Participant,
    PlayerId, PlayerMap, ScriptedController, Solution, Suggestion, TurnController,
};

/// A three-room table whose weapons include the Wrench.
const SMALL_TABLE: &str = r#"
grid_size = 6
weapons = ["Trophy", "Wrench", "Iron"]

[[characters]]
name = "Sherlock"
start = [2, 2]

[[characters]]
name = "Watson"
start = [3, 2]

[[characters]]
name = "Ivy"
start = [2, 3]

[[rooms]]
name = "Study"
cells = [[0, 0], [1, 0]]
doors = [[1, 0]]
passage = "Kitchen"

[[rooms]]
name = "Hall"
cells = [[5, 0], [5, 1]]
doors = [[5, 1]]

[[rooms]]
name = "Kitchen"
cells = [[5, 5], [4, 5]]
doors = [[4, 5]]
passage = "Study"
"#;

fn triple(config: &GameConfig, c: &str, w: &str, r: &str) -> Suggestion {
    Suggestion::from_names(config.catalog(), c, w, r).unwrap()
}

#[test]
fn test_small_table_loads() {
    let config = GameConfig::from_toml_str(SMALL_TABLE).unwrap();
    assert_eq!(config.catalog().len(), 9);
    assert_eq!(config.max_players(), 3);
    assert_eq!(config.board().secret_passage(config.catalog().find("Study").unwrap()), config.catalog().find("Kitchen"));
}

/// Accusing the solution on the first turn ends the loop before anyone else plays.
#[test]
fn test_correct_accusation_terminates_immediately() {
    let config = GameConfig::from_toml_str(SMALL_TABLE).unwrap();
    let solution = triple(&config, "Sherlock", "Wrench", "Kitchen");

    let first = ScriptedController::new(ControllerKind::Human, [Command::Accuse(solution)]);
    let second = ScriptedController::new(ControllerKind::Human, []);
    let third = ScriptedController::new(ControllerKind::Human, []);
    let log = second.log();
    let seats: Vec<Box<dyn Controller>> = vec![Box::new(first), Box::new(second), Box::new(third)];

    let kinds = [ControllerKind::Human; 3];
    let state = GameState::with_solution(config, &kinds, Solution::new(solution), GameRng::new(21)).unwrap();
    let mut game = TurnController::from_state(state, seats).unwrap();

    let status = game.run(None).unwrap();

    assert_eq!(status, GameStatus::Over(GameResult::Winner(PlayerId::new(0))));
    let turns: Vec<_> = log
        .notices()
        .into_iter()
        .filter_map(|n| match n {
            Notice::TurnStarted { player, .. } => Some(player),
            _ => None,
        })
        .collect();
    assert_eq!(turns, vec![PlayerId::new(0)]);

    // Further calls do nothing once the game is over.
    game.play_turn().unwrap();
    assert_eq!(game.state().turn_number(), 1);
}

/// An unrefuted suggestion made of the asker's own cards narrows nothing.
#[test]
fn test_own_cards_never_become_the_solution() {
    let config = GameConfig::from_toml_str(SMALL_TABLE).unwrap();
    let catalog = config.catalog();
    let s = triple(&config, "Watson", "Trophy", "Hall");

    let mut kb = KnowledgeBase::new(PlayerId::new(0), catalog);
    for card in s.cards() {
        kb.observe_own_card(card).unwrap();
    }
    kb.observe_unrefuted(&s, PlayerId::all(3)).unwrap();

    for category in Category::ALL {
        assert_eq!(kb.candidates(category).len(), 2);
        assert!(!kb.candidates(category).contains(&s.get(category)));
    }
    assert!(!kb.is_ready());
    for card in [catalog.find("Sherlock"), catalog.find("Wrench"), catalog.find("Kitchen")] {
        assert!(kb.is_candidate(card.unwrap()));
    }
}

/// Hand {Trophy} suggests (Sherlock, Trophy, Study); the holder of Sherlock refutes with it.
#[test]
fn test_refutation_by_the_only_holder() {
    let config = GameConfig::reference().unwrap();
    let catalog = config.catalog();
    let hands: [&[&str]; 3] = [&["Trophy"], &["Iron", "Hall"], &["Sherlock"]];

    let seats = hands
        .iter()
        .enumerate()
        .map(|(i, hand)| {
            let (character, start) = config.starts()[i];
            let mut p = Participant::new(PlayerId::new(i as u8), character, start, ControllerKind::Human, catalog);
            for name in *hand {
                p.receive_card(catalog.find(name).unwrap()).unwrap();
            }
            p
        })
        .collect();
    let mut seats = PlayerMap::from_vec(seats);
    let s = triple(&config, "Sherlock", "Trophy", "Study");

    for seed in 0..8 {
        let mut rng = GameRng::new(seed);
        let outcome = resolve_suggestion(PlayerId::new(0), &s, &mut seats, config.board(), &mut rng);

        assert!(outcome.refuted());
        assert_eq!(outcome.refuter, Some(PlayerId::new(2)));
        assert_eq!(seats[PlayerId::new(2)].name(), "Daniel");
        assert_eq!(outcome.card_shown, catalog.find("Sherlock"));
    }
}

/// The asker's controller sees the card; everybody else sees only who refuted.
#[test]
fn test_shown_card_reaches_only_the_asker() {
    let config = GameConfig::reference().unwrap();
    let solution = triple(&config, "Lilith", "Rat Poison", "Kitchen");
    let study = config.catalog().find("Study").unwrap();

    let kinds = [ControllerKind::Human; 2];
    let state = GameState::with_solution(config.clone(), &kinds, Solution::new(solution), GameRng::new(3)).unwrap();

    // Name a card the other seat holds so the suggestion is sure to be refuted.
    let catalog = config.catalog();
    let held = state
        .participant(PlayerId::new(1))
        .hand()
        .iter()
        .copied()
        .find(|&card| catalog.category(card) != Some(Category::Room))
        .unwrap();
    let (character, weapon) = match catalog.category(held) {
        Some(Category::Character) => (held, catalog.find("Iron").unwrap()),
        _ => (catalog.find("Watson").unwrap(), held),
    };

    // Sherlock steps left into the Study and suggests there.
    let asker = ScriptedController::new(
        ControllerKind::Human,
        [
            Command::parse("LEFT 1", catalog).unwrap(),
            Command::Suggest { character, weapon, room: None },
            Command::EndTurn,
        ],
    );
    let watcher = ScriptedController::new(ControllerKind::Human, []);
    let asker_log = asker.log();
    let watcher_log = watcher.log();
    let seats: Vec<Box<dyn Controller>> = vec![Box::new(asker), Box::new(watcher)];
    let mut game = TurnController::from_state(state, seats).unwrap();
    game.play_turn().unwrap();

    let refutation = |log: &cluedo_engine::strategy::NoticeLog| {
        log.notices().into_iter().find_map(|n| match n {
            Notice::Refutation { suggestion, outcome, .. } => Some((suggestion, outcome)),
            _ => None,
        })
    };
    let (suggestion, private) = refutation(&asker_log).unwrap();
    let (_, public) = refutation(&watcher_log).unwrap();

    assert_eq!(suggestion.room, study);
    assert_eq!(private.refuter, Some(PlayerId::new(1)));
    assert!(private.card_shown.is_some());
    assert_eq!(public.refuter, private.refuter);
    assert_eq!(public.card_shown, None);
    assert_eq!(game.state().participant(PlayerId::new(0)).history().len(), 1);
    assert_eq!(game.state().active(), PlayerId::new(1));
}
