//! Interactive Cluedo at the terminal.
//!
//! Human seats come first and are prompted in turn (hot seat); the trailing
//! `--automated` seats are played by `NarrowingStrategy`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dialoguer::{Input, Select};

use cluedo_engine::cards::{CardId, Category, Suggestion};
use cluedo_engine::core::{MAX_PLAYERS, MIN_PLAYERS};
use cluedo_engine::deduction::TRACKER_FILE;
use cluedo_engine::{
    Command, Controller, ControllerKind, GameConfig, GameResult, GameRng, NarrowingStrategy, Notice, PlayerId,
    PlayerView, TurnController, TurnPhase,
};

#[derive(Parser)]
#[command(author, version, about = "Play Cluedo against the computer", long_about = None)]
struct Args {
    /// Number of participants.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(MIN_PLAYERS as i64..=MAX_PLAYERS as i64))]
    players: u8,
    /// How many of the last seats the computer plays.
    #[arg(long, default_value_t = 1)]
    automated: u8,
    /// Seed for the random stream. Drawn from the OS when absent.
    #[arg(long)]
    seed: Option<u64>,
    /// Board and catalog TOML. The bundled layout when absent.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where `TRACK` writes its report.
    #[arg(long, default_value = TRACKER_FILE)]
    tracker: PathBuf,
    /// Session log file.
    #[arg(long, default_value = "cluedo_session.log")]
    log: PathBuf,
    /// Wait for Enter between turns.
    #[arg(long)]
    pause: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => GameConfig::from_path(path)?,
        None => GameConfig::reference()?,
    };
    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    log::info!("seed {}", rng.seed());

    let players = usize::from(args.players);
    let automated = usize::from(args.automated).min(players);
    let humans = players - automated;
    let seats: Vec<Box<dyn Controller>> = (0..players)
        .map(|seat| -> Box<dyn Controller> {
            if seat < humans {
                Box::new(Shell::new(config.clone(), args.tracker.clone(), seat == 0))
            } else {
                Box::new(NarrowingStrategy::new())
            }
        })
        .collect();

    let mut game = TurnController::new(config, seats, rng)?;
    let result = loop {
        game.play_turn()?;
        if let Some(result) = game.status().result() {
            break result;
        }
        if args.pause {
            Input::<String>::new()
                .with_prompt("Press Enter for the next turn")
                .allow_empty(true)
                .report(false)
                .interact_text()?;
        }
    };

    match result {
        GameResult::Winner(player) => {
            let state = game.state();
            println!(
                "{} wins! It was {}.",
                state.participant(player).name(),
                state.solution().triple().describe(state.catalog())
            );
        }
        GameResult::NoWinner => println!("Everyone is eliminated. Nobody wins."),
    }
    Ok(())
}

fn init_logging(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(&args.log)?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Warn,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// A human seat at the terminal.
///
/// Every shell prints what is private to its seat. Only the narrator prints
/// what happens at the table, so hot-seat play shows each event once.
struct Shell {
    config: Arc<GameConfig>,
    tracker: PathBuf,
    narrator: bool,
}

impl Shell {
    fn new(config: Arc<GameConfig>, tracker: PathBuf, narrator: bool) -> Self {
        Self {
            config,
            tracker,
            narrator,
        }
    }

    fn name(&self, card: CardId) -> &str {
        self.config.catalog().name(card)
    }

    fn seat(&self, player: PlayerId) -> &str {
        self.config
            .starts()
            .get(player.index())
            .map_or("?", |&(character, _)| self.name(character))
    }

    fn movement(&self, view: &PlayerView<'_>) -> Command {
        let catalog = view.catalog();
        let prompt = format!(
            "{} at {} rolled {}. UP/DOWN/LEFT/RIGHT n, SECRET_PASSAGE_TO_<ROOM>, STAY, CARDS, TRACK, ACCUSE",
            view.name(),
            view.position(),
            view.roll().unwrap_or(0)
        );
        let line = Input::<String>::new()
            .with_prompt(prompt)
            .validate_with(|text: &String| -> Result<(), String> {
                if text.trim().eq_ignore_ascii_case("ACCUSE") {
                    return Ok(());
                }
                Command::parse(text, catalog).map(|_| ()).map_err(|err| err.to_string())
            })
            .interact_text();

        match line {
            Ok(text) if text.trim().eq_ignore_ascii_case("ACCUSE") => self.accusation(view),
            Ok(text) => Command::parse(&text, catalog).unwrap_or(Command::ViewHand),
            Err(err) => abandon(&err),
        }
    }

    fn menu(&self, view: &PlayerView<'_>, first: (&str, fn(&Self, &PlayerView<'_>) -> Command)) -> Command {
        let items = [first.0, "Accuse", "View cards", "View tracker"];
        match Select::new()
            .with_prompt(format!("{}, what next?", view.name()))
            .items(&items[..])
            .default(0)
            .interact()
        {
            Ok(0) => (first.1)(self, view),
            Ok(1) => self.accusation(view),
            Ok(2) => Command::ViewHand,
            Ok(_) => Command::ViewTracker,
            Err(err) => abandon(&err),
        }
    }

    fn suggestion(&self, view: &PlayerView<'_>) -> Command {
        let room = view.room().map_or("?", |room| self.name(room));
        println!("You are in the {room}.");
        match (self.pick(view, Category::Character), self.pick(view, Category::Weapon)) {
            (Ok(character), Ok(weapon)) => Command::Suggest {
                character,
                weapon,
                room: None,
            },
            (Err(err), _) | (_, Err(err)) => abandon(&err),
        }
    }

    fn end_turn(&self, _view: &PlayerView<'_>) -> Command {
        Command::EndTurn
    }

    fn accusation(&self, view: &PlayerView<'_>) -> Command {
        let picks = [Category::Character, Category::Weapon, Category::Room].map(|c| self.pick(view, c));
        match picks {
            [Ok(character), Ok(weapon), Ok(room)] => Command::Accuse(Suggestion::new(character, weapon, room)),
            [Err(err), ..] | [_, Err(err), _] | [.., Err(err)] => abandon(&err),
        }
    }

    fn pick(&self, view: &PlayerView<'_>, category: Category) -> Result<CardId, dialoguer::Error> {
        let cards: Vec<CardId> = view.catalog().in_category(category).collect();
        let labels: Vec<&str> = cards.iter().map(|&card| self.name(card)).collect();
        let index = Select::new()
            .with_prompt(format!("Pick a {category}"))
            .items(&labels[..])
            .default(0)
            .interact()?;
        Ok(cards[index])
    }

    fn announce(&self, notice: &Notice) {
        match notice {
            Notice::TurnStarted { player, turn } => println!("\n=== Turn {turn}: {} ===", self.seat(*player)),
            Notice::Skipped(player) => println!("{} is out of the game.", self.seat(*player)),
            Notice::Rolled { player, roll } => println!("{} rolled a {roll}.", self.seat(*player)),
            Notice::Moved { player, position, room } => match room {
                Some(room) => println!("{} is in the {}.", self.seat(*player), self.name(*room)),
                None => println!("{} moved to {position}.", self.seat(*player)),
            },
            Notice::Refutation {
                asker,
                suggestion,
                outcome,
            } => {
                println!(
                    "{} suggests {}.",
                    self.seat(*asker),
                    suggestion.describe(self.config.catalog())
                );
                for &passed in &outcome.passed {
                    println!("  {} cannot refute.", self.seat(passed));
                }
                match outcome.refuter {
                    Some(refuter) => println!("  {} refutes.", self.seat(refuter)),
                    None => println!("  No player refuted."),
                }
            }
            Notice::Accused {
                player,
                accusation,
                correct,
            } => {
                let verdict = if *correct { "correct" } else { "wrong" };
                println!(
                    "{} accuses {}: {verdict}!",
                    self.seat(*player),
                    accusation.describe(self.config.catalog())
                );
            }
            Notice::Eliminated(player) => println!("{} is eliminated.", self.seat(*player)),
            _ => {}
        }
    }
}

impl Controller for Shell {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Human
    }

    fn decide(&mut self, view: &PlayerView<'_>) -> Command {
        match view.phase() {
            TurnPhase::Movement => self.movement(view),
            TurnPhase::Suggestion => self.menu(view, ("Make a suggestion", Self::suggestion)),
            _ => self.menu(view, ("End turn", Self::end_turn)),
        }
    }

    fn notify(&mut self, notice: &Notice) {
        match notice {
            Notice::Hand(cards) => {
                let names: Vec<_> = cards.iter().map(|&card| self.name(card)).collect();
                println!("Your cards: {}", names.join(", "));
            }
            Notice::Tracker(report) => {
                println!("{report}");
                match report.write_to(&self.tracker) {
                    Ok(()) => println!("Tracker saved to {}", self.tracker.display()),
                    Err(err) => log::error!("cannot write {}: {err}", self.tracker.display()),
                }
            }
            Notice::Rejected(err) => println!("Not allowed: {err}"),
            Notice::Refutation { outcome, .. } if outcome.card_shown.is_some() => {
                if self.narrator {
                    self.announce(notice);
                }
                if let (Some(refuter), Some(card)) = (outcome.refuter, outcome.card_shown) {
                    println!("  {} shows you {}.", self.seat(refuter), self.name(card));
                }
            }
            _ if self.narrator => self.announce(notice),
            _ => {}
        }
    }
}

/// Input is gone (closed terminal). `EndTurn` is rejected outside the
/// accusation window, so the turn controller soon gives up on this seat.
fn abandon(err: &dialoguer::Error) -> Command {
    log::error!("input failed: {err}");
    Command::EndTurn
}
