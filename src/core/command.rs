//! Commands a controller hands to the turn controller.
//!
//! Text input is decoded into a `Command` once, at the I/O boundary, with
//! card names validated against the catalog. The turn controller only ever
//! sees structured commands.
//!
//! ```
//! use cluedo_engine::board::Direction;
//! use cluedo_engine::core::{Command, GameConfig};
//!
//! let config = GameConfig::reference().unwrap();
//! let catalog = config.catalog();
//!
//! assert_eq!(
//!     Command::parse("up 2", catalog).unwrap(),
//!     Command::Move { direction: Direction::Up, steps: 2 }
//! );
//! assert_eq!(
//!     Command::parse("SECRET_PASSAGE_TO_DINING_ROOM", catalog).unwrap(),
//!     Command::SecretPassage { destination: catalog.find("Dining Room").unwrap() }
//! );
//! ```

use serde::{Deserialize, Serialize};

use super::error::InputError;
use crate::board::Direction;
use crate::cards::{CardId, Catalog, Category, Suggestion};

const PASSAGE_PREFIX: &str = "SECRET_PASSAGE_TO_";

/// A decision for the active participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Move in a straight line.
    Move { direction: Direction, steps: u32 },
    /// Take the current room's secret passage.
    SecretPassage { destination: CardId },
    /// Stay in the current room and suggest again.
    Remain,
    ViewHand,
    ViewTracker,
    /// Suggest in `room`, or in the current room when `None`.
    Suggest {
        character: CardId,
        weapon: CardId,
        room: Option<CardId>,
    },
    Accuse(Suggestion),
    EndTurn,
}

impl Command {
    /// Short name used in rejection messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Move { .. } => "MOVE",
            Command::SecretPassage { .. } => "SECRET_PASSAGE",
            Command::Remain => "STAY",
            Command::ViewHand => "CARDS",
            Command::ViewTracker => "TRACK",
            Command::Suggest { .. } => "SUGGEST",
            Command::Accuse(_) => "ACCUSE",
            Command::EndTurn => "END",
        }
    }

    /// Check if the command only queries state.
    #[must_use]
    pub fn is_query(&self) -> bool {
        matches!(self, Command::ViewHand | Command::ViewTracker)
    }

    /// Decode one line of text.
    ///
    /// Accepted forms, case-insensitive:
    ///
    /// - `UP 3`, `DOWN 1`, `LEFT 2`, `RIGHT 4`
    /// - `SECRET_PASSAGE_TO_<ROOM>` (underscores for spaces)
    /// - `STAY`, `CARDS`, `TRACK`, `END`
    /// - `SUGGEST <character>, <weapon>`
    /// - `ACCUSE <character>, <weapon>, <room>`
    pub fn parse(line: &str, catalog: &Catalog) -> Result<Self, InputError> {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));
        let upper = head.to_ascii_uppercase();

        if upper.is_empty() {
            return Err(InputError::Empty);
        }

        if let Some(direction) = Direction::parse(&upper) {
            let steps = rest
                .parse::<u32>()
                .map_err(|_| InputError::NotANumber(rest.to_string()))?;
            return Ok(Command::Move { direction, steps });
        }

        if let Some(room) = upper.strip_prefix(PASSAGE_PREFIX) {
            let name = room.replace('_', " ");
            let destination = catalog.lookup(&name, Category::Room)?;
            return Ok(Command::SecretPassage { destination });
        }

        let unknown = || InputError::UnknownCommand(line.to_string());
        match upper.as_str() {
            "STAY" if rest.is_empty() => Ok(Command::Remain),
            "CARDS" if rest.is_empty() => Ok(Command::ViewHand),
            "TRACK" if rest.is_empty() => Ok(Command::ViewTracker),
            "END" if rest.is_empty() => Ok(Command::EndTurn),
            "SUGGEST" => match split_names(rest)[..] {
                [character, weapon] => Ok(Command::Suggest {
                    character: catalog.lookup(character, Category::Character)?,
                    weapon: catalog.lookup(weapon, Category::Weapon)?,
                    room: None,
                }),
                _ => Err(unknown()),
            },
            "ACCUSE" => match split_names(rest)[..] {
                [character, weapon, room] => Ok(Command::Accuse(Suggestion::from_names(
                    catalog, character, weapon, room,
                )?)),
                _ => Err(unknown()),
            },
            _ => Err(unknown()),
        }
    }
}

fn split_names(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split(',').map(str::trim).collect()
}
