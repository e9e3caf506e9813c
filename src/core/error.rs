//! Error types.
//!
//! Three layers, matching how each failure is handled:
//!
//! - `InputError`: a rejected command. Recoverable, the controller is asked
//!   again and no state changes.
//! - `ConfigError`: malformed board or catalog data. Fatal, raised while the
//!   configuration is built.
//! - `GameError`: anything that stops a running game.

use thiserror::Error;

use crate::board::{Direction, Position};
use crate::cards::Category;
use crate::core::player::PlayerId;

/// A command that cannot be applied in the current state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("please enter a command")]
    Empty,

    #[error("unrecognized command `{0}`")]
    UnknownCommand(String),

    #[error("steps must be a number, got `{0}`")]
    NotANumber(String),

    #[error("steps must be between 1 and {max}, got {steps}")]
    StepsOutOfRange { steps: u32, max: u32 },

    #[error("moving {direction} {steps} from {from} would leave the board")]
    OffBoard {
        from: Position,
        direction: Direction,
        steps: u32,
    },

    #[error("no secret passage leads from here to {0}")]
    InvalidPassage(String),

    #[error("you are not in a room")]
    NotInRoom,

    #[error("you can only suggest the room you are in, not the {0}")]
    NotCurrentRoom(String),

    #[error("`{0}` is not a known card")]
    UnknownCard(String),

    #[error("`{name}` is not a {expected}")]
    WrongCategory { name: String, expected: Category },

    #[error("{command} is not allowed during {phase}")]
    NotAllowed {
        command: &'static str,
        phase: &'static str,
    },

    #[error("player count must be between {min} and {max}, got {count}")]
    PlayerCount { count: usize, min: usize, max: usize },
}

/// Invalid board or catalog configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("the {0} category is empty")]
    EmptyCategory(Category),

    #[error("card name `{0}` is used more than once")]
    DuplicateCard(String),

    #[error("grid size must be positive, got {0}")]
    GridSize(i32),

    #[error("room `{0}` has no layout")]
    MissingLayout(String),

    #[error("layout given for `{0}`, which is not a room in the catalog")]
    UnknownRoom(String),

    #[error("room `{0}` occupies no cells")]
    EmptyRoom(String),

    #[error("cell {cell} of room `{room}` is outside the grid")]
    CellOutOfBounds { room: String, cell: Position },

    #[error("cell {cell} belongs to both `{first}` and `{second}`")]
    OverlappingRooms {
        cell: Position,
        first: String,
        second: String,
    },

    #[error("door {cell} of `{room}` is not one of its cells")]
    DoorOutsideRoom { room: String, cell: Position },

    #[error("secret passage from `{from}` leads to unknown room `{to}`")]
    UnknownPassage { from: String, to: String },

    #[error("character `{0}` has no start position")]
    MissingStart(String),

    #[error("start position {cell} of `{character}` is not a corridor cell on the board")]
    InvalidStart { character: String, cell: Position },
}

/// A failure that stops the game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("{player} ruled out every {category}: knowledge base is inconsistent")]
    KnowledgeExhausted { player: PlayerId, category: Category },

    #[error("{player} produced {attempts} rejected commands in a row")]
    ControllerStalled { player: PlayerId, attempts: u32 },
}
