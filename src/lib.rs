//! # cluedo-engine
//!
//! A Cluedo deduction engine for 2 to 6 participants, human or automated.
//!
//! ## Design Principles
//!
//! 1. **Configuration Over Convention**: the catalog, the board and start
//!    positions come from a TOML `GameConfig`, validated once and shared
//!    read-only.
//!
//! 2. **One Random Stream**: the solution draw, the deal, die rolls and the
//!    card a refuter shows all come from one seeded `GameRng`. Same seed and
//!    same commands replay the same game.
//!
//! 3. **Information Boundaries**: controllers decide through a `PlayerView`
//!    that never exposes the solution or another participant's hand. Shown
//!    cards reach only the participant that asked.
//!
//! ## Architecture
//!
//! - **Persistent Candidate Sets**: `im::OrdSet` keeps knowledge cheap to
//!   clone and iterates in catalog order.
//!
//! - **Structured Commands**: text is decoded into `Command` once, at the
//!   I/O boundary.
//!
//! ## Modules
//!
//! - `cards`: catalog, suggestions, the solution
//! - `board`: rooms, doors, secret passages and movement
//! - `core`: seats, participants, commands, RNG, configuration, errors
//! - `deduction`: knowledge bases, suggestion history, tracker reports
//! - `rules`: refutation, game state, the turn state machine
//! - `strategy`: the `Controller` trait and its implementations
//!
//! ## Example
//!
//! ```
//! use cluedo_engine::{Controller, GameConfig, GameRng, NarrowingStrategy, TurnController};
//!
//! let config = GameConfig::reference().unwrap();
//! let seats: Vec<Box<dyn Controller>> = (0..3)
//!     .map(|_| Box::new(NarrowingStrategy::new()) as Box<dyn Controller>)
//!     .collect();
//!
//! let mut game = TurnController::new(config, seats, GameRng::new(7)).unwrap();
//! let status = game.run(Some(500)).unwrap();
//! assert!(status.is_over());
//! ```

pub mod board;
pub mod cards;
pub mod core;
pub mod deduction;
pub mod rules;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Command, ConfigError, ControllerKind, GameConfig, GameError, GameRng, GameRngState, InputError,
    Participant, PlayerId, PlayerMap,
};

pub use crate::board::{Board, Direction, Position};

pub use crate::cards::{CardId, Catalog, Category, Solution, Suggestion};

pub use crate::deduction::{KnowledgeBase, SuggestionRecord, TrackerReport};

pub use crate::rules::{GameResult, GameState, GameStatus, RefutationOutcome, TurnController, TurnPhase};

pub use crate::strategy::{Controller, NarrowingStrategy, Notice, PlayerView, ScriptedController};
