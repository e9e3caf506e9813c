//! Game rules.
//!
//! - `suggestion`: summoning and the refutation search
//! - `game`: setup, the deal, per-action rules, win and elimination
//! - `turn`: the turn state machine that asks controllers for commands
//!
//! The rules never print. Everything a participant should learn reaches its
//! controller as a `Notice`.

pub mod game;
pub mod suggestion;
pub mod turn;

pub use game::{GameResult, GameState, GameStatus};
pub use suggestion::{resolve_suggestion, RefutationOutcome};
pub use turn::{TurnController, TurnPhase, MAX_REJECTIONS};
