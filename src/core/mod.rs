//! Core engine types: seats, participants, commands, RNG, configuration, errors.
//!
//! Everything here is independent of the turn structure. The board and card
//! data arrive through `GameConfig` rather than being hard-coded.

pub mod command;
pub mod config;
pub mod error;
pub mod participant;
pub mod player;
pub mod rng;

pub use command::Command;
pub use config::{ConfigDocument, GameConfig, MAX_PLAYERS, MIN_PLAYERS, REFERENCE_CONFIG};
pub use error::{ConfigError, GameError, InputError};
pub use participant::{ControllerKind, Participant};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
