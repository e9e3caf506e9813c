//! Board model and movement.
//!
//! - `layout`: rooms, doors, secret passages on a bounded square grid
//! - `movement`: directional moves and passage traversal

pub mod layout;
pub mod movement;

pub use layout::{Board, Position, RoomLayout};
pub use movement::Direction;
