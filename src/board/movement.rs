//! Movement resolution: straight-line grid moves and secret passages.
//!
//! A move is checked against the board bounds before it is applied, so a
//! rejected move never leaves a participant half-way.

use serde::{Deserialize, Serialize};

use super::layout::{Board, Position};
use crate::cards::{CardId, Catalog};
use crate::core::error::InputError;

/// One of the four axis-aligned directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit vector of this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Parse the text form (`UP`, `down`, ...).
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "UP" => Some(Direction::Up),
            "DOWN" => Some(Direction::Down),
            "LEFT" => Some(Direction::Left),
            "RIGHT" => Some(Direction::Right),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        })
    }
}

impl Board {
    /// Check whether moving `steps` cells from `position` leaves the grid.
    #[must_use]
    pub fn would_leave_board(&self, position: Position, direction: Direction, steps: u32) -> bool {
        !self.in_bounds(Self::displace(position, direction, steps))
    }

    /// Move `steps` cells in a straight line.
    ///
    /// Fails without moving if the destination is off the board.
    ///
    /// ```
    /// use cluedo_engine::board::{Direction, Position};
    /// use cluedo_engine::core::GameConfig;
    ///
    /// let config = GameConfig::reference().unwrap();
    /// let board = config.board();
    ///
    /// let to = board.step(Position::new(2, 1), Direction::Down, 3).unwrap();
    /// assert_eq!(to, Position::new(2, 4));
    /// assert!(board.step(Position::new(2, 1), Direction::Up, 2).is_err());
    /// ```
    pub fn step(&self, position: Position, direction: Direction, steps: u32) -> Result<Position, InputError> {
        if self.would_leave_board(position, direction, steps) {
            return Err(InputError::OffBoard {
                from: position,
                direction,
                steps,
            });
        }
        Ok(Self::displace(position, direction, steps))
    }

    /// Take the secret passage from the room at `position` to `destination`.
    ///
    /// Returns the destination's entry cell. The grid bounds do not apply.
    pub fn passage_from(
        &self,
        position: Position,
        destination: CardId,
        catalog: &Catalog,
    ) -> Result<Position, InputError> {
        let invalid = || InputError::InvalidPassage(catalog.name(destination).to_string());

        let here = self.room_at(position).ok_or(InputError::NotInRoom)?;
        if self.secret_passage(here) != Some(destination) {
            return Err(invalid());
        }
        self.entry_cell(destination).ok_or_else(invalid)
    }

    fn displace(position: Position, direction: Direction, steps: u32) -> Position {
        let (dx, dy) = direction.delta();
        let steps = i32::try_from(steps).unwrap_or(i32::MAX);
        Position::new(
            position.x.saturating_add(dx.saturating_mul(steps)),
            position.y.saturating_add(dy.saturating_mul(steps)),
        )
    }
}
