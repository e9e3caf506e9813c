//! Static board topology: a square grid, rooms as sets of cells, doors and
//! secret passages.
//!
//! A `Board` is validated once when it is built and is read-only afterwards.
//! Room cells are disjoint, so every position maps to at most one room.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Catalog, Category};
use crate::core::error::ConfigError;

/// A grid cell. `(0, 0)` is the top-left corner; `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    #[must_use]
    pub fn distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Layout of one room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomLayout {
    pub room: CardId,
    /// Occupied cells. The first cell is where passages and summons land.
    pub cells: Vec<Position>,
    /// Door cells, a subset of `cells`.
    pub doors: Vec<Position>,
    /// Destination of this room's secret passage, if it has one.
    pub passage: Option<CardId>,
}

/// The validated board.
#[derive(Clone, Debug)]
pub struct Board {
    size: i32,
    rooms: FxHashMap<CardId, RoomLayout>,
    cell_rooms: FxHashMap<Position, CardId>,
}

impl Board {
    /// Build and validate a board.
    ///
    /// Every catalog room must have exactly one layout, cells must lie inside
    /// the `size × size` grid and be disjoint across rooms, doors must be
    /// cells of their room and passages must lead to rooms.
    pub fn new(size: i32, layouts: Vec<RoomLayout>, catalog: &Catalog) -> Result<Self, ConfigError> {
        if size <= 0 {
            return Err(ConfigError::GridSize(size));
        }

        let mut board = Self {
            size,
            rooms: FxHashMap::default(),
            cell_rooms: FxHashMap::default(),
        };

        for layout in layouts {
            let name = catalog.name(layout.room).to_string();
            if catalog.category(layout.room) != Some(Category::Room) {
                return Err(ConfigError::UnknownRoom(name));
            }
            if layout.cells.is_empty() {
                return Err(ConfigError::EmptyRoom(name));
            }

            for &cell in &layout.cells {
                if !board.in_bounds(cell) {
                    return Err(ConfigError::CellOutOfBounds { room: name, cell });
                }
                if let Some(&other) = board.cell_rooms.get(&cell) {
                    // Same-room repeats are harmless, overlaps are not.
                    if other != layout.room {
                        return Err(ConfigError::OverlappingRooms {
                            cell,
                            first: catalog.name(other).to_string(),
                            second: name,
                        });
                    }
                }
                board.cell_rooms.insert(cell, layout.room);
            }

            if let Some(&door) = layout.doors.iter().find(|d| !layout.cells.contains(d)) {
                return Err(ConfigError::DoorOutsideRoom { room: name, cell: door });
            }

            if let Some(to) = layout.passage {
                if catalog.category(to) != Some(Category::Room) {
                    return Err(ConfigError::UnknownPassage {
                        from: name,
                        to: catalog.name(to).to_string(),
                    });
                }
            }

            board.rooms.insert(layout.room, layout);
        }

        if let Some(missing) = catalog
            .in_category(Category::Room)
            .find(|room| !board.rooms.contains_key(room))
        {
            return Err(ConfigError::MissingLayout(catalog.name(missing).to_string()));
        }

        Ok(board)
    }

    /// Side length of the square grid.
    #[must_use]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Check if a cell lies on the grid.
    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.size).contains(&position.x) && (0..self.size).contains(&position.y)
    }

    /// The room occupying a cell, or `None` for corridor cells.
    #[must_use]
    pub fn room_at(&self, position: Position) -> Option<CardId> {
        self.cell_rooms.get(&position).copied()
    }

    /// Layout of a room.
    #[must_use]
    pub fn layout(&self, room: CardId) -> Option<&RoomLayout> {
        self.rooms.get(&room)
    }

    /// Cells occupied by a room.
    #[must_use]
    pub fn cells(&self, room: CardId) -> &[Position] {
        self.rooms.get(&room).map_or(&[], |l| l.cells.as_slice())
    }

    /// Door cells of a room.
    #[must_use]
    pub fn doors(&self, room: CardId) -> &[Position] {
        self.rooms.get(&room).map_or(&[], |l| l.doors.as_slice())
    }

    /// The cell where participants land when moved into a room.
    #[must_use]
    pub fn entry_cell(&self, room: CardId) -> Option<Position> {
        self.cells(room).first().copied()
    }

    /// Destination of the room's secret passage.
    #[must_use]
    pub fn secret_passage(&self, room: CardId) -> Option<CardId> {
        self.rooms.get(&room).and_then(|l| l.passage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(&["Sherlock"], &["Trophy"], &["Study", "Kitchen"]).unwrap()
    }

    fn layout(room: CardId, cells: &[(i32, i32)]) -> RoomLayout {
        RoomLayout {
            room,
            cells: cells.iter().copied().map(Position::from).collect(),
            doors: Vec::new(),
            passage: None,
        }
    }

    fn rooms(catalog: &Catalog) -> (CardId, CardId) {
        (catalog.find("Study").unwrap(), catalog.find("Kitchen").unwrap())
    }

    #[test]
    fn test_room_at() {
        let catalog = catalog();
        let (study, kitchen) = rooms(&catalog);
        let board = Board::new(
            4,
            vec![layout(study, &[(0, 0), (1, 0)]), layout(kitchen, &[(3, 3)])],
            &catalog,
        )
        .unwrap();

        assert_eq!(board.room_at(Position::new(1, 0)), Some(study));
        assert_eq!(board.room_at(Position::new(3, 3)), Some(kitchen));
        assert_eq!(board.room_at(Position::new(2, 2)), None);
        assert_eq!(board.entry_cell(study), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_overlapping_rooms_rejected() {
        let catalog = catalog();
        let (study, kitchen) = rooms(&catalog);
        let err = Board::new(
            4,
            vec![layout(study, &[(0, 0), (1, 0)]), layout(kitchen, &[(1, 0)])],
            &catalog,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::OverlappingRooms { cell, .. } if cell == Position::new(1, 0)));
    }

    #[test]
    fn test_cell_out_of_bounds_rejected() {
        let catalog = catalog();
        let (study, kitchen) = rooms(&catalog);
        let err = Board::new(
            4,
            vec![layout(study, &[(0, 0)]), layout(kitchen, &[(4, 0)])],
            &catalog,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::CellOutOfBounds { .. }));
    }

    #[test]
    fn test_missing_layout_rejected() {
        let catalog = catalog();
        let (study, _) = rooms(&catalog);
        let err = Board::new(4, vec![layout(study, &[(0, 0)])], &catalog).unwrap_err();

        assert!(matches!(err, ConfigError::MissingLayout(name) if name == "Kitchen"));
    }

    #[test]
    fn test_door_must_be_room_cell() {
        let catalog = catalog();
        let (study, kitchen) = rooms(&catalog);
        let mut bad = layout(study, &[(0, 0)]);
        bad.doors.push(Position::new(1, 1));

        let err = Board::new(4, vec![bad, layout(kitchen, &[(3, 3)])], &catalog).unwrap_err();
        assert!(matches!(err, ConfigError::DoorOutsideRoom { .. }));
    }

    #[test]
    fn test_passage_must_lead_to_room() {
        let catalog = catalog();
        let (study, kitchen) = rooms(&catalog);
        let mut bad = layout(study, &[(0, 0)]);
        bad.passage = catalog.find("Trophy");

        let err = Board::new(4, vec![bad, layout(kitchen, &[(3, 3)])], &catalog).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPassage { .. }));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Position::new(0, 0).distance(Position::new(3, 4)), 7);
        assert_eq!(Position::new(5, 2).distance(Position::new(5, 2)), 0);
    }
}
