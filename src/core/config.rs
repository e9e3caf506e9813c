//! Game configuration: the card catalog, the board and start positions.
//!
//! Configuration is read from a TOML `ConfigDocument`, validated once into a
//! `GameConfig` and shared read-only through an `Arc` by every component
//! that needs board or catalog data.
//!
//! ```
//! use cluedo_engine::core::GameConfig;
//!
//! let config = GameConfig::reference().unwrap();
//! assert_eq!(config.catalog().len(), 21);
//! assert_eq!(config.board().size(), 10);
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::board::{Board, Position, RoomLayout};
use crate::cards::{CardId, Catalog, Category};

/// Bundled reference layout.
pub const REFERENCE_CONFIG: &str = include_str!("../../config/reference.toml");

/// Player count bounds.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// A character and where its piece starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub name: String,
    pub start: [i32; 2],
}

/// A room, the cells it covers, its doors and its secret passage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomEntry {
    pub name: String,
    pub cells: Vec<[i32; 2]>,
    #[serde(default)]
    pub doors: Vec<[i32; 2]>,
    #[serde(default)]
    pub passage: Option<String>,
}

/// Raw configuration as written in TOML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub grid_size: i32,
    pub weapons: Vec<String>,
    pub characters: Vec<CharacterEntry>,
    pub rooms: Vec<RoomEntry>,
}

impl ConfigDocument {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Validated, immutable game configuration.
#[derive(Clone, Debug)]
pub struct GameConfig {
    catalog: Catalog,
    board: Board,
    /// Start cell per character, in catalog order.
    starts: Vec<(CardId, Position)>,
}

impl GameConfig {
    /// The bundled 10×10 reference configuration.
    pub fn reference() -> Result<Arc<Self>, ConfigError> {
        Self::from_toml_str(REFERENCE_CONFIG)
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Arc<Self>, ConfigError> {
        Self::from_document(ConfigDocument::from_toml_str(text)?)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Arc<Self>, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate a parsed document.
    pub fn from_document(doc: ConfigDocument) -> Result<Arc<Self>, ConfigError> {
        let characters: Vec<&str> = doc.characters.iter().map(|c| c.name.as_str()).collect();
        let rooms: Vec<&str> = doc.rooms.iter().map(|r| r.name.as_str()).collect();
        let weapons: Vec<&str> = doc.weapons.iter().map(String::as_str).collect();
        let catalog = Catalog::new(characters.as_slice(), weapons.as_slice(), rooms.as_slice())?;

        let mut layouts = Vec::with_capacity(doc.rooms.len());
        for entry in &doc.rooms {
            let room = catalog
                .lookup(&entry.name, Category::Room)
                .map_err(|_| ConfigError::UnknownRoom(entry.name.clone()))?;
            let passage = match &entry.passage {
                Some(to) => Some(catalog.lookup(to, Category::Room).map_err(|_| {
                    ConfigError::UnknownPassage {
                        from: entry.name.clone(),
                        to: to.clone(),
                    }
                })?),
                None => None,
            };
            layouts.push(RoomLayout {
                room,
                cells: entry.cells.iter().map(|&[x, y]| Position::new(x, y)).collect(),
                doors: entry.doors.iter().map(|&[x, y]| Position::new(x, y)).collect(),
                passage,
            });
        }
        let board = Board::new(doc.grid_size, layouts, &catalog)?;

        let mut starts = Vec::with_capacity(doc.characters.len());
        for entry in &doc.characters {
            let character = catalog
                .find(&entry.name)
                .ok_or_else(|| ConfigError::MissingStart(entry.name.clone()))?;
            let [x, y] = entry.start;
            let cell = Position::new(x, y);
            if !board.in_bounds(cell) || board.room_at(cell).is_some() {
                return Err(ConfigError::InvalidStart {
                    character: entry.name.clone(),
                    cell,
                });
            }
            starts.push((character, cell));
        }

        Ok(Arc::new(Self {
            catalog,
            board,
            starts,
        }))
    }

    /// The card catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Characters in seating order, with their start cells.
    #[must_use]
    pub fn starts(&self) -> &[(CardId, Position)] {
        &self.starts
    }

    /// Start cell of a character.
    #[must_use]
    pub fn start_position(&self, character: CardId) -> Option<Position> {
        self.starts
            .iter()
            .find(|(c, _)| *c == character)
            .map(|&(_, cell)| cell)
    }

    /// Largest table this configuration can seat: one participant per character.
    #[must_use]
    pub fn max_players(&self) -> usize {
        self.starts.len().min(MAX_PLAYERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(config: &GameConfig, category: Category) -> Vec<String> {
        config
            .catalog()
            .in_category(category)
            .map(|id| config.catalog().name(id).to_string())
            .collect()
    }

    #[test]
    fn test_reference_catalog() {
        let config = GameConfig::reference().unwrap();

        assert_eq!(
            names(&config, Category::Character),
            vec!["Sherlock", "Watson", "Daniel", "Ivy", "James", "Lilith"]
        );
        assert_eq!(names(&config, Category::Weapon).len(), 6);
        assert_eq!(names(&config, Category::Room).len(), 9);
        assert_eq!(config.max_players(), 6);
    }

    #[test]
    fn test_reference_board() {
        let config = GameConfig::reference().unwrap();
        let catalog = config.catalog();
        let board = config.board();

        let study = catalog.find("Study").unwrap();
        let kitchen = catalog.find("Kitchen").unwrap();
        let lounge = catalog.find("Lounge").unwrap();
        let library = catalog.find("Library").unwrap();
        let hall = catalog.find("Hall").unwrap();

        assert_eq!(board.secret_passage(study), Some(kitchen));
        assert_eq!(board.secret_passage(kitchen), Some(study));
        assert_eq!(board.secret_passage(lounge), Some(library));
        assert_eq!(board.secret_passage(library), Some(lounge));
        assert_eq!(board.secret_passage(hall), None);

        assert_eq!(board.room_at(Position::new(9, 9)), Some(kitchen));
        assert_eq!(board.entry_cell(kitchen), Some(Position::new(8, 8)));
        assert_eq!(board.room_at(Position::new(3, 3)), None);
    }

    #[test]
    fn test_every_cell_maps_to_at_most_one_room() {
        let config = GameConfig::reference().unwrap();
        let board = config.board();
        let catalog = config.catalog();

        for x in 0..board.size() {
            for y in 0..board.size() {
                let cell = Position::new(x, y);
                let owners = catalog
                    .in_category(Category::Room)
                    .filter(|&room| board.cells(room).contains(&cell))
                    .count();
                assert!(owners <= 1, "{cell} belongs to {owners} rooms");
                assert_eq!(owners == 1, board.room_at(cell).is_some());
            }
        }
    }

    #[test]
    fn test_start_positions_are_corridors() {
        let config = GameConfig::reference().unwrap();
        for &(character, cell) in config.starts() {
            assert!(config.board().room_at(cell).is_none());
            assert_eq!(config.start_position(character), Some(cell));
        }
    }

    #[test]
    fn test_document_round_trips_through_toml() {
        let doc = ConfigDocument::from_toml_str(REFERENCE_CONFIG).unwrap();
        let text = toml::to_string(&doc).unwrap();
        assert_eq!(ConfigDocument::from_toml_str(&text).unwrap(), doc);
    }

    #[test]
    fn test_unknown_passage_rejected() {
        let mut doc = ConfigDocument::from_toml_str(REFERENCE_CONFIG).unwrap();
        doc.rooms[1].passage = Some("Conservatory".into());

        let err = GameConfig::from_document(doc).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPassage { to, .. } if to == "Conservatory"));
    }

    #[test]
    fn test_start_inside_room_rejected() {
        let mut doc = ConfigDocument::from_toml_str(REFERENCE_CONFIG).unwrap();
        doc.characters[0].start = [0, 0];

        let err = GameConfig::from_document(doc).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStart { .. }));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = GameConfig::from_toml_str("grid_size = \"ten\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
