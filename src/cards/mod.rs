//! Cards: the catalog of characters, weapons and rooms, and card triples.
//!
//! - `Catalog`: immutable card data with case-insensitive name lookup
//! - `Suggestion`: a (character, weapon, room) guess
//! - `Solution`: the hidden triple drawn at game start

pub mod catalog;
pub mod solution;

pub use catalog::{CardDefinition, CardId, Catalog, Category};
pub use solution::{Solution, Suggestion};
