//! Card triples: the hidden solution and the guesses made against it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::catalog::{CardId, Catalog, Category};
use crate::core::error::InputError;
use crate::core::rng::GameRng;

/// A (character, weapon, room) triple.
///
/// Used for suggestions and accusations. The hidden solution wraps one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    pub character: CardId,
    pub weapon: CardId,
    pub room: CardId,
}

impl Suggestion {
    #[must_use]
    pub const fn new(character: CardId, weapon: CardId, room: CardId) -> Self {
        Self {
            character,
            weapon,
            room,
        }
    }

    /// Build a triple from names, validating each against its category.
    pub fn from_names(
        catalog: &Catalog,
        character: &str,
        weapon: &str,
        room: &str,
    ) -> Result<Self, InputError> {
        Ok(Self {
            character: catalog.lookup(character, Category::Character)?,
            weapon: catalog.lookup(weapon, Category::Weapon)?,
            room: catalog.lookup(room, Category::Room)?,
        })
    }

    /// The card named for a category.
    #[must_use]
    pub const fn get(&self, category: Category) -> CardId {
        match category {
            Category::Character => self.character,
            Category::Weapon => self.weapon,
            Category::Room => self.room,
        }
    }

    /// The three cards in solution order.
    #[must_use]
    pub fn cards(&self) -> [CardId; 3] {
        [self.character, self.weapon, self.room]
    }

    /// Check if a card is part of this triple.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards().contains(&card)
    }

    /// Cards of `hand` that appear in this triple, in hand order.
    #[must_use]
    pub fn matching(&self, hand: &[CardId]) -> SmallVec<[CardId; 3]> {
        hand.iter().copied().filter(|&card| self.contains(card)).collect()
    }

    /// Render with card names.
    #[must_use]
    pub fn describe(&self, catalog: &Catalog) -> String {
        format!(
            "{} with the {} in the {}",
            catalog.name(self.character),
            catalog.name(self.weapon),
            catalog.name(self.room)
        )
    }
}

/// The hidden solution. Drawn once at game start and never changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution(Suggestion);

impl Solution {
    /// Fix a known solution (tests, replays).
    #[must_use]
    pub const fn new(triple: Suggestion) -> Self {
        Self(triple)
    }

    /// Draw one card of each category uniformly from the shared stream.
    #[must_use]
    pub fn draw(catalog: &Catalog, rng: &mut GameRng) -> Self {
        let mut pick = |category| {
            let cards: Vec<_> = catalog.in_category(category).collect();
            // Validated catalogs have no empty category.
            cards[rng.gen_range_usize(0..cards.len())]
        };
        Self(Suggestion {
            character: pick(Category::Character),
            weapon: pick(Category::Weapon),
            room: pick(Category::Room),
        })
    }

    /// The solution triple.
    #[must_use]
    pub const fn triple(&self) -> &Suggestion {
        &self.0
    }

    /// Check an accusation.
    #[must_use]
    pub fn matches(&self, accusation: &Suggestion) -> bool {
        self.0 == *accusation
    }

    /// Check if a card is one of the three solution cards.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.0.contains(card)
    }
}
