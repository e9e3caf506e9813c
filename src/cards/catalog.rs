//! Card catalog: every character, weapon and room card in the game.
//!
//! `CardId` is a dense index into the catalog in declaration order
//! (characters first, then weapons, then rooms), so ordered sets of
//! `CardId` iterate in catalog order.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, InputError};

/// Identifier of a card in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The three disjoint card categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Character,
    Weapon,
    Room,
}

impl Category {
    /// All categories, in solution order.
    pub const ALL: [Category; 3] = [Category::Character, Category::Weapon, Category::Room];

    /// Position of the category inside a solution triple.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Category::Character => 0,
            Category::Weapon => 1,
            Category::Room => 2,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::Character => "character",
            Category::Weapon => "weapon",
            Category::Room => "room",
        })
    }
}

/// Static data for one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,
    pub name: String,
    pub category: Category,
}

/// Immutable card catalog with name lookup.
///
/// ## Example
///
/// ```
/// use cluedo_engine::cards::{Catalog, Category};
///
/// let catalog = Catalog::new(&["Sherlock", "Watson"], &["Trophy"], &["Study", "Hall"]).unwrap();
///
/// let study = catalog.lookup("study", Category::Room).unwrap();
/// assert_eq!(catalog.name(study), "Study");
/// assert_eq!(catalog.len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct Catalog {
    cards: Vec<CardDefinition>,
    by_name: FxHashMap<String, CardId>,
}

impl Catalog {
    /// Build a catalog from the three ordered name lists.
    ///
    /// Names must be unique ignoring case and every category non-empty.
    pub fn new<S: AsRef<str>>(
        characters: &[S],
        weapons: &[S],
        rooms: &[S],
    ) -> Result<Self, ConfigError> {
        let mut catalog = Self {
            cards: Vec::with_capacity(characters.len() + weapons.len() + rooms.len()),
            by_name: FxHashMap::default(),
        };

        for (category, names) in [
            (Category::Character, characters),
            (Category::Weapon, weapons),
            (Category::Room, rooms),
        ] {
            if names.is_empty() {
                return Err(ConfigError::EmptyCategory(category));
            }
            for name in names {
                catalog.register(name.as_ref().trim(), category)?;
            }
        }

        Ok(catalog)
    }

    fn register(&mut self, name: &str, category: Category) -> Result<(), ConfigError> {
        let key = name.to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(ConfigError::DuplicateCard(name.to_string()));
        }

        let id = CardId::new(self.cards.len() as u16);
        self.by_name.insert(key, id);
        self.cards.push(CardDefinition {
            id,
            name: name.to_string(),
            category,
        });
        Ok(())
    }

    /// Get a card definition.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(id.index())
    }

    /// Name of a card. Unknown IDs render as their debug form.
    #[must_use]
    pub fn name(&self, id: CardId) -> &str {
        self.get(id).map_or("<unknown card>", |def| def.name.as_str())
    }

    /// Category of a card.
    #[must_use]
    pub fn category(&self, id: CardId) -> Option<Category> {
        self.get(id).map(|def| def.category)
    }

    /// Find a card by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<CardId> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }

    /// Find a card by name and check its category.
    pub fn lookup(&self, name: &str, expected: Category) -> Result<CardId, InputError> {
        let id = self
            .find(name)
            .ok_or_else(|| InputError::UnknownCard(name.trim().to_string()))?;

        if self.category(id) != Some(expected) {
            return Err(InputError::WrongCategory {
                name: self.name(id).to_string(),
                expected,
            });
        }
        Ok(id)
    }

    /// All cards of one category, in catalog order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = CardId> + '_ {
        self.cards
            .iter()
            .filter(move |def| def.category == category)
            .map(|def| def.id)
    }

    /// All cards, in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|def| def.id)
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty. Never true for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Render a list of cards as comma separated names.
    #[must_use]
    pub fn names(&self, cards: impl IntoIterator<Item = CardId>) -> String {
        cards
            .into_iter()
            .map(|id| self.name(id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
