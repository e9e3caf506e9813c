//! Knowledge base of an automated participant.
//!
//! Holds one candidate set per category. Every set starts as the full
//! category and only ever shrinks as information arrives:
//!
//! 1. a card dealt to the owner is not part of the solution;
//! 2. a card shown to the owner in a refutation is not part of the solution;
//! 3. when nobody can refute the owner's suggestion, each suggested card that
//!    is still a candidate becomes the only candidate of its category.
//!
//! A removal that would leave a category empty is refused with
//! `GameError::KnowledgeExhausted`: the true solution card is never held and
//! never shown, so an empty set means an update rule was applied to bad data.

use im::OrdSet;
use log::debug;
use rustc_hash::FxHashMap;

use crate::cards::{CardId, Catalog, Category, Suggestion};
use crate::core::error::GameError;
use crate::core::player::PlayerId;

/// Candidate sets and per-participant card knowledge.
///
/// ```
/// use cluedo_engine::cards::Category;
/// use cluedo_engine::core::{GameConfig, PlayerId};
/// use cluedo_engine::deduction::KnowledgeBase;
///
/// let config = GameConfig::reference().unwrap();
/// let catalog = config.catalog();
/// let mut kb = KnowledgeBase::new(PlayerId::new(0), catalog);
///
/// kb.observe_own_card(catalog.find("Trophy").unwrap()).unwrap();
/// assert_eq!(kb.candidates(Category::Weapon).len(), 5);
/// assert!(!kb.is_ready());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeBase {
    owner: PlayerId,
    /// Indexed by `Category::index()`.
    candidates: [OrdSet<CardId>; 3],
    known_held: FxHashMap<PlayerId, OrdSet<CardId>>,
    known_not_held: FxHashMap<PlayerId, OrdSet<CardId>>,
}

impl KnowledgeBase {
    /// Fresh knowledge: every card of every category is a candidate.
    #[must_use]
    pub fn new(owner: PlayerId, catalog: &Catalog) -> Self {
        let full = |category| catalog.in_category(category).collect::<OrdSet<_>>();
        Self {
            owner,
            candidates: [
                full(Category::Character),
                full(Category::Weapon),
                full(Category::Room),
            ],
            known_held: FxHashMap::default(),
            known_not_held: FxHashMap::default(),
        }
    }

    /// The participant this knowledge belongs to.
    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Cards still considered possible for a category.
    #[must_use]
    pub fn candidates(&self, category: Category) -> &OrdSet<CardId> {
        &self.candidates[category.index()]
    }

    /// Check if a card is still a candidate in any category.
    #[must_use]
    pub fn is_candidate(&self, card: CardId) -> bool {
        self.candidates.iter().any(|set| set.contains(&card))
    }

    /// Total number of candidates across categories.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.candidates.iter().map(OrdSet::len).sum()
    }

    /// Cards a participant is known to hold.
    #[must_use]
    pub fn known_held(&self, player: PlayerId) -> Option<&OrdSet<CardId>> {
        self.known_held.get(&player)
    }

    /// Cards a participant is known not to hold.
    #[must_use]
    pub fn known_not_held(&self, player: PlayerId) -> Option<&OrdSet<CardId>> {
        self.known_not_held.get(&player)
    }

    /// A card dealt to the owner.
    pub fn observe_own_card(&mut self, card: CardId) -> Result<(), GameError> {
        self.eliminate(card)
    }

    /// The owner's suggestion was refuted and `shown` was revealed.
    ///
    /// `passed` are the participants asked before `refuter` who could not
    /// refute; they hold none of the three suggested cards. Nothing is
    /// assumed about participants after the refuter.
    pub fn observe_refutation(
        &mut self,
        suggestion: &Suggestion,
        refuter: PlayerId,
        shown: CardId,
        passed: &[PlayerId],
    ) -> Result<(), GameError> {
        self.eliminate(shown)?;
        debug!("{} learns {} holds {}", self.owner, refuter, shown);
        self.known_held.entry(refuter).or_default().insert(shown);
        self.record_not_held(passed.iter().copied(), suggestion);
        Ok(())
    }

    /// Nobody could refute the owner's suggestion.
    ///
    /// Each category narrows to the suggested card when that card is still a
    /// candidate. A suggested card already ruled out (for example one in the
    /// owner's own hand) carries no information about its category, which is
    /// then left as it is. Every other participant is recorded as holding
    /// none of the three cards.
    pub fn observe_unrefuted(
        &mut self,
        suggestion: &Suggestion,
        others: impl IntoIterator<Item = PlayerId>,
    ) -> Result<(), GameError> {
        debug!("{}: nobody refuted {:?}", self.owner, suggestion.cards());
        let owner = self.owner;
        self.record_not_held(others.into_iter().filter(|&p| p != owner), suggestion);

        for category in Category::ALL {
            let card = suggestion.get(category);
            let set = &mut self.candidates[category.index()];
            if set.contains(&card) {
                *set = OrdSet::unit(card);
            } else {
                debug!("{}: {} already ruled out, {} unchanged", owner, card, category);
            }
        }
        Ok(())
    }

    /// Another participant's suggestion: only who could not refute is public.
    pub fn observe_public_refutation(&mut self, suggestion: &Suggestion, passed: &[PlayerId]) {
        let owner = self.owner;
        self.record_not_held(passed.iter().copied().filter(|&p| p != owner), suggestion);
    }

    /// Ready to accuse once every category has a single candidate.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.candidates.iter().all(|set| set.len() == 1)
    }

    /// The accusation this knowledge supports, if it is conclusive.
    #[must_use]
    pub fn accusation(&self) -> Option<Suggestion> {
        if !self.is_ready() {
            return None;
        }
        Some(Suggestion::new(
            *self.candidates(Category::Character).get_min()?,
            *self.candidates(Category::Weapon).get_min()?,
            *self.candidates(Category::Room).get_min()?,
        ))
    }

    /// Pick the next suggestion from surviving candidates.
    ///
    /// Takes the first candidate (catalog order) of each category that is not
    /// in `hand`. The room is `current_room` while it is still a candidate.
    #[must_use]
    pub fn choose_suggestion(&self, current_room: Option<CardId>, hand: &[CardId]) -> Suggestion {
        let pick = |category: Category| {
            let set = self.candidates(category);
            set.iter()
                .find(|card| !hand.contains(card))
                .or_else(|| set.get_min())
                .copied()
        };

        let room = current_room
            .filter(|room| self.candidates(Category::Room).contains(room))
            .or_else(|| pick(Category::Room));

        // Candidate sets are never empty, the fallbacks are unreachable.
        let fallback = CardId::new(0);
        Suggestion::new(
            pick(Category::Character).unwrap_or(fallback),
            pick(Category::Weapon).unwrap_or(fallback),
            room.unwrap_or(fallback),
        )
    }

    fn eliminate(&mut self, card: CardId) -> Result<(), GameError> {
        for category in Category::ALL {
            let set = &mut self.candidates[category.index()];
            if set.contains(&card) {
                if set.len() == 1 {
                    return Err(GameError::KnowledgeExhausted {
                        player: self.owner,
                        category,
                    });
                }
                set.remove(&card);
            }
        }
        Ok(())
    }

    fn record_not_held(&mut self, players: impl Iterator<Item = PlayerId>, suggestion: &Suggestion) {
        for player in players {
            let set = self.known_not_held.entry(player).or_default();
            set.extend(suggestion.cards());
        }
    }
}
