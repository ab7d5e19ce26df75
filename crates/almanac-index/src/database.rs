//! The published game database.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::BuildHasherDefault;

use hashbrown::HashMap as FastHashMap;
use rustc_hash::FxHasher;

use crate::entity::{GameClass, Item, Map, Npc, Quest, Spell};

pub(crate) type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Normalize a name for the case-insensitive indices.
pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Entity kinds that can be searched by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EntityKind {
    Item,
    Npc,
    Spell,
    Class,
    Map,
    Quest,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        Self::Item,
        Self::Npc,
        Self::Spell,
        Self::Class,
        Self::Map,
        Self::Quest,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Npc => "npc",
            Self::Spell => "spell",
            Self::Class => "class",
            Self::Map => "map",
            Self::Quest => "quest",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchHit {
    pub kind: EntityKind,
    pub id: i32,
    pub name: String,
}

/// Entity counts per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Counts {
    pub items: usize,
    pub npcs: usize,
    pub spells: usize,
    pub classes: usize,
    pub maps: usize,
    pub quests: usize,
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items, {} npcs, {} spells, {} classes, {} maps, {} quests",
            self.items, self.npcs, self.spells, self.classes, self.maps, self.quests
        )
    }
}

/// A fully cross-referenced snapshot of the game data.
///
/// Built once by [`load_game_database`](crate::load_game_database) and never
/// mutated afterwards; share it behind an `Arc` for concurrent readers.
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameDatabase {
    pub(crate) items: BTreeMap<i32, Item>,
    pub(crate) npcs: BTreeMap<i32, Npc>,
    pub(crate) spells: BTreeMap<i32, Spell>,
    pub(crate) classes: BTreeMap<i32, GameClass>,
    pub(crate) maps: BTreeMap<i32, Map>,
    pub(crate) quests: BTreeMap<i32, Quest>,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) items_by_name: FxHashMap<String, i32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) npcs_by_name: FxHashMap<String, i32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) spells_by_name: FxHashMap<String, i32>,
}

impl GameDatabase {
    #[inline]
    pub fn item(&self, id: i32) -> Option<&Item> {
        self.items.get(&id)
    }

    #[inline]
    pub fn npc(&self, id: i32) -> Option<&Npc> {
        self.npcs.get(&id)
    }

    #[inline]
    pub fn spell(&self, id: i32) -> Option<&Spell> {
        self.spells.get(&id)
    }

    #[inline]
    pub fn class(&self, id: i32) -> Option<&GameClass> {
        self.classes.get(&id)
    }

    #[inline]
    pub fn map(&self, id: i32) -> Option<&Map> {
        self.maps.get(&id)
    }

    #[inline]
    pub fn quest(&self, id: i32) -> Option<&Quest> {
        self.quests.get(&id)
    }

    /// Look up an item by name, ignoring case.
    ///
    /// When several items share a name the one with the highest id wins.
    pub fn item_by_name(&self, name: &str) -> Option<&Item> {
        self.items_by_name
            .get(&name_key(name))
            .and_then(|id| self.items.get(id))
    }

    /// Look up an NPC by name, ignoring case. Highest id wins on collision.
    pub fn npc_by_name(&self, name: &str) -> Option<&Npc> {
        self.npcs_by_name
            .get(&name_key(name))
            .and_then(|id| self.npcs.get(id))
    }

    /// Look up a spell by name, ignoring case. Highest id wins on collision.
    pub fn spell_by_name(&self, name: &str) -> Option<&Spell> {
        self.spells_by_name
            .get(&name_key(name))
            .and_then(|id| self.spells.get(id))
    }

    /// All items in id order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn npcs(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.values()
    }

    pub fn spells(&self) -> impl Iterator<Item = &Spell> {
        self.spells.values()
    }

    pub fn classes(&self) -> impl Iterator<Item = &GameClass> {
        self.classes.values()
    }

    pub fn maps(&self) -> impl Iterator<Item = &Map> {
        self.maps.values()
    }

    pub fn quests(&self) -> impl Iterator<Item = &Quest> {
        self.quests.values()
    }

    pub fn counts(&self) -> Counts {
        Counts {
            items: self.items.len(),
            npcs: self.npcs.len(),
            spells: self.spells.len(),
            classes: self.classes.len(),
            maps: self.maps.len(),
            quests: self.quests.len(),
        }
    }

    /// Entities of one kind whose name contains `needle`, ignoring case.
    ///
    /// Results are in id order. An empty needle matches everything.
    pub fn search(&self, kind: EntityKind, needle: &str) -> Vec<SearchHit> {
        let needle = needle.trim().to_lowercase();

        let names: Box<dyn Iterator<Item = (i32, &str)> + '_> = match kind {
            EntityKind::Item => Box::new(self.items.values().map(|e| (e.id, e.name.as_str()))),
            EntityKind::Npc => Box::new(self.npcs.values().map(|e| (e.id, e.name.as_str()))),
            EntityKind::Spell => Box::new(self.spells.values().map(|e| (e.id, e.name.as_str()))),
            EntityKind::Class => Box::new(self.classes.values().map(|e| (e.id, e.name.as_str()))),
            EntityKind::Map => Box::new(self.maps.values().map(|e| (e.id, e.name.as_str()))),
            EntityKind::Quest => Box::new(self.quests.values().map(|e| (e.id, e.name.as_str()))),
        };

        names
            .filter(|(_, name)| name.to_lowercase().contains(&needle))
            .map(|(id, name)| SearchHit {
                kind,
                id,
                name: name.to_string(),
            })
            .collect()
    }
}

impl fmt::Debug for GameDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameDatabase")
            .field("items", &self.items.len())
            .field("npcs", &self.npcs.len())
            .field("spells", &self.spells.len())
            .field("classes", &self.classes.len())
            .field("maps", &self.maps.len())
            .field("quests", &self.quests.len())
            .finish()
    }
}
