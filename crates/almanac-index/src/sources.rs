//! Decoded inputs of one build.

use std::collections::BTreeMap;

use almanac_ini::{
    DropRecord, NpcSpellRecord, PetRecord, QuestScript, Shop, SpecialDropRecord, SpecialMobRecord,
};
use almanac_map::MapFile;
use almanac_pub::{ClassRecord, ItemRecord, NpcRecord, SpellRecord};

/// Every collection the indexer consumes, already decoded.
///
/// Table entries are `(id, record)` pairs with blank slots removed. Optional
/// sources that were absent or corrupt are simply empty.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub items: Vec<(i32, ItemRecord)>,
    pub npcs: Vec<(i32, NpcRecord)>,
    pub spells: Vec<(i32, SpellRecord)>,
    pub classes: Vec<(i32, ClassRecord)>,

    /// Drop tables keyed by NPC id.
    pub drops: BTreeMap<i32, Vec<DropRecord>>,
    /// Shops keyed by shop id, crafts already merged in.
    pub shops: BTreeMap<i32, Shop>,
    pub pets: Vec<PetRecord>,
    pub special_drops: Vec<SpecialDropRecord>,
    pub special_mobs: Vec<SpecialMobRecord>,
    pub npc_spells: Vec<NpcSpellRecord>,

    /// Maps that were present and decodable, by id.
    pub maps: Vec<(i32, MapFile)>,
    pub quests: Vec<QuestScript>,
}
