//! Entities of the game database and the denormalized edges between them.
//!
//! Every edge is stored on both endpoints and carries a copy of the
//! counterpart's name taken at build time.

use almanac_pub::{
    Attributes, ClassRecord, CombatStats, ItemRecord, ItemSubType, ItemType, NpcRecord, NpcType,
    Requirements, SpellRecord, SpellType, TargetRestrict, TargetType,
};

/// An NPC that drops an item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropSource {
    pub npc_id: i32,
    pub npc_name: String,
    pub min: i32,
    pub max: i32,
    pub rate: f64,
}

/// An item in an NPC's drop table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropEntry {
    pub item_id: i32,
    pub item_name: String,
    pub min: i32,
    pub max: i32,
    pub rate: f64,
}

/// A shop that trades an item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShopListing {
    pub shop_id: i32,
    pub shop_name: String,
    pub buy_price: i32,
    pub sell_price: i32,
}

/// An item a shop NPC trades.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShopItem {
    pub item_id: i32,
    pub item_name: String,
    pub buy_price: i32,
    pub sell_price: i32,
}

/// A resolved recipe ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CraftIngredient {
    pub item_id: i32,
    pub item_name: String,
    pub amount: i32,
}

/// A shop where an item can be crafted, with its recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CraftSource {
    pub shop_id: i32,
    pub shop_name: String,
    pub ingredients: Vec<CraftIngredient>,
}

/// A recipe offered by a shop NPC.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CraftOffer {
    pub item_id: i32,
    pub item_name: String,
    pub ingredients: Vec<CraftIngredient>,
}

/// The item that represents an NPC as a pet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PetInfo {
    pub item_id: i32,
    pub item_name: String,
    pub level: i32,
    pub note: Option<String>,
}

/// An NPC an item summons as a pet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PetLink {
    pub npc_id: i32,
    pub npc_name: String,
    pub level: i32,
}

/// Special effect played when an item drops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpecialDrop {
    pub effect_id: i32,
    pub rate: f64,
    pub message: Option<String>,
}

/// A special variant that may spawn when this NPC dies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpecialSpawn {
    /// The variant.
    pub npc_id: i32,
    pub npc_name: String,
    /// The NPC carrying this annotation.
    pub source_npc_id: i32,
    pub source_npc_name: String,
    pub rate: f64,
    pub amount: i32,
    pub message: Option<String>,
}

/// A spell an NPC casts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Spellcast {
    pub spell_id: i32,
    pub spell_name: String,
    pub chance: i32,
    pub cooldown: i32,
    pub shout: Option<String>,
}

/// An NPC that casts a spell.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpellCaster {
    pub npc_id: i32,
    pub npc_name: String,
    pub chance: i32,
    pub cooldown: i32,
}

/// Where an NPC spawns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NpcSpawn {
    pub map_id: i32,
    pub map_name: String,
    pub x: u8,
    pub y: u8,
    pub spawn_type: u8,
    pub spawn_time: u16,
    pub amount: u8,
}

/// An NPC placed on a map.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapSpawn {
    pub npc_id: i32,
    pub npc_name: String,
    pub x: u8,
    pub y: u8,
    pub spawn_type: u8,
    pub spawn_time: u16,
    pub amount: u8,
}

/// How an NPC takes part in a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NpcQuestRole {
    Dialogue,
    Kill,
}

/// How an item takes part in a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ItemQuestRole {
    Reward,
    Requirement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NpcQuestRef {
    pub quest_id: i32,
    pub quest_name: String,
    pub role: NpcQuestRole,
    /// Kill count; 1 for dialogue.
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ItemQuestRef {
    pub quest_id: i32,
    pub quest_name: String,
    pub role: ItemQuestRole,
    pub amount: i32,
}

/// A dialogue NPC of a quest, translated from its vendor id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuestNpc {
    pub npc_id: i32,
    pub vendor_id: i32,
    pub name: String,
    pub graphic: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuestItem {
    pub item_id: i32,
    pub item_name: String,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuestKill {
    pub npc_id: i32,
    pub npc_name: String,
    pub amount: i32,
}

/// An item table entry with every relationship it takes part in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub graphic: u16,
    pub kind: ItemType,
    pub sub_kind: ItemSubType,
    pub special: u8,
    pub weight: u8,
    pub size: u8,
    pub stats: CombatStats,
    pub bonus: Attributes,
    pub requirements: Requirements,
    /// Category-specific values (heal amount, warp target, ...).
    pub spec1: u32,
    pub spec2: u8,
    pub spec3: u8,
    pub element: u8,
    pub element_power: u8,

    pub drops_from: Vec<DropSource>,
    pub sold_at: Vec<ShopListing>,
    pub crafted_at: Vec<CraftSource>,
    pub special_drop: Option<SpecialDrop>,
    pub pet_for: Vec<PetLink>,
    pub quests: Vec<ItemQuestRef>,
}

impl Item {
    pub fn from_record(id: i32, record: ItemRecord) -> Self {
        Self {
            id,
            name: record.name,
            graphic: record.graphic,
            kind: record.kind,
            sub_kind: record.sub_kind,
            special: record.special,
            weight: record.weight,
            size: record.size,
            stats: record.stats,
            bonus: record.bonus,
            requirements: record.requirements,
            spec1: record.spec1,
            spec2: record.spec2,
            spec3: record.spec3,
            element: record.element,
            element_power: record.element_power,
            drops_from: Vec::new(),
            sold_at: Vec::new(),
            crafted_at: Vec::new(),
            special_drop: None,
            pet_for: Vec::new(),
            quests: Vec::new(),
        }
    }
}

/// An NPC table entry with every relationship it takes part in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Npc {
    pub id: i32,
    pub name: String,
    pub graphic: u16,
    pub boss: bool,
    pub child: bool,
    pub kind: NpcType,
    /// Second id namespace, used only by quest dialogue references.
    pub vendor_id: i32,
    pub stats: CombatStats,
    pub experience: u16,

    pub drops: Vec<DropEntry>,
    pub spawns: Vec<NpcSpawn>,
    pub pet: Option<PetInfo>,
    pub special_spawns: Vec<SpecialSpawn>,
    pub spellcast: Option<Spellcast>,
    pub quests: Vec<NpcQuestRef>,
    pub shop_items: Vec<ShopItem>,
    pub craft_items: Vec<CraftOffer>,
}

impl Npc {
    pub fn from_record(id: i32, record: NpcRecord) -> Self {
        Self {
            id,
            name: record.name,
            graphic: record.graphic,
            boss: record.boss,
            child: record.child,
            kind: record.kind,
            vendor_id: i32::from(record.vendor_id),
            stats: record.stats,
            experience: record.experience,
            drops: Vec::new(),
            spawns: Vec::new(),
            pet: None,
            special_spawns: Vec::new(),
            spellcast: None,
            quests: Vec::new(),
            shop_items: Vec::new(),
            craft_items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Spell {
    pub id: i32,
    pub name: String,
    pub shout: String,
    pub icon: u16,
    pub graphic: u16,
    pub kind: SpellType,
    pub target_restrict: TargetRestrict,
    pub target_type: TargetType,
    pub tp_cost: u16,
    pub sp_cost: u16,
    pub cast_time: u8,
    pub min_damage: u16,
    pub max_damage: u16,
    pub accuracy: u16,
    pub hp_heal: u16,
    /// Not present in the spell table; always zero.
    pub requirements: Requirements,

    pub cast_by: Vec<SpellCaster>,
}

impl Spell {
    pub fn from_record(id: i32, record: SpellRecord) -> Self {
        Self {
            id,
            name: record.name,
            shout: record.shout,
            icon: record.icon,
            graphic: record.graphic,
            kind: record.kind,
            target_restrict: record.target_restrict,
            target_type: record.target_type,
            tp_cost: record.tp_cost,
            sp_cost: record.sp_cost,
            cast_time: record.cast_time,
            min_damage: record.min_damage,
            max_damage: record.max_damage,
            accuracy: record.accuracy,
            hp_heal: record.hp_heal,
            requirements: record.requirements,
            cast_by: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameClass {
    pub id: i32,
    pub name: String,
    /// Class id this one derives from; 0 for none.
    pub parent: i32,
    pub stat_group: u8,
    pub base: Attributes,
}

impl GameClass {
    pub fn from_record(id: i32, record: ClassRecord) -> Self {
        Self {
            id,
            name: record.name,
            parent: i32::from(record.parent),
            stat_group: record.stat_group,
            base: record.base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Map {
    pub id: i32,
    pub name: String,
    pub spawns: Vec<MapSpawn>,
}

impl Map {
    /// Name to show for a map; unnamed maps become `Map <id>`.
    pub fn display_name(id: i32, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            format!("Map {id}")
        } else {
            name.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Quest {
    pub id: i32,
    pub name: String,
    /// Dialogue NPCs in first-mention order.
    pub npcs: Vec<QuestNpc>,
    pub rewards: Vec<QuestItem>,
    pub experience: i64,
    pub kills: Vec<QuestKill>,
    pub item_requirements: Vec<QuestItem>,
}
