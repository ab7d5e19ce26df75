//! Parsers for EO text sources.
//!
//! Two grammars are covered:
//!
//! - Key/value relationship files (`drops.ini`, `shops.ini`, `crafts.ini`,
//!   `pets.ini`, `specialdrops.ini`, `specialmobs.ini`, `npcspells.ini`). Lines
//!   are `id = csv`, `id.property = value` or `id = {tuple}`; comments start
//!   with `;` or `#`.
//! - Quest scripts (`*.eqf`), mined for names, dialogue NPCs, rewards and
//!   requirements by [`QuestParser`].
//!
//! Text parsing never fails as a whole. A malformed line, group or tuple is
//! skipped and the rest of the source is kept.
//!
//! # Example
//!
//! ```
//! use almanac_ini::parse_drops;
//!
//! let tables = parse_drops("3 = 10,1,2,5.5,20,3,4,1.0");
//! assert_eq!(tables[&3].len(), 2);
//! ```

mod drops;
mod error;
mod extras;
mod lines;
mod quest;
mod shops;

pub use drops::{parse_drop_groups, parse_drops, DropRecord, DROP_GROUP_SIZE};
pub use error::{Error, Result};
pub use extras::{
    parse_npc_spells, parse_pets, parse_special_drops, parse_special_mobs, NpcSpellRecord,
    PetRecord, SpecialDropRecord, SpecialMobRecord,
};
pub use lines::{csv_groups, entries, tuples, Entry, Tuple};
pub use quest::{ItemAmount, KillAmount, QuestParser, QuestScript};
pub use shops::{
    merge_crafts, parse_craft_groups, parse_shops, parse_trade_groups, CraftRecipe, Ingredient,
    Shop, ShopTrade, CRAFT_GROUP_SIZE, TRADE_GROUP_SIZE,
};
