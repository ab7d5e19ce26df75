//! Pub table decoder for EO game data.
//!
//! The four "pub" files describe the static game catalogue. They share one
//! framing and differ only in their record layout:
//!
//! | Kind | Magic | Record |
//! |------|-------|--------|
//! | Items | `EIF` | name + 58-byte block |
//! | NPCs | `ENF` | name + 39-byte block |
//! | Spells | `ESF` | name + shout + 51-byte block |
//! | Classes | `ECF` | name + 14-byte block |
//!
//! # File Format
//!
//! - 3 bytes: Magic
//! - 4 bytes: Revision id (two EO shorts)
//! - 2 bytes: Record count (EO short)
//! - 1 byte: Version
//! - N records, one per id slot; a trailing record named `eof` closes the table
//!
//! # Example
//!
//! ```no_run
//! use almanac_pub::{ItemRecord, PubTable};
//!
//! let bytes = std::fs::read("data/dat001.eif")?;
//! let table = PubTable::<ItemRecord>::parse(&bytes)?;
//!
//! for (id, item) in table.into_named() {
//!     println!("{id}: {} ({:?})", item.name, item.kind);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod class;
mod error;
mod item;
mod npc;
mod spell;
mod stats;
mod table;

pub use class::{ClassRecord, CLASS_DATA_SIZE};
pub use error::{Error, Result};
pub use item::{ItemRecord, ItemSubType, ItemType, ITEM_DATA_SIZE};
pub use npc::{NpcRecord, NpcType, NPC_DATA_SIZE};
pub use spell::{SpellRecord, SpellType, TargetRestrict, TargetType, SPELL_DATA_SIZE};
pub use stats::{Attributes, CombatStats, Requirements};
pub use table::{PubHeader, PubKind, PubRecord, PubTable, EOF_SENTINEL, HEADER_SIZE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_magic() {
        let bytes = PubTable::new(vec![NpcRecord::default()]).to_bytes();
        let result = PubTable::<ItemRecord>::parse(&bytes);
        assert!(matches!(result, Err(Error::InvalidMagic { kind: PubKind::Item, .. })));
    }

    #[test]
    fn test_truncated_table() {
        let mut bytes = PubTable::new(vec![ClassRecord {
            name: "Priest".into(),
            ..Default::default()
        }])
        .to_bytes();
        bytes.truncate(bytes.len() - 3);

        let result = PubTable::<ClassRecord>::parse(&bytes);
        assert!(matches!(result, Err(Error::TruncatedRecord { index: 0, .. })));
    }

    #[test]
    fn test_short_header() {
        assert!(PubTable::<ClassRecord>::parse(b"ECF\x01").is_err());
        assert!(PubTable::<ClassRecord>::parse(b"").is_err());
    }

    #[test]
    fn test_named_ids_skip_blank_slots_and_sentinel() {
        let named = |name: &str| ClassRecord {
            name: name.into(),
            base: Attributes {
                strength: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        let table = PubTable::new(vec![
            named("Peasant"),
            named("   "),
            named("Magician"),
            named(EOF_SENTINEL),
        ]);
        let parsed = PubTable::<ClassRecord>::parse(&table.to_bytes()).unwrap();
        assert_eq!(parsed.records().len(), 3);

        let ids: Vec<(i32, String)> = parsed.into_named().map(|(id, c)| (id, c.name)).collect();
        assert_eq!(ids, vec![(1, "Peasant".to_string()), (3, "Magician".to_string())]);
    }
}
