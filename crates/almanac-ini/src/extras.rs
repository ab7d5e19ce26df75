//! Tuple-shaped relationship files: pets, special drops, special mobs and NPC
//! spellcasting.
//!
//! Each line is `id = {a, b, ..., "text"}`. Fields are matched by position and
//! records are returned in file order.

use tracing::trace;

use crate::lines::{entries, tuples, Tuple};

/// `pets.ini`: the item that represents an NPC as a pet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PetRecord {
    pub npc_id: i32,
    pub item_id: i32,
    pub level: i32,
    pub note: Option<String>,
}

/// `specialdrops.ini`: an effect attached to an item.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpecialDropRecord {
    pub item_id: i32,
    pub effect_id: i32,
    pub rate: f64,
    pub message: Option<String>,
}

/// `specialmobs.ini`: a special NPC variant and the NPC it spawns from.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpecialMobRecord {
    /// The special variant.
    pub npc_id: i32,
    /// The NPC whose death may spawn the variant.
    pub source_npc_id: i32,
    pub rate: f64,
    pub amount: i32,
    pub message: Option<String>,
}

/// `npcspells.ini`: one spell an NPC may cast.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NpcSpellRecord {
    pub npc_id: i32,
    pub spell_id: i32,
    /// Cast chance as a percentage.
    pub chance: i32,
    /// Seconds between casts.
    pub cooldown: i32,
    pub shout: Option<String>,
}

/// Walk every tuple of every line, keyed by the line's numeric id.
///
/// With `all_tuples` unset only the first tuple of a line is considered.
fn parse_tuples<T>(
    text: &str,
    what: &'static str,
    all_tuples: bool,
    build: impl Fn(i32, Tuple) -> Option<T>,
) -> Vec<T> {
    let mut records = Vec::new();

    for entry in entries(text) {
        let Some(id) = entry.id() else {
            trace!(line = entry.line, key = entry.key, "skipping {what} line with non-numeric id");
            continue;
        };

        let found = tuples(entry.value);
        let take = if all_tuples { found.len() } else { 1 };
        for tuple in found.into_iter().take(take) {
            match build(id, tuple) {
                Some(record) => records.push(record),
                None => trace!(line = entry.line, "skipping malformed {what} tuple"),
            }
        }
    }

    records
}

/// Parse `npc_id = {item_id, level, "note"}` lines.
pub fn parse_pets(text: &str) -> Vec<PetRecord> {
    parse_tuples(text, "pet", false, |npc_id, tuple| {
        Some(PetRecord {
            npc_id,
            item_id: tuple.int(0)?,
            level: tuple.int_or_zero(1)?,
            note: tuple.text,
        })
    })
}

/// Parse `item_id = {effect_id, rate, "message"}` lines.
pub fn parse_special_drops(text: &str) -> Vec<SpecialDropRecord> {
    parse_tuples(text, "special drop", false, |item_id, tuple| {
        Some(SpecialDropRecord {
            item_id,
            effect_id: tuple.int(0)?,
            rate: tuple.fields.get(1)?.parse().ok()?,
            message: tuple.text,
        })
    })
}

/// Parse `npc_id = {source_npc_id, rate, amount, "message"}` lines.
pub fn parse_special_mobs(text: &str) -> Vec<SpecialMobRecord> {
    parse_tuples(text, "special mob", false, |npc_id, tuple| {
        Some(SpecialMobRecord {
            npc_id,
            source_npc_id: tuple.int(0)?,
            rate: tuple.fields.get(1)?.parse().ok()?,
            amount: tuple.int(2)?,
            message: tuple.text,
        })
    })
}

/// Parse `npc_id = {spell_id, chance, cooldown, "shout"}` lines.
///
/// A line may carry several tuples; every one is returned.
pub fn parse_npc_spells(text: &str) -> Vec<NpcSpellRecord> {
    parse_tuples(text, "npc spell", true, |npc_id, tuple| {
        Some(NpcSpellRecord {
            npc_id,
            spell_id: tuple.int(0)?,
            chance: tuple.int_or_zero(1)?,
            cooldown: tuple.int_or_zero(2)?,
            shout: tuple.text,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pets() {
        let pets = parse_pets("12 = {300, 5, \"Loyal friend\"}\n13 = {301}\n14 = {x}\n");
        assert_eq!(
            pets,
            vec![
                PetRecord {
                    npc_id: 12,
                    item_id: 300,
                    level: 5,
                    note: Some("Loyal friend".into()),
                },
                PetRecord {
                    npc_id: 13,
                    item_id: 301,
                    level: 0,
                    note: None,
                },
            ]
        );
    }

    #[test]
    fn test_special_drops_require_rate() {
        let drops = parse_special_drops("7 = {2, 0.5, \"Sparkles\"}\n8 = {3}\n");
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].item_id, 7);
        assert_eq!(drops[0].rate, 0.5);
        assert_eq!(drops[0].message.as_deref(), Some("Sparkles"));
    }

    #[test]
    fn test_special_mobs() {
        let mobs = parse_special_mobs("; variants\n40 = {4, 1.5, 2, \"A golden slime appears!\"}\n");
        assert_eq!(mobs.len(), 1);
        assert_eq!(mobs[0].npc_id, 40);
        assert_eq!(mobs[0].source_npc_id, 4);
        assert_eq!(mobs[0].amount, 2);
    }

    #[test]
    fn test_npc_spells_keep_every_tuple_in_order() {
        let text = "9 = {3, 20, 5, \"Burn!\"} {4, 10}\n9 = {5}\n";
        let spells = parse_npc_spells(text);
        let ids: Vec<i32> = spells.iter().map(|s| s.spell_id).collect();

        assert_eq!(ids, vec![3, 4, 5]);
        assert!(spells.iter().all(|s| s.npc_id == 9));
        assert_eq!(spells[0].shout.as_deref(), Some("Burn!"));
        assert_eq!(spells[1].cooldown, 0);
    }
}
