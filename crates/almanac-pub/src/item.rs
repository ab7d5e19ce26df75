//! Item table (`EIF`) records.

use almanac_common::codec::decode_number;
use almanac_common::{EoReader, EoWriter};
use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::stats::{Attributes, CombatStats, Requirements};
use crate::{PubKind, PubRecord};

/// Size of the fixed data block following an item name.
pub const ITEM_DATA_SIZE: usize = 58;

/// Item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ItemType {
    #[default]
    Static,
    Money,
    Heal,
    Teleport,
    Spell,
    ExpReward,
    StatReward,
    SkillReward,
    Key,
    Weapon,
    Shield,
    Armor,
    Hat,
    Boots,
    Gloves,
    Accessory,
    Belt,
    Necklace,
    Ring,
    Armlet,
    Bracer,
    Beer,
    EffectPotion,
    HairDye,
    CureCurse,
    Other(u8),
}

impl ItemType {
    /// Parse from the raw table value.
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::Static,
            2 => Self::Money,
            3 => Self::Heal,
            4 => Self::Teleport,
            5 => Self::Spell,
            6 => Self::ExpReward,
            7 => Self::StatReward,
            8 => Self::SkillReward,
            9 => Self::Key,
            10 => Self::Weapon,
            11 => Self::Shield,
            12 => Self::Armor,
            13 => Self::Hat,
            14 => Self::Boots,
            15 => Self::Gloves,
            16 => Self::Accessory,
            17 => Self::Belt,
            18 => Self::Necklace,
            19 => Self::Ring,
            20 => Self::Armlet,
            21 => Self::Bracer,
            22 => Self::Beer,
            23 => Self::EffectPotion,
            24 => Self::HairDye,
            25 => Self::CureCurse,
            other => Self::Other(other),
        }
    }

    /// The raw table value.
    pub fn raw(self) -> u8 {
        match self {
            Self::Static => 0,
            Self::Money => 2,
            Self::Heal => 3,
            Self::Teleport => 4,
            Self::Spell => 5,
            Self::ExpReward => 6,
            Self::StatReward => 7,
            Self::SkillReward => 8,
            Self::Key => 9,
            Self::Weapon => 10,
            Self::Shield => 11,
            Self::Armor => 12,
            Self::Hat => 13,
            Self::Boots => 14,
            Self::Gloves => 15,
            Self::Accessory => 16,
            Self::Belt => 17,
            Self::Necklace => 18,
            Self::Ring => 19,
            Self::Armlet => 20,
            Self::Bracer => 21,
            Self::Beer => 22,
            Self::EffectPotion => 23,
            Self::HairDye => 24,
            Self::CureCurse => 25,
            Self::Other(other) => other,
        }
    }

    /// Whether the item occupies an equipment slot.
    pub fn is_equipment(self) -> bool {
        matches!(self.raw(), 10..=21)
    }
}

/// Item sub-category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ItemSubType {
    #[default]
    None,
    Ranged,
    Arrows,
    Wings,
    Other(u8),
}

impl ItemSubType {
    /// Parse from the raw table value.
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Ranged,
            2 => Self::Arrows,
            3 => Self::Wings,
            other => Self::Other(other),
        }
    }

    /// The raw table value.
    pub fn raw(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Ranged => 1,
            Self::Arrows => 2,
            Self::Wings => 3,
            Self::Other(other) => other,
        }
    }
}

/// On-disk layout of the item data block.
#[derive(FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct RawItem {
    graphic: [u8; 2],
    kind: u8,
    sub_kind: u8,
    special: u8,
    hp: [u8; 2],
    tp: [u8; 2],
    min_damage: [u8; 2],
    max_damage: [u8; 2],
    accuracy: [u8; 2],
    evade: [u8; 2],
    armor: [u8; 2],
    _unknown1: u8,
    bonus: [u8; 6],
    _resistances: [u8; 6],
    spec1: [u8; 3],
    spec2: u8,
    spec3: u8,
    level_req: [u8; 2],
    class_req: [u8; 2],
    attribute_reqs: [[u8; 2]; 6],
    element: u8,
    element_power: u8,
    weight: u8,
    _unknown2: u8,
    size: u8,
}

const _: () = assert!(std::mem::size_of::<RawItem>() == ITEM_DATA_SIZE);

/// One slot of the item table.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ItemRecord {
    pub name: String,
    pub graphic: u16,
    pub kind: ItemType,
    pub sub_kind: ItemSubType,
    pub special: u8,
    pub stats: CombatStats,
    /// Attribute bonuses granted while equipped.
    pub bonus: Attributes,
    pub requirements: Requirements,
    /// Category-dependent values (e.g. heal amount, spell id, gender).
    pub spec1: u32,
    pub spec2: u8,
    pub spec3: u8,
    pub element: u8,
    pub element_power: u8,
    pub weight: u8,
    pub size: u8,
}

fn num(bytes: &[u8]) -> u16 {
    decode_number(bytes) as u16
}

fn byte(value: u8) -> u8 {
    decode_number(&[value]) as u8
}

impl PubRecord for ItemRecord {
    const KIND: PubKind = PubKind::Item;

    fn read(reader: &mut EoReader<'_>) -> almanac_common::Result<Self> {
        let name = reader.read_prefixed_string()?;
        let raw: RawItem = reader.read_struct()?;

        Ok(Self {
            name,
            graphic: num(&raw.graphic),
            kind: ItemType::from_raw(byte(raw.kind)),
            sub_kind: ItemSubType::from_raw(byte(raw.sub_kind)),
            special: byte(raw.special),
            stats: CombatStats {
                hp: decode_number(&raw.hp),
                tp: num(&raw.tp),
                min_damage: num(&raw.min_damage),
                max_damage: num(&raw.max_damage),
                accuracy: num(&raw.accuracy),
                evade: num(&raw.evade),
                armor: num(&raw.armor),
            },
            bonus: Attributes::from_chars(&raw.bonus),
            requirements: Requirements {
                level: num(&raw.level_req),
                class: num(&raw.class_req),
                attributes: Attributes::from_shorts(&raw.attribute_reqs),
            },
            spec1: decode_number(&raw.spec1),
            spec2: byte(raw.spec2),
            spec3: byte(raw.spec3),
            element: byte(raw.element),
            element_power: byte(raw.element_power),
            weight: byte(raw.weight),
            size: byte(raw.size),
        })
    }

    fn write(&self, writer: &mut EoWriter) {
        writer.add_prefixed_string(&self.name);
        writer.add_short(self.graphic);
        writer.add_char(self.kind.raw());
        writer.add_char(self.sub_kind.raw());
        writer.add_char(self.special);
        writer.add_short(self.stats.hp as u16);
        writer.add_short(self.stats.tp);
        writer.add_short(self.stats.min_damage);
        writer.add_short(self.stats.max_damage);
        writer.add_short(self.stats.accuracy);
        writer.add_short(self.stats.evade);
        writer.add_short(self.stats.armor);
        writer.add_char(0);
        for value in self.bonus.to_array() {
            writer.add_char(value as u8);
        }
        for _ in 0..6 {
            writer.add_char(0);
        }
        writer.add_three(self.spec1);
        writer.add_char(self.spec2);
        writer.add_char(self.spec3);
        writer.add_short(self.requirements.level);
        writer.add_short(self.requirements.class);
        for value in self.requirements.attributes.to_array() {
            writer.add_short(value);
        }
        writer.add_char(self.element);
        writer.add_char(self.element_power);
        writer.add_char(self.weight);
        writer.add_char(0);
        writer.add_char(self.size);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PubTable;

    #[test]
    fn test_item_layout_survives_encoding() {
        let sword = ItemRecord {
            name: "Dark Katana".into(),
            graphic: 412,
            kind: ItemType::Weapon,
            stats: CombatStats {
                min_damage: 12,
                max_damage: 300,
                accuracy: 7,
                ..Default::default()
            },
            requirements: Requirements {
                level: 40,
                class: 2,
                attributes: Attributes {
                    strength: 30,
                    ..Default::default()
                },
            },
            spec1: 70_000,
            weight: 25,
            ..Default::default()
        };

        let bytes = PubTable::new(vec![sword.clone()]).to_bytes();
        assert_eq!(bytes.len(), 10 + 1 + sword.name.len() + ITEM_DATA_SIZE);

        let table = PubTable::<ItemRecord>::parse(&bytes).unwrap();
        assert_eq!(table.records(), &[sword]);
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        assert_eq!(ItemType::from_raw(1), ItemType::Other(1));
        assert_eq!(ItemType::from_raw(99).raw(), 99);
        assert!(ItemType::Ring.is_equipment());
        assert!(!ItemType::Heal.is_equipment());
    }
}
