//! Spell table (`ESF`) records.

use almanac_common::codec::decode_number;
use almanac_common::{EoReader, EoWriter};
use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::stats::Requirements;
use crate::{PubKind, PubRecord};

/// Size of the fixed data block following a spell's name and shout.
pub const SPELL_DATA_SIZE: usize = 51;

/// Spell effect category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SpellType {
    #[default]
    Heal,
    Damage,
    Bard,
    Other(u32),
}

impl SpellType {
    pub fn from_raw(value: u32) -> Self {
        match value {
            0 => Self::Heal,
            1 => Self::Damage,
            2 => Self::Bard,
            other => Self::Other(other),
        }
    }

    pub fn raw(self) -> u32 {
        match self {
            Self::Heal => 0,
            Self::Damage => 1,
            Self::Bard => 2,
            Self::Other(other) => other,
        }
    }
}

/// Who a spell may be cast on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TargetRestrict {
    #[default]
    Npc,
    Friendly,
    Opponent,
    Other(u8),
}

impl TargetRestrict {
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::Npc,
            1 => Self::Friendly,
            2 => Self::Opponent,
            other => Self::Other(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            Self::Npc => 0,
            Self::Friendly => 1,
            Self::Opponent => 2,
            Self::Other(other) => other,
        }
    }
}

/// How a spell selects its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TargetType {
    #[default]
    Normal,
    SelfOnly,
    Group,
    Other(u8),
}

impl TargetType {
    pub fn from_raw(value: u8) -> Self {
        match value {
            0 => Self::Normal,
            1 => Self::SelfOnly,
            3 => Self::Group,
            other => Self::Other(other),
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::SelfOnly => 1,
            Self::Group => 3,
            Self::Other(other) => other,
        }
    }
}

#[derive(FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct RawSpell {
    icon: [u8; 2],
    graphic: [u8; 2],
    tp: [u8; 2],
    sp: [u8; 2],
    cast_time: u8,
    _unknown1: [u8; 2],
    kind: [u8; 3],
    _unknown2: [u8; 3],
    target_restrict: u8,
    target_type: u8,
    _unknown3: [u8; 4],
    min_damage: [u8; 2],
    max_damage: [u8; 2],
    accuracy: [u8; 2],
    _unknown4: [u8; 5],
    hp: [u8; 2],
    _unknown5: [u8; 15],
}

const _: () = assert!(std::mem::size_of::<RawSpell>() == SPELL_DATA_SIZE);

/// One slot of the spell table.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpellRecord {
    pub name: String,
    pub shout: String,
    pub icon: u16,
    pub graphic: u16,
    pub tp_cost: u16,
    pub sp_cost: u16,
    pub cast_time: u8,
    pub kind: SpellType,
    pub target_restrict: TargetRestrict,
    pub target_type: TargetType,
    pub min_damage: u16,
    pub max_damage: u16,
    pub accuracy: u16,
    pub hp_heal: u16,
    /// Not stored in the table; always zero.
    pub requirements: Requirements,
}

impl PubRecord for SpellRecord {
    const KIND: PubKind = PubKind::Spell;

    fn read(reader: &mut EoReader<'_>) -> almanac_common::Result<Self> {
        let name_length = reader.read_char()? as usize;
        let shout_length = reader.read_char()? as usize;
        let name = reader.read_string(name_length)?;
        let shout = reader.read_string(shout_length)?;
        let raw: RawSpell = reader.read_struct()?;
        let short = |bytes: &[u8]| decode_number(bytes) as u16;
        let byte = |value: u8| decode_number(&[value]) as u8;

        Ok(Self {
            name,
            shout,
            icon: short(&raw.icon),
            graphic: short(&raw.graphic),
            tp_cost: short(&raw.tp),
            sp_cost: short(&raw.sp),
            cast_time: byte(raw.cast_time),
            kind: SpellType::from_raw(decode_number(&raw.kind)),
            target_restrict: TargetRestrict::from_raw(byte(raw.target_restrict)),
            target_type: TargetType::from_raw(byte(raw.target_type)),
            min_damage: short(&raw.min_damage),
            max_damage: short(&raw.max_damage),
            accuracy: short(&raw.accuracy),
            hp_heal: short(&raw.hp),
            requirements: Requirements::default(),
        })
    }

    fn write(&self, writer: &mut EoWriter) {
        writer.add_char(self.name.len() as u8);
        writer.add_char(self.shout.len() as u8);
        writer.add_bytes(self.name.as_bytes());
        writer.add_bytes(self.shout.as_bytes());
        writer.add_short(self.icon);
        writer.add_short(self.graphic);
        writer.add_short(self.tp_cost);
        writer.add_short(self.sp_cost);
        writer.add_char(self.cast_time);
        writer.add_short(0);
        writer.add_three(self.kind.raw());
        writer.add_three(0);
        writer.add_char(self.target_restrict.raw());
        writer.add_char(self.target_type.raw());
        writer.add_int(0);
        writer.add_short(self.min_damage);
        writer.add_short(self.max_damage);
        writer.add_short(self.accuracy);
        writer.add_bytes(&[254; 5]);
        writer.add_short(self.hp_heal);
        writer.add_bytes(&[254; 15]);
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
    fn test_spell_layout_survives_encoding() {
        let heal = SpellRecord {
            name: "Heal".into(),
            shout: "healus".into(),
            graphic: 3,
            tp_cost: 12,
            kind: SpellType::Heal,
            target_restrict: TargetRestrict::Friendly,
            target_type: TargetType::Group,
            hp_heal: 45,
            ..Default::default()
        };
        let fireball = SpellRecord {
            name: "Fire Ball".into(),
            kind: SpellType::Damage,
            min_damage: 20,
            max_damage: 40,
            ..Default::default()
        };

        let bytes = PubTable::new(vec![heal.clone(), fireball.clone()]).to_bytes();
        let table = PubTable::<SpellRecord>::parse(&bytes).unwrap();

        assert_eq!(table.records(), &[heal, fireball]);
    }

    #[test]
    fn test_requirements_default_to_zero() {
        let bytes = PubTable::new(vec![SpellRecord {
            name: "Ice Blast".into(),
            ..Default::default()
        }])
        .to_bytes();
        let table = PubTable::<SpellRecord>::parse(&bytes).unwrap();

        assert_eq!(table.records()[0].requirements, Requirements::default());
    }
}
