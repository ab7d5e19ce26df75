//! NPC table (`ENF`) records.

use almanac_common::codec::decode_number;
use almanac_common::{EoReader, EoWriter};
use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::stats::CombatStats;
use crate::{PubKind, PubRecord};

/// Size of the fixed data block following an NPC name.
pub const NPC_DATA_SIZE: usize = 39;

/// NPC behaviour category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NpcType {
    #[default]
    Friendly,
    Passive,
    Aggressive,
    Shop,
    Inn,
    Bank,
    Barber,
    Guild,
    Priest,
    Lawyer,
    Trainer,
    Quest,
    Other(u16),
}

impl NpcType {
    /// Parse from the raw table value.
    pub fn from_raw(value: u16) -> Self {
        match value {
            0 => Self::Friendly,
            1 => Self::Passive,
            2 => Self::Aggressive,
            6 => Self::Shop,
            7 => Self::Inn,
            9 => Self::Bank,
            10 => Self::Barber,
            11 => Self::Guild,
            12 => Self::Priest,
            13 => Self::Lawyer,
            14 => Self::Trainer,
            15 => Self::Quest,
            other => Self::Other(other),
        }
    }

    /// The raw table value.
    pub fn raw(self) -> u16 {
        match self {
            Self::Friendly => 0,
            Self::Passive => 1,
            Self::Aggressive => 2,
            Self::Shop => 6,
            Self::Inn => 7,
            Self::Bank => 9,
            Self::Barber => 10,
            Self::Guild => 11,
            Self::Priest => 12,
            Self::Lawyer => 13,
            Self::Trainer => 14,
            Self::Quest => 15,
            Self::Other(other) => other,
        }
    }

    /// Whether this NPC can be fought.
    pub fn is_monster(self) -> bool {
        matches!(self, Self::Passive | Self::Aggressive)
    }
}

/// On-disk layout of the NPC data block.
#[derive(FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct RawNpc {
    graphic: [u8; 2],
    _unknown1: u8,
    boss: [u8; 2],
    child: [u8; 2],
    kind: [u8; 2],
    vendor_id: [u8; 2],
    hp: [u8; 3],
    _unknown2: [u8; 2],
    min_damage: [u8; 2],
    max_damage: [u8; 2],
    accuracy: [u8; 2],
    evade: [u8; 2],
    armor: [u8; 2],
    _unknown3: [u8; 10],
    experience: [u8; 2],
    _unknown4: u8,
}

const _: () = assert!(std::mem::size_of::<RawNpc>() == NPC_DATA_SIZE);

/// One slot of the NPC table.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NpcRecord {
    pub name: String,
    pub graphic: u16,
    pub boss: bool,
    pub child: bool,
    pub kind: NpcType,
    /// Behaviour id: a second namespace used by quest scripts to address this NPC.
    pub vendor_id: u16,
    pub stats: CombatStats,
    pub experience: u16,
}

impl PubRecord for NpcRecord {
    const KIND: PubKind = PubKind::Npc;

    fn read(reader: &mut EoReader<'_>) -> almanac_common::Result<Self> {
        let name = reader.read_prefixed_string()?;
        let raw: RawNpc = reader.read_struct()?;
        let short = |bytes: &[u8]| decode_number(bytes) as u16;

        Ok(Self {
            name,
            graphic: short(&raw.graphic),
            boss: short(&raw.boss) != 0,
            child: short(&raw.child) != 0,
            kind: NpcType::from_raw(short(&raw.kind)),
            vendor_id: short(&raw.vendor_id),
            stats: CombatStats {
                hp: decode_number(&raw.hp),
                tp: 0,
                min_damage: short(&raw.min_damage),
                max_damage: short(&raw.max_damage),
                accuracy: short(&raw.accuracy),
                evade: short(&raw.evade),
                armor: short(&raw.armor),
            },
            experience: short(&raw.experience),
        })
    }

    fn write(&self, writer: &mut EoWriter) {
        writer.add_prefixed_string(&self.name);
        writer.add_short(self.graphic);
        writer.add_char(0);
        writer.add_short(u16::from(self.boss));
        writer.add_short(u16::from(self.child));
        writer.add_short(self.kind.raw());
        writer.add_short(self.vendor_id);
        writer.add_three(self.stats.hp);
        writer.add_short(0);
        writer.add_short(self.stats.min_damage);
        writer.add_short(self.stats.max_damage);
        writer.add_short(self.stats.accuracy);
        writer.add_short(self.stats.evade);
        writer.add_short(self.stats.armor);
        for _ in 0..5 {
            writer.add_short(0);
        }
        writer.add_short(self.experience);
        writer.add_char(0);
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
    fn test_npc_layout_survives_encoding() {
        let guard = NpcRecord {
            name: "Aeven Guard".into(),
            graphic: 77,
            boss: true,
            kind: NpcType::Aggressive,
            vendor_id: 500,
            stats: CombatStats {
                hp: 120_000,
                armor: 40,
                ..Default::default()
            },
            experience: 3_500,
            ..Default::default()
        };

        let bytes = PubTable::new(vec![guard.clone()]).to_bytes();
        let table = PubTable::<NpcRecord>::parse(&bytes).unwrap();

        assert_eq!(table.records(), &[guard]);
        assert!(table.records()[0].kind.is_monster());
    }

    #[test]
    fn test_service_types() {
        assert_eq!(NpcType::from_raw(6), NpcType::Shop);
        assert_eq!(NpcType::from_raw(8), NpcType::Other(8));
        assert!(!NpcType::Bank.is_monster());
    }
}
