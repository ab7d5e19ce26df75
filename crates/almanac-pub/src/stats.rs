//! Stat blocks shared between record kinds.

use almanac_common::codec::decode_number;

/// The six character attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attributes {
    pub strength: u16,
    pub intelligence: u16,
    pub wisdom: u16,
    pub agility: u16,
    pub constitution: u16,
    pub charisma: u16,
}

impl Attributes {
    /// Decode six one-byte attributes.
    pub(crate) fn from_chars(raw: &[u8; 6]) -> Self {
        let at = |i: usize| decode_number(&raw[i..i + 1]) as u16;
        Self {
            strength: at(0),
            intelligence: at(1),
            wisdom: at(2),
            agility: at(3),
            constitution: at(4),
            charisma: at(5),
        }
    }

    /// Decode six two-byte attributes.
    pub(crate) fn from_shorts(raw: &[[u8; 2]; 6]) -> Self {
        let at = |i: usize| decode_number(&raw[i]) as u16;
        Self {
            strength: at(0),
            intelligence: at(1),
            wisdom: at(2),
            agility: at(3),
            constitution: at(4),
            charisma: at(5),
        }
    }

    /// Values in file order.
    pub fn to_array(self) -> [u16; 6] {
        [
            self.strength,
            self.intelligence,
            self.wisdom,
            self.agility,
            self.constitution,
            self.charisma,
        ]
    }
}

/// Combat statistics carried by items and NPCs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CombatStats {
    pub hp: u32,
    pub tp: u16,
    pub min_damage: u16,
    pub max_damage: u16,
    pub accuracy: u16,
    pub evade: u16,
    pub armor: u16,
}

/// Level, class and attribute requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Requirements {
    pub level: u16,
    pub class: u16,
    pub attributes: Attributes,
}
