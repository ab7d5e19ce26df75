//! Class table (`ECF`) records.

use almanac_common::codec::decode_number;
use almanac_common::{EoReader, EoWriter};
use zerocopy::{FromBytes, Immutable, KnownLayout};

use crate::stats::Attributes;
use crate::{PubKind, PubRecord};

/// Size of the fixed data block following a class name.
pub const CLASS_DATA_SIZE: usize = 14;

#[derive(FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct RawClass {
    parent: u8,
    stat_group: u8,
    base: [[u8; 2]; 6],
}

const _: () = assert!(std::mem::size_of::<RawClass>() == CLASS_DATA_SIZE);

/// One slot of the class table.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassRecord {
    pub name: String,
    /// Id of the class this one derives from.
    pub parent: u8,
    pub stat_group: u8,
    pub base: Attributes,
}

impl PubRecord for ClassRecord {
    const KIND: PubKind = PubKind::Class;

    fn read(reader: &mut EoReader<'_>) -> almanac_common::Result<Self> {
        let name = reader.read_prefixed_string()?;
        let raw: RawClass = reader.read_struct()?;

        Ok(Self {
            name,
            parent: decode_number(&[raw.parent]) as u8,
            stat_group: decode_number(&[raw.stat_group]) as u8,
            base: Attributes::from_shorts(&raw.base),
        })
    }

    fn write(&self, writer: &mut EoWriter) {
        writer.add_prefixed_string(&self.name);
        writer.add_char(self.parent);
        writer.add_char(self.stat_group);
        for value in self.base.to_array() {
            writer.add_short(value);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
