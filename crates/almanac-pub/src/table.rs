//! Generic pub table framing.

use std::fmt;

use almanac_common::{EoReader, EoWriter};

use crate::{Error, Result};

/// Size of the common pub file header in bytes.
pub const HEADER_SIZE: usize = 10;

/// Name of the sentinel record that closes a table.
pub const EOF_SENTINEL: &str = "eof";

/// The four pub table kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PubKind {
    /// Item table (`EIF`).
    Item,
    /// NPC table (`ENF`).
    Npc,
    /// Spell table (`ESF`).
    Spell,
    /// Class table (`ECF`).
    Class,
}

impl PubKind {
    /// Signature bytes at the start of the file.
    pub const fn magic(self) -> &'static [u8; 3] {
        match self {
            Self::Item => b"EIF",
            Self::Npc => b"ENF",
            Self::Spell => b"ESF",
            Self::Class => b"ECF",
        }
    }
}

impl fmt::Display for PubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Item => "item",
            Self::Npc => "NPC",
            Self::Spell => "spell",
            Self::Class => "class",
        };
        f.write_str(name)
    }
}

/// The 10-byte header shared by all pub files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PubHeader {
    /// Revision id, stored as two shorts.
    pub rid: [u16; 2],
    /// Number of record slots that follow.
    pub record_count: u16,
    /// Format version byte.
    pub version: u8,
}

/// A record type stored in a pub table.
pub trait PubRecord: Sized {
    /// The table kind this record belongs to.
    const KIND: PubKind;

    /// Decode one record at the reader's position.
    fn read(reader: &mut EoReader<'_>) -> almanac_common::Result<Self>;

    /// Encode this record in the layout [`PubRecord::read`] expects.
    fn write(&self, writer: &mut EoWriter);

    /// Display name of the record.
    fn name(&self) -> &str;
}

/// A decoded pub table: the header plus every record slot in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct PubTable<T> {
    header: PubHeader,
    records: Vec<T>,
}

impl<T: PubRecord> PubTable<T> {
    /// Create a table from records, computing a matching header.
    pub fn new(records: Vec<T>) -> Self {
        let header = PubHeader {
            rid: [0, 0],
            record_count: records.len() as u16,
            version: 0,
        };
        Self { header, records }
    }

    /// Decode a table from its file bytes.
    ///
    /// A wrong signature or a buffer that ends inside the header or any declared
    /// record is an error; nothing is recovered from a partially readable table.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let kind = T::KIND;
        let mut reader = EoReader::new(data);

        reader.expect_magic(kind.magic()).map_err(|_| Error::InvalidMagic {
            kind,
            actual: data[..kind.magic().len().min(data.len())].to_vec(),
        })?;

        let header = PubHeader {
            rid: [reader.read_short()?, reader.read_short()?],
            record_count: reader.read_short()?,
            version: reader.read_char()?,
        };

        let mut records = Vec::with_capacity(header.record_count as usize);
        for index in 0..header.record_count as usize {
            let record = T::read(&mut reader).map_err(|source| Error::TruncatedRecord {
                kind,
                index,
                source,
            })?;

            if record.name() == EOF_SENTINEL && index + 1 == header.record_count as usize {
                break;
            }
            records.push(record);
        }

        Ok(Self { header, records })
    }

    /// Encode the table back into file bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = EoWriter::new();
        writer.add_bytes(T::KIND.magic());
        writer.add_short(self.header.rid[0]);
        writer.add_short(self.header.rid[1]);
        writer.add_short(self.records.len() as u16);
        writer.add_char(self.header.version);

        for record in &self.records {
            record.write(&mut writer);
        }

        writer.into_bytes()
    }

    /// Get the file header.
    pub fn header(&self) -> &PubHeader {
        &self.header
    }

    /// All record slots in file order, including unnamed ones.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Consume the table, yielding `(id, record)` for every named slot.
    ///
    /// Ids are 1-based slot positions. Slots whose name is empty or whitespace
    /// are skipped, so ids keep their gaps.
    pub fn into_named(self) -> impl Iterator<Item = (i32, T)> {
        self.records
            .into_iter()
            .enumerate()
            .filter(|(_, record)| !record.name().trim().is_empty())
            .map(|(index, record)| (index as i32 + 1, record))
    }
}
