//! `drops.ini`: per-NPC drop tables.

use std::collections::BTreeMap;

use tracing::trace;

use crate::lines::{csv_groups, entries};

/// Fields per drop group: item id, min, max, rate.
pub const DROP_GROUP_SIZE: usize = 4;

/// One item an NPC can drop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DropRecord {
    pub item_id: i32,
    pub min: i32,
    pub max: i32,
    /// Drop chance as a percentage.
    pub rate: f64,
}

impl DropRecord {
    fn from_group(group: &[&str]) -> Option<Self> {
        Some(Self {
            item_id: group[0].parse().ok()?,
            min: group[1].parse().ok()?,
            max: group[2].parse().ok()?,
            rate: group[3].parse().ok()?,
        })
    }
}

/// Parse a drop value (`item,min,max,rate,...`) into its groups.
///
/// Malformed groups and a trailing partial group are skipped.
pub fn parse_drop_groups(value: &str) -> Vec<DropRecord> {
    csv_groups(value, DROP_GROUP_SIZE)
        .filter_map(|group| {
            let record = DropRecord::from_group(&group);
            if record.is_none() {
                trace!(?group, "skipping malformed drop group");
            }
            record
        })
        .collect()
}

/// Parse a drops file into drop tables keyed by NPC id.
///
/// Repeated NPC ids append to the same table.
pub fn parse_drops(text: &str) -> BTreeMap<i32, Vec<DropRecord>> {
    let mut tables: BTreeMap<i32, Vec<DropRecord>> = BTreeMap::new();

    for entry in entries(text) {
        let Some(npc_id) = entry.id() else {
            trace!(line = entry.line, key = entry.key, "skipping drop line with non-numeric id");
            continue;
        };

        let drops = parse_drop_groups(entry.value);
        if !drops.is_empty() {
            tables.entry(npc_id).or_default().extend(drops);
        }
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_groups() {
        let drops = parse_drop_groups("10,1,2,5.5,20,3,4,1.0");
        assert_eq!(
            drops,
            vec![
                DropRecord { item_id: 10, min: 1, max: 2, rate: 5.5 },
                DropRecord { item_id: 20, min: 3, max: 4, rate: 1.0 },
            ]
        );
    }

    #[test]
    fn test_partial_tail_contributes_nothing() {
        let drops = parse_drop_groups("10,1,2,5.5,20,3,4,1.0,30,1,2");
        assert_eq!(drops.len(), 2);
        assert!(drops.iter().all(|d| d.item_id != 30));
    }

    #[test]
    fn test_bad_group_does_not_abort_line() {
        let drops = parse_drop_groups("10,1,x,5,20,3,4,1");
        assert_eq!(drops, vec![DropRecord { item_id: 20, min: 3, max: 4, rate: 1.0 }]);
    }

    #[test]
    fn test_parse_file() {
        let text = "\
; drop tables
3 = 1,1,5,50
abc = 1,1,1,1
3 = 2,1,1,2.5
4 = nonsense
";
        let tables = parse_drops(text);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[&3].len(), 2);
        assert_eq!(tables[&3][1].rate, 2.5);
    }
}
