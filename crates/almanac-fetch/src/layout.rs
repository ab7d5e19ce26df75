//! Where each source lives relative to the origin.

use std::ops::RangeInclusive;

/// The four binary tables every build needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableSource {
    Items,
    Npcs,
    Spells,
    Classes,
}

impl TableSource {
    pub const ALL: [TableSource; 4] = [Self::Items, Self::Npcs, Self::Spells, Self::Classes];

    pub fn label(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Npcs => "npcs",
            Self::Spells => "spells",
            Self::Classes => "classes",
        }
    }
}

/// Optional relationship files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSource {
    Drops,
    Shops,
    Crafts,
    Pets,
    SpecialDrops,
    SpecialMobs,
    NpcSpells,
}

impl TextSource {
    pub const ALL: [TextSource; 7] = [
        Self::Drops,
        Self::Shops,
        Self::Crafts,
        Self::Pets,
        Self::SpecialDrops,
        Self::SpecialMobs,
        Self::NpcSpells,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Drops => "drops",
            Self::Shops => "shops",
            Self::Crafts => "crafts",
            Self::Pets => "pets",
            Self::SpecialDrops => "special drops",
            Self::SpecialMobs => "special mobs",
            Self::NpcSpells => "npc spells",
        }
    }
}

/// File naming conventions for a game data tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    pub data_dir: String,
    pub items_file: String,
    pub npcs_file: String,
    pub spells_file: String,
    pub classes_file: String,
    pub drops_file: String,
    pub shops_file: String,
    pub crafts_file: String,
    pub pets_file: String,
    pub special_drops_file: String,
    pub special_mobs_file: String,
    pub npc_spells_file: String,
    pub maps_dir: String,
    /// Map ids probed, one file each.
    pub map_ids: RangeInclusive<i32>,
    pub quests_dir: String,
    /// Quest ids probed, one file each.
    pub quest_ids: RangeInclusive<i32>,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            data_dir: "data".into(),
            items_file: "dat001.eif".into(),
            npcs_file: "dtn001.enf".into(),
            spells_file: "dsl001.esf".into(),
            classes_file: "dat001.ecf".into(),
            drops_file: "drops.ini".into(),
            shops_file: "shops.ini".into(),
            crafts_file: "crafts.ini".into(),
            pets_file: "pets.ini".into(),
            special_drops_file: "specialdrops.ini".into(),
            special_mobs_file: "specialmobs.ini".into(),
            npc_spells_file: "npcspells.ini".into(),
            maps_dir: "maps".into(),
            map_ids: 1..=300,
            quests_dir: "quests".into(),
            quest_ids: 1..=500,
        }
    }
}

fn join(dir: &str, file: &str) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}

impl SourceLayout {
    pub fn table_path(&self, table: TableSource) -> String {
        let file = match table {
            TableSource::Items => &self.items_file,
            TableSource::Npcs => &self.npcs_file,
            TableSource::Spells => &self.spells_file,
            TableSource::Classes => &self.classes_file,
        };
        join(&self.data_dir, file)
    }

    pub fn text_path(&self, source: TextSource) -> String {
        let file = match source {
            TextSource::Drops => &self.drops_file,
            TextSource::Shops => &self.shops_file,
            TextSource::Crafts => &self.crafts_file,
            TextSource::Pets => &self.pets_file,
            TextSource::SpecialDrops => &self.special_drops_file,
            TextSource::SpecialMobs => &self.special_mobs_file,
            TextSource::NpcSpells => &self.npc_spells_file,
        };
        join(&self.data_dir, file)
    }

    /// `maps/00042.emf`
    pub fn map_path(&self, id: i32) -> String {
        join(&self.maps_dir, &format!("{id:05}.emf"))
    }

    /// `quests/00042.eqf`
    pub fn quest_path(&self, id: i32) -> String {
        join(&self.quests_dir, &format!("{id:05}.eqf"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let layout = SourceLayout::default();
        assert_eq!(layout.table_path(TableSource::Npcs), "data/dtn001.enf");
        assert_eq!(layout.text_path(TextSource::SpecialMobs), "data/specialmobs.ini");
        assert_eq!(layout.map_path(5), "maps/00005.emf");
        assert_eq!(layout.quest_path(123), "quests/00123.eqf");
    }

    #[test]
    fn test_overridden_dirs() {
        let layout = SourceLayout {
            data_dir: String::new(),
            maps_dir: "world/maps/".into(),
            ..Default::default()
        };
        assert_eq!(layout.table_path(TableSource::Items), "dat001.eif");
        assert_eq!(layout.map_path(300), "world/maps/00300.emf");
    }
}
