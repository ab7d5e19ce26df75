//! In-memory game data tree shared by the integration tests.

#![allow(dead_code)]

use almanac_fetch::{MemoryFetcher, SourceLayout, TableSource, TextSource};
use almanac_map::{MapFile, MapNpc};
use almanac_pub::{ClassRecord, ItemRecord, NpcRecord, NpcType, PubTable, SpellRecord};

pub const WOLF: i32 = 1;
pub const GOLDEN_WOLF: i32 = 2;
pub const SHOPKEEPER: i32 = 3;
pub const WISE_MAN: i32 = 12;
pub const WISE_MAN_VENDOR_ID: u16 = 500;

pub const GOLD: i32 = 1;
pub const POTION: i32 = 2;
pub const WOLF_PELT: i32 = 3;
pub const SECOND_POTION: i32 = 5;
pub const STAFF: i32 = 6;

pub fn layout() -> SourceLayout {
    SourceLayout {
        map_ids: 1..=5,
        quest_ids: 1..=3,
        ..Default::default()
    }
}

fn item(name: &str) -> ItemRecord {
    ItemRecord {
        name: name.into(),
        ..Default::default()
    }
}

fn npc(name: &str, kind: NpcType, vendor_id: u16) -> NpcRecord {
    NpcRecord {
        name: name.into(),
        kind,
        vendor_id,
        ..Default::default()
    }
}

pub fn items() -> Vec<u8> {
    PubTable::new(vec![
        item("Gold"),
        item("Potion"),
        item("Wolf Pelt"),
        item(""),
        item("Potion"),
        item("Staff"),
        item("eof"),
    ])
    .to_bytes()
}

pub fn npcs() -> Vec<u8> {
    let mut records = vec![
        npc("Wolf", NpcType::Aggressive, 0),
        npc("Golden Wolf", NpcType::Aggressive, 0),
        npc("Shopkeeper", NpcType::Shop, 0),
    ];
    records.resize_with(11, NpcRecord::default);
    records.push(npc("Wise Man", NpcType::Quest, WISE_MAN_VENDOR_ID));
    PubTable::new(records).to_bytes()
}

pub fn spells() -> Vec<u8> {
    PubTable::new(vec![
        SpellRecord {
            name: "Heal".into(),
            ..Default::default()
        },
        SpellRecord {
            name: "Fire Ball".into(),
            ..Default::default()
        },
    ])
    .to_bytes()
}

pub fn classes() -> Vec<u8> {
    PubTable::new(vec![
        ClassRecord {
            name: "Peasant".into(),
            ..Default::default()
        },
        ClassRecord {
            name: "Magician".into(),
            parent: 1,
            ..Default::default()
        },
    ])
    .to_bytes()
}

fn placement(npc_id: u16, amount: u8) -> MapNpc {
    MapNpc {
        npc_id,
        x: 10,
        y: 12,
        spawn_type: 0,
        spawn_time: 60,
        amount,
    }
}

pub const DROPS: &str = "\
; npc = item,min,max,rate
1 = 3,1,2,40.0,1,5,10,100
1 = 99,1,1,1
77 = 1,1,1,1
2 = 6,1,1,0.5
";

pub const SHOPS: &str = "\
3.name = General Store
3.trade = 2,20,8,99,5,1
3.craft = 6,3,2,1,10,0,0,0,0
";

pub const CRAFTS: &str = "3 = 2,3,1,0,0,0,0,0,0\n";

pub const PETS: &str = "2 = {6, 10, \"Follows its master\"}\n";

pub const SPECIAL_DROPS: &str = "6 = {4, 0.1, \"The staff glows\"}\n";

pub const SPECIAL_MOBS: &str = "2 = {1, 2.5, 1, \"A golden wolf appears!\"}\n";

pub const NPC_SPELLS: &str = "1 = {2, 30, 5, \"Burn!\"} {1, 50, 1}\n";

pub const WOLF_QUEST: &str = r#"
Main
{
    questname "Wolf Trouble"
}
State Begin
{
    AddNpcText(500, "The wolves are back.");
    AddNpcInput(500, 1, "I will help");
    rule KilledNpcs(12) goto Done
    rule KilledNpcs(1, 10) goto Done
}
State Done
{
    action RemoveItem(3, 5);
    action GiveItem(1, 250);
    action GiveExp(400);
    action GiveExp(100);
}
"#;

/// Every source present, plus one corrupt map and one non-quest script.
pub fn fixture() -> MemoryFetcher {
    let layout = layout();
    let forest = MapFile {
        name: "Forest".into(),
        npcs: vec![placement(1, 3), placement(12, 1), placement(400, 1)],
    };
    let cave = MapFile {
        name: String::new(),
        npcs: vec![placement(1, 2)],
    };

    MemoryFetcher::new()
        .with(layout.table_path(TableSource::Items), items())
        .with(layout.table_path(TableSource::Npcs), npcs())
        .with(layout.table_path(TableSource::Spells), spells())
        .with(layout.table_path(TableSource::Classes), classes())
        .with(layout.text_path(TextSource::Drops), DROPS)
        .with(layout.text_path(TextSource::Shops), SHOPS)
        .with(layout.text_path(TextSource::Crafts), CRAFTS)
        .with(layout.text_path(TextSource::Pets), PETS)
        .with(layout.text_path(TextSource::SpecialDrops), SPECIAL_DROPS)
        .with(layout.text_path(TextSource::SpecialMobs), SPECIAL_MOBS)
        .with(layout.text_path(TextSource::NpcSpells), NPC_SPELLS)
        .with(layout.map_path(1), forest.to_bytes())
        .with(layout.map_path(2), cave.to_bytes())
        .with(layout.map_path(3), b"not a map".to_vec())
        .with(layout.quest_path(1), WOLF_QUEST)
        .with(layout.quest_path(2), "// nothing here\naction GiveExp(5);\n")
}
