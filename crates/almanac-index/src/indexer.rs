//! Relationship stitching.
//!
//! The indexer turns decoded [`Sources`] into a [`GameDatabase`] with a fixed
//! sequence of passes. Each pass links one relationship and writes both
//! directions of every edge it creates, copying the counterpart's name. An edge
//! whose endpoint id is not in the loaded tables is dropped.
//!
//! | Pass | Relationship | Written to |
//! |------|--------------|------------|
//! | 1 | drops | `Npc::drops`, `Item::drops_from` |
//! | 2 | shops | `Item::sold_at`, `Item::crafted_at`, `Npc::shop_items`, `Npc::craft_items` |
//! | 3 | pets | `Npc::pet`, `Item::pet_for` |
//! | 4 | special drops | `Item::special_drop` |
//! | 5 | special spawns | `Npc::special_spawns` on the source NPC |
//! | 6 | spellcasting | `Npc::spellcast`, `Spell::cast_by` |
//! | 7 | map spawns | `Npc::spawns`, `Map::spawns` |
//! | 8 | vendor id index | internal |
//! | 9 | quests | `Quest`, `Npc::quests`, `Item::quests` |
//! | 10 | name indices | `GameDatabase::*_by_name` |

use std::collections::BTreeMap;

use almanac_ini::{
    DropRecord, Ingredient, NpcSpellRecord, PetRecord, QuestScript, Shop, SpecialDropRecord,
    SpecialMobRecord,
};
use almanac_map::MapFile;
use tracing::{debug, trace};

use crate::database::{name_key, FxHashMap, GameDatabase};
use crate::entity::*;
use crate::Sources;

/// Builds a [`GameDatabase`] from decoded sources.
#[derive(Debug, Default)]
pub struct Indexer {
    items: BTreeMap<i32, Item>,
    npcs: BTreeMap<i32, Npc>,
    spells: BTreeMap<i32, Spell>,
    classes: BTreeMap<i32, GameClass>,
    maps: BTreeMap<i32, Map>,
    quests: BTreeMap<i32, Quest>,
    /// Vendor id to primary NPC id.
    vendor_index: FxHashMap<i32, i32>,
}

impl Indexer {
    /// Run every pass over `sources`.
    pub fn build(sources: Sources) -> GameDatabase {
        let Sources {
            items,
            npcs,
            spells,
            classes,
            drops,
            shops,
            pets,
            special_drops,
            special_mobs,
            npc_spells,
            maps,
            quests,
        } = sources;

        let mut indexer = Self {
            items: items
                .into_iter()
                .map(|(id, record)| (id, Item::from_record(id, record)))
                .collect(),
            npcs: npcs
                .into_iter()
                .map(|(id, record)| (id, Npc::from_record(id, record)))
                .collect(),
            spells: spells
                .into_iter()
                .map(|(id, record)| (id, Spell::from_record(id, record)))
                .collect(),
            classes: classes
                .into_iter()
                .map(|(id, record)| (id, GameClass::from_record(id, record)))
                .collect(),
            ..Default::default()
        };

        indexer.index_drops(&drops);
        indexer.index_shops(&shops);
        indexer.index_pets(&pets);
        indexer.index_special_drops(&special_drops);
        indexer.index_special_spawns(&special_mobs);
        indexer.index_spellcasts(&npc_spells);
        indexer.index_map_spawns(maps);
        indexer.build_vendor_index();
        indexer.index_quests(quests);
        indexer.finish()
    }

    fn index_drops(&mut self, drops: &BTreeMap<i32, Vec<DropRecord>>) {
        let mut edges = 0usize;

        for (&npc_id, table) in drops {
            let Some(npc) = self.npcs.get_mut(&npc_id) else {
                trace!(npc_id, "drop table for unknown npc");
                continue;
            };

            for drop in table {
                let Some(item) = self.items.get_mut(&drop.item_id) else {
                    trace!(npc_id, item_id = drop.item_id, "drop of unknown item");
                    continue;
                };

                item.drops_from.push(DropSource {
                    npc_id,
                    npc_name: npc.name.clone(),
                    min: drop.min,
                    max: drop.max,
                    rate: drop.rate,
                });
                npc.drops.push(DropEntry {
                    item_id: item.id,
                    item_name: item.name.clone(),
                    min: drop.min,
                    max: drop.max,
                    rate: drop.rate,
                });
                edges += 1;
            }
        }

        debug!(edges, "indexed drops");
    }

    /// Shops are tied to NPCs only by sharing an id. Listings still land on the
    /// item when no NPC matches.
    fn index_shops(&mut self, shops: &BTreeMap<i32, Shop>) {
        let mut trades = 0usize;
        let mut crafts = 0usize;

        for (&shop_id, shop) in shops {
            let mut npc = self.npcs.get_mut(&shop_id);
            let shop_name = shop_display_name(shop_id, &shop.name, npc.as_deref());

            for trade in &shop.trades {
                let Some(item) = self.items.get_mut(&trade.item_id) else {
                    trace!(shop_id, item_id = trade.item_id, "trade of unknown item");
                    continue;
                };

                item.sold_at.push(ShopListing {
                    shop_id,
                    shop_name: shop_name.clone(),
                    buy_price: trade.buy_price,
                    sell_price: trade.sell_price,
                });
                if let Some(npc) = npc.as_deref_mut() {
                    npc.shop_items.push(ShopItem {
                        item_id: item.id,
                        item_name: item.name.clone(),
                        buy_price: trade.buy_price,
                        sell_price: trade.sell_price,
                    });
                }
                trades += 1;
            }

            for recipe in &shop.crafts {
                let Some(ingredients) = resolve_ingredients(&self.items, &recipe.ingredients) else {
                    trace!(shop_id, item_id = recipe.item_id, "recipe with unknown ingredient");
                    continue;
                };
                let Some(item) = self.items.get_mut(&recipe.item_id) else {
                    trace!(shop_id, item_id = recipe.item_id, "recipe for unknown item");
                    continue;
                };

                if let Some(npc) = npc.as_deref_mut() {
                    npc.craft_items.push(CraftOffer {
                        item_id: item.id,
                        item_name: item.name.clone(),
                        ingredients: ingredients.clone(),
                    });
                }
                item.crafted_at.push(CraftSource {
                    shop_id,
                    shop_name: shop_name.clone(),
                    ingredients,
                });
                crafts += 1;
            }
        }

        debug!(trades, crafts, "indexed shops");
    }

    /// An NPC keeps its first resolvable pet item.
    fn index_pets(&mut self, pets: &[PetRecord]) {
        let mut edges = 0usize;

        for pet in pets {
            let Some(npc) = self.npcs.get_mut(&pet.npc_id) else {
                continue;
            };
            if npc.pet.is_some() {
                trace!(npc_id = pet.npc_id, "npc already has a pet item");
                continue;
            }
            let Some(item) = self.items.get_mut(&pet.item_id) else {
                continue;
            };

            npc.pet = Some(PetInfo {
                item_id: item.id,
                item_name: item.name.clone(),
                level: pet.level,
                note: pet.note.clone(),
            });
            item.pet_for.push(PetLink {
                npc_id: npc.id,
                npc_name: npc.name.clone(),
                level: pet.level,
            });
            edges += 1;
        }

        debug!(edges, "indexed pets");
    }

    fn index_special_drops(&mut self, special_drops: &[SpecialDropRecord]) {
        let mut annotated = 0usize;

        for special in special_drops {
            let Some(item) = self.items.get_mut(&special.item_id) else {
                continue;
            };
            if item.special_drop.is_some() {
                continue;
            }

            item.special_drop = Some(SpecialDrop {
                effect_id: special.effect_id,
                rate: special.rate,
                message: special.message.clone(),
            });
            annotated += 1;
        }

        debug!(annotated, "indexed special drops");
    }

    /// The annotation goes on the NPC the variant spawns from.
    fn index_special_spawns(&mut self, special_mobs: &[SpecialMobRecord]) {
        let mut annotated = 0usize;

        for mob in special_mobs {
            let Some(variant_name) = self.npcs.get(&mob.npc_id).map(|npc| npc.name.clone()) else {
                trace!(npc_id = mob.npc_id, "special spawn of unknown npc");
                continue;
            };
            let Some(source) = self.npcs.get_mut(&mob.source_npc_id) else {
                trace!(npc_id = mob.source_npc_id, "special spawn from unknown npc");
                continue;
            };

            source.special_spawns.push(SpecialSpawn {
                npc_id: mob.npc_id,
                npc_name: variant_name,
                source_npc_id: source.id,
                source_npc_name: source.name.clone(),
                rate: mob.rate,
                amount: mob.amount,
                message: mob.message.clone(),
            });
            annotated += 1;
        }

        debug!(annotated, "indexed special spawns");
    }

    /// Only the first resolvable spellcast of each NPC is kept.
    fn index_spellcasts(&mut self, npc_spells: &[NpcSpellRecord]) {
        let mut edges = 0usize;

        for cast in npc_spells {
            let Some(npc) = self.npcs.get_mut(&cast.npc_id) else {
                continue;
            };
            if npc.spellcast.is_some() {
                trace!(npc_id = cast.npc_id, spell_id = cast.spell_id, "ignoring extra spellcast");
                continue;
            }
            let Some(spell) = self.spells.get_mut(&cast.spell_id) else {
                continue;
            };

            npc.spellcast = Some(Spellcast {
                spell_id: spell.id,
                spell_name: spell.name.clone(),
                chance: cast.chance,
                cooldown: cast.cooldown,
                shout: cast.shout.clone(),
            });
            spell.cast_by.push(SpellCaster {
                npc_id: npc.id,
                npc_name: npc.name.clone(),
                chance: cast.chance,
                cooldown: cast.cooldown,
            });
            edges += 1;
        }

        debug!(edges, "indexed spellcasts");
    }

    fn index_map_spawns(&mut self, maps: Vec<(i32, MapFile)>) {
        let mut edges = 0usize;

        for (map_id, file) in maps {
            let mut map = Map {
                id: map_id,
                name: Map::display_name(map_id, &file.name),
                spawns: Vec::new(),
            };

            for placement in &file.npcs {
                let npc_id = i32::from(placement.npc_id);
                let Some(npc) = self.npcs.get_mut(&npc_id) else {
                    trace!(map_id, npc_id, "spawn of unknown npc");
                    continue;
                };

                npc.spawns.push(NpcSpawn {
                    map_id,
                    map_name: map.name.clone(),
                    x: placement.x,
                    y: placement.y,
                    spawn_type: placement.spawn_type,
                    spawn_time: placement.spawn_time,
                    amount: placement.amount,
                });
                map.spawns.push(MapSpawn {
                    npc_id,
                    npc_name: npc.name.clone(),
                    x: placement.x,
                    y: placement.y,
                    spawn_type: placement.spawn_type,
                    spawn_time: placement.spawn_time,
                    amount: placement.amount,
                });
                edges += 1;
            }

            self.maps.insert(map_id, map);
        }

        debug!(maps = self.maps.len(), edges, "indexed map spawns");
    }

    /// Later NPCs win when two share a vendor id.
    fn build_vendor_index(&mut self) {
        self.vendor_index = self
            .npcs
            .values()
            .filter(|npc| npc.vendor_id > 0)
            .map(|npc| (npc.vendor_id, npc.id))
            .collect();

        debug!(entries = self.vendor_index.len(), "built vendor id index");
    }

    /// Dialogue references go through the vendor index; kills use primary ids.
    fn index_quests(&mut self, scripts: Vec<QuestScript>) {
        for script in scripts {
            let mut quest = Quest {
                id: script.id,
                name: script.display_name(),
                npcs: Vec::new(),
                rewards: Vec::new(),
                experience: script.experience,
                kills: Vec::new(),
                item_requirements: Vec::new(),
            };

            for &vendor_id in &script.npc_refs {
                let Some(npc) = self
                    .vendor_index
                    .get(&vendor_id)
                    .and_then(|npc_id| self.npcs.get_mut(npc_id))
                else {
                    trace!(quest_id = quest.id, vendor_id, "dialogue with unknown vendor id");
                    continue;
                };

                quest.npcs.push(QuestNpc {
                    npc_id: npc.id,
                    vendor_id,
                    name: npc.name.clone(),
                    graphic: npc.graphic,
                });
                npc.quests.push(NpcQuestRef {
                    quest_id: quest.id,
                    quest_name: quest.name.clone(),
                    role: NpcQuestRole::Dialogue,
                    amount: 1,
                });
            }

            for reward in &script.rewards {
                let Some(item) = self.items.get_mut(&reward.item_id) else {
                    continue;
                };

                quest.rewards.push(QuestItem {
                    item_id: item.id,
                    item_name: item.name.clone(),
                    amount: reward.amount,
                });
                item.quests.push(ItemQuestRef {
                    quest_id: quest.id,
                    quest_name: quest.name.clone(),
                    role: ItemQuestRole::Reward,
                    amount: reward.amount,
                });
            }

            for kill in &script.kills {
                let Some(npc) = self.npcs.get_mut(&kill.npc_id) else {
                    continue;
                };

                quest.kills.push(QuestKill {
                    npc_id: npc.id,
                    npc_name: npc.name.clone(),
                    amount: kill.amount,
                });
                npc.quests.push(NpcQuestRef {
                    quest_id: quest.id,
                    quest_name: quest.name.clone(),
                    role: NpcQuestRole::Kill,
                    amount: kill.amount,
                });
            }

            for requirement in &script.item_requirements {
                let Some(item) = self.items.get_mut(&requirement.item_id) else {
                    continue;
                };

                quest.item_requirements.push(QuestItem {
                    item_id: item.id,
                    item_name: item.name.clone(),
                    amount: requirement.amount,
                });
                item.quests.push(ItemQuestRef {
                    quest_id: quest.id,
                    quest_name: quest.name.clone(),
                    role: ItemQuestRole::Requirement,
                    amount: requirement.amount,
                });
            }

            self.quests.insert(quest.id, quest);
        }

        debug!(quests = self.quests.len(), "indexed quests");
    }

    /// Build the name indices and publish.
    fn finish(self) -> GameDatabase {
        let items_by_name = name_index(self.items.values().map(|e| (e.id, e.name.as_str())));
        let npcs_by_name = name_index(self.npcs.values().map(|e| (e.id, e.name.as_str())));
        let spells_by_name = name_index(self.spells.values().map(|e| (e.id, e.name.as_str())));

        GameDatabase {
            items: self.items,
            npcs: self.npcs,
            spells: self.spells,
            classes: self.classes,
            maps: self.maps,
            quests: self.quests,
            items_by_name,
            npcs_by_name,
            spells_by_name,
        }
    }
}

/// Later entries overwrite earlier ones on a name collision.
fn name_index<'a>(entries: impl Iterator<Item = (i32, &'a str)>) -> FxHashMap<String, i32> {
    let mut index = FxHashMap::default();
    for (id, name) in entries {
        index.insert(name_key(name), id);
    }
    index
}

fn shop_display_name(shop_id: i32, name: &str, npc: Option<&Npc>) -> String {
    let name = name.trim();
    match npc {
        _ if !name.is_empty() => name.to_string(),
        Some(npc) => npc.name.clone(),
        None => format!("Shop {shop_id}"),
    }
}

/// Resolve every ingredient, or nothing.
fn resolve_ingredients(
    items: &BTreeMap<i32, Item>,
    ingredients: &[Ingredient],
) -> Option<Vec<CraftIngredient>> {
    ingredients
        .iter()
        .map(|ingredient| {
            items.get(&ingredient.item_id).map(|item| CraftIngredient {
                item_id: item.id,
                item_name: item.name.clone(),
                amount: ingredient.amount,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use almanac_ini::{CraftRecipe, ItemAmount, KillAmount, ShopTrade};
    use almanac_map::MapNpc;
    use almanac_pub::{ItemRecord, NpcRecord, SpellRecord};

    fn item(name: &str) -> ItemRecord {
        ItemRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    fn npc(name: &str, vendor_id: u16) -> NpcRecord {
        NpcRecord {
            name: name.into(),
            vendor_id,
            ..Default::default()
        }
    }

    fn spell(name: &str) -> SpellRecord {
        SpellRecord {
            name: name.into(),
            ..Default::default()
        }
    }

    fn base() -> Sources {
        Sources {
            items: vec![(1, item("Gold")), (2, item("Potion")), (3, item("Wolf Pelt"))],
            npcs: vec![(1, npc("Wolf", 0)), (4, npc("Shopkeeper", 0)), (12, npc("Wise Man", 500))],
            spells: vec![(1, spell("Heal")), (2, spell("Fire Ball"))],
            ..Default::default()
        }
    }

    #[test]
    fn test_drops_are_mirrored() {
        let mut sources = base();
        sources.drops.insert(
            1,
            vec![
                DropRecord { item_id: 3, min: 1, max: 2, rate: 40.0 },
                DropRecord { item_id: 99, min: 1, max: 1, rate: 1.0 },
            ],
        );
        sources.drops.insert(77, vec![DropRecord { item_id: 1, min: 1, max: 1, rate: 1.0 }]);

        let db = Indexer::build(sources);
        let wolf = db.npc(1).unwrap();
        let pelt = db.item(3).unwrap();

        assert_eq!(wolf.drops.len(), 1);
        assert_eq!(wolf.drops[0].item_name, "Wolf Pelt");
        assert_eq!(pelt.drops_from.len(), 1);
        assert_eq!(pelt.drops_from[0].npc_name, "Wolf");
        assert_eq!(pelt.drops_from[0].rate, 40.0);
        assert!(db.item(1).unwrap().drops_from.is_empty());
    }

    #[test]
    fn test_shop_without_matching_npc_still_lists_items() {
        let mut sources = base();
        sources.shops.insert(
            4,
            Shop {
                name: String::new(),
                trades: vec![ShopTrade { item_id: 2, buy_price: 10, sell_price: 4 }],
                crafts: Vec::new(),
            },
        );
        sources.shops.insert(
            90,
            Shop {
                name: String::new(),
                trades: vec![ShopTrade { item_id: 2, buy_price: 12, sell_price: 0 }],
                crafts: Vec::new(),
            },
        );

        let db = Indexer::build(sources);
        let potion = db.item(2).unwrap();
        let names: Vec<&str> = potion.sold_at.iter().map(|l| l.shop_name.as_str()).collect();

        assert_eq!(names, vec!["Shopkeeper", "Shop 90"]);
        assert_eq!(db.npc(4).unwrap().shop_items.len(), 1);
        assert_eq!(db.npc(4).unwrap().shop_items[0].item_name, "Potion");
    }

    #[test]
    fn test_recipe_with_unknown_ingredient_is_dropped() {
        let mut sources = base();
        let recipe = |ingredient| CraftRecipe {
            item_id: 2,
            ingredients: vec![
                Ingredient { item_id: 3, amount: 2 },
                Ingredient { item_id: ingredient, amount: 1 },
            ],
        };
        sources.shops.insert(
            4,
            Shop {
                name: "Alchemist".into(),
                trades: Vec::new(),
                crafts: vec![recipe(1), recipe(55)],
            },
        );

        let db = Indexer::build(sources);
        let potion = db.item(2).unwrap();

        assert_eq!(potion.crafted_at.len(), 1);
        assert_eq!(potion.crafted_at[0].shop_name, "Alchemist");
        assert_eq!(potion.crafted_at[0].ingredients[0].item_name, "Wolf Pelt");
        assert_eq!(db.npc(4).unwrap().craft_items.len(), 1);
    }

    #[test]
    fn test_pet_first_wins_with_reverse_edge() {
        let mut sources = base();
        sources.pets = vec![
            PetRecord { npc_id: 1, item_id: 99, level: 1, note: None },
            PetRecord { npc_id: 1, item_id: 3, level: 2, note: None },
            PetRecord { npc_id: 1, item_id: 2, level: 3, note: None },
        ];

        let db = Indexer::build(sources);
        let pet = db.npc(1).unwrap().pet.as_ref().unwrap();

        assert_eq!(pet.item_name, "Wolf Pelt");
        assert_eq!(db.item(3).unwrap().pet_for[0].npc_name, "Wolf");
        assert!(db.item(2).unwrap().pet_for.is_empty());
    }

    #[test]
    fn test_special_spawn_lands_on_source_npc() {
        let mut sources = base();
        sources.npcs.push((40, npc("Golden Wolf", 0)));
        sources.special_mobs = vec![
            SpecialMobRecord {
                npc_id: 40,
                source_npc_id: 1,
                rate: 0.5,
                amount: 1,
                message: Some("Shiny!".into()),
            },
            SpecialMobRecord {
                npc_id: 40,
                source_npc_id: 999,
                rate: 1.0,
                amount: 1,
                message: None,
            },
        ];

        let db = Indexer::build(sources);
        let spawns = &db.npc(1).unwrap().special_spawns;

        assert_eq!(spawns.len(), 1);
        assert_eq!(spawns[0].npc_name, "Golden Wolf");
        assert_eq!(spawns[0].source_npc_name, "Wolf");
        assert!(db.npc(40).unwrap().special_spawns.is_empty());
    }

    #[test]
    fn test_first_spellcast_wins() {
        let mut sources = base();
        sources.npc_spells = vec![
            NpcSpellRecord { npc_id: 1, spell_id: 2, chance: 20, cooldown: 5, shout: None },
            NpcSpellRecord { npc_id: 1, spell_id: 1, chance: 50, cooldown: 1, shout: None },
        ];

        let db = Indexer::build(sources);
        let cast = db.npc(1).unwrap().spellcast.as_ref().unwrap();

        assert_eq!(cast.spell_name, "Fire Ball");
        assert_eq!(db.spell(2).unwrap().cast_by.len(), 1);
        assert!(db.spell(1).unwrap().cast_by.is_empty());
    }

    #[test]
    fn test_map_spawns_on_both_sides() {
        let mut sources = base();
        let placement = |npc_id| MapNpc {
            npc_id,
            x: 3,
            y: 4,
            spawn_type: 0,
            spawn_time: 30,
            amount: 2,
        };
        sources.maps = vec![
            (3, MapFile { name: String::new(), npcs: vec![placement(1), placement(500)] }),
            (5, MapFile { name: "Wolf Den".into(), npcs: vec![placement(1)] }),
        ];

        let db = Indexer::build(sources);
        let wolf = db.npc(1).unwrap();

        assert_eq!(db.map(3).unwrap().name, "Map 3");
        assert_eq!(db.map(3).unwrap().spawns.len(), 1);
        let maps: Vec<&str> = wolf.spawns.iter().map(|s| s.map_name.as_str()).collect();
        assert_eq!(maps, vec!["Map 3", "Wolf Den"]);
    }

    #[test]
    fn test_quest_dialogue_goes_through_vendor_index() {
        let mut sources = base();
        sources.quests = vec![QuestScript {
            id: 7,
            name: None,
            npc_refs: vec![500, 12, 0],
            rewards: vec![ItemAmount { item_id: 1, amount: 100 }],
            experience: 250,
            kills: vec![KillAmount { npc_id: 12, amount: 1 }],
            item_requirements: vec![ItemAmount { item_id: 3, amount: 5 }],
        }];

        let db = Indexer::build(sources);
        let quest = db.quest(7).unwrap();

        assert_eq!(quest.name, "Quest 7");
        assert_eq!(quest.npcs.len(), 1);
        assert_eq!(quest.npcs[0].npc_id, 12);
        assert_eq!(quest.npcs[0].name, "Wise Man");
        assert_eq!(quest.kills[0].npc_id, 12);

        let roles: Vec<NpcQuestRole> = db.npc(12).unwrap().quests.iter().map(|q| q.role).collect();
        assert_eq!(roles, vec![NpcQuestRole::Dialogue, NpcQuestRole::Kill]);
        assert_eq!(db.item(1).unwrap().quests[0].role, ItemQuestRole::Reward);
        assert_eq!(db.item(3).unwrap().quests[0].role, ItemQuestRole::Requirement);
    }

    #[test]
    fn test_name_index_last_wins() {
        let mut sources = base();
        sources.items.push((9, item("POTION")));

        let db = Indexer::build(sources);

        assert_eq!(db.item_by_name("potion").unwrap().id, 9);
        assert_eq!(db.npc_by_name(" wise man ").unwrap().id, 12);
        assert_eq!(db.spell_by_name("FIRE BALL").unwrap().id, 2);
        assert!(db.item_by_name("elixir").is_none());
    }
}
