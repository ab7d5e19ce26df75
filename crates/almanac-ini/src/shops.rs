//! `shops.ini` and `crafts.ini`: shop names, trade lists and craft recipes.

use std::collections::BTreeMap;

use tracing::trace;

use crate::lines::{csv_groups, entries};

/// Fields per trade group: item id, buy price, sell price.
pub const TRADE_GROUP_SIZE: usize = 3;

/// Fields per craft group: result id then four ingredient/amount pairs.
pub const CRAFT_GROUP_SIZE: usize = 9;

/// One item a shop buys and sells.
///
/// A price of zero means the shop does not trade in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShopTrade {
    pub item_id: i32,
    pub buy_price: i32,
    pub sell_price: i32,
}

/// One ingredient slot of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ingredient {
    pub item_id: i32,
    pub amount: i32,
}

/// A recipe offered by a shop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CraftRecipe {
    pub item_id: i32,
    /// Used slots only; empty slots (item id 0) are dropped.
    pub ingredients: Vec<Ingredient>,
}

/// Everything known about one shop id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Shop {
    pub name: String,
    pub trades: Vec<ShopTrade>,
    pub crafts: Vec<CraftRecipe>,
}

fn parse_trade(group: &[&str]) -> Option<ShopTrade> {
    Some(ShopTrade {
        item_id: group[0].parse().ok()?,
        buy_price: group[1].parse().ok()?,
        sell_price: group[2].parse().ok()?,
    })
}

fn parse_craft(group: &[&str]) -> Option<CraftRecipe> {
    let item_id = group[0].parse().ok()?;
    let mut ingredients = Vec::with_capacity(4);

    for pair in group[1..].chunks_exact(2) {
        let ingredient = Ingredient {
            item_id: pair[0].parse().ok()?,
            amount: pair[1].parse().ok()?,
        };
        if ingredient.item_id != 0 {
            ingredients.push(ingredient);
        }
    }

    Some(CraftRecipe { item_id, ingredients })
}

fn collect_groups<T>(
    value: &str,
    size: usize,
    what: &'static str,
    parse: fn(&[&str]) -> Option<T>,
) -> Vec<T> {
    csv_groups(value, size)
        .filter_map(|group| {
            let parsed = parse(&group);
            if parsed.is_none() {
                trace!(?group, "skipping malformed {what} group");
            }
            parsed
        })
        .collect()
}

/// Parse a trade value (`item,buy,sell,...`).
pub fn parse_trade_groups(value: &str) -> Vec<ShopTrade> {
    collect_groups(value, TRADE_GROUP_SIZE, "trade", parse_trade)
}

/// Parse a craft value (`item,ing1,amt1,...,ing4,amt4,...`).
pub fn parse_craft_groups(value: &str) -> Vec<CraftRecipe> {
    collect_groups(value, CRAFT_GROUP_SIZE, "craft", parse_craft)
}

/// Parse a shops file of `id.name`, `id.trade` and `id.craft` lines.
pub fn parse_shops(text: &str) -> BTreeMap<i32, Shop> {
    let mut shops: BTreeMap<i32, Shop> = BTreeMap::new();

    for entry in entries(text) {
        let Some((id, property)) = entry.id_and_property() else {
            trace!(line = entry.line, key = entry.key, "skipping shop line without id.property key");
            continue;
        };

        match property {
            "name" => shops.entry(id).or_default().name = entry.value.to_string(),
            "trade" => shops
                .entry(id)
                .or_default()
                .trades
                .extend(parse_trade_groups(entry.value)),
            "craft" => shops
                .entry(id)
                .or_default()
                .crafts
                .extend(parse_craft_groups(entry.value)),
            _ => trace!(line = entry.line, property, "ignoring unknown shop property"),
        }
    }

    shops
}

/// Merge a crafts file (`shop_id = csv`) into an existing shop table.
pub fn merge_crafts(shops: &mut BTreeMap<i32, Shop>, text: &str) {
    for entry in entries(text) {
        let Some(id) = entry.id() else {
            trace!(line = entry.line, key = entry.key, "skipping craft line with non-numeric id");
            continue;
        };

        let recipes = parse_craft_groups(entry.value);
        if !recipes.is_empty() {
            shops.entry(id).or_default().crafts.extend(recipes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOPS: &str = "\
5.name = General Store
5.trade = 1,10,5,2,0,3
5.craft = 7,1,2,2,1,0,0,0,0
5.owner = nobody
6.trade = 9,1
";

    #[test]
    fn test_parse_shops() {
        let shops = parse_shops(SHOPS);
        let store = &shops[&5];

        assert_eq!(store.name, "General Store");
        assert_eq!(
            store.trades,
            vec![
                ShopTrade { item_id: 1, buy_price: 10, sell_price: 5 },
                ShopTrade { item_id: 2, buy_price: 0, sell_price: 3 },
            ]
        );
        assert_eq!(store.crafts.len(), 1);
        assert_eq!(
            store.crafts[0].ingredients,
            vec![
                Ingredient { item_id: 1, amount: 2 },
                Ingredient { item_id: 2, amount: 1 },
            ]
        );

        // A short trade group still registers the shop, with nothing in it.
        assert!(shops[&6].trades.is_empty());
    }

    #[test]
    fn test_merge_crafts() {
        let mut shops = parse_shops(SHOPS);
        merge_crafts(&mut shops, "5 = 8,3,1,0,0,0,0,0,0\n9 = 4,1,1,1,1,1,1,1,1\n");

        assert_eq!(shops[&5].crafts.len(), 2);
        assert_eq!(shops[&5].crafts[1].item_id, 8);
        assert_eq!(shops[&9].name, "");
        assert_eq!(shops[&9].crafts[0].ingredients.len(), 4);
    }

    #[test]
    fn test_bad_ingredient_skips_group() {
        let recipes = parse_craft_groups("7,1,x,0,0,0,0,0,0,8,1,1,0,0,0,0,0,0");
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].item_id, 8);
    }
}
