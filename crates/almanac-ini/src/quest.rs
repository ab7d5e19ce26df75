//! Fact extraction from EQF quest scripts.
//!
//! Quest scripts are a small state-machine language. Nothing here interprets
//! them; each line is searched for a handful of directives and the matches are
//! collected into a [`QuestScript`].

use regex::{Captures, Regex};

use crate::Result;

/// An item and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ItemAmount {
    pub item_id: i32,
    pub amount: i32,
}

/// An NPC and how many must be killed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KillAmount {
    pub npc_id: i32,
    pub amount: i32,
}

/// Facts mined from one quest file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuestScript {
    pub id: i32,
    /// The `questname` declaration, if any.
    pub name: Option<String>,
    /// Dialogue NPCs by vendor id, first-seen order, no repeats.
    pub npc_refs: Vec<i32>,
    pub rewards: Vec<ItemAmount>,
    /// Sum of every `GiveExp`.
    pub experience: i64,
    pub kills: Vec<KillAmount>,
    pub item_requirements: Vec<ItemAmount>,
}

impl QuestScript {
    /// Name to show: the declared name or `Quest <id>`.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Quest {}", self.id),
        }
    }
}

/// Compiled directive patterns.
#[derive(Debug, Clone)]
pub struct QuestParser {
    name: Regex,
    dialogue: Regex,
    give_item: Regex,
    give_exp: Regex,
    kill: Regex,
    lose_item: Regex,
}

impl QuestParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            name: Regex::new(r#"\bquestname\s+"([^"]*)""#)?,
            dialogue: Regex::new(
                r"\b(?:AddNpcText|AddNpcInput|AddNpcChat|TalkedToNpc)\s*\(\s*(\d+)",
            )?,
            give_item: Regex::new(r"\bGiveItem\s*\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)")?,
            give_exp: Regex::new(r"\bGiveExp\s*\(\s*(\d+)\s*\)")?,
            kill: Regex::new(r"\bKilledNpcs\s*\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)")?,
            lose_item: Regex::new(r"\b(?:RemoveItem|LoseItem)\s*\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)")?,
        })
    }

    /// Extract quest facts from a script.
    ///
    /// Returns `None` when the script declares no name and references no
    /// dialogue NPC.
    pub fn parse(&self, id: i32, text: &str) -> Option<QuestScript> {
        let mut quest = QuestScript {
            id,
            ..Default::default()
        };

        for line in text.lines().map(strip_comment) {
            if quest.name.is_none() {
                if let Some(caps) = self.name.captures(line) {
                    let name = caps[1].trim();
                    if !name.is_empty() {
                        quest.name = Some(name.to_string());
                    }
                }
            }

            for caps in self.dialogue.captures_iter(line) {
                if let Some(vendor_id) = number(&caps, 1) {
                    if !quest.npc_refs.contains(&vendor_id) {
                        quest.npc_refs.push(vendor_id);
                    }
                }
            }

            quest.rewards.extend(self.give_item.captures_iter(line).filter_map(item_amount));
            quest.kills.extend(self.kill.captures_iter(line).filter_map(|caps| {
                Some(KillAmount {
                    npc_id: number(&caps, 1)?,
                    amount: amount(&caps)?,
                })
            }));
            quest
                .item_requirements
                .extend(self.lose_item.captures_iter(line).filter_map(item_amount));

            for caps in self.give_exp.captures_iter(line) {
                if let Ok(exp) = caps[1].parse::<i64>() {
                    quest.experience = quest.experience.saturating_add(exp);
                }
            }
        }

        if quest.name.is_none() && quest.npc_refs.is_empty() {
            return None;
        }
        Some(quest)
    }
}

/// Drop a `//` comment, ignoring slashes inside string literals.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut quoted = false;

    for (pos, &b) in bytes.iter().enumerate() {
        match b {
            b'"' => quoted = !quoted,
            b'/' if !quoted && bytes.get(pos + 1) == Some(&b'/') => return &line[..pos],
            _ => {}
        }
    }
    line
}

fn number(caps: &Captures<'_>, group: usize) -> Option<i32> {
    caps.get(group)?.as_str().parse().ok()
}

/// The optional second argument, defaulting to one.
fn amount(caps: &Captures<'_>) -> Option<i32> {
    match caps.get(2) {
        Some(m) => m.as_str().parse().ok(),
        None => Some(1),
    }
}

fn item_amount(caps: Captures<'_>) -> Option<ItemAmount> {
    Some(ItemAmount {
        item_id: number(&caps, 1)?,
        amount: amount(&caps)?,
    })
}
