//! Fetching and decoding every source of a build.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use almanac_fetch::{
    fetch_wave, text, Fetch, Fetched, Source, SourceLayout, TableSource, TextSource,
};
use almanac_ini::QuestParser;
use almanac_map::MapFile;
use almanac_pub::{ClassRecord, ItemRecord, NpcRecord, PubRecord, PubTable, SpellRecord};
use tracing::{debug, info};

use crate::{Error, GameDatabase, Indexer, Result, Sources};

/// Phase of a build, for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStage {
    /// Wave 1: the four mandatory tables.
    Tables,
    /// Wave 2: relationship files, maps and quests.
    Sources,
    /// Stitching passes.
    Indexing,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tables => "Loading tables",
            Self::Sources => "Loading maps, quests and relationships",
            Self::Indexing => "Cross-referencing",
        })
    }
}

type ProgressFn<'a> = &'a (dyn Fn(LoadStage, usize, usize) + Sync);

/// Load and index a whole game data tree.
///
/// The four tables are mandatory: if any is missing or undecodable the build
/// fails. Every other source degrades to empty when absent or corrupt.
pub fn load_game_database(fetcher: &dyn Fetch, layout: &SourceLayout) -> Result<GameDatabase> {
    Loader::new(fetcher, layout).run()
}

/// A configurable build: progress reporting and cancellation.
pub struct Loader<'a> {
    fetcher: &'a dyn Fetch,
    layout: &'a SourceLayout,
    cancelled: Option<&'a AtomicBool>,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> Loader<'a> {
    pub fn new(fetcher: &'a dyn Fetch, layout: &'a SourceLayout) -> Self {
        Self {
            fetcher,
            layout,
            cancelled: None,
            progress: None,
        }
    }

    /// Abandon the build once `flag` is set. Checked between waves and before
    /// publishing.
    pub fn cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancelled = Some(flag);
        self
    }

    /// Receive `(stage, completed, total)` as sources settle.
    pub fn progress(mut self, callback: ProgressFn<'a>) -> Self {
        self.progress = Some(callback);
        self
    }

    pub fn run(&self) -> Result<GameDatabase> {
        let started = Instant::now();

        let sources = self.fetch_sources()?;
        self.report(LoadStage::Indexing, 0, 1);
        let database = Indexer::build(sources);
        self.report(LoadStage::Indexing, 1, 1);
        self.check_cancelled()?;

        info!(
            counts = %database.counts(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "game database built"
        );
        Ok(database)
    }

    /// Run both fetch waves and decode everything, without indexing.
    pub fn fetch_sources(&self) -> Result<Sources> {
        self.check_cancelled()?;
        let mut sources = self.fetch_tables()?;

        self.check_cancelled()?;
        self.fetch_optional(&mut sources)?;

        self.check_cancelled()?;
        Ok(sources)
    }

    fn fetch_tables(&self) -> Result<Sources> {
        let paths = TableSource::ALL
            .iter()
            .map(|&table| self.layout.table_path(table))
            .collect();
        let mut fetched = fetch_wave(self.fetcher, paths, self.cancelled, |done, total| {
            self.report(LoadStage::Tables, done, total)
        })
        .into_iter();

        let mut next = |table: TableSource| -> Result<Fetched> {
            fetched.next().ok_or_else(|| Error::MissingSource {
                table: table.label(),
                path: self.layout.table_path(table),
            })
        };
        let items = decode_table::<ItemRecord>(TableSource::Items, next(TableSource::Items)?)?;
        let npcs = decode_table::<NpcRecord>(TableSource::Npcs, next(TableSource::Npcs)?)?;
        let spells = decode_table::<SpellRecord>(TableSource::Spells, next(TableSource::Spells)?)?;
        let classes =
            decode_table::<ClassRecord>(TableSource::Classes, next(TableSource::Classes)?)?;

        debug!(
            items = items.len(),
            npcs = npcs.len(),
            spells = spells.len(),
            classes = classes.len(),
            "decoded tables"
        );

        Ok(Sources {
            items,
            npcs,
            spells,
            classes,
            ..Default::default()
        })
    }

    fn fetch_optional(&self, sources: &mut Sources) -> Result<()> {
        let layout = self.layout;
        let map_ids: Vec<i32> = layout.map_ids.clone().collect();
        let quest_ids: Vec<i32> = layout.quest_ids.clone().collect();

        let paths: Vec<String> = TextSource::ALL
            .iter()
            .map(|&source| layout.text_path(source))
            .chain(map_ids.iter().map(|&id| layout.map_path(id)))
            .chain(quest_ids.iter().map(|&id| layout.quest_path(id)))
            .collect();
        let mut fetched = fetch_wave(self.fetcher, paths, self.cancelled, |done, total| {
            self.report(LoadStage::Sources, done, total)
        })
        .into_iter();

        for source in TextSource::ALL {
            let Some(Fetched { path, result }) = fetched.next() else {
                break;
            };
            let Some(body) = Source::decode(&path, result, text).present() else {
                continue;
            };

            match source {
                TextSource::Drops => sources.drops = almanac_ini::parse_drops(&body),
                // Shops come before crafts in `TextSource::ALL`.
                TextSource::Shops => sources.shops = almanac_ini::parse_shops(&body),
                TextSource::Crafts => almanac_ini::merge_crafts(&mut sources.shops, &body),
                TextSource::Pets => sources.pets = almanac_ini::parse_pets(&body),
                TextSource::SpecialDrops => {
                    sources.special_drops = almanac_ini::parse_special_drops(&body)
                }
                TextSource::SpecialMobs => {
                    sources.special_mobs = almanac_ini::parse_special_mobs(&body)
                }
                TextSource::NpcSpells => sources.npc_spells = almanac_ini::parse_npc_spells(&body),
            }
        }

        let mut corrupt = 0;
        for (&id, Fetched { path, result }) in map_ids.iter().zip(fetched.by_ref()) {
            match Source::decode(&path, result, MapFile::parse) {
                Source::Present(map) => sources.maps.push((id, map)),
                Source::Corrupt(reason) => {
                    corrupt += 1;
                    debug!(map = id, %reason, "map left out of the build");
                }
                Source::Absent => {}
            }
        }

        let parser = QuestParser::new()?;
        for (&id, Fetched { path, result }) in quest_ids.iter().zip(fetched.by_ref()) {
            let Some(body) = Source::decode(&path, result, text).present() else {
                continue;
            };
            match parser.parse(id, &body) {
                Some(quest) => sources.quests.push(quest),
                None => debug!(path = %path, "no quest facts found"),
            }
        }

        debug!(
            drop_tables = sources.drops.len(),
            shops = sources.shops.len(),
            maps = sources.maps.len(),
            corrupt_maps = corrupt,
            quests = sources.quests.len(),
            "decoded optional sources"
        );
        Ok(())
    }

    fn check_cancelled(&self) -> Result<()> {
        match self.cancelled {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(Error::Cancelled),
            _ => Ok(()),
        }
    }

    fn report(&self, stage: LoadStage, done: usize, total: usize) {
        if let Some(progress) = self.progress {
            progress(stage, done, total);
        }
    }
}

/// Decode a mandatory table into `(id, record)` pairs.
fn decode_table<T: PubRecord>(table: TableSource, fetched: Fetched) -> Result<Vec<(i32, T)>> {
    let Fetched { path, result } = fetched;
    let bytes = result
        .map_err(|source| Error::Fetch {
            table: table.label(),
            source,
        })?
        .ok_or_else(|| Error::MissingSource {
            table: table.label(),
            path: path.clone(),
        })?;

    let parsed = PubTable::<T>::parse(&bytes).map_err(|source| Error::CorruptSource {
        table: table.label(),
        path: path.clone(),
        source,
    })?;
    debug!(path = %path, records = parsed.records().len(), "decoded table");

    Ok(parsed.into_named().collect())
}
