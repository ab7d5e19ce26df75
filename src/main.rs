//! Almanac CLI - Command-line browser for cross-referenced EO game data.
//!
//! This is the main entry point for the Almanac command-line application.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use almanac::prelude::*;

/// Almanac - cross-referenced EO game data browser
#[derive(Parser)]
#[command(name = "almanac")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Root of the server data tree
    #[arg(short, long, env = "ALMANAC_ROOT", default_value = ".", global = true)]
    root: PathBuf,

    /// Directory holding the tables and relationship files
    #[arg(long, default_value = "data", global = true)]
    data_dir: String,

    /// Directory holding map files
    #[arg(long, default_value = "maps", global = true)]
    maps_dir: String,

    /// Directory holding quest scripts
    #[arg(long, default_value = "quests", global = true)]
    quests_dir: String,

    /// Highest map id to probe
    #[arg(long, default_value_t = 300, global = true)]
    max_map_id: i32,

    /// Highest quest id to probe
    #[arg(long, default_value_t = 500, global = true)]
    max_quest_id: i32,
}

impl SourceArgs {
    fn layout(&self) -> SourceLayout {
        SourceLayout {
            data_dir: self.data_dir.clone(),
            maps_dir: self.maps_dir.clone(),
            quests_dir: self.quests_dir.clone(),
            map_ids: 1..=self.max_map_id,
            quest_ids: 1..=self.max_quest_id,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show entity counts
    Summary,

    /// Show an item by id or name
    Item {
        /// Item id or name
        key: String,
    },

    /// Show an NPC by id or name
    Npc {
        /// NPC id or name
        key: String,
    },

    /// Show a spell by id or name
    Spell {
        /// Spell id or name
        key: String,
    },

    /// Show a class by id or name
    Class {
        /// Class id or name
        key: String,
    },

    /// Show a map by id or name
    Map {
        /// Map id or name
        key: String,
    },

    /// Show a quest by id or name
    Quest {
        /// Quest id or name
        key: String,
    },

    /// Find entities whose name contains a string
    Search {
        /// Text to look for (case-insensitive)
        needle: String,

        /// Only search one kind of entity
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Write the whole database as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Item,
    Npc,
    Spell,
    Class,
    Map,
    Quest,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Item => EntityKind::Item,
            KindArg::Npc => EntityKind::Npc,
            KindArg::Spell => EntityKind::Spell,
            KindArg::Class => EntityKind::Class,
            KindArg::Map => EntityKind::Map,
            KindArg::Quest => EntityKind::Quest,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = load(&cli.source)?;
    let compact = cli.compact;

    match cli.command {
        Commands::Summary => cmd_summary(&db),
        Commands::Item { key } => {
            let item = find(&key, |id| db.item(id), |name| db.item_by_name(name));
            print_json(item.with_context(|| format!("No item matches '{key}'"))?, compact)?;
        }
        Commands::Npc { key } => {
            let npc = find(&key, |id| db.npc(id), |name| db.npc_by_name(name));
            print_json(npc.with_context(|| format!("No NPC matches '{key}'"))?, compact)?;
        }
        Commands::Spell { key } => {
            let spell = find(&key, |id| db.spell(id), |name| db.spell_by_name(name));
            print_json(spell.with_context(|| format!("No spell matches '{key}'"))?, compact)?;
        }
        Commands::Class { key } => {
            let class = find(
                &key,
                |id| db.class(id),
                |name| db.classes().find(|c| c.name.eq_ignore_ascii_case(name)),
            );
            print_json(class.with_context(|| format!("No class matches '{key}'"))?, compact)?;
        }
        Commands::Map { key } => {
            let map = find(
                &key,
                |id| db.map(id),
                |name| db.maps().find(|m| m.name.eq_ignore_ascii_case(name)),
            );
            print_json(map.with_context(|| format!("No map matches '{key}'"))?, compact)?;
        }
        Commands::Quest { key } => {
            let quest = find(
                &key,
                |id| db.quest(id),
                |name| db.quests().find(|q| q.name.eq_ignore_ascii_case(name)),
            );
            print_json(quest.with_context(|| format!("No quest matches '{key}'"))?, compact)?;
        }
        Commands::Search { needle, kind } => cmd_search(&db, &needle, kind)?,
        Commands::Export { output } => cmd_export(&db, output, compact)?,
    }

    Ok(())
}

/// Build the database on a background thread behind a spinner.
fn load(args: &SourceArgs) -> Result<Arc<GameDatabase>> {
    let start = Instant::now();
    let fetcher: Arc<dyn Fetch> = Arc::new(DirectoryFetcher::new(&args.root));

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let handle = LoadHandle::spawn(fetcher, args.layout());
    let result = handle.wait_with(|stage, current, total| {
        pb.set_message(format!("{stage} ({current}/{total})"));
    });
    pb.finish_and_clear();

    let db = result
        .with_context(|| format!("Failed to load game data from {}", args.root.display()))?;
    tracing::info!(elapsed = ?start.elapsed(), "loaded {}", args.root.display());
    Ok(db)
}

/// Resolve a lookup key: numeric keys are ids, anything else is a name.
fn find<'a, T>(
    key: &str,
    by_id: impl Fn(i32) -> Option<&'a T>,
    by_name: impl Fn(&str) -> Option<&'a T>,
) -> Option<&'a T> {
    match key.trim().parse::<i32>() {
        Ok(id) => by_id(id),
        Err(_) => by_name(key.trim()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_summary(db: &GameDatabase) {
    let counts = db.counts();
    println!("Items:   {:>6}", counts.items);
    println!("NPCs:    {:>6}", counts.npcs);
    println!("Spells:  {:>6}", counts.spells);
    println!("Classes: {:>6}", counts.classes);
    println!("Maps:    {:>6}", counts.maps);
    println!("Quests:  {:>6}", counts.quests);
}

fn cmd_search(db: &GameDatabase, needle: &str, kind: Option<KindArg>) -> Result<()> {
    let kinds: Vec<EntityKind> = match kind {
        Some(kind) => vec![kind.into()],
        None => EntityKind::ALL.to_vec(),
    };

    let mut total = 0;
    for kind in kinds {
        for hit in db.search(kind, needle) {
            println!("{:<6} {:>6}  {}", hit.kind, hit.id, hit.name);
            total += 1;
        }
    }

    if total == 0 {
        bail!("Nothing matches '{needle}'");
    }
    Ok(())
}

fn cmd_export(db: &GameDatabase, output: Option<PathBuf>, compact: bool) -> Result<()> {
    let Some(path) = output else {
        return print_json(db, compact);
    };

    let start = Instant::now();
    let json = if compact {
        serde_json::to_vec(db)?
    } else {
        serde_json::to_vec_pretty(db)?
    };
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported {} to {} in {:?}", db.counts(), path.display(), start.elapsed());
    Ok(())
}
