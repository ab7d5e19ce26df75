//! Cross-referenced EO game database.
//!
//! Loads the item, NPC, spell and class tables, every optional relationship
//! file, and the map and quest files of a data tree, then stitches them into a
//! [`GameDatabase`] where every relationship can be read from either end.
//!
//! # Build pipeline
//!
//! 1. Wave 1 fetches the four tables concurrently. Any failure here is fatal.
//! 2. Wave 2 fetches relationship files, maps and quests concurrently. Missing
//!    or corrupt sources are logged and treated as empty.
//! 3. The [`Indexer`] runs its passes single-threaded and publishes the
//!    immutable database.
//!
//! # Example
//!
//! ```no_run
//! use almanac_fetch::{DirectoryFetcher, SourceLayout};
//! use almanac_index::load_game_database;
//!
//! let fetcher = DirectoryFetcher::new("/srv/eoserv");
//! let db = load_game_database(&fetcher, &SourceLayout::default())?;
//!
//! if let Some(wolf) = db.npc_by_name("wolf") {
//!     for drop in &wolf.drops {
//!         println!("{} ({}%)", drop.item_name, drop.rate);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod database;
mod entity;
mod error;
mod handle;
mod indexer;
mod loader;
mod sources;

pub use database::{Counts, EntityKind, GameDatabase, SearchHit};
pub use entity::*;
pub use error::{Error, Result};
pub use handle::{LoadEvent, LoadHandle};
pub use indexer::Indexer;
pub use loader::{load_game_database, LoadStage, Loader};
pub use sources::Sources;
