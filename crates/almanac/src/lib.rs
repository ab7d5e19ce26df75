//! Almanac - cross-referenced EO game data.
//!
//! This crate provides a unified interface to the Almanac crates for loading
//! an EO server's data tree into a searchable, fully linked database.
//!
//! # Crates
//!
//! - [`almanac_common`] - EO number/string codec and byte reader
//! - [`almanac_pub`] - Item, NPC, spell and class tables (`.eif`, `.enf`, `.esf`, `.ecf`)
//! - [`almanac_map`] - Map files (`.emf`): name and NPC placements
//! - [`almanac_ini`] - Relationship files and quest scripts
//! - [`almanac_fetch`] - Source origins, file layout and concurrent fetching
//! - [`almanac_index`] - The cross-referenced [`GameDatabase`](prelude::GameDatabase)
//!
//! # Example
//!
//! ```no_run
//! use almanac::prelude::*;
//!
//! let fetcher = DirectoryFetcher::new("/srv/eoserv");
//! let db = load_game_database(&fetcher, &SourceLayout::default())?;
//!
//! if let Some(potion) = db.item_by_name("potion") {
//!     for listing in &potion.sold_at {
//!         println!("{}: {} gold", listing.shop_name, listing.buy_price);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use almanac_common as common;
pub use almanac_fetch as fetch;
pub use almanac_index as index;
pub use almanac_ini as ini;
pub use almanac_map as map;
pub use almanac_pub as tables;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use almanac_fetch::{DirectoryFetcher, Fetch, MemoryFetcher, SourceLayout};
    pub use almanac_index::{
        load_game_database, Counts, EntityKind, GameClass, GameDatabase, Item, LoadEvent,
        LoadHandle, LoadStage, Loader, Map, Npc, Quest, SearchHit, Spell,
    };
    pub use almanac_map::MapFile;
    pub use almanac_pub::{ItemType, NpcType, PubTable};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
