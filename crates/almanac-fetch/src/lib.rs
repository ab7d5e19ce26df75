//! Source retrieval for EO game data.
//!
//! A build reads many small files from one origin: four mandatory tables,
//! a handful of optional relationship files, and one file per map and quest id
//! over a fixed range. This crate provides:
//!
//! - [`Fetch`]: the origin abstraction ([`DirectoryFetcher`], [`MemoryFetcher`])
//! - [`SourceLayout`]: the file naming conventions, all overridable
//! - [`fetch_wave`]: a parallel fetch of many paths that settles as a group
//! - [`Source`]: the present / absent / corrupt outcome of an optional source

mod error;
mod fetcher;
mod layout;
mod source;
mod wave;

pub use error::{Error, Result};
pub use fetcher::{DirectoryFetcher, Fetch, MemoryFetcher};
pub use layout::{SourceLayout, TableSource, TextSource};
pub use source::{text, Source};
pub use wave::{fetch_wave, Fetched};
