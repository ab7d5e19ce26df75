//! Common utilities for Almanac.
//!
//! This crate provides the foundational pieces shared by every Almanac format crate:
//!
//! - [`codec`] - EO base-253 number encoding and the map-name string cipher
//! - [`EoReader`] - Cursor over a byte slice that decodes EO numbers and strings
//! - [`EoWriter`] - The inverse of [`EoReader`], used to build fixtures and re-encode data

mod error;
mod reader;
mod writer;

pub mod codec;

pub use error::{Error, Result};
pub use reader::EoReader;
pub use writer::EoWriter;

/// Re-export zerocopy traits for raw record layouts.
pub use zerocopy::{FromBytes, Immutable, KnownLayout};
