//! Thumbs.db "Catalog" stream decoding.
//!
//! Windows thumbnail caches store one `Catalog` stream listing every cached
//! image: a fixed 16-byte header followed by variable-length records, each
//! carrying a record size, an ordinal, a Windows FILETIME and a UTF-16LE
//! file name. This crate decodes that layout from any `Read` source.
//!
//! Records are produced lazily, one at a time, so a caller may stop early
//! without draining the stream.
//!
//! # Example
//!
//! ```no_run
//! use std::io::Read;
//! use cfburst_thumbs::read_catalog;
//!
//! fn list<R: Read>(mut stream: R) -> cfburst_thumbs::Result<()> {
//!     let (header, records) = read_catalog(&mut stream)?;
//!     println!("{} thumbnails", header.entry_count);
//!     for record in records {
//!         let record = record?;
//!         println!("{}: {}", record.name, record.timestamp);
//!     }
//!     Ok(())
//! }
//! ```

pub use self::catalog::{CatalogHeader, CatalogRecord, CatalogRecords, read_catalog};
pub use self::error::{Error, Result};
pub use self::filetime::FileTime;

mod catalog;
mod error;
mod filetime;
