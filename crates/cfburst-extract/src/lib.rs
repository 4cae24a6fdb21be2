//! Compound file (OLE2/COM) extraction with path sanitization.
//!
//! Mirrors a container's storage hierarchy onto the filesystem: one
//! directory per storage, one file per stream, and both for a storage that
//! also carries data. Thumbs.db caches get special treatment: thumbnail
//! streams are unwrapped to plain JPEG files and the `Catalog` stream is
//! decoded instead of dumped.
//!
//! # Architecture
//!
//! - `sanitize.rs` - entry-name cleanup
//! - `resolve.rs` - destination path computation
//! - `container.rs` - forward-only cursor over the compound-file reader
//! - `extract.rs` - extraction driver
//! - `report.rs` - metadata and diagnostics output
//! - `entry.rs` - shared types

pub use self::container::{CfbSource, CurrentStream, EntrySource, RootInfo, open_container};
pub use self::entry::{Disposition, EntryRecord};
pub use self::error::{Error, Result};
pub use self::extract::{ExtractOptions, ExtractReport, ExtractedEntry, extract};
pub use self::report::{dump_diagnostics, report};
pub use self::resolve::{ResolvedPath, output_root_for, resolve};
pub use self::sanitize::sanitize;

mod container;
mod entry;
mod error;
mod extract;
mod report;
mod resolve;
mod sanitize;

#[cfg(test)]
mod testsupport;
