use std::path::PathBuf;

use clap::Parser;

/// Take a quick look inside MS compound file binary (OLE2/COM) files.
///
/// Mirrors each container's storage hierarchy into a sibling
/// `*_comobjects` directory, one file per stream.
#[derive(Clone, Debug, Parser)]
#[command(name = "cfburst", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Dump container diagnostics; no extraction.
    #[arg(long)]
    pub debug: bool,

    /// Print entry metadata only; write nothing to disk.
    #[arg(long)]
    pub meta: bool,

    /// Treat inputs as Thumbs.db caches: decode the Catalog stream and
    /// unwrap thumbnails to JPEG files.
    #[arg(long)]
    pub thumbs: bool,

    /// Compound file containers to process, in order.
    #[arg(required = true, value_name = "CONTAINER")]
    pub inputs: Vec<PathBuf>,
}
