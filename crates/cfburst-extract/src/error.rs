use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open input container '{path}': {source}")]
    InputOpen { path: PathBuf, source: io::Error },

    #[error("container structure error: {source}")]
    Container { source: io::Error },

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreate { path: PathBuf, source: io::Error },

    #[error("failed to create output file '{path}': {source}")]
    OutputCreate { path: PathBuf, source: io::Error },

    #[error("short read in entry '{name}': {source}")]
    ShortRead { name: String, source: io::Error },

    #[error("thumbnail stream '{name}' declares an infeasible header of {len} bytes")]
    BadThumbnailHeader { name: String, len: u32 },

    #[error(transparent)]
    Catalog(#[from] cfburst_thumbs::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
