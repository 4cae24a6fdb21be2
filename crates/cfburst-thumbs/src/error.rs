use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("catalog stream ended before the 16-byte header: {source}")]
    TruncatedHeader { source: io::Error },

    #[error("catalog record {index} is truncated: {source}")]
    TruncatedRecord { index: u32, source: io::Error },

    #[error("catalog record {index} declares an infeasible size of {size} bytes")]
    BadRecordSize { index: u32, size: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
