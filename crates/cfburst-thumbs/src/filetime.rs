use std::fmt;

use chrono::{DateTime, Utc};

/// 100 ns ticks between 1601-01-01 and the Unix epoch.
const UNIX_EPOCH_TICKS: i128 = 116_444_736_000_000_000;
const TICKS_PER_SECOND: i128 = 10_000_000;

/// Windows FILETIME: 100-nanosecond intervals since 1601-01-01 UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileTime(u64);

impl FileTime {
    pub fn from_raw(ticks: u64) -> Self {
        Self(ticks)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    /// Convert to a UTC datetime.
    ///
    /// Returns `None` for tick values outside the range `chrono` can
    /// represent.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let delta = self.0 as i128 - UNIX_EPOCH_TICKS;
        let secs = i64::try_from(delta.div_euclid(TICKS_PER_SECOND)).ok()?;
        let nanos = u32::try_from(delta.rem_euclid(TICKS_PER_SECOND) * 100).ok()?;
        DateTime::from_timestamp(secs, nanos)
    }
}

impl fmt::Display for FileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "filetime {:#018x}", self.0),
        }
    }
}
