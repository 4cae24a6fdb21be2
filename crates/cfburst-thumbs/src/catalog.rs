use std::io::Read;

use crate::error::{Error, Result};
use crate::filetime::FileTime;

/// Fixed little-endian header at the start of a Catalog stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogHeader {
    pub magic: u16,
    pub version: u16,
    pub entry_count: u32,
    pub width: u32,
    pub height: u32,
}

/// One decoded thumbnail record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogRecord {
    /// Total record length on the wire, fixed parts and name included.
    pub record_size: u32,
    pub index: u32,
    pub timestamp: FileTime,
    pub name: String,
}

/// Bytes before the variable-length name: size, index, timestamp.
const PREFIX_LEN: usize = 16;
/// `record_size` covers the prefix plus the 4-byte trailer.
const FIXED_OVERHEAD: u32 = 20;
const TRAILER_LEN: usize = 4;

impl CatalogHeader {
    pub const LEN: usize = 16;

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut buf = [0u8; Self::LEN];
        reader
            .read_exact(&mut buf)
            .map_err(|source| Error::TruncatedHeader { source })?;
        Ok(Self {
            magic: u16::from_le_bytes([buf[0], buf[1]]),
            version: u16::from_le_bytes([buf[2], buf[3]]),
            entry_count: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            width: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            height: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
        })
    }
}

/// Lazy iterator over the records of one Catalog stream.
///
/// Yields exactly `entry_count` records unless a decode error occurs, after
/// which the iterator fuses. Dropping it early leaves the underlying stream
/// at the last read position.
pub struct CatalogRecords<'a, R> {
    reader: &'a mut R,
    remaining: u32,
    ordinal: u32,
}

impl<R: Read> CatalogRecords<'_, R> {
    fn read_record(&mut self) -> Result<CatalogRecord> {
        let ordinal = self.ordinal;
        let mut prefix = [0u8; PREFIX_LEN];
        self.reader
            .read_exact(&mut prefix)
            .map_err(|source| Error::TruncatedRecord { index: ordinal, source })?;

        let record_size = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
        let index = u32::from_le_bytes([prefix[4], prefix[5], prefix[6], prefix[7]]);
        let timestamp = FileTime::from_raw(u64::from_le_bytes([
            prefix[8], prefix[9], prefix[10], prefix[11], prefix[12], prefix[13], prefix[14],
            prefix[15],
        ]));

        // The name length is implied by record_size; it must leave room for
        // the fixed parts and describe whole UTF-16 code units.
        if record_size < FIXED_OVERHEAD || (record_size - FIXED_OVERHEAD) % 2 != 0 {
            return Err(Error::BadRecordSize { index: ordinal, size: record_size });
        }

        let mut raw_name = vec![0u8; (record_size - FIXED_OVERHEAD) as usize];
        self.reader
            .read_exact(&mut raw_name)
            .map_err(|source| Error::TruncatedRecord { index: ordinal, source })?;
        let units: Vec<u16> = raw_name
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        let name = String::from_utf16_lossy(&units);

        let mut trailer = [0u8; TRAILER_LEN];
        self.reader
            .read_exact(&mut trailer)
            .map_err(|source| Error::TruncatedRecord { index: ordinal, source })?;

        Ok(CatalogRecord { record_size, index, timestamp, name })
    }
}

impl<R: Read> Iterator for CatalogRecords<'_, R> {
    type Item = Result<CatalogRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.read_record();
        match item {
            Ok(_) => {
                self.remaining -= 1;
                self.ordinal += 1;
            }
            Err(_) => self.remaining = 0,
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (0, Some(remaining))
    }
}

/// Decode the catalog header and return a lazy iterator over its records.
pub fn read_catalog<R: Read>(reader: &mut R) -> Result<(CatalogHeader, CatalogRecords<'_, R>)> {
    let header = CatalogHeader::read_from(reader)?;
    let records = CatalogRecords { reader, remaining: header.entry_count, ordinal: 0 };
    Ok((header, records))
}
