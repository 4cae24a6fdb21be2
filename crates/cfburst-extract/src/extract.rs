use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::container::{CurrentStream, EntrySource};
use crate::entry::{Disposition, EntryRecord};
use crate::error::{Error, Result};
use crate::resolve::resolve;

/// Stream name holding the thumbnail catalog in a Thumbs.db cache.
const CATALOG_STREAM: &str = "Catalog";

#[derive(Clone, Copy, Debug, Default)]
pub struct ExtractOptions {
    /// Treat the container as a Thumbs.db cache: unwrap thumbnail streams
    /// to JPEG files and decode the Catalog stream instead of dumping it.
    pub thumbs: bool,
}

impl ExtractOptions {
    pub fn thumbs(mut self, thumbs: bool) -> Self {
        self.thumbs = thumbs;
        self
    }
}

#[derive(Clone, Debug)]
pub struct ExtractReport {
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
}

#[derive(Clone, Debug)]
pub struct ExtractedEntry {
    pub name: String,
    pub directory: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub size: u64,
}

/// Mirror the container's hierarchy beneath `dest_root`.
///
/// Entries are processed strictly in cursor order; the first error aborts
/// the run, leaving prior output in place. Catalog listings in thumbs mode
/// go to `out`.
pub fn extract<S: EntrySource, W: Write>(
    source: &mut S,
    dest_root: &Path,
    options: &ExtractOptions,
    out: &mut W,
) -> Result<ExtractReport> {
    // Sibling names are unique inside a container, so an existing path is a
    // genuine conflict rather than a resumable state.
    fs::create_dir(dest_root).map_err(|e| Error::DirectoryCreate {
        path: dest_root.to_path_buf(),
        source: e,
    })?;

    let mut entries = Vec::new();
    let mut total_bytes = 0u64;

    while let Some(entry) = source.next_entry()? {
        let disposition = entry.disposition();
        let thumbs_image =
            options.thumbs && entry.has_stream && entry.name != CATALOG_STREAM;
        let resolved = resolve(&entry.ancestors, &entry.name, disposition, thumbs_image);

        let mut extracted = ExtractedEntry {
            name: entry.name.clone(),
            directory: None,
            file: None,
            size: entry.size,
        };

        if matches!(disposition, Disposition::DirectoryOnly | Disposition::Both) {
            let dir = resolved.directory_path(dest_root);
            debug!(path = %dir.display(), "creating storage directory");
            fs::create_dir(&dir).map_err(|e| Error::DirectoryCreate {
                path: dir.clone(),
                source: e,
            })?;
            extracted.directory = Some(dir);
        }

        if entry.has_stream {
            if options.thumbs && entry.name == CATALOG_STREAM {
                debug!("decoding thumbnail catalog");
                print_catalog(source, out)?;
            } else {
                let target = resolved.stream_path(dest_root);
                debug!(path = %target.display(), size = entry.size, "writing stream");
                total_bytes += copy_stream(source, &entry, &target, thumbs_image)?;
                extracted.file = Some(target);
            }
        }

        entries.push(extracted);
    }

    Ok(ExtractReport {
        entry_count: entries.len(),
        total_bytes,
        entries,
    })
}

/// Copy the current entry's bytes to `target`, unwrapping the thumbnail
/// header first in thumbs mode. The output file is closed before returning
/// on every path.
fn copy_stream<S: EntrySource>(
    source: &mut S,
    entry: &EntryRecord,
    target: &Path,
    thumbs_image: bool,
) -> Result<u64> {
    let mut reader = CurrentStream(source);
    let mut expected = entry.size;

    if thumbs_image {
        // Thumbnail streams open with a self-describing header: a 4-byte
        // little-endian length that counts itself. Skip it, keep the JPEG.
        let mut len = [0u8; 4];
        reader.read_exact(&mut len).map_err(|e| Error::ShortRead {
            name: entry.name.clone(),
            source: e,
        })?;
        let header_len = u32::from_le_bytes(len);
        if header_len < 4 || u64::from(header_len) > entry.size {
            return Err(Error::BadThumbnailHeader {
                name: entry.name.clone(),
                len: header_len,
            });
        }
        let to_skip = u64::from(header_len) - 4;
        let skipped = io::copy(&mut (&mut reader).take(to_skip), &mut io::sink())?;
        if skipped != to_skip {
            return Err(Error::ShortRead {
                name: entry.name.clone(),
                source: io::ErrorKind::UnexpectedEof.into(),
            });
        }
        expected = entry.size - u64::from(header_len);
    }

    let mut file = File::create_new(target).map_err(|e| Error::OutputCreate {
        path: target.to_path_buf(),
        source: e,
    })?;
    let copied = io::copy(&mut reader, &mut file)?;
    if copied != expected {
        return Err(Error::ShortRead {
            name: entry.name.clone(),
            source: io::ErrorKind::UnexpectedEof.into(),
        });
    }
    Ok(copied)
}

fn print_catalog<S: EntrySource, W: Write>(source: &mut S, out: &mut W) -> Result<()> {
    let mut reader = CurrentStream(source);
    let (header, records) = cfburst_thumbs::read_catalog(&mut reader)?;
    writeln!(out, "Thumbs Database")?;
    writeln!(out, "  Version:     {}", header.version)?;
    writeln!(out, "  Thumbnails:  {}", header.entry_count)?;
    writeln!(out, "  DimensionX:  {}", header.width)?;
    writeln!(out, "  DimensionY:  {}", header.height)?;
    for record in records {
        let record = record?;
        writeln!(out, "  Thumbnail {}", record.index)?;
        writeln!(out, "    Name:  {}", record.name)?;
        writeln!(out, "    Date:  {}", record.timestamp)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{FakeSource, both, storage, stream};

    #[test]
    fn storage_with_data_produces_directory_and_suffixed_file() {
        let mut source = FakeSource::new(vec![both("A", &[], b"inline data".to_vec())]);
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let mut out = Vec::new();

        let report = extract(&mut source, &dest, &ExtractOptions::default(), &mut out).unwrap();

        assert!(dest.join("A").is_dir());
        assert!(dest.join("A_").is_file());
        assert_eq!(fs::read(dest.join("A_")).unwrap(), b"inline data");
        assert_eq!(report.entry_count, 1);
        assert_eq!(report.total_bytes, 11);
        assert_eq!(report.entries[0].directory, Some(dest.join("A")));
        assert_eq!(report.entries[0].file, Some(dest.join("A_")));
    }

    #[test]
    fn existing_destination_root_is_fatal() {
        let mut source = FakeSource::new(Vec::new());
        let tmp = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        let err = extract(
            &mut source,
            tmp.path(),
            &ExtractOptions::default(),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, Error::DirectoryCreate { .. }));
    }

    #[test]
    fn thumbnail_stream_is_unwrapped_to_jpeg() {
        // 12-byte header (length field included), then the image bytes.
        let mut data = 12u32.to_le_bytes().to_vec();
        data.extend_from_slice(&[0u8; 8]);
        data.extend_from_slice(&[0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02]);
        let mut source = FakeSource::new(vec![stream("256_1", &[], data)]);
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let mut out = Vec::new();

        let report = extract(
            &mut source,
            &dest,
            &ExtractOptions::default().thumbs(true),
            &mut out,
        )
        .unwrap();

        let written = fs::read(dest.join("256_1.jpg")).unwrap();
        assert_eq!(written, [0xFF, 0xD8, 0xFF, 0xE0, 0x01, 0x02]);
        assert_eq!(report.total_bytes, 6);
    }

    #[test]
    fn thumbnail_header_shorter_than_its_own_length_field() {
        let data = 2u32.to_le_bytes().to_vec();
        let mut source = FakeSource::new(vec![stream("256_1", &[], data)]);
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let mut out = Vec::new();

        let err = extract(
            &mut source,
            &dest,
            &ExtractOptions::default().thumbs(true),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, Error::BadThumbnailHeader { len: 2, .. }));
    }

    #[test]
    fn short_stream_aborts_extraction() {
        let mut entry = stream("truncated", &[], b"abc".to_vec());
        entry.record.size = 10;
        let mut source = FakeSource::new(vec![entry]);
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let mut out = Vec::new();

        let err = extract(&mut source, &dest, &ExtractOptions::default(), &mut out).unwrap_err();
        assert!(matches!(err, Error::ShortRead { .. }));
    }

    #[test]
    fn catalog_entry_is_decoded_not_written() {
        let mut data = Vec::new();
        data.extend_from_slice(&16u16.to_le_bytes());
        data.extend_from_slice(&5u16.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&96u32.to_le_bytes());
        data.extend_from_slice(&96u32.to_le_bytes());
        let units: Vec<u16> = "pic.jpg".encode_utf16().collect();
        data.extend_from_slice(&(20 + 2 * units.len() as u32).to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&128_166_372_000_000_000u64.to_le_bytes());
        for unit in units {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        data.extend_from_slice(&[0u8; 4]);

        let mut source = FakeSource::new(vec![stream("Catalog", &[], data)]);
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let mut out = Vec::new();

        extract(
            &mut source,
            &dest,
            &ExtractOptions::default().thumbs(true),
            &mut out,
        )
        .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("pic.jpg"));
        assert!(printed.contains("2007-02-22 17:00:00 UTC"));
        assert!(!dest.join("Catalog").exists());
        assert!(!dest.join("Catalog.jpg").exists());
    }

    #[test]
    fn sibling_storages_and_streams_coexist() {
        let mut source = FakeSource::new(vec![
            storage("A", &[]),
            stream("B", &["A"], b"child".to_vec()),
            stream("C", &[], b"0123456789".to_vec()),
        ]);
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("out");
        let mut out = Vec::new();

        let report = extract(&mut source, &dest, &ExtractOptions::default(), &mut out).unwrap();

        assert!(dest.join("A").is_dir());
        assert_eq!(fs::read(dest.join("A/B")).unwrap(), b"child");
        assert_eq!(fs::read(dest.join("C")).unwrap(), b"0123456789");
        assert_eq!(report.entry_count, 3);
        assert_eq!(report.total_bytes, 15);
    }
}
