use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::entry::EntryRecord;
use crate::error::{Error, Result};

/// Root storage metadata, reported once per container.
#[derive(Clone, Debug)]
pub struct RootInfo {
    pub clsid: String,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

/// Forward-only cursor over a compound file's directory entries.
///
/// The byte reader exposed through `read_current` covers the entry returned
/// by the most recent `next_entry` call and is invalidated by the next one;
/// the driver never retains it across an advance.
pub trait EntrySource {
    /// Advance to the next entry, or `None` at end of sequence.
    fn next_entry(&mut self) -> Result<Option<EntryRecord>>;

    /// Read from the current entry's stream data. Returns 0 at end of the
    /// stream, or when the current entry carries no data.
    fn read_current(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    fn root(&self) -> &RootInfo;

    /// Diagnostic key/value pairs describing the container.
    fn diagnostics(&self) -> Vec<(String, String)>;
}

/// `Read` view over the current entry, scoped to one driver iteration.
pub struct CurrentStream<'a, S: ?Sized>(pub &'a mut S);

impl<S: EntrySource + ?Sized> Read for CurrentStream<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read_current(buf)
    }
}

struct QueuedEntry {
    record: EntryRecord,
    stream: Option<PathBuf>,
}

struct OpenStream {
    path: PathBuf,
    pos: u64,
}

/// Cursor backed by the `cfb` compound-file reader.
///
/// Entry metadata is collected in container walk order (parents before
/// children, root excluded); stream bytes are served on demand from the
/// backing file.
pub struct CfbSource<F> {
    compound: cfb::CompoundFile<F>,
    queue: VecDeque<QueuedEntry>,
    current: Option<OpenStream>,
    root: RootInfo,
    entry_count: usize,
    stream_count: usize,
    stream_bytes: u64,
}

impl<F> std::fmt::Debug for CfbSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CfbSource")
            .field("entry_count", &self.entry_count)
            .field("stream_count", &self.stream_count)
            .field("stream_bytes", &self.stream_bytes)
            .finish_non_exhaustive()
    }
}

impl<F: Read + Seek> CfbSource<F> {
    pub fn new(inner: F) -> Result<Self> {
        let compound =
            cfb::CompoundFile::open(inner).map_err(|source| Error::Container { source })?;

        let mut queue = VecDeque::new();
        let mut stream_count = 0;
        let mut stream_bytes = 0;
        for entry in compound.walk() {
            if entry.is_root() {
                continue;
            }
            let has_stream = entry.is_stream();
            if has_stream {
                stream_count += 1;
                stream_bytes += entry.len();
            }
            let record = EntryRecord {
                name: entry.name().to_string(),
                ancestors: ancestor_names(entry.path()),
                is_storage: entry.is_storage(),
                has_stream,
                size: entry.len(),
                clsid: entry.clsid().to_string(),
                created: Some(entry.created()),
                modified: Some(entry.modified()),
            };
            let stream = has_stream.then(|| entry.path().to_path_buf());
            queue.push_back(QueuedEntry { record, stream });
        }

        let root_entry = compound.root_entry();
        let root = RootInfo {
            clsid: root_entry.clsid().to_string(),
            created: Some(root_entry.created()),
            modified: Some(root_entry.modified()),
        };

        let entry_count = queue.len();
        debug!(entries = entry_count, streams = stream_count, "opened compound file");

        Ok(Self {
            compound,
            queue,
            current: None,
            root,
            entry_count,
            stream_count,
            stream_bytes,
        })
    }
}

impl<F: Read + Seek> EntrySource for CfbSource<F> {
    fn next_entry(&mut self) -> Result<Option<EntryRecord>> {
        match self.queue.pop_front() {
            Some(queued) => {
                self.current = queued.stream.map(|path| OpenStream { path, pos: 0 });
                Ok(Some(queued.record))
            }
            None => {
                self.current = None;
                Ok(None)
            }
        }
    }

    fn read_current(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(open) = self.current.as_mut() else {
            return Ok(0);
        };
        // The cfb stream handle borrows the compound file, so it cannot live
        // in this struct across `next_entry` calls; reopen at the saved
        // offset instead.
        let mut stream = self.compound.open_stream(&open.path)?;
        stream.seek(SeekFrom::Start(open.pos))?;
        let n = stream.read(buf)?;
        open.pos += n as u64;
        Ok(n)
    }

    fn root(&self) -> &RootInfo {
        &self.root
    }

    fn diagnostics(&self) -> Vec<(String, String)> {
        let version = match self.compound.version() {
            cfb::Version::V3 => "3",
            cfb::Version::V4 => "4",
        };
        vec![
            ("version".to_string(), version.to_string()),
            ("root clsid".to_string(), self.root.clsid.clone()),
            ("entries".to_string(), self.entry_count.to_string()),
            ("streams".to_string(), self.stream_count.to_string()),
            ("stream bytes".to_string(), self.stream_bytes.to_string()),
        ]
    }
}

/// Open a container from the filesystem.
pub fn open_container(path: &Path) -> Result<CfbSource<File>> {
    let file = File::open(path).map_err(|source| Error::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    CfbSource::new(file)
}

fn ancestor_names(path: &Path) -> Vec<String> {
    let mut names: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    names.pop();
    names
}
