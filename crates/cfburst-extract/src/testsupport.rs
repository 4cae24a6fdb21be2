//! In-memory `EntrySource` for driver and reporter tests, covering shapes
//! the `cfb` writer cannot produce (a storage that also carries data).

use std::collections::VecDeque;
use std::io::{self, Cursor, Read};

use crate::container::{EntrySource, RootInfo};
use crate::entry::EntryRecord;
use crate::error::Result;

pub(crate) struct FakeEntry {
    pub record: EntryRecord,
    pub data: Vec<u8>,
}

pub(crate) struct FakeSource {
    entries: VecDeque<FakeEntry>,
    current: Option<Cursor<Vec<u8>>>,
    root: RootInfo,
}

impl FakeSource {
    pub fn new(entries: Vec<FakeEntry>) -> Self {
        Self {
            entries: entries.into(),
            current: None,
            root: RootInfo {
                clsid: "00000000-0000-0000-0000-000000000000".to_string(),
                created: None,
                modified: None,
            },
        }
    }
}

impl EntrySource for FakeSource {
    fn next_entry(&mut self) -> Result<Option<EntryRecord>> {
        match self.entries.pop_front() {
            Some(entry) => {
                self.current = entry.record.has_stream.then(|| Cursor::new(entry.data));
                Ok(Some(entry.record))
            }
            None => {
                self.current = None;
                Ok(None)
            }
        }
    }

    fn read_current(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.current.as_mut() {
            Some(cursor) => cursor.read(buf),
            None => Ok(0),
        }
    }

    fn root(&self) -> &RootInfo {
        &self.root
    }

    fn diagnostics(&self) -> Vec<(String, String)> {
        vec![("backend".to_string(), "fake".to_string())]
    }
}

fn record(name: &str, ancestors: &[&str], is_storage: bool, has_stream: bool, size: u64) -> EntryRecord {
    EntryRecord {
        name: name.to_string(),
        ancestors: ancestors.iter().map(|s| s.to_string()).collect(),
        is_storage,
        has_stream,
        size,
        clsid: "00000000-0000-0000-0000-000000000000".to_string(),
        created: None,
        modified: None,
    }
}

pub(crate) fn storage(name: &str, ancestors: &[&str]) -> FakeEntry {
    FakeEntry {
        record: record(name, ancestors, true, false, 0),
        data: Vec::new(),
    }
}

pub(crate) fn stream(name: &str, ancestors: &[&str], data: Vec<u8>) -> FakeEntry {
    FakeEntry {
        record: record(name, ancestors, false, true, data.len() as u64),
        data,
    }
}

pub(crate) fn both(name: &str, ancestors: &[&str], data: Vec<u8>) -> FakeEntry {
    FakeEntry {
        record: record(name, ancestors, true, true, data.len() as u64),
        data,
    }
}
