use std::time::SystemTime;

/// One directory entry yielded by the container cursor.
///
/// `is_storage || has_stream` always holds; the container format has no
/// entry that is neither.
#[derive(Clone, Debug)]
pub struct EntryRecord {
    /// Raw name, possibly containing control characters.
    pub name: String,
    /// Raw ancestor names, root-most first, leaf excluded.
    pub ancestors: Vec<String>,
    pub is_storage: bool,
    pub has_stream: bool,
    pub size: u64,
    /// Container-assigned identifier (CLSID), rendered for display.
    pub clsid: String,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

/// How an entry lands on the output filesystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    DirectoryOnly,
    StreamOnly,
    /// A storage that also carries stream data: directory plus a
    /// suffix-disambiguated file.
    Both,
}

impl EntryRecord {
    pub fn disposition(&self) -> Disposition {
        match (self.is_storage, self.has_stream) {
            (true, true) => Disposition::Both,
            (true, false) => Disposition::DirectoryOnly,
            _ => Disposition::StreamOnly,
        }
    }
}
