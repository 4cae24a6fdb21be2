use std::path::{Path, PathBuf};

use crate::entry::Disposition;
use crate::sanitize::sanitize;

/// Keeps a storage's stream data from colliding with its directory.
const STREAM_SUFFIX: char = '_';

/// Destination of one entry relative to the extraction root.
#[derive(Clone, Debug)]
pub struct ResolvedPath {
    segments: Vec<String>,
    stream_suffix: bool,
    jpeg_ext: bool,
}

/// Compute the destination for an entry.
///
/// `thumbs_image` marks a raw thumbnail stream in Thumbs.db mode; its file
/// gains a `.jpg` extension. The Catalog stream is never a thumbs image.
///
/// Pure path computation: filesystem conflicts surface in the driver, not
/// here.
pub fn resolve(
    ancestors: &[String],
    leaf: &str,
    disposition: Disposition,
    thumbs_image: bool,
) -> ResolvedPath {
    let mut segments: Vec<String> = ancestors.iter().map(|name| segment(name)).collect();
    segments.push(segment(leaf));
    ResolvedPath {
        segments,
        stream_suffix: disposition == Disposition::Both,
        jpeg_ext: thumbs_image,
    }
}

/// Reduce one raw entry name to a single literal path component.
///
/// Separators are dropped so a name can never introduce extra nesting, and
/// a name that cleans down to `.` or `..` must not change the nesting level
/// either.
fn segment(raw: &str) -> String {
    let cleaned: String = sanitize(raw)
        .chars()
        .filter(|c| !matches!(c, '/' | '\\'))
        .collect();
    if matches!(cleaned.as_str(), "." | "..") {
        cleaned.replace('.', "_")
    } else {
        cleaned
    }
}

impl ResolvedPath {
    /// Directory destination: the sanitized segments joined unmodified.
    pub fn directory_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for seg in &self.segments {
            path.push(seg);
        }
        path
    }

    /// Stream-file destination: as `directory_path`, with the collision
    /// suffix and image extension applied to the final segment.
    pub fn stream_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        let (leaf, parents) = self.segments.split_last().expect("at least the leaf segment");
        for seg in parents {
            path.push(seg);
        }
        let mut leaf = leaf.clone();
        if self.stream_suffix {
            leaf.push(STREAM_SUFFIX);
        }
        if self.jpeg_ext {
            leaf.push_str(".jpg");
        }
        path.push(leaf);
        path
    }

    /// Sanitized root-relative path for report output.
    pub fn display_path(&self) -> String {
        self.segments.join("/")
    }
}

/// Extraction root for an input: `dir/name.ext` becomes
/// `dir/name_ext_comobjects`.
pub fn output_root_for(input: &Path) -> PathBuf {
    let base = input
        .file_name()
        .map(|name| name.to_string_lossy().replace('.', "_"))
        .unwrap_or_default();
    input.with_file_name(format!("{base}_comobjects"))
}
