use std::io::Write;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::container::EntrySource;
use crate::error::Result;
use crate::resolve::resolve;

fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => DateTime::<Utc>::from(t)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        None => "-".to_string(),
    }
}

/// Print metadata for the root and every entry. Touches nothing on disk.
pub fn report<S: EntrySource, W: Write>(source: &mut S, out: &mut W) -> Result<()> {
    let root = source.root().clone();
    writeln!(out, "Root Object")?;
    writeln!(out, "  CLSID:      {}", root.clsid)?;
    writeln!(out, "  Created:    {}", format_time(root.created))?;
    writeln!(out, "  Modified:   {}", format_time(root.modified))?;
    writeln!(out)?;

    while let Some(entry) = source.next_entry()? {
        let resolved = resolve(&entry.ancestors, &entry.name, entry.disposition(), false);
        if entry.is_storage {
            writeln!(out, "Storage Object")?;
            writeln!(out, "  Name (raw): {}", entry.name)?;
            writeln!(out, "  Path:       {}", resolved.display_path())?;
            writeln!(out, "  CLSID:      {}", entry.clsid)?;
            writeln!(out, "  Created:    {}", format_time(entry.created))?;
            writeln!(out, "  Modified:   {}", format_time(entry.modified))?;
        } else {
            writeln!(out, "Stream Object")?;
            writeln!(out, "  Name:       {}", entry.name)?;
            writeln!(out, "  Path:       {}", resolved.display_path())?;
            writeln!(out, "  Size:       {}", entry.size)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Dump the collaborator's diagnostic key/value pairs. No extraction.
pub fn dump_diagnostics<S: EntrySource, W: Write>(source: &S, out: &mut W) -> Result<()> {
    for (key, value) in source.diagnostics() {
        writeln!(out, "{key}: {value}")?;
    }
    Ok(())
}
