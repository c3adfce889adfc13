//! ls-style listing output
//!
//! Sizes are rendered once per entry, the widest rendered size sets the
//! column width, and every line comes out as `<size> <last-modified> <name>`
//! with the size column right-aligned. Entries keep server order.

use crate::path::entry_name;
use crate::store::RemoteEntry;

/// Binary-unit size pretty-printer.
///
/// Divides by 1024 until the magnitude drops below 1024, walking the unit
/// suffixes `"" K M G T P E Z`; anything larger gets the fixed `Yi` suffix.
/// Fixed one-decimal precision, minimum width 3. `suffix` is appended to the
/// unit (e.g. `"B"` for `1.0KB`).
pub fn sizeof_fmt(num: u128, suffix: &str) -> String {
    let mut value = num as f64;
    for unit in ["", "K", "M", "G", "T", "P", "E", "Z"] {
        if value < 1024.0 {
            return format!("{value:3.1}{unit}{suffix}");
        }
        value /= 1024.0;
    }
    format!("{value:.1}Yi{suffix}")
}

/// One listing line before column assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub size: String,
    pub last_modified: String,
    pub name: String,
}

/// Turn entries into rows, rendering each size exactly once.
pub fn list_rows(entries: &[RemoteEntry], human_readable: bool) -> Vec<ListRow> {
    entries
        .iter()
        .map(|entry| {
            let size = if human_readable {
                sizeof_fmt(entry.size_bytes as u128, "")
            } else {
                entry.size_bytes.to_string()
            };
            ListRow {
                size,
                last_modified: entry.last_modified.clone(),
                name: entry_name(&entry.path, entry.is_dir()),
            }
        })
        .collect()
}

/// Render rows with the size column right-aligned to the widest size.
pub fn render_rows(rows: &[ListRow]) -> Vec<String> {
    let width = rows.iter().map(|r| r.size.len()).max().unwrap_or(0);
    rows.iter()
        .map(|r| format!("{:>width$} {} {}", r.size, r.last_modified, r.name))
        .collect()
}

/// Convenience wrapper: entries straight to printable lines.
pub fn render_entries(entries: &[RemoteEntry], human_readable: bool) -> Vec<String> {
    render_rows(&list_rows(entries, human_readable))
}
