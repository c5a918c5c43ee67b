//! Thread table persistence.
//!
//! The table is comma separated text with a header row:
//!
//! ```text
//! floss_id, color_name, r_value, g_value, b_value, hex_code
//! 310, Black, 0, 0, 0, 000000
//! ```
//!
//! Fields are trimmed. Columns are found by header name, falling back to the
//! order above. The hex column is informational and never read back.

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;

use stitch_pattern::{PaletteError, ReferenceEntry, ReferenceTable, Rgb};

use crate::assets::AssetLoader;
use crate::error::AppError;

pub const HEADER: [&str; 6] = [
    "floss_id",
    "color_name",
    "r_value",
    "g_value",
    "b_value",
    "hex_code",
];

/// A row that was not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the source text
    pub line: usize,
    pub reason: String,
}

/// Outcome of loading a table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Column positions of the fields the loader reads.
#[derive(Debug, Clone, Copy)]
struct Columns {
    id: usize,
    name: usize,
    r: usize,
    g: usize,
    b: usize,
    width: usize,
}

impl Columns {
    fn from_header(header: &str) -> Self {
        let names: Vec<String> = header
            .split(',')
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_ascii_lowercase())
            .collect();
        let find = |wanted: &str, fallback: usize| {
            names
                .iter()
                .position(|n| n == wanted)
                .unwrap_or(fallback)
        };
        Self {
            id: find(HEADER[0], 0),
            name: find(HEADER[1], 1),
            r: find(HEADER[2], 2),
            g: find(HEADER[3], 3),
            b: find(HEADER[4], 4),
            width: names.len().max(5),
        }
    }

    /// Split a row, folding surplus fields back into the name column.
    ///
    /// Names are the only free text, so a row with more fields than the
    /// header had a comma inside its name.
    fn split<'a>(&self, line: &'a str) -> Vec<Cow<'a, str>> {
        let mut fields: Vec<Cow<'a, str>> =
            line.split(',').map(|f| f.trim().into()).collect();
        if fields.len() > self.width && self.name < fields.len() {
            let extra = fields.len() - self.width;
            let merged: Vec<String> = fields
                .drain(self.name..=self.name + extra)
                .map(|f| f.into_owned())
                .collect();
            fields.insert(self.name, merged.join(", ").into());
        }
        fields
    }
}

fn channel(fields: &[Cow<'_, str>], idx: usize, label: &str) -> Result<u8, String> {
    let raw = fields.get(idx).map(|f| f.as_ref()).unwrap_or("");
    let value: i64 = raw
        .parse()
        .map_err(|_| format!("{label} value {raw:?} is not an integer"))?;
    u8::try_from(value).map_err(|_| format!("{label} value {value} is outside 0-255"))
}

fn parse_row(fields: &[Cow<'_, str>], columns: &Columns) -> Result<ReferenceEntry, String> {
    if fields.len() < 5 {
        return Err(format!("expected at least 5 fields, found {}", fields.len()));
    }
    let id = fields.get(columns.id).map(|f| f.to_string()).unwrap_or_default();
    if id.is_empty() {
        return Err("empty floss id".to_string());
    }
    let name = fields.get(columns.name).map(|f| f.to_string()).unwrap_or_default();
    let rgb = Rgb::new(
        channel(fields, columns.r, "r")?,
        channel(fields, columns.g, "g")?,
        channel(fields, columns.b, "b")?,
    );
    Ok(ReferenceEntry::new(id, name, rgb))
}

/// Parse table text into a reference table.
///
/// Malformed rows and repeated IDs are skipped with a warning and listed in
/// the report.
///
/// # Errors
///
/// [`AppError::ReferenceData`] if the text has no header or no usable rows.
pub fn parse_table(text: &str) -> Result<(ReferenceTable, LoadReport), AppError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
    let Some((_, header)) = lines.next() else {
        return Err(AppError::ReferenceData("thread table is empty".to_string()));
    };
    let columns = Columns::from_header(header);

    let mut report = LoadReport::default();
    let mut entries = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, line) in lines {
        let line_no = idx + 1;
        let fields = columns.split(line);

        match parse_row(&fields, &columns) {
            Ok(entry) if !seen.insert(entry.id().to_string()) => {
                let reason = format!("duplicate floss id {:?}", entry.id());
                tracing::warn!(line = line_no, %reason, "Skipping thread table row");
                report.skipped.push(SkippedRow {
                    line: line_no,
                    reason,
                });
            }
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                tracing::warn!(line = line_no, %reason, "Skipping thread table row");
                report.skipped.push(SkippedRow {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    report.loaded = entries.len();
    let table = ReferenceTable::new(entries).map_err(|e| match e {
        PaletteError::EmptyTable => {
            AppError::ReferenceData("thread table has no usable rows".to_string())
        }
        other => AppError::ReferenceData(other.to_string()),
    })?;

    tracing::info!(
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "Loaded thread table"
    );
    Ok((table, report))
}

/// Read and parse a table file.
pub fn load_table(path: &Path) -> Result<(ReferenceTable, LoadReport), AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::ReferenceData(format!("cannot read {}: {e}", path.display()))
    })?;
    parse_table(&text)
}

/// Load the table the asset loader points at (a file or the embedded one).
pub fn load_from_assets(loader: &AssetLoader) -> Result<(ReferenceTable, LoadReport), AppError> {
    let text = loader.read_table_string().map_err(|e| {
        AppError::ReferenceData(format!("cannot read {}: {e}", loader.table_source()))
    })?;
    parse_table(&text)
}

/// Serialize rows in the table format, with `", "` separators and CRLF line
/// ends.
pub fn write_table<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = [&'a str; 6]>,
{
    let mut out = HEADER.join(", ");
    out.push_str("\r\n");
    for row in rows {
        out.push_str(&row.join(", "));
        out.push_str("\r\n");
    }
    out
}
