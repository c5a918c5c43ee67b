//! Acquisition of the DMC thread table from threadcolors.com.
//!
//! The site lists every thread in a `<table id="closest-colors">` whose rows
//! hold, from the second cell on: ID, name (inside a link), R, G, B and hex.
//! Values are written out as found; validation happens when the table is
//! loaded.

use std::path::Path;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use crate::error::AppError;
use crate::services::reference_loader::write_table;

pub const DEFAULT_URL: &str = "https://threadcolors.com/";

const TIMEOUT_SECS: u64 = 30;

/// One scraped row, fields as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedFloss {
    pub id: String,
    pub name: String,
    pub r: String,
    pub g: String,
    pub b: String,
    pub hex: String,
}

impl ScrapedFloss {
    fn fields(&self) -> [&str; 6] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.r.as_str(),
            self.g.as_str(),
            self.b.as_str(),
            self.hex.as_str(),
        ]
    }
}

fn selector(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css).map_err(|e| AppError::Scrape(format!("invalid selector {css:?}: {e}")))
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Extract thread rows from the page HTML.
///
/// Rows with fewer than seven cells (headers, separators) are skipped.
pub fn parse_floss_table(html: &str) -> Result<Vec<ScrapedFloss>, AppError> {
    let document = Html::parse_document(html);
    let table_sel = selector("table#closest-colors")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;
    let link_sel = selector("a")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| AppError::Scrape("color table not found".to_string()))?;

    let mut rows = Vec::new();
    for row in table.select(&row_sel) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();
        if cells.len() < 7 {
            tracing::debug!(cells = cells.len(), "Skipping row with insufficient data");
            continue;
        }
        let name = cells[2]
            .select(&link_sel)
            .next()
            .map(|a| cell_text(&a))
            .unwrap_or_else(|| cell_text(&cells[2]));

        rows.push(ScrapedFloss {
            id: cell_text(&cells[1]),
            name,
            r: cell_text(&cells[3]),
            g: cell_text(&cells[4]),
            b: cell_text(&cells[5]),
            hex: cell_text(&cells[6]),
        });
    }

    tracing::info!(rows = rows.len(), "Parsed thread table");
    Ok(rows)
}

/// Serialize scraped rows in the thread table format.
pub fn to_table_text(rows: &[ScrapedFloss]) -> String {
    write_table(rows.iter().map(ScrapedFloss::fields))
}

/// Download the page at `url`.
pub fn fetch(url: &str) -> Result<String, AppError> {
    tracing::info!(url, "Requesting thread table page");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::Scrape(format!("failed to build HTTP client: {e}")))?;

    client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.text())
        .map_err(|e| AppError::Scrape(format!("request to {url} failed: {e}")))
}

/// Fetch, parse and write the thread table to `output`.
///
/// Nothing is written if the page yields no rows.
pub fn scrape_to_file(url: &str, output: &Path) -> Result<usize, AppError> {
    let html = fetch(url)?;
    let rows = parse_floss_table(&html)?;
    if rows.is_empty() {
        return Err(AppError::Scrape("color table has no rows".to_string()));
    }
    crate::services::pattern_writer::write_atomic(output, &to_table_text(&rows))?;
    tracing::info!(path = %output.display(), rows = rows.len(), "Wrote thread table");
    Ok(rows.len())
}
