//! CSV export of notices.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{AppError, Result};
use crate::models::Notice;
use crate::utils::format_date;

/// Header row of every export.
pub const CSV_HEADER: [&str; 5] = ["Title", "Description", "Categories", "Created Date", "Status"];

/// Quote a field, doubling any inner quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn row(notice: &Notice) -> String {
    [
        quote(&notice.title),
        quote(&notice.description),
        quote(&notice.categories.join(", ")),
        quote(&format_date(&notice.created_at)),
        quote(notice.status.as_str()),
    ]
    .join(",")
}

/// Render notices as CSV, in the order given.
///
/// An empty input is an error rather than a header-only document.
pub fn to_csv<'a, I>(notices: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Notice>,
{
    let rows: Vec<String> = notices.into_iter().map(row).collect();
    if rows.is_empty() {
        return Err(AppError::EmptyExport);
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.join(","));
    lines.extend(rows);
    Ok(lines.join("\n"))
}

/// Name of the export file for a given day, e.g. `notices_2024-01-05.csv`.
pub fn file_name(date: NaiveDate) -> String {
    format!("notices_{}.csv", date.format("%Y-%m-%d"))
}

/// Write an export into `dir` and return the file path.
///
/// Nothing is written when there are no notices.
pub fn write_csv<'a, I>(dir: &Path, notices: I, date: NaiveDate) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a Notice>,
{
    let csv = to_csv(notices)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(date));
    fs::write(&path, csv)?;
    log::info!("Exported notices to {}", path.display());
    Ok(path)
}
