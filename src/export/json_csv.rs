// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, row_to_cells};
use crate::export::{AttendanceExport, ExportSummary, notify_export_success};
use crate::ui::messages::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a ExportSummary,
    rows: &'a [AttendanceExport],
}

/// Export JSON pretty-printed: `{ "summary": {...}, "rows": [...] }`.
pub(crate) fn export_json(summary: &ExportSummary, rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(&JsonReport { summary, rows })?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV: summary block, an empty line, then header and rows.
pub(crate) fn export_csv(summary: &ExportSummary, rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let csv_err = |e: csv::Error| AppError::Export(format!("CSV write error: {e}"));

    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for (label, value) in summary.lines() {
        wtr.write_record([label, value.as_str()]).map_err(csv_err)?;
    }
    wtr.write_record([""]).map_err(csv_err)?;

    wtr.write_record(get_headers()).map_err(csv_err)?;
    for row in rows {
        wtr.write_record(row_to_cells(row)).map_err(csv_err)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
