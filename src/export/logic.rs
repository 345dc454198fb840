// src/export/logic.rs

use crate::core::logic::Core;
use crate::core::pairing::PairingScope;
use crate::core::range::{DateRange, parse_period};
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries, load_entries_between};
use crate::db::users::load_roster;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{AttendanceExport, ExportSummary};
use crate::export::xlsx::export_xlsx;
use crate::models::thresholds::ThresholdConfig;
use crate::ui::messages::warning;
use chrono::Local;
use std::path::Path;

/// High level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the attendance report of a period.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"` or a period expression (`YYYY`,
    ///   `YYYY-MM`, `YYYY-MM-DD`, `start:end`, `start:`, `:end`)
    pub fn export(
        pool: &mut DbPool,
        thresholds: &ThresholdConfig,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let range = match range {
            None => DateRange::default(),
            Some(r) => parse_period(r)?,
        };

        ensure_writable(path, force)?;

        let (rows, summary) = Self::build(pool, thresholds, &range)?;

        if rows.is_empty() {
            warning("No attendance records found for the selected range.");
        }

        match format {
            ExportFormat::Csv => export_csv(&summary, &rows, path)?,
            ExportFormat::Json => export_json(&summary, &rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&summary, &rows, path)?,
        }

        Ok(rows.len())
    }

    /// Rows and summary for `range`, classified against `thresholds`.
    pub fn build(
        pool: &mut DbPool,
        thresholds: &ThresholdConfig,
        range: &DateRange,
    ) -> AppResult<(Vec<AttendanceExport>, ExportSummary)> {
        let tz = Local;

        let entries = if range.is_unbounded() {
            load_entries(&pool.conn)?
        } else {
            let (lo, hi) = PairingScope::Range(*range).bounds_ms(&tz);
            load_entries_between(&pool.conn, lo, hi)?
        };
        let roster = load_roster(&pool.conn)?;

        let report = Core::range_report(&entries, &roster, thresholds, range, &tz);

        let rows = report.records.iter().map(AttendanceExport::from).collect();
        let summary = ExportSummary::new(&range.label(), &report.stats.totals);

        Ok((rows, summary))
    }
}
