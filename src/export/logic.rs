// src/export/logic.rs

use crate::core::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::models::metric::MetricKind;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the stored records of one metric.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or one of:
    ///   - `YYYY`
    ///   - `YYYY-MM`
    ///   - `YYYY-MM-DD`
    ///   - `YYYY:YYYY`
    ///   - `YYYY-MM:YYYY-MM`
    ///   - `YYYY-MM-DD:YYYY-MM-DD`
    ///
    /// Returns the number of exported records.
    pub fn export<S: RecordStore>(
        store: &S,
        kind: MetricKind,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let bounds = Self::bounds(range)?;

        ensure_writable(path, force)?;

        let records = store.records_between(kind, bounds)?;

        if records.is_empty() {
            warning(format!("No {} records found for selected range.", kind));
            return Ok(0);
        }

        match format {
            ExportFormat::Csv => export_csv(kind, &records, path)?,
            ExportFormat::Json => export_json(&records, path)?,
            ExportFormat::Xlsx => export_xlsx(kind, &records, path)?,
        }

        Ok(records.len())
    }

    /// `None` and `"all"` mean no date filter.
    pub fn bounds(range: Option<&str>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
        match range {
            None => Ok(None),
            Some(r) if r.trim().eq_ignore_ascii_case("all") => Ok(None),
            Some(r) => parse_range(r).map(Some),
        }
    }
}
