// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, record_to_row};
use crate::export::notify_export_success;
use crate::models::metric::MetricKind;
use crate::models::record::MetricRecord;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed.
pub(crate) fn export_json(records: &[MetricRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(records)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV with one column per schema field.
pub(crate) fn export_csv(kind: MetricKind, records: &[MetricRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let csv_err = |e: csv::Error| AppError::Export(format!("CSV write error: {e}"));

    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    wtr.write_record(get_headers(kind)).map_err(csv_err)?;

    for rec in records {
        wtr.write_record(record_to_row(rec)).map_err(csv_err)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
