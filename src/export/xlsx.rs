// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::{date_serial, parse_to_excel_date};
use crate::export::model::get_headers;
use crate::export::notify_export_success;
use crate::models::metric::{FieldType, MetricKind};
use crate::models::record::MetricRecord;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const BAND_EVEN: u32 = 0xEAF3FB;
const BAND_ODD: u32 = 0xFFFFFF;

/// Cell styles for one row band.
struct BandFormats {
    date: Format,
    text: Format,
    float: Format,
    int: Format,
    stamp: Format,
}

impl BandFormats {
    fn new(rgb: u32) -> Self {
        let base = Format::new()
            .set_background_color(Color::RGB(rgb))
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin);
        Self {
            date: base.clone().set_num_format("yyyy-mm-dd"),
            text: base.clone(),
            float: base.clone().set_num_format("#,##0.00").set_align(FormatAlign::Right),
            int: base.clone().set_num_format("0").set_align(FormatAlign::Right),
            stamp: base.set_num_format("yyyy-mm-dd hh:mm"),
        }
    }
}

/// One worksheet named after the metric: frozen header, banded rows, typed
/// cells (dates as Excel dates, schema fields as numbers) and fitted widths.
pub(crate) fn export_xlsx(kind: MetricKind, records: &[MetricRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(kind)).map_err(xlsx_err)?;

    let headers = get_headers(kind);
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(xlsx_err)?;

    let bands = [BandFormats::new(BAND_EVEN), BandFormats::new(BAND_ODD)];
    let mut widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (i, rec) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        let fmt = &bands[i % 2];
        write_record(worksheet, row, rec, fmt, &mut widths)?;
    }

    for (c, w) in widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(xlsx_err)?;
    }

    workbook.save(path_str(path)?).map_err(xlsx_err)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn write_record(
    ws: &mut Worksheet,
    row: u32,
    rec: &MetricRecord,
    fmt: &BandFormats,
    widths: &mut [usize],
) -> AppResult<()> {
    let mut col: u16 = 0;
    let mut grow = |col: u16, text_width: usize| {
        if let Some(w) = widths.get_mut(col as usize) {
            *w = (*w).max(text_width);
        }
    };

    let written = match date_serial(rec.date) {
        Some(serial) => ws.write_with_format(row, col, serial, &fmt.date),
        None => ws.write_with_format(row, col, rec.date.to_string(), &fmt.text),
    };
    written.map_err(xlsx_err)?;
    grow(col, 10);
    col += 1;

    if rec.kind.is_keyed() {
        ws.write_with_format(row, col, rec.sub_key.as_str(), &fmt.text)
            .map_err(xlsx_err)?;
        grow(col, UnicodeWidthStr::width(rec.sub_key.as_str()));
        col += 1;
    }

    for field in rec.kind.fields() {
        let value = rec
            .values
            .get(field.column)
            .copied()
            .unwrap_or_else(|| field.default_value());
        let cell_fmt = match field.ty {
            FieldType::Float => &fmt.float,
            FieldType::Int => &fmt.int,
        };
        ws.write_with_format(row, col, value.as_f64(), cell_fmt)
            .map_err(xlsx_err)?;
        grow(col, value.to_string().len() + 2);
        col += 1;
    }

    let written = match parse_to_excel_date(&rec.updated_at) {
        Some(serial) => ws.write_with_format(row, col, serial, &fmt.stamp),
        None => ws.write_with_format(row, col, rec.updated_at.as_str(), &fmt.text),
    };
    written.map_err(xlsx_err)?;
    grow(col, 16);

    Ok(())
}

/// Excel caps sheet names at 31 characters and forbids `[]:*?/\`.
fn sheet_name(kind: MetricKind) -> String {
    kind.display_name()
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '-' } else { c })
        .take(31)
        .collect()
}

fn xlsx_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}

fn path_str(path: &Path) -> AppResult<&str> {
    path.to_str()
        .ok_or_else(|| AppError::Export(format!("invalid path: {}", path.display())))
}
