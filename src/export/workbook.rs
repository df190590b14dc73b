use std::path::PathBuf;

use log::debug;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;
use crate::export::sink::DownloadSink;
use crate::export::{file_name_with_extension, Exportable, ExportFormat, DEFAULT_SHEET_NAME};
use crate::models::Scalar;

/// Single-sheet workbook: bold header row, then one row per record. Numbers
/// are written as numeric cells, empty scalars leave the cell blank.
pub fn encode(sheet_name: &str, headers: &[String], rows: &[Vec<Scalar>]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let c = col as u16;
            match cell {
                Scalar::Text(s) => {
                    sheet.write_string(r, c, s)?;
                }
                Scalar::Number(n) => {
                    sheet.write_number(r, c, *n)?;
                }
                Scalar::Empty => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Snapshot `config` and hand the workbook to `sink`. Returns `None` without
/// building a workbook when there are no rows.
pub fn write(config: &dyn Exportable, sink: &mut dyn DownloadSink) -> Result<Option<PathBuf>> {
    let rows = config.snapshot();
    if rows.is_empty() {
        debug!("xlsx export of '{}' skipped: no rows", config.file_name());
        return Ok(None);
    }
    let sheet_name = config.sheet_name().unwrap_or(DEFAULT_SHEET_NAME);
    let bytes = encode(sheet_name, &config.headers(), &rows)?;
    let name = file_name_with_extension(config.file_name(), ExportFormat::Xlsx.extension());
    sink.save(&name, ExportFormat::Xlsx.mime(), &bytes).map(Some)
}
