use std::path::PathBuf;

use log::debug;

use crate::error::{BoardError, Result};
use crate::export::sink::DownloadSink;
use crate::export::{file_name_with_extension, Exportable, ExportFormat};
use crate::models::Scalar;

/// Comma-separated text: header row first, `\n` after every record. Fields
/// containing a comma, quote or newline are quoted with inner quotes doubled.
pub fn encode(headers: &[String], rows: &[Vec<Scalar>]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row.iter().map(Scalar::render))?;
    }
    wtr.into_inner()
        .map_err(|e| BoardError::Io(e.into_error()))
}

/// Snapshot `config` and hand the CSV to `sink`. Returns `None` without
/// encoding anything when there are no rows.
pub fn write(config: &dyn Exportable, sink: &mut dyn DownloadSink) -> Result<Option<PathBuf>> {
    let rows = config.snapshot();
    if rows.is_empty() {
        debug!("csv export of '{}' skipped: no rows", config.file_name());
        return Ok(None);
    }
    let bytes = encode(&config.headers(), &rows)?;
    let name = file_name_with_extension(config.file_name(), ExportFormat::Csv.extension());
    sink.save(&name, ExportFormat::Csv.mime(), &bytes).map(Some)
}
