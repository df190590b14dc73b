use std::path::Path;

use serde_json::Value;

use crate::error::{BoardError, Result};
use crate::models::RawRecord;

const RECORD_KEYS: &[&str] = &["data", "records", "rows", "items", "results"];
const SUMMARY_KEYS: &[&str] = &["summary", "totals", "meta"];
const SERIES_KEYS: &[&str] = &["series", "chart", "monthly"];

/// One upstream fetch: the report rows, an optional precomputed summary and
/// an optional monthly chart series.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    pub records: Vec<RawRecord>,
    pub summary: Option<RawRecord>,
    pub series: Vec<RawRecord>,
}

fn objects(value: &Value) -> Vec<RawRecord> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_object().cloned())
                .collect()
        })
        .unwrap_or_default()
}

fn first_of<'a>(map: &'a RawRecord, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k))
}

/// Accepts a bare array of records or an envelope object. Non-object array
/// entries are dropped.
pub fn parse_json(content: &str) -> Result<Payload> {
    let value: Value = serde_json::from_str(content)?;
    match value {
        Value::Array(_) => Ok(Payload {
            records: objects(&value),
            ..Payload::default()
        }),
        Value::Object(map) => {
            let records = first_of(&map, RECORD_KEYS).map(objects).unwrap_or_default();
            let summary = first_of(&map, SUMMARY_KEYS).and_then(|v| v.as_object().cloned());
            let series = first_of(&map, SERIES_KEYS).map(objects).unwrap_or_default();
            Ok(Payload {
                records,
                summary,
                series,
            })
        }
        _ => Err(BoardError::Other(
            "expected a JSON array or object of records".to_string(),
        )),
    }
}

/// Header-keyed records from delimited text. Every cell is kept as a string;
/// the normalizers coerce.
pub fn parse_csv<R: std::io::Read>(reader: R) -> Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let mut record = RawRecord::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if !cell.is_empty() {
                record.insert(header.to_string(), Value::String(cell.to_string()));
            }
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(feature = "xlsx")]
fn parse_workbook(path: &Path) -> Result<Vec<RawRecord>> {
    use calamine::{Data, Reader};

    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| BoardError::WorkbookRead(format!("failed to open {}: {e}", path.display())))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| BoardError::WorkbookRead(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(h) => h.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };
    let mut records = Vec::new();
    for row in rows {
        let mut record = RawRecord::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            let value = match cell {
                Data::Empty => continue,
                Data::String(s) => Value::String(s.clone()),
                Data::Float(f) => serde_json::Number::from_f64(*f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                Data::Int(i) => Value::from(*i),
                Data::Bool(b) => Value::Bool(*b),
                other => Value::String(other.to_string()),
            };
            if !header.is_empty() {
                record.insert(header.clone(), value);
            }
        }
        if !record.is_empty() {
            records.push(record);
        }
    }
    Ok(records)
}

/// Load a payload from `.json`, `.csv` or (with the `xlsx` feature) `.xlsx`.
pub fn load(path: &Path) -> Result<Payload> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let payload = match ext.as_str() {
        "csv" => Payload {
            records: parse_csv(std::fs::File::open(path)?)?,
            ..Payload::default()
        },
        #[cfg(feature = "xlsx")]
        "xlsx" | "xls" | "ods" => Payload {
            records: parse_workbook(path)?,
            ..Payload::default()
        },
        _ => parse_json(&std::fs::read_to_string(path)?)?,
    };
    log::debug!(
        "loaded {} records, {} series points from {}",
        payload.records.len(),
        payload.series.len(),
        path.display()
    );
    Ok(payload)
}
