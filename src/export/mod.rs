pub mod control;
pub mod delimited;
pub mod sink;
#[cfg(feature = "xlsx")]
pub mod workbook;

use std::str::FromStr;

use crate::error::BoardError;
use crate::models::Scalar;

pub const CSV_MIME: &str = "text/csv; charset=utf-8";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const DEFAULT_SHEET_NAME: &str = "Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Csv => CSV_MIME,
            Self::Xlsx => XLSX_MIME,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(BoardError::UnknownFormat(other.to_string())),
        }
    }
}

/// Append `.{ext}` unless the name already ends with it (case-insensitive).
pub fn file_name_with_extension(name: &str, ext: &str) -> String {
    let suffix = format!(".{ext}");
    if name.to_ascii_lowercase().ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

// ---------------------------------------------------------------------------
// Column and config types
// ---------------------------------------------------------------------------

/// One export column. Column order in the output follows the order of the
/// `Vec<ColumnDef<R>>` handed to [`ExportConfig`].
pub struct ColumnDef<R> {
    pub header: String,
    value: Box<dyn Fn(&R) -> Scalar>,
}

impl<R> ColumnDef<R> {
    pub fn new(header: impl Into<String>, value: impl Fn(&R) -> Scalar + 'static) -> Self {
        Self {
            header: header.into(),
            value: Box::new(value),
        }
    }

    pub fn value(&self, row: &R) -> Scalar {
        (self.value)(row)
    }
}

/// What a report view currently offers for export. `rows` is evaluated at
/// export time and must yield the full filtered set, never a page.
pub struct ExportConfig<R> {
    pub file_name: String,
    pub sheet_name: Option<String>,
    pub format: ExportFormat,
    columns: Vec<ColumnDef<R>>,
    rows: Box<dyn Fn() -> Vec<R>>,
}

impl<R> ExportConfig<R> {
    pub fn new(
        file_name: impl Into<String>,
        format: ExportFormat,
        columns: Vec<ColumnDef<R>>,
        rows: impl Fn() -> Vec<R> + 'static,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            sheet_name: None,
            format,
            columns,
            rows: Box::new(rows),
        }
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }
}

/// Row-type-erased view of an [`ExportConfig`], which is what the registry
/// stores and the serializers consume.
pub trait Exportable {
    fn file_name(&self) -> &str;
    fn sheet_name(&self) -> Option<&str>;
    fn format(&self) -> ExportFormat;
    fn headers(&self) -> Vec<String>;
    /// Evaluate the row accessor now and render every row through the columns.
    fn snapshot(&self) -> Vec<Vec<Scalar>>;
}

impl<R> Exportable for ExportConfig<R> {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    fn format(&self) -> ExportFormat {
        self.format
    }

    fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    fn snapshot(&self) -> Vec<Vec<Scalar>> {
        (self.rows)()
            .iter()
            .map(|row| self.columns.iter().map(|c| c.value(row)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Claim {
        enrollee: String,
        amount: f64,
    }

    fn claims() -> Vec<Claim> {
        vec![
            Claim { enrollee: "Ada".into(), amount: 120.0 },
            Claim { enrollee: "Grace".into(), amount: 80.5 },
        ]
    }

    #[test]
    fn test_snapshot_follows_column_order() {
        let config = ExportConfig::new(
            "claims",
            ExportFormat::Csv,
            vec![
                ColumnDef::new("Amount", |c: &Claim| c.amount.into()),
                ColumnDef::new("Enrollee", |c: &Claim| c.enrollee.as_str().into()),
            ],
            claims,
        );
        assert_eq!(config.headers(), vec!["Amount", "Enrollee"]);
        let rows = config.snapshot();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Scalar::Number(120.0), Scalar::Text("Ada".into())]);
        assert_eq!(rows[1][0], Scalar::Number(80.5));
    }

    #[test]
    fn test_snapshot_evaluates_rows_each_time() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let config = ExportConfig::new(
            "claims",
            ExportFormat::Csv,
            vec![ColumnDef::new("Enrollee", |c: &Claim| c.enrollee.as_str().into())],
            move || {
                counter.set(counter.get() + 1);
                claims()
            },
        );
        config.snapshot();
        config.snapshot();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_file_name_with_extension() {
        assert_eq!(file_name_with_extension("claims", "csv"), "claims.csv");
        assert_eq!(file_name_with_extension("claims.csv", "csv"), "claims.csv");
        assert_eq!(file_name_with_extension("claims.CSV", "csv"), "claims.CSV");
        assert_eq!(file_name_with_extension("claims.csv", "xlsx"), "claims.csv.xlsx");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("XLSX".parse::<ExportFormat>().unwrap(), ExportFormat::Xlsx);
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Csv.mime(), CSV_MIME);
    }

    #[test]
    fn test_sheet_name_defaults_to_none() {
        let config = ExportConfig::new("c", ExportFormat::Xlsx, Vec::<ColumnDef<Claim>>::new(), Vec::new);
        assert_eq!(config.sheet_name(), None);
        let config = config.with_sheet_name("Overdue");
        assert_eq!(config.sheet_name(), Some("Overdue"));
    }
}
