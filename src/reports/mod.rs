pub mod enrollee;
pub mod location;
pub mod overdue;
pub mod provider;
pub mod scheme;

use crate::export::ColumnDef;
use crate::models::RawRecord;

pub use enrollee::EnrolleeRow;
pub use location::LocationRow;
pub use overdue::OverdueRow;
pub use provider::ProviderRow;
pub use scheme::SchemeRow;

/// A report's fixed row shape plus everything a view needs to search, filter,
/// total and export it.
pub trait Report: Clone + 'static {
    /// Stem for export file names, e.g. `claims-by-enrollee`.
    const FILE_STEM: &'static str;
    /// Fields usable as dropdown filters.
    const FILTERS: &'static [&'static str];

    /// Map one upstream record to a row. Never fails; missing or malformed
    /// fields are defaulted.
    fn normalize(raw: &RawRecord, index: usize) -> Self;

    /// Fields the shared search box matches against.
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a filterable field, `None` for unknown fields.
    fn filter_value(&self, field: &str) -> Option<&str>;

    fn columns() -> Vec<ColumnDef<Self>>;

    /// Number of claims this row represents.
    fn claims(&self) -> f64;

    /// Claimed amount this row represents.
    fn amount(&self) -> f64;
}

pub fn normalize_all<R: Report>(records: &[RawRecord]) -> Vec<R> {
    records
        .iter()
        .enumerate()
        .map(|(i, raw)| R::normalize(raw, i))
        .collect()
}

// ---------------------------------------------------------------------------
// Report kinds: enum dispatch for the CLI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    Enrollee,
    Provider,
    Scheme,
    Location,
    Overdue,
}

pub const ALL_REPORTS: &[ReportKind] = &[
    ReportKind::Enrollee,
    ReportKind::Provider,
    ReportKind::Scheme,
    ReportKind::Location,
    ReportKind::Overdue,
];

impl ReportKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Enrollee => "enrollee",
            Self::Provider => "provider",
            Self::Scheme => "scheme",
            Self::Location => "location",
            Self::Overdue => "overdue",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Enrollee => "Claims by Enrollee",
            Self::Provider => "Claims by Provider",
            Self::Scheme => "Claims by Scheme",
            Self::Location => "Claims by Location",
            Self::Overdue => "Overdue Claims",
        }
    }

    pub fn filters(&self) -> &'static [&'static str] {
        match self {
            Self::Enrollee => EnrolleeRow::FILTERS,
            Self::Provider => ProviderRow::FILTERS,
            Self::Scheme => SchemeRow::FILTERS,
            Self::Location => LocationRow::FILTERS,
            Self::Overdue => OverdueRow::FILTERS,
        }
    }
}
