use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::error::{BoardError, Result};
use crate::export::{ExportConfig, ExportFormat};
use crate::models::RawRecord;
use crate::reports::{normalize_all, Report};
use crate::session::{matches_query, ExportRegistry, QueryState, ReportSession};
use crate::summary::{summarize, ClaimsSummary, KnownTotals};

/// How a view names and formats its export.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub file_name: String,
    pub sheet_name: Option<String>,
    pub format: ExportFormat,
}

/// Exact-value dropdown filters, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFilters(BTreeMap<String, String>);

impl ViewFilters {
    /// Parse `field=value`.
    pub fn parse_pair(pair: &str) -> Result<(String, String)> {
        let (field, value) = pair
            .split_once('=')
            .ok_or_else(|| BoardError::InvalidFilter(pair.to_string()))?;
        let field = field.trim().to_ascii_lowercase();
        if field.is_empty() {
            return Err(BoardError::InvalidFilter(pair.to_string()));
        }
        Ok((field, value.trim().to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every filter must match its field case-insensitively. A blank value
    /// means "any".
    pub fn accepts<R: Report>(&self, row: &R) -> bool {
        self.0.iter().all(|(field, want)| {
            want.is_empty()
                || row
                    .filter_value(field)
                    .is_some_and(|have| have.trim().to_lowercase() == want.to_lowercase())
        })
    }
}

impl fmt::Display for ViewFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{}", pairs.join(", "))
    }
}

/// One mounted report: its normalized rows, view-local filters, and handles
/// to the session's shared search text and export registry.
///
/// The view re-publishes its export config whenever its rows or filters
/// change, and clears the registry when dropped.
pub struct ReportView<R: Report> {
    rows: Option<Rc<Vec<R>>>,
    filters: ViewFilters,
    export: ExportOptions,
    query: QueryState,
    registry: ExportRegistry,
}

impl<R: Report> ReportView<R> {
    pub fn mount(session: &ReportSession, export: ExportOptions) -> Self {
        let view = Self {
            rows: None,
            filters: ViewFilters::default(),
            export,
            query: session.query(),
            registry: session.exports(),
        };
        view.sync_export();
        view
    }

    /// Replace the row set from a fresh upstream fetch.
    pub fn load(&mut self, records: &[RawRecord]) {
        let rows: Vec<R> = normalize_all(records);
        debug!("{}: normalized {} records", R::FILE_STEM, rows.len());
        self.rows = Some(Rc::new(rows));
        self.sync_export();
    }

    pub fn set_filter(&mut self, field: &str, value: &str) -> Result<()> {
        let field = field.trim().to_ascii_lowercase();
        if !R::FILTERS.contains(&field.as_str()) {
            return Err(BoardError::InvalidFilter(format!(
                "{field} (available for {}: {})",
                R::FILE_STEM,
                R::FILTERS.join(", ")
            )));
        }
        let value = value.trim();
        if value.is_empty() {
            self.clear_filter(&field);
            return Ok(());
        }
        self.filters.0.insert(field, value.to_string());
        self.sync_export();
        Ok(())
    }

    pub fn clear_filter(&mut self, field: &str) {
        if self.filters.0.remove(&field.trim().to_ascii_lowercase()).is_some() {
            self.sync_export();
        }
    }

    pub fn filters(&self) -> &ViewFilters {
        &self.filters
    }

    pub fn all_rows(&self) -> &[R] {
        self.rows.as_deref().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows passing the shared search text and every view filter.
    pub fn filtered(&self) -> Vec<R> {
        filter_rows(self.all_rows(), &self.query.text(), &self.filters)
    }

    /// One display page of the filtered rows. Pages are 1-based.
    pub fn page(&self, number: usize, size: usize) -> Vec<R> {
        let size = size.max(1);
        let start = number.saturating_sub(1).saturating_mul(size);
        self.filtered().into_iter().skip(start).take(size).collect()
    }

    pub fn page_count(&self, size: usize) -> usize {
        self.filtered().len().div_ceil(size.max(1))
    }

    pub fn summary(&self, server: Option<&RawRecord>, previous: &KnownTotals) -> ClaimsSummary {
        summarize(server, previous, self.all_rows())
    }

    /// Publish the current export config, or clear the registry while no rows
    /// have been loaded yet.
    pub fn sync_export(&self) {
        let Some(rows) = self.rows.clone() else {
            self.registry.clear();
            return;
        };
        let query = self.query.clone();
        let filters = self.filters.clone();
        let mut config = ExportConfig::new(
            self.export.file_name.clone(),
            self.export.format,
            R::columns(),
            move || filter_rows(&rows, &query.text(), &filters),
        );
        if let Some(sheet) = &self.export.sheet_name {
            config = config.with_sheet_name(sheet.clone());
        }
        self.registry.publish(Rc::new(config));
    }
}

impl<R: Report> Drop for ReportView<R> {
    fn drop(&mut self) {
        self.registry.clear();
    }
}

fn filter_rows<R: Report>(rows: &[R], query: &str, filters: &ViewFilters) -> Vec<R> {
    rows.iter()
        .filter(|r| matches_query(&r.search_fields(), query) && filters.accepts(*r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::control::{ExportControl, ExportOutcome};
    use crate::export::sink::MemorySink;
    use crate::normalize::record;
    use crate::reports::{EnrolleeRow, SchemeRow};
    use serde_json::json;

    fn options() -> ExportOptions {
        ExportOptions {
            file_name: "enrollees".into(),
            sheet_name: None,
            format: ExportFormat::Csv,
        }
    }

    fn records() -> Vec<RawRecord> {
        vec![
            record(json!({ "enrollee_name": "Ada Obi", "scheme": "Gold", "status": "Approved", "claims_count": 2 })),
            record(json!({ "enrollee_name": "Grace Eze", "scheme": "Silver", "status": "Pending", "claims_count": 1 })),
            record(json!({ "enrollee_name": "Adaeze Nwosu", "scheme": "gold", "status": "Pending", "claims_count": 4 })),
        ]
    }

    fn names(rows: &[EnrolleeRow]) -> Vec<&str> {
        rows.iter().map(|r| r.enrollee_name.as_str()).collect()
    }

    #[test]
    fn test_mount_without_rows_clears_registry() {
        let session = ReportSession::new();
        let _view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        assert!(session.exports().current().is_none());
    }

    #[test]
    fn test_load_publishes_config() {
        let session = ReportSession::new();
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        let current = session.exports().current().unwrap();
        assert_eq!(current.file_name(), "enrollees");
        assert_eq!(current.snapshot().len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let session = ReportSession::new();
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        session.query().set_text("  ADA ");
        assert_eq!(names(&view.filtered()), vec!["Ada Obi", "Adaeze Nwosu"]);
    }

    #[test]
    fn test_filters_combine_with_search() {
        let session = ReportSession::new();
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        view.set_filter("Scheme", "GOLD").unwrap();
        assert_eq!(names(&view.filtered()), vec!["Ada Obi", "Adaeze Nwosu"]);
        view.set_filter("status", "pending").unwrap();
        assert_eq!(names(&view.filtered()), vec!["Adaeze Nwosu"]);
        session.query().set_text("grace");
        assert!(view.filtered().is_empty());
        view.clear_filter("status");
        view.clear_filter("scheme");
        assert_eq!(names(&view.filtered()), vec!["Grace Eze"]);
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        let session = ReportSession::new();
        let mut view: ReportView<SchemeRow> = ReportView::mount(&session, options());
        assert!(view.set_filter("status", "x").is_err());
        assert!(view.filters().is_empty());
    }

    #[test]
    fn test_blank_filter_value_clears_it() {
        let session = ReportSession::new();
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        view.set_filter("status", "pending").unwrap();
        view.set_filter("scheme", "gold").unwrap();
        assert_eq!(view.filters().to_string(), "scheme=gold, status=pending");
        view.set_filter("status", "  ").unwrap();
        assert_eq!(view.filters().to_string(), "scheme=gold");
        assert_eq!(names(&view.filtered()), vec!["Ada Obi", "Adaeze Nwosu"]);
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            ViewFilters::parse_pair("Status = Pending").unwrap(),
            ("status".to_string(), "Pending".to_string())
        );
        assert!(ViewFilters::parse_pair("status").is_err());
        assert!(ViewFilters::parse_pair("=x").is_err());
    }

    #[test]
    fn test_export_uses_full_filtered_set_not_page() {
        let session = ReportSession::new();
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        assert_eq!(view.page(1, 1).len(), 1);
        assert_eq!(view.page_count(2), 2);
        let snapshot = session.exports().current().unwrap().snapshot();
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn test_page_bounds() {
        let session = ReportSession::new();
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        assert_eq!(names(&view.page(2, 2)), vec!["Adaeze Nwosu"]);
        assert!(view.page(3, 2).is_empty());
        assert_eq!(view.page(0, 0).len(), 1);
    }

    #[test]
    fn test_export_reflects_query_at_click_time() {
        let session = ReportSession::new();
        let control = ExportControl::new(session.exports());
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        session.query().set_text("grace");

        let mut sink = MemorySink::default();
        let outcome = control.trigger(&mut sink).unwrap();
        assert!(matches!(outcome, ExportOutcome::Saved(_)));
        let text = sink.text(0);
        assert!(text.contains("Grace Eze"));
        assert!(!text.contains("Ada Obi"));
    }

    #[test]
    fn test_export_with_no_matches_is_empty() {
        let session = ReportSession::new();
        let control = ExportControl::new(session.exports());
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        session.query().set_text("nobody");
        let mut sink = MemorySink::default();
        assert_eq!(control.trigger(&mut sink).unwrap(), ExportOutcome::Empty);
        assert!(sink.files.is_empty());
    }

    #[test]
    fn test_filter_change_republishes() {
        let session = ReportSession::new();
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        let before = session.exports().revision();
        view.set_filter("status", "approved").unwrap();
        assert!(session.exports().revision() > before);
        assert_eq!(session.exports().current().unwrap().snapshot().len(), 1);
    }

    #[test]
    fn test_search_change_is_visible_to_readers() {
        let session = ReportSession::new();
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records()[..1]);
        let before = session.exports().revision();
        session.query().set_text("grace");
        assert!(session.exports().revision() > before);
        assert!(session.exports().current().unwrap().snapshot().is_empty());
    }

    #[test]
    fn test_drop_clears_registry() {
        let session = ReportSession::new();
        {
            let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
            view.load(&records());
            assert!(session.exports().current().is_some());
        }
        assert!(session.exports().current().is_none());
    }

    #[test]
    fn test_summary_from_rows() {
        let session = ReportSession::new();
        let mut view: ReportView<EnrolleeRow> = ReportView::mount(&session, options());
        view.load(&records());
        let s = view.summary(None, &KnownTotals::default());
        assert_eq!(s.records, 3.0);
        assert_eq!(s.claims, 7.0);
    }
}
