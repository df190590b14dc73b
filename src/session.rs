//! Per-screen shared state: the search text and the export registry.
//!
//! A [`ReportSession`] owns both. Views and the page-level export control are
//! handed cheap [`QueryState`] / [`ExportRegistry`] handles at construction.
//! Handles hold weak references: once the session is dropped, touching a
//! handle is a programming error and panics.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::debug;

use crate::export::Exportable;

#[derive(Default)]
struct SessionState {
    query: RefCell<String>,
    export: RefCell<Option<Rc<dyn Exportable>>>,
    revision: Cell<u64>,
}

pub struct ReportSession {
    state: Rc<SessionState>,
}

impl ReportSession {
    pub fn new() -> Self {
        Self {
            state: Rc::new(SessionState::default()),
        }
    }

    pub fn query(&self) -> QueryState {
        QueryState {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn exports(&self) -> ExportRegistry {
        ExportRegistry {
            state: Rc::downgrade(&self.state),
        }
    }
}

impl Default for ReportSession {
    fn default() -> Self {
        Self::new()
    }
}

fn live(state: &Weak<SessionState>, what: &str) -> Rc<SessionState> {
    match state.upgrade() {
        Some(s) => s,
        None => panic!("{what} used outside an active report session"),
    }
}

// ---------------------------------------------------------------------------
// Query state
// ---------------------------------------------------------------------------

/// The shared free-text search string. Stored verbatim; consumers trim and
/// case-fold through [`matches_query`].
#[derive(Clone)]
pub struct QueryState {
    state: Weak<SessionState>,
}

impl QueryState {
    pub fn text(&self) -> String {
        live(&self.state, "query state").query.borrow().clone()
    }

    /// Store the search text. A change bumps the registry revision, since
    /// the published rows read the query at export time.
    pub fn set_text(&self, text: impl Into<String>) {
        let state = live(&self.state, "query state");
        let text = text.into();
        if *state.query.borrow() == text {
            return;
        }
        debug!("search text changed to {text:?}");
        *state.query.borrow_mut() = text;
        state.revision.set(state.revision.get() + 1);
    }
}

/// Trimmed, case-insensitive substring match of `query` against any of the
/// haystack fields. A blank query matches everything.
pub fn matches_query<S: AsRef<str>>(fields: &[S], query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|f| f.as_ref().to_lowercase().contains(&needle))
}

// ---------------------------------------------------------------------------
// Export registry
// ---------------------------------------------------------------------------

/// Single-slot holder of whatever the visible report offers for export.
/// Last publish wins.
#[derive(Clone)]
pub struct ExportRegistry {
    state: Weak<SessionState>,
}

impl ExportRegistry {
    pub fn publish(&self, config: Rc<dyn Exportable>) {
        let state = live(&self.state, "export registry");
        debug!("publish export config '{}'", config.file_name());
        *state.export.borrow_mut() = Some(config);
        state.revision.set(state.revision.get() + 1);
    }

    pub fn clear(&self) {
        // Views clear on drop, which may run after the session is gone.
        let Some(state) = self.state.upgrade() else {
            return;
        };
        if state.export.borrow_mut().take().is_some() {
            debug!("cleared export config");
        }
        state.revision.set(state.revision.get() + 1);
    }

    pub fn current(&self) -> Option<Rc<dyn Exportable>> {
        live(&self.state, "export registry").export.borrow().clone()
    }

    /// Bumped on every publish, clear and search-text change.
    pub fn revision(&self) -> u64 {
        live(&self.state, "export registry").revision.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{ColumnDef, ExportConfig, ExportFormat};

    fn config(name: &str) -> Rc<dyn Exportable> {
        Rc::new(ExportConfig::new(
            name,
            ExportFormat::Csv,
            vec![ColumnDef::new("Name", |r: &String| r.into())],
            || vec!["a".to_string()],
        ))
    }

    #[test]
    fn test_query_text_is_stored_verbatim() {
        let session = ReportSession::new();
        let q = session.query();
        assert_eq!(q.text(), "");
        q.set_text("  Smith ");
        assert_eq!(session.query().text(), "  Smith ");
    }

    #[test]
    fn test_search_change_bumps_revision() {
        let session = ReportSession::new();
        let registry = session.exports();
        let start = registry.revision();
        session.query().set_text("ada");
        assert_eq!(registry.revision(), start + 1);
        session.query().set_text("ada");
        assert_eq!(registry.revision(), start + 1);
    }

    #[test]
    fn test_matches_query() {
        assert!(matches_query(&["Ada Lovelace", "Gold"], "  lovelace "));
        assert!(matches_query(&["Ada Lovelace"], ""));
        assert!(matches_query(&["Ada Lovelace"], "   "));
        assert!(!matches_query(&["Ada Lovelace", "Gold"], "silver"));
        assert!(!matches_query::<&str>(&[], "x"));
    }

    #[test]
    fn test_publish_replaces_previous() {
        let session = ReportSession::new();
        let registry = session.exports();
        registry.publish(config("a"));
        registry.publish(config("b"));
        let current = registry.current().unwrap();
        assert_eq!(current.file_name(), "b");
    }

    #[test]
    fn test_clear_empties_registry() {
        let session = ReportSession::new();
        let registry = session.exports();
        registry.publish(config("a"));
        registry.clear();
        assert!(registry.current().is_none());
    }

    #[test]
    fn test_revision_tracks_changes() {
        let session = ReportSession::new();
        let registry = session.exports();
        let start = registry.revision();
        registry.publish(config("a"));
        registry.clear();
        assert_eq!(registry.revision(), start + 2);
    }

    #[test]
    fn test_new_session_starts_empty() {
        let first = ReportSession::new();
        first.query().set_text("abc");
        first.exports().publish(config("a"));
        let second = ReportSession::new();
        assert_eq!(second.query().text(), "");
        assert!(second.exports().current().is_none());
    }

    #[test]
    #[should_panic(expected = "outside an active report session")]
    fn test_query_after_session_dropped_panics() {
        let q = ReportSession::new().query();
        q.text();
    }

    #[test]
    #[should_panic(expected = "outside an active report session")]
    fn test_registry_after_session_dropped_panics() {
        let registry = ReportSession::new().exports();
        registry.current();
    }

    #[test]
    fn test_clear_after_session_dropped_is_silent() {
        let registry = ReportSession::new().exports();
        registry.clear();
    }
}
