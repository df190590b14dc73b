use chrono::NaiveDate;

use crate::export::ColumnDef;
use crate::models::RawRecord;
use crate::normalize::{id, number, number_opt, text, Keys};
use crate::reports::Report;

const ID: Keys = &["id", "_id"];
const CLAIM_ID: Keys = &["claim_id", "claimId", "claim_number", "claimNumber", "reference"];
const ENROLLEE_NAME: Keys = &["enrollee_name", "enrolleeName", "enrollee.name", "enrollee"];
const PROVIDER_NAME: Keys = &["provider_name", "providerName", "provider.name", "provider"];
const SUBMITTED_ON: Keys = &["submitted_on", "submittedOn", "submitted_at", "date_submitted", "created_at"];
const DUE_ON: Keys = &["due_on", "dueOn", "due_date", "dueDate"];
const DAYS_OVERDUE: Keys = &["days_overdue", "daysOverdue", "overdue_days", "age"];
const AMOUNT: Keys = &["amount", "amount_claimed", "amountClaimed", "claim_amount"];
const STATUS: Keys = &["status", "claim_status", "claimStatus"];

/// Leading `YYYY-MM-DD` of a date or timestamp string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Whole days from `due` to `today`; zero when not yet due.
pub fn days_past(due: NaiveDate, today: NaiveDate) -> f64 {
    (today - due).num_days().max(0) as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverdueRow {
    pub id: String,
    pub claim_id: String,
    pub enrollee_name: String,
    pub provider_name: String,
    pub submitted_on: String,
    pub due_on: String,
    pub days_overdue: f64,
    pub amount: f64,
    pub status: String,
}

impl OverdueRow {
    /// Same as [`Report::normalize`] with an explicit "today" for the
    /// days-overdue fallback.
    pub fn normalize_at(raw: &RawRecord, index: usize, today: NaiveDate) -> Self {
        let due_on = text(raw, DUE_ON);
        let days_overdue = number_opt(raw, DAYS_OVERDUE)
            .or_else(|| parse_date(&due_on).map(|due| days_past(due, today)))
            .unwrap_or(0.0);
        Self {
            id: id(raw, ID, index),
            claim_id: text(raw, CLAIM_ID),
            enrollee_name: text(raw, ENROLLEE_NAME),
            provider_name: text(raw, PROVIDER_NAME),
            submitted_on: text(raw, SUBMITTED_ON),
            due_on,
            days_overdue,
            amount: number(raw, AMOUNT),
            status: text(raw, STATUS),
        }
    }

    /// Ageing bucket used by the overdue filter dropdown.
    pub fn bucket(&self) -> &'static str {
        match self.days_overdue as i64 {
            i64::MIN..=30 => "0-30",
            31..=60 => "31-60",
            61..=90 => "61-90",
            _ => "90+",
        }
    }
}

impl Report for OverdueRow {
    const FILE_STEM: &'static str = "overdue-claims";
    const FILTERS: &'static [&'static str] = &["status", "provider", "bucket"];

    fn normalize(raw: &RawRecord, index: usize) -> Self {
        Self::normalize_at(raw, index, chrono::Local::now().date_naive())
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.claim_id.as_str(),
            self.enrollee_name.as_str(),
            self.provider_name.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<&str> {
        match field {
            "status" => Some(self.status.as_str()),
            "provider" => Some(self.provider_name.as_str()),
            "bucket" => Some(self.bucket()),
            _ => None,
        }
    }

    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("Claim", |r: &Self| r.claim_id.as_str().into()),
            ColumnDef::new("Enrollee", |r: &Self| r.enrollee_name.as_str().into()),
            ColumnDef::new("Provider", |r: &Self| r.provider_name.as_str().into()),
            ColumnDef::new("Submitted", |r: &Self| r.submitted_on.as_str().into()),
            ColumnDef::new("Due", |r: &Self| r.due_on.as_str().into()),
            ColumnDef::new("Days Overdue", |r: &Self| r.days_overdue.into()),
            ColumnDef::new("Amount", |r: &Self| r.amount.into()),
            ColumnDef::new("Status", |r: &Self| r.status.as_str().into()),
        ]
    }

    fn claims(&self) -> f64 {
        1.0
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::record;
    use serde_json::json;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-01-31"), Some(day("2025-01-31")));
        assert_eq!(parse_date("2025-01-31T08:15:00Z"), Some(day("2025-01-31")));
        assert_eq!(parse_date("31/01/2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_days_overdue_prefers_upstream_value() {
        let raw = record(json!({ "claimId": "CLM-1", "daysOverdue": "45", "due_on": "2025-01-01" }));
        let row = OverdueRow::normalize_at(&raw, 0, day("2025-06-01"));
        assert_eq!(row.days_overdue, 45.0);
        assert_eq!(row.bucket(), "31-60");
    }

    #[test]
    fn test_days_overdue_computed_from_due_date() {
        let raw = record(json!({ "claim_id": "CLM-2", "due_date": "2025-01-01" }));
        let row = OverdueRow::normalize_at(&raw, 0, day("2025-04-11"));
        assert_eq!(row.days_overdue, 100.0);
        assert_eq!(row.bucket(), "90+");
    }

    #[test]
    fn test_days_overdue_not_yet_due_is_zero() {
        let raw = record(json!({ "due_date": "2025-12-01" }));
        let row = OverdueRow::normalize_at(&raw, 0, day("2025-11-01"));
        assert_eq!(row.days_overdue, 0.0);
        assert_eq!(row.bucket(), "0-30");
    }

    #[test]
    fn test_days_overdue_without_any_date() {
        let raw = record(json!({ "due_date": "soon" }));
        let row = OverdueRow::normalize_at(&raw, 3, day("2025-11-01"));
        assert_eq!(row.days_overdue, 0.0);
        assert_eq!(row.id, "row-4");
    }

    #[test]
    fn test_each_row_is_one_claim() {
        let raw = record(json!({ "amount": "12,500" }));
        let row = OverdueRow::normalize_at(&raw, 0, day("2025-11-01"));
        assert_eq!(row.claims(), 1.0);
        assert_eq!(row.amount(), 12500.0);
    }
}
