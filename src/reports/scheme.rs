use crate::export::ColumnDef;
use crate::models::RawRecord;
use crate::normalize::{id, number, text, Keys};
use crate::reports::Report;

const ID: Keys = &["id", "_id", "scheme_id", "schemeId"];
const NAME: Keys = &["scheme_name", "schemeName", "scheme", "plan", "name"];
const ENROLLEES: Keys = &["enrollees", "enrollee_count", "enrolleeCount", "members"];
const CLAIMS_COUNT: Keys = &["claims_count", "claimsCount", "total_claims", "claims", "count"];
const AMOUNT_CLAIMED: Keys = &["amount_claimed", "amountClaimed", "total_amount", "amount"];
const AMOUNT_APPROVED: Keys = &["amount_approved", "amountApproved", "approved_amount"];

#[derive(Debug, Clone, PartialEq)]
pub struct SchemeRow {
    pub id: String,
    pub scheme_name: String,
    pub enrollees: f64,
    pub claims_count: f64,
    pub amount_claimed: f64,
    pub amount_approved: f64,
}

impl SchemeRow {
    /// Approved share of the claimed amount, in percent.
    pub fn approval_rate(&self) -> f64 {
        if self.amount_claimed > 0.0 {
            self.amount_approved / self.amount_claimed * 100.0
        } else {
            0.0
        }
    }
}

impl Report for SchemeRow {
    const FILE_STEM: &'static str = "claims-by-scheme";
    const FILTERS: &'static [&'static str] = &["scheme"];

    fn normalize(raw: &RawRecord, index: usize) -> Self {
        Self {
            id: id(raw, ID, index),
            scheme_name: text(raw, NAME),
            enrollees: number(raw, ENROLLEES),
            claims_count: number(raw, CLAIMS_COUNT),
            amount_claimed: number(raw, AMOUNT_CLAIMED),
            amount_approved: number(raw, AMOUNT_APPROVED),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.scheme_name.as_str()]
    }

    fn filter_value(&self, field: &str) -> Option<&str> {
        match field {
            "scheme" => Some(self.scheme_name.as_str()),
            _ => None,
        }
    }

    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("Scheme", |r: &Self| r.scheme_name.as_str().into()),
            ColumnDef::new("Enrollees", |r: &Self| r.enrollees.into()),
            ColumnDef::new("Claims", |r: &Self| r.claims_count.into()),
            ColumnDef::new("Amount Claimed", |r: &Self| r.amount_claimed.into()),
            ColumnDef::new("Amount Approved", |r: &Self| r.amount_approved.into()),
            ColumnDef::new("Approval %", |r: &Self| {
                ((r.approval_rate() * 10.0).round() / 10.0).into()
            }),
        ]
    }

    fn claims(&self) -> f64 {
        self.claims_count
    }

    fn amount(&self) -> f64 {
        self.amount_claimed
    }
}
