use crate::export::ColumnDef;
use crate::models::RawRecord;
use crate::normalize::{id, number, text, Keys};
use crate::reports::Report;

const ID: Keys = &["id", "_id", "record_id"];
const ENROLLEE_ID: Keys = &["enrollee_id", "enrolleeId", "member_id", "memberId", "enrollee.id"];
const ENROLLEE_NAME: Keys = &[
    "enrollee_name",
    "enrolleeName",
    "enrollee.name",
    "member_name",
    "full_name",
    "name",
];
const SCHEME: Keys = &["scheme", "scheme_name", "schemeName", "plan", "enrollee.scheme"];
const PROVIDER: Keys = &["provider", "provider_name", "providerName", "provider.name", "hospital"];
const CLAIMS_COUNT: Keys = &["claims_count", "claimsCount", "total_claims", "claims", "count"];
const AMOUNT_CLAIMED: Keys = &["amount_claimed", "amountClaimed", "total_amount", "amount"];
const AMOUNT_APPROVED: Keys = &["amount_approved", "amountApproved", "approved_amount"];
const STATUS: Keys = &["status", "claim_status", "claimStatus"];
const LAST_CLAIM_DATE: Keys = &["last_claim_date", "lastClaimDate", "last_claim", "date"];

#[derive(Debug, Clone, PartialEq)]
pub struct EnrolleeRow {
    pub id: String,
    pub enrollee_id: String,
    pub enrollee_name: String,
    pub scheme: String,
    pub provider: String,
    pub claims_count: f64,
    pub amount_claimed: f64,
    pub amount_approved: f64,
    pub status: String,
    pub last_claim_date: String,
}

impl Report for EnrolleeRow {
    const FILE_STEM: &'static str = "claims-by-enrollee";
    const FILTERS: &'static [&'static str] = &["scheme", "status", "provider"];

    fn normalize(raw: &RawRecord, index: usize) -> Self {
        Self {
            id: id(raw, ID, index),
            enrollee_id: text(raw, ENROLLEE_ID),
            enrollee_name: text(raw, ENROLLEE_NAME),
            scheme: text(raw, SCHEME),
            provider: text(raw, PROVIDER),
            claims_count: number(raw, CLAIMS_COUNT),
            amount_claimed: number(raw, AMOUNT_CLAIMED),
            amount_approved: number(raw, AMOUNT_APPROVED),
            status: text(raw, STATUS),
            last_claim_date: text(raw, LAST_CLAIM_DATE),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.enrollee_id.as_str(),
            self.enrollee_name.as_str(),
            self.scheme.as_str(),
            self.provider.as_str(),
            self.status.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<&str> {
        match field {
            "scheme" => Some(self.scheme.as_str()),
            "status" => Some(self.status.as_str()),
            "provider" => Some(self.provider.as_str()),
            _ => None,
        }
    }

    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("Enrollee ID", |r: &Self| r.enrollee_id.as_str().into()),
            ColumnDef::new("Enrollee", |r: &Self| r.enrollee_name.as_str().into()),
            ColumnDef::new("Scheme", |r: &Self| r.scheme.as_str().into()),
            ColumnDef::new("Provider", |r: &Self| r.provider.as_str().into()),
            ColumnDef::new("Claims", |r: &Self| r.claims_count.into()),
            ColumnDef::new("Amount Claimed", |r: &Self| r.amount_claimed.into()),
            ColumnDef::new("Amount Approved", |r: &Self| r.amount_approved.into()),
            ColumnDef::new("Status", |r: &Self| r.status.as_str().into()),
            ColumnDef::new("Last Claim", |r: &Self| r.last_claim_date.as_str().into()),
        ]
    }

    fn claims(&self) -> f64 {
        self.claims_count
    }

    fn amount(&self) -> f64 {
        self.amount_claimed
    }
}
