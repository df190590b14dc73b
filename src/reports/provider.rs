use crate::export::ColumnDef;
use crate::models::RawRecord;
use crate::normalize::{id, number, text, Keys};
use crate::reports::Report;

const ID: Keys = &["id", "_id", "provider_id", "providerId"];
const CODE: Keys = &["provider_code", "providerCode", "code", "provider.code"];
const NAME: Keys = &["provider_name", "providerName", "provider.name", "provider", "hospital", "name"];
const LOCATION: Keys = &["location", "provider_location", "state", "city", "provider.location"];
const CLAIMS_COUNT: Keys = &["claims_count", "claimsCount", "total_claims", "claims", "count"];
const AMOUNT_CLAIMED: Keys = &["amount_claimed", "amountClaimed", "total_amount", "amount"];
const AMOUNT_PAID: Keys = &["amount_paid", "amountPaid", "paid", "amount_approved"];
const STATUS: Keys = &["status", "provider_status", "accreditation"];

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRow {
    pub id: String,
    pub provider_code: String,
    pub provider_name: String,
    pub location: String,
    pub claims_count: f64,
    pub amount_claimed: f64,
    pub amount_paid: f64,
    pub status: String,
}

impl ProviderRow {
    pub fn outstanding(&self) -> f64 {
        (self.amount_claimed - self.amount_paid).max(0.0)
    }
}

impl Report for ProviderRow {
    const FILE_STEM: &'static str = "claims-by-provider";
    const FILTERS: &'static [&'static str] = &["location", "status"];

    fn normalize(raw: &RawRecord, index: usize) -> Self {
        Self {
            id: id(raw, ID, index),
            provider_code: text(raw, CODE),
            provider_name: text(raw, NAME),
            location: text(raw, LOCATION),
            claims_count: number(raw, CLAIMS_COUNT),
            amount_claimed: number(raw, AMOUNT_CLAIMED),
            amount_paid: number(raw, AMOUNT_PAID),
            status: text(raw, STATUS),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.provider_code.as_str(),
            self.provider_name.as_str(),
            self.location.as_str(),
        ]
    }

    fn filter_value(&self, field: &str) -> Option<&str> {
        match field {
            "location" => Some(self.location.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("Code", |r: &Self| r.provider_code.as_str().into()),
            ColumnDef::new("Provider", |r: &Self| r.provider_name.as_str().into()),
            ColumnDef::new("Location", |r: &Self| r.location.as_str().into()),
            ColumnDef::new("Claims", |r: &Self| r.claims_count.into()),
            ColumnDef::new("Amount Claimed", |r: &Self| r.amount_claimed.into()),
            ColumnDef::new("Amount Paid", |r: &Self| r.amount_paid.into()),
            ColumnDef::new("Outstanding", |r: &Self| r.outstanding().into()),
            ColumnDef::new("Status", |r: &Self| r.status.as_str().into()),
        ]
    }

    fn claims(&self) -> f64 {
        self.claims_count
    }

    fn amount(&self) -> f64 {
        self.amount_claimed
    }
}
