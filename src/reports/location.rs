use crate::export::ColumnDef;
use crate::models::RawRecord;
use crate::normalize::{id, number, text, Keys};
use crate::reports::Report;

const ID: Keys = &["id", "_id", "location_id"];
const STATE: Keys = &["state", "region", "location.state", "location"];
const CITY: Keys = &["city", "lga", "town", "location.city"];
const PROVIDERS: Keys = &["providers", "provider_count", "providerCount"];
const CLAIMS_COUNT: Keys = &["claims_count", "claimsCount", "total_claims", "claims", "count"];
const AMOUNT_CLAIMED: Keys = &["amount_claimed", "amountClaimed", "total_amount", "amount"];

#[derive(Debug, Clone, PartialEq)]
pub struct LocationRow {
    pub id: String,
    pub state: String,
    pub city: String,
    pub providers: f64,
    pub claims_count: f64,
    pub amount_claimed: f64,
}

impl Report for LocationRow {
    const FILE_STEM: &'static str = "claims-by-location";
    const FILTERS: &'static [&'static str] = &["state", "city"];

    fn normalize(raw: &RawRecord, index: usize) -> Self {
        Self {
            id: id(raw, ID, index),
            state: text(raw, STATE),
            city: text(raw, CITY),
            providers: number(raw, PROVIDERS),
            claims_count: number(raw, CLAIMS_COUNT),
            amount_claimed: number(raw, AMOUNT_CLAIMED),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.state.as_str(), self.city.as_str()]
    }

    fn filter_value(&self, field: &str) -> Option<&str> {
        match field {
            "state" => Some(self.state.as_str()),
            "city" => Some(self.city.as_str()),
            _ => None,
        }
    }

    fn columns() -> Vec<ColumnDef<Self>> {
        vec![
            ColumnDef::new("State", |r: &Self| r.state.as_str().into()),
            ColumnDef::new("City", |r: &Self| r.city.as_str().into()),
            ColumnDef::new("Providers", |r: &Self| r.providers.into()),
            ColumnDef::new("Claims", |r: &Self| r.claims_count.into()),
            ColumnDef::new("Amount Claimed", |r: &Self| r.amount_claimed.into()),
        ]
    }

    fn claims(&self) -> f64 {
        self.claims_count
    }

    fn amount(&self) -> f64 {
        self.amount_claimed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::record;
    use serde_json::json;

    #[test]
    fn test_normalize_nested_location() {
        let raw = record(json!({
            "location": { "state": "Kano", "city": "Nassarawa" },
            "providerCount": 14,
            "claimsCount": "96"
        }));
        let row = LocationRow::normalize(&raw, 0);
        assert_eq!(row.state, "Kano");
        assert_eq!(row.city, "Nassarawa");
        assert_eq!(row.providers, 14.0);
        assert_eq!(row.claims_count, 96.0);
        assert_eq!(row.amount_claimed, 0.0);
    }

    #[test]
    fn test_flat_location_string_is_the_state() {
        let raw = record(json!({ "location": "Abuja", "lga": "Garki" }));
        let row = LocationRow::normalize(&raw, 0);
        assert_eq!(row.state, "Abuja");
        assert_eq!(row.city, "Garki");
    }
}
