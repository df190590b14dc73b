use crate::models::RawRecord;
use crate::normalize::{number_opt, Keys};
use crate::reports::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Records,
    Claims,
    Amount,
}

impl Metric {
    fn keys(&self) -> Keys {
        match self {
            Self::Records => &["total_records", "totalRecords", "total", "count"],
            Self::Claims => &["total_claims", "totalClaims", "claims_count", "claims"],
            Self::Amount => &["total_amount", "totalAmount", "amount_claimed", "amount"],
        }
    }
}

/// Summary values a caller already holds, e.g. from an earlier load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnownTotals {
    pub records: Option<f64>,
    pub claims: Option<f64>,
    pub amount: Option<f64>,
}

impl KnownTotals {
    fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Records => self.records,
            Metric::Claims => self.claims,
            Metric::Amount => self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaimsSummary {
    pub records: f64,
    pub claims: f64,
    pub amount: f64,
}

/// Server value, else the previously known value, else the local computation.
pub fn resolve_metric(
    server: Option<f64>,
    previous: Option<f64>,
    local: impl FnOnce() -> f64,
) -> f64 {
    server.or(previous).unwrap_or_else(local)
}

/// Resolve every metric independently through [`resolve_metric`], computing
/// local totals from `rows` only for metrics nobody else supplied.
pub fn summarize<R: Report>(
    server: Option<&RawRecord>,
    previous: &KnownTotals,
    rows: &[R],
) -> ClaimsSummary {
    let metric = |m: Metric, local: &dyn Fn() -> f64| {
        resolve_metric(server.and_then(|s| number_opt(s, m.keys())), previous.get(m), local)
    };
    ClaimsSummary {
        records: metric(Metric::Records, &|| rows.len() as f64),
        claims: metric(Metric::Claims, &|| rows.iter().map(R::claims).sum()),
        amount: metric(Metric::Amount, &|| rows.iter().map(R::amount).sum()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::record;
    use crate::reports::{normalize_all, ProviderRow};
    use serde_json::json;

    fn rows() -> Vec<ProviderRow> {
        normalize_all(&[
            record(json!({ "provider_name": "A", "claims_count": 2, "amount_claimed": 100 })),
            record(json!({ "provider_name": "B", "claims_count": 3, "amount_claimed": 50 })),
        ])
    }

    #[test]
    fn test_resolve_metric_order() {
        assert_eq!(resolve_metric(Some(1.0), Some(2.0), || 3.0), 1.0);
        assert_eq!(resolve_metric(None, Some(2.0), || 3.0), 2.0);
        assert_eq!(resolve_metric(None, None, || 3.0), 3.0);
    }

    #[test]
    fn test_local_computation_is_lazy() {
        let value = resolve_metric(Some(1.0), None, || panic!("should not compute"));
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_summary_computed_locally() {
        let s = summarize(None, &KnownTotals::default(), &rows());
        assert_eq!(s, ClaimsSummary { records: 2.0, claims: 5.0, amount: 150.0 });
    }

    #[test]
    fn test_summary_resolves_each_metric_independently() {
        let server = record(json!({ "totalClaims": "1,000" }));
        let previous = KnownTotals {
            amount: Some(9_999.0),
            ..KnownTotals::default()
        };
        let s = summarize(Some(&server), &previous, &rows());
        assert_eq!(s.claims, 1000.0);
        assert_eq!(s.amount, 9999.0);
        assert_eq!(s.records, 2.0);
    }
}
