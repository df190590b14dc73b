use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::BoardError;
use crate::models::SeriesPoint;

/// Aggregation granularity requested by a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RangeKey {
    /// Placeholder for a daily feed; the upstream series is monthly, so this
    /// currently behaves like `Month`.
    Day,
    Month,
    Year,
    All,
}

impl RangeKey {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }
}

impl FromStr for RangeKey {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            other => Err(BoardError::UnknownRange(other.to_string())),
        }
    }
}

fn year_pattern() -> &'static Regex {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    YEAR.get_or_init(|| Regex::new(r"(?:19|20)\d{2}").expect("year pattern is valid"))
}

/// Grouping key for the `Year` range: the first 19xx/20xx run in the label,
/// or the whole label when there is none.
pub fn year_key(label: &str) -> &str {
    year_pattern()
        .find(label)
        .map(|m| m.as_str())
        .unwrap_or(label)
}

/// Roll a chronologically ordered monthly series into the requested range.
pub fn aggregate(series: &[SeriesPoint], range: RangeKey) -> Vec<SeriesPoint> {
    match range {
        RangeKey::Day | RangeKey::Month => series.to_vec(),
        RangeKey::All => {
            if series.is_empty() {
                return Vec::new();
            }
            let mut total = SeriesPoint::labelled("All");
            for point in series {
                total.accumulate(point);
            }
            vec![total]
        }
        RangeKey::Year => {
            // Groups keep first-appearance order; a linear scan is fine for
            // chart-sized series.
            let mut groups: Vec<SeriesPoint> = Vec::new();
            for point in series {
                let key = year_key(&point.label);
                match groups.iter_mut().find(|g| g.label == key) {
                    Some(group) => group.accumulate(point),
                    None => {
                        let mut group = SeriesPoint::labelled(key);
                        group.accumulate(point);
                        groups.push(group);
                    }
                }
            }
            groups
        }
    }
}
