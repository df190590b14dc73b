use serde::{Deserialize, Serialize};

/// Upstream record as received from a report endpoint. Field names vary by
/// endpoint and are never trusted.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A single exported cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
    Empty,
}

impl Scalar {
    /// Render for delimited text. `Empty` becomes an empty field.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Empty)
    }
}

/// One month of claim status counts and amounts feeding a chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    #[serde(default)]
    pub approved: f64,
    #[serde(default)]
    pub pending: f64,
    #[serde(default)]
    pub rejected: f64,
    #[serde(default)]
    pub approved_amount: f64,
    #[serde(default)]
    pub pending_amount: f64,
    #[serde(default)]
    pub rejected_amount: f64,
}

impl SeriesPoint {
    pub fn labelled(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }

    /// Add every numeric field of `other` into `self`. Non-finite values
    /// count as zero.
    pub fn accumulate(&mut self, other: &SeriesPoint) {
        fn add(total: &mut f64, v: f64) {
            if v.is_finite() {
                *total += v;
            }
        }
        add(&mut self.approved, other.approved);
        add(&mut self.pending, other.pending);
        add(&mut self.rejected, other.rejected);
        add(&mut self.approved_amount, other.approved_amount);
        add(&mut self.pending_amount, other.pending_amount);
        add(&mut self.rejected_amount, other.rejected_amount);
    }

    pub fn total(&self) -> f64 {
        self.approved + self.pending + self.rejected
    }
}
