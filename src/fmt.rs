use crate::models::Scalar;

/// Group the integer part with commas: 1234567.5 -> "1,234,567.50".
/// Whole numbers print without decimals.
pub fn thousands(val: f64) -> String {
    let negative = val < 0.0;
    let abs = val.abs();
    let whole = abs.fract() == 0.0;
    let fixed = if whole {
        format!("{abs:.0}")
    } else {
        format!("{abs:.2}")
    };
    let (int_part, dec_part) = match fixed.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (fixed.as_str(), None),
    };

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    let sign = if negative { "-" } else { "" };
    match dec_part {
        Some(d) => format!("{sign}{with_commas}.{d}"),
        None => format!("{sign}{with_commas}"),
    }
}

/// Table rendering of an export cell: numbers get thousands separators.
pub fn cell(value: &Scalar) -> String {
    match value {
        Scalar::Number(n) => thousands(*n),
        other => other.render(),
    }
}
