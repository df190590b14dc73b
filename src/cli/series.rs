use std::path::Path;

use comfy_table::{Cell, CellAlignment, Table};

use crate::aggregate::{aggregate, RangeKey};
use crate::error::Result;
use crate::fmt::thousands;
use crate::models::SeriesPoint;
use crate::normalize;
use crate::source;

pub fn run(input: &Path, range: RangeKey) -> Result<()> {
    let payload = source::load(input)?;
    let points = aggregate(&normalize::series(&payload.series), range);
    if points.is_empty() {
        println!("No chart data.");
        return Ok(());
    }
    println!("{}", format_series(&points, range));
    Ok(())
}

pub fn format_series(points: &[SeriesPoint], range: RangeKey) -> String {
    let period = format!("Period ({})", range.key());
    let mut table = Table::new();
    table.set_header(vec![
        period.as_str(),
        "Approved",
        "Pending",
        "Rejected",
        "Total",
        "Approved Amt",
        "Pending Amt",
        "Rejected Amt",
    ]);
    let num = |v: f64| Cell::new(thousands(v)).set_alignment(CellAlignment::Right);
    for p in points {
        table.add_row(vec![
            Cell::new(&p.label),
            num(p.approved),
            num(p.pending),
            num(p.rejected),
            num(p.total()),
            num(p.approved_amount),
            num(p.pending_amount),
            num(p.rejected_amount),
        ]);
    }
    table.to_string()
}
