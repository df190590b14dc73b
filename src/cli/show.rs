use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{default_file_name, mount_view, ViewArgs};
use crate::error::Result;
use crate::fmt::{cell, thousands};
use crate::reports::{
    EnrolleeRow, LocationRow, OverdueRow, ProviderRow, Report, ReportKind, SchemeRow,
};
use crate::session::ReportSession;
use crate::settings::load_settings;
use crate::summary::{ClaimsSummary, KnownTotals};
use crate::view::ExportOptions;

pub fn run(kind: ReportKind, args: &ViewArgs, page: usize, page_size: Option<usize>) -> Result<()> {
    let s = match kind {
        ReportKind::Enrollee => render::<EnrolleeRow>(kind, args, page, page_size)?,
        ReportKind::Provider => render::<ProviderRow>(kind, args, page, page_size)?,
        ReportKind::Scheme => render::<SchemeRow>(kind, args, page, page_size)?,
        ReportKind::Location => render::<LocationRow>(kind, args, page, page_size)?,
        ReportKind::Overdue => render::<OverdueRow>(kind, args, page, page_size)?,
    };
    println!("{s}");
    Ok(())
}

fn render<R: Report>(
    kind: ReportKind,
    args: &ViewArgs,
    page: usize,
    page_size: Option<usize>,
) -> Result<String> {
    let settings = load_settings();
    let size = page_size.unwrap_or(settings.page_size).max(1);
    let session = ReportSession::new();
    let export = ExportOptions {
        file_name: default_file_name(R::FILE_STEM),
        sheet_name: None,
        format: settings.format(),
    };
    let (view, payload) = mount_view::<R>(&session, args, export)?;

    let summary = view.summary(payload.summary.as_ref(), &KnownTotals::default());
    let matched = view.filtered().len();
    let pages = view.page_count(size).max(1);
    let page = page.clamp(1, pages);

    let mut out = format!("{}\n", kind.title().bold());
    out.push_str(&format_summary(&summary));
    if !view.filters().is_empty() {
        out.push_str(&format!("\nFilters: {}", view.filters()));
    }
    if matched == 0 {
        out.push_str("\nNo rows match.");
        return Ok(out);
    }
    out.push_str(&format!("\n{}", format_rows(&view.page(page, size))));
    out.push_str(&format!(
        "\nPage {page} of {pages} ({matched} of {} rows)",
        view.all_rows().len()
    ));
    Ok(out)
}

pub fn format_summary(summary: &ClaimsSummary) -> String {
    format!(
        "Records: {}   Claims: {}   Amount: {}",
        thousands(summary.records),
        thousands(summary.claims),
        thousands(summary.amount)
    )
}

pub fn format_rows<R: Report>(rows: &[R]) -> String {
    let columns = R::columns();
    let mut table = Table::new();
    table.set_header(columns.iter().map(|c| c.header.as_str()).collect::<Vec<_>>());
    for row in rows {
        table.add_row(
            columns
                .iter()
                .map(|c| Cell::new(cell(&c.value(row))))
                .collect::<Vec<_>>(),
        );
    }
    table.to_string()
}
