pub mod config;
pub mod export;
pub mod reports;
pub mod series;
pub mod show;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::aggregate::RangeKey;
use crate::error::Result;
use crate::export::ExportFormat;
use crate::reports::{Report, ReportKind};
use crate::session::ReportSession;
use crate::source::{self, Payload};
use crate::view::{ExportOptions, ReportView, ViewFilters};

#[derive(Parser)]
#[command(
    name = "claimsboard",
    version,
    about = "Claims reporting pipeline: normalize, filter, chart and export report views."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available reports and their filters.
    Reports,
    /// Show a page of a report with its summary.
    Show {
        /// Report to show
        #[arg(value_enum)]
        report: ReportKind,
        #[command(flatten)]
        view: ViewArgs,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page (default from settings)
        #[arg(long = "page-size")]
        page_size: Option<usize>,
    },
    /// Export the full filtered report to CSV or XLSX.
    Export {
        /// Report to export
        #[arg(value_enum)]
        report: ReportKind,
        #[command(flatten)]
        view: ViewArgs,
        /// Output format (default from settings)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
        /// File name; the extension is added if missing
        #[arg(long = "file-name")]
        file_name: Option<String>,
        /// Worksheet name for XLSX exports
        #[arg(long = "sheet-name")]
        sheet_name: Option<String>,
        /// Output directory (default from settings)
        #[arg(long = "output-dir")]
        output_dir: Option<String>,
    },
    /// Aggregate the monthly chart series of a payload.
    Series {
        /// Payload file (.json)
        #[arg(long)]
        input: PathBuf,
        /// Aggregation range
        #[arg(long, value_enum, default_value = "month")]
        range: RangeKey,
    },
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the current settings.
    Show,
    /// Update one or more settings.
    Set {
        #[arg(long = "export-dir")]
        export_dir: Option<String>,
        #[arg(long = "sheet-name")]
        sheet_name: Option<String>,
        #[arg(long = "page-size")]
        page_size: Option<usize>,
        /// Default export format: csv or xlsx
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },
}

/// Options shared by every command that mounts a report view.
#[derive(Args, Clone)]
pub struct ViewArgs {
    /// Upstream payload (.json, .csv or .xlsx)
    #[arg(long)]
    pub input: PathBuf,
    /// Free-text search, case-insensitive
    #[arg(long)]
    pub search: Option<String>,
    /// Dropdown filter as field=value (repeatable)
    #[arg(long = "filter")]
    pub filters: Vec<String>,
}

/// Load the payload, mount a view of `R` in `session`, and apply the search
/// text and filters from `args`.
pub(crate) fn mount_view<R: Report>(
    session: &ReportSession,
    args: &ViewArgs,
    export: ExportOptions,
) -> Result<(ReportView<R>, Payload)> {
    let payload = source::load(&args.input)?;
    let mut view = ReportView::mount(session, export);
    view.load(&payload.records);
    for pair in &args.filters {
        let (field, value) = ViewFilters::parse_pair(pair)?;
        view.set_filter(&field, &value)?;
    }
    session.query().set_text(args.search.clone().unwrap_or_default());
    Ok((view, payload))
}

pub(crate) fn default_file_name(stem: &str) -> String {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    format!("{stem}-{date}")
}
