use std::path::PathBuf;

use log::debug;

use crate::cli::{default_file_name, mount_view, ViewArgs};
use crate::error::Result;
use crate::export::control::{ExportControl, ExportOutcome};
use crate::export::sink::DirectorySink;
use crate::export::ExportFormat;
use crate::reports::{
    EnrolleeRow, LocationRow, OverdueRow, ProviderRow, Report, ReportKind, SchemeRow,
};
use crate::session::ReportSession;
use crate::settings::{expand_path, load_settings};
use crate::view::ExportOptions;

pub struct ExportArgs {
    pub format: Option<ExportFormat>,
    pub file_name: Option<String>,
    pub sheet_name: Option<String>,
    pub output_dir: Option<String>,
}

pub fn run(kind: ReportKind, view: &ViewArgs, args: ExportArgs) -> Result<()> {
    let outcome = match kind {
        ReportKind::Enrollee => export::<EnrolleeRow>(view, args)?,
        ReportKind::Provider => export::<ProviderRow>(view, args)?,
        ReportKind::Scheme => export::<SchemeRow>(view, args)?,
        ReportKind::Location => export::<LocationRow>(view, args)?,
        ReportKind::Overdue => export::<OverdueRow>(view, args)?,
    };
    match outcome {
        ExportOutcome::Saved(path) => println!("Wrote {}", path.display()),
        ExportOutcome::Empty => println!("No rows to export; nothing written."),
        ExportOutcome::Disabled => println!("No report is active; nothing written."),
        ExportOutcome::Busy => println!("An export is already running."),
    }
    Ok(())
}

fn export<R: Report>(view_args: &ViewArgs, args: ExportArgs) -> Result<ExportOutcome> {
    let settings = load_settings();
    let dir: PathBuf = expand_path(args.output_dir.as_deref().unwrap_or(&settings.export_dir));
    let options = ExportOptions {
        file_name: args
            .file_name
            .unwrap_or_else(|| default_file_name(R::FILE_STEM)),
        sheet_name: Some(
            args.sheet_name
                .unwrap_or_else(|| settings.sheet_name.clone()),
        ),
        format: args.format.unwrap_or_else(|| settings.format()),
    };

    let session = ReportSession::new();
    // The view must outlive the trigger: dropping it clears the registry.
    let (_view, _payload) = mount_view::<R>(&session, view_args, options)?;
    let control = ExportControl::new(session.exports());
    let mut sink = DirectorySink::new(dir);
    debug!(
        "export enabled={} revision={} target={}",
        control.is_enabled(),
        session.exports().revision(),
        sink.dir().display()
    );
    control.trigger(&mut sink)
}
