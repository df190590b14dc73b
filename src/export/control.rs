use std::cell::Cell;
use std::path::PathBuf;

use log::{debug, info};

use crate::error::Result;
use crate::export::sink::DownloadSink;
use crate::export::{delimited, Exportable, ExportFormat};
use crate::session::ExportRegistry;

#[derive(Debug, PartialEq)]
pub enum ExportOutcome {
    /// A file was produced and handed to the sink.
    Saved(PathBuf),
    /// The active report had no rows; nothing was generated.
    Empty,
    /// No report has published an export config.
    Disabled,
    /// Another export is still running; this request was dropped.
    Busy,
}

/// Page-level export trigger. Reads whatever the registry holds at click
/// time and serializes it, one export at a time.
pub struct ExportControl {
    registry: ExportRegistry,
    busy: Cell<bool>,
}

struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl ExportControl {
    pub fn new(registry: ExportRegistry) -> Self {
        Self {
            registry,
            busy: Cell::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn is_enabled(&self) -> bool {
        !self.is_busy() && self.registry.current().is_some()
    }

    pub fn trigger(&self, sink: &mut dyn DownloadSink) -> Result<ExportOutcome> {
        if self.busy.get() {
            debug!("export already in flight; request ignored");
            return Ok(ExportOutcome::Busy);
        }
        let Some(config) = self.registry.current() else {
            debug!("export requested with no active report");
            return Ok(ExportOutcome::Disabled);
        };

        let _guard = BusyGuard::engage(&self.busy);
        let saved = match config.format() {
            ExportFormat::Csv => delimited::write(&*config, sink)?,
            ExportFormat::Xlsx => write_workbook(&*config, sink)?,
        };
        Ok(match saved {
            Some(path) => {
                info!("exported '{}' to {}", config.file_name(), path.display());
                ExportOutcome::Saved(path)
            }
            None => ExportOutcome::Empty,
        })
    }
}

fn write_workbook(config: &dyn Exportable, sink: &mut dyn DownloadSink) -> Result<Option<PathBuf>> {
    #[cfg(not(feature = "xlsx"))]
    {
        let _ = (config, sink);
        Err(crate::error::BoardError::Other(
            "XLSX export requires the 'xlsx' feature; build with `cargo build --features xlsx`".into(),
        ))
    }

    #[cfg(feature = "xlsx")]
    {
        crate::export::workbook::write(config, sink)
    }
}
