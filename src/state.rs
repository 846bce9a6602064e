use std::path::PathBuf;

use crate::chart::ChartSpec;
use crate::export;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Outcome of the last export, shown in the top bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Saved(PathBuf),
    Failed(String),
}

/// Everything the viewer window shows, independent of rendering.
pub struct ViewerState {
    pub chart: ChartSpec,
    /// Where "Export SVG" writes.
    pub export_dir: PathBuf,
    pub status: Option<Status>,
}

impl ViewerState {
    pub fn new(chart: ChartSpec, export_dir: PathBuf) -> Self {
        Self {
            chart,
            export_dir,
            status: None,
        }
    }

    /// Write the chart into `export_dir` and record the outcome.
    pub fn export(&mut self) {
        self.status = Some(match export::export_svg(&self.chart, &self.export_dir) {
            Ok(path) => Status::Saved(path),
            Err(e) => {
                log::error!("Failed to export chart: {e:#}");
                Status::Failed(format!("Error: {e:#}"))
            }
        });
    }
}
