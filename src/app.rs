use std::path::PathBuf;

use anyhow::{anyhow, Result};
use eframe::egui;

use crate::chart::ChartSpec;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ChartViewer {
    pub state: ViewerState,
}

impl ChartViewer {
    pub fn new(chart: ChartSpec, export_dir: PathBuf) -> Self {
        Self {
            state: ViewerState::new(chart, export_dir),
        }
    }
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and export ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_plot(ui, &self.state.chart);
        });
    }
}

/// Open a window showing `chart`; blocks until the window is closed.
pub fn show(chart: ChartSpec, export_dir: PathBuf) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = chart.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(ChartViewer::new(chart, export_dir)))),
    )
    .map_err(|e| anyhow!("showing '{title}': {e}"))
}
