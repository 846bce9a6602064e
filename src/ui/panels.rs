use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{Status, ViewerState};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Chart title, data summary and the export button.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.heading(state.chart.title.as_str());

        ui.separator();

        let drawn = state
            .chart
            .lines
            .iter()
            .filter(|l| !l.segments.is_empty())
            .count();
        ui.label(format!(
            "{drawn}/{} series with data, {} points",
            state.chart.lines.len(),
            state.chart.point_count()
        ));

        ui.separator();

        if ui
            .button("Export SVG")
            .on_hover_text(format!("Write into {}", state.export_dir.display()))
            .clicked()
        {
            state.export();
        }

        match &state.status {
            Some(Status::Saved(path)) => {
                ui.label(format!("Saved {}", path.display()));
            }
            Some(Status::Failed(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}
