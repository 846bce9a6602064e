use eframe::egui::{self, CornerRadius, FontId, Pos2, Rect, RichText, Sense, Shadow, Shape, Stroke, Ui};

use crate::chart::{ChartSpec, PlotLine};
use crate::color::to_color32;
use crate::dash::dash_polyline;

use super::plot::LINE_WIDTH;

/// Gap between the plot frame and the legend box.
const INSET: f32 = 10.0;
const SAMPLE_LEN: f32 = 30.0;

// ---------------------------------------------------------------------------
// Multi-column legend drawn over the plot
// ---------------------------------------------------------------------------

/// Legend box in the upper-left corner of `plot_rect`, one entry per series,
/// filled column by column.
pub fn chart_legend(ui: &Ui, chart: &ChartSpec, plot_rect: Rect) {
    let n = chart.lines.len();
    if n == 0 {
        return;
    }
    let layout = chart.legend;
    let rows = layout.rows(n);
    let columns = n.div_ceil(rows);
    let font = FontId::proportional(layout.font_size);

    egui::Area::new(egui::Id::new("fenwick_legend"))
        .order(egui::Order::Foreground)
        .fixed_pos(plot_rect.left_top() + egui::vec2(INSET, INSET))
        .interactable(false)
        .show(ui.ctx(), |ui| {
            let mut frame = egui::Frame::popup(ui.style());
            if !layout.shadow {
                frame = frame.shadow(Shadow::NONE);
            }
            if !layout.rounded {
                frame.corner_radius = CornerRadius::ZERO;
            }
            frame.show(ui, |ui| {
                egui::Grid::new("fenwick_legend_grid")
                    .spacing([6.0, 2.0])
                    .show(ui, |ui| {
                        for row in 0..rows {
                            for col in 0..columns {
                                match layout.entry_at(row, col, n) {
                                    Some(i) => {
                                        let line = &chart.lines[i];
                                        sample(ui, line, layout.font_size);
                                        ui.label(RichText::new(&line.label).font(font.clone()));
                                    }
                                    None => {
                                        ui.label("");
                                        ui.label("");
                                    }
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
        });
}

/// Short stroke in the series' color and dash pattern.
fn sample(ui: &mut Ui, line: &PlotLine, height: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(SAMPLE_LEN, height), Sense::hover());
    let stroke = Stroke::new(LINE_WIDTH, to_color32(line.color));
    for run in sample_runs(rect, line) {
        ui.painter().add(Shape::line(run, stroke));
    }
}

/// Visible pieces of a horizontal sample line across `rect`.
fn sample_runs(rect: Rect, line: &PlotLine) -> Vec<Vec<Pos2>> {
    let y = f64::from(rect.center().y);
    let ends = [(f64::from(rect.left()), y), (f64::from(rect.right()), y)];
    dash_polyline(&ends, line.dash.pattern(), f64::from(LINE_WIDTH))
        .into_iter()
        .map(|run| {
            run.into_iter()
                .map(|(x, y)| egui::pos2(x as f32, y as f32))
                .collect()
        })
        .collect()
}
