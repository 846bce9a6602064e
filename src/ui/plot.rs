use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{GridInput, GridMark, Line, LineStyle, Plot, PlotPoint, PlotPoints};

use crate::chart::{AxisScale, ChartSpec};
use crate::color::to_color32;
use crate::export::format_elements;
use crate::series::Dash;

use super::legend::chart_legend;

pub(crate) const LINE_WIDTH: f32 = 1.5;
/// Above this many decades only decade marks are generated.
const MAX_MINOR_DECADES: i32 = 12;

// ---------------------------------------------------------------------------
// Benchmark plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart in the central panel.
///
/// egui_plot has no logarithmic axis, so a log-scaled axis is plotted as
/// `log10(v)` with decade grid marks and labels showing the original values.
/// Its legend is a single column, so the legend is drawn over the plot by
/// [`chart_legend`] instead.
pub fn chart_plot(ui: &mut Ui, chart: &ChartSpec) {
    let (x_scale, y_scale) = (chart.x_scale, chart.y_scale);

    let mut plot = Plot::new("fenwick_plot")
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name: &str, value: &PlotPoint| {
            let x = unscale(x_scale, value.x).round();
            let y = unscale(y_scale, value.y);
            if name.is_empty() {
                format!("{x} elements\n{y:.1} nS")
            } else {
                format!("{name}\n{x} elements\n{y:.1} nS")
            }
        });

    if x_scale == AxisScale::Log10 {
        plot = plot
            .x_grid_spacer(decade_marks)
            .x_axis_formatter(decade_label);
    }
    if y_scale == AxisScale::Log10 {
        plot = plot
            .y_grid_spacer(decade_marks)
            .y_axis_formatter(decade_label);
    }

    let response = plot.show(ui, |plot_ui| {
        for line in &chart.lines {
            let color = to_color32(line.color);
            let style = line_style(line.dash);

            for segment in &line.segments {
                let points: PlotPoints = segment
                    .iter()
                    .map(|&[x, y]| [scale(x_scale, x), scale(y_scale, y)])
                    .collect();

                plot_ui.line(
                    Line::new(points)
                        .name(&line.label)
                        .color(color)
                        .style(style)
                        .width(LINE_WIDTH),
                );
            }
        }
    });
    chart_legend(ui, chart, response.response.rect);
}

/// Data value → plot coordinate.
fn scale(axis: AxisScale, v: f64) -> f64 {
    match axis {
        AxisScale::Linear => v,
        AxisScale::Log10 => v.log10(),
    }
}

fn unscale(axis: AxisScale, v: f64) -> f64 {
    match axis {
        AxisScale::Linear => v,
        AxisScale::Log10 => 10f64.powf(v),
    }
}

/// Label decade marks only; minor marks stay blank.
fn decade_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if mark.step_size >= 1.0 {
        format_elements(10f64.powf(mark.value))
    } else {
        String::new()
    }
}

/// egui_plot only dashes and dots; a dash-dot line is drawn with long dashes.
fn line_style(dash: Dash) -> LineStyle {
    match dash {
        Dash::Solid => LineStyle::Solid,
        Dash::Dashed => LineStyle::Dashed { length: 6.0 },
        Dash::DashDot => LineStyle::Dashed { length: 14.0 },
        Dash::Dotted => LineStyle::Dotted { spacing: 4.0 },
    }
}

/// Grid marks for a `log10` axis: decades with step 1, and 2..9 × 10^k
/// with step 0.1 so egui draws them fainter.
fn decade_marks(input: GridInput) -> Vec<GridMark> {
    let (lo, hi) = input.bounds;
    if !lo.is_finite() || !hi.is_finite() || hi < lo {
        return Vec::new();
    }
    let first = lo.floor() as i32;
    let last = hi.ceil() as i32;
    let minor = last - first <= MAX_MINOR_DECADES;

    let mut marks = Vec::new();
    for k in first..=last {
        for m in 1..10 {
            if m > 1 && !minor {
                break;
            }
            let value = f64::from(k) + f64::from(m).log10();
            if value < lo || value > hi {
                continue;
            }
            let step_size = if m == 1 { 1.0 } else { 0.1 };
            marks.push(GridMark { value, step_size });
        }
    }
    marks
}
