use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::chart::{ChartSpec, PlotLine};
use crate::color::to_rgb_color;
use crate::dash::dash_polyline;

/// Output directory used when none is given.
pub const DEFAULT_DIR: &str = "fenwickpdf";

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 800;
/// Nominal line width; dash patterns are scaled by it.
const LINE_WIDTH: f64 = 1.5;
/// plotters strokes whole pixels, so 1.5 is drawn 2 px wide.
const STROKE_PX: u32 = 2;
const TITLE_FONT_PX: f64 = 22.0;
const AXIS_FONT_PX: f64 = 16.0;
/// Legend font size in px per point of `LegendLayout::font_size`.
const PX_PER_PT: f64 = 1.4;

// Legend geometry, in pixels.
const LEGEND_INSET: i32 = 10;
const LEGEND_PAD: i32 = 8;
const SAMPLE_LEN: i32 = 30;
const SAMPLE_GAP: i32 = 6;
const COLUMN_GAP: i32 = 14;
const SHADOW_OFFSET: i32 = 4;
const CORNER_RADIUS: f64 = 6.0;

/// `<out_dir>/<name>.svg`
pub fn export_path(chart: &ChartSpec, out_dir: &Path) -> PathBuf {
    out_dir.join(format!("{}.svg", chart.name))
}

/// Write the chart as an SVG file and return its path.
pub fn export_svg(chart: &ChartSpec, out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let path = export_path(chart, out_dir);
    let svg = render_svg(chart)?;
    std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

/// Render the chart to an in-memory SVG document.
pub fn render_svg(chart: &ChartSpec) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (WIDTH, HEIGHT)).into_drawing_area();
        draw_chart(&root, chart)?;
        root.present()?;
    }
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn draw_chart(root: &DrawingArea<SVGBackend<'_>, Shift>, chart: &ChartSpec) -> Result<()> {
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = log_bounds(chart.x_range());
    let (y_lo, y_hi) = linear_bounds(chart.y_range());

    let mut cc = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", TITLE_FONT_PX).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((x_lo..x_hi).log_scale(), y_lo..y_hi)?;

    cc.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .axis_desc_style(("sans-serif", AXIS_FONT_PX).into_font())
        .x_label_formatter(&|v| format_elements(*v))
        .draw()?;

    for line in &chart.lines {
        let style = to_rgb_color(line.color).stroke_width(STROKE_PX);
        for segment in &line.segments {
            let pixels: Vec<(f64, f64)> = segment
                .iter()
                .map(|&[x, y]| {
                    let (px, py) = cc.backend_coord(&(x, y));
                    (px as f64, py as f64)
                })
                .collect();
            if pixels.len() == 1 {
                // A lone point has no length to stroke.
                let (px, py) = to_coord(pixels[0]);
                root.draw(&Circle::new((px, py), 1, style.filled()))?;
                continue;
            }
            stroke(root, &pixels, line, style)?;
        }
    }

    let (x_px, y_px) = cc.plotting_area().get_pixel_range();
    draw_legend(root, chart, (x_px.start, y_px.start))?;
    Ok(())
}

fn stroke(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    pixels: &[(f64, f64)],
    line: &PlotLine,
    style: ShapeStyle,
) -> Result<()> {
    for run in dash_polyline(pixels, line.dash.pattern(), LINE_WIDTH) {
        let run: Vec<(i32, i32)> = run.into_iter().map(to_coord).collect();
        root.draw(&PathElement::new(run, style))?;
    }
    Ok(())
}

/// Multi-column legend, filled column by column, inside the upper-left
/// corner of the plot area.
fn draw_legend(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &ChartSpec,
    plot_origin: (i32, i32),
) -> Result<()> {
    let n = chart.lines.len();
    if n == 0 {
        return Ok(());
    }
    let layout = chart.legend;
    let rows = layout.rows(n);
    let columns = n.div_ceil(rows);

    let font_px = f64::from(layout.font_size) * PX_PER_PT;
    let text_style = TextStyle::from(("sans-serif", font_px).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));

    let mut text_widths = vec![0i32; columns];
    for (i, line) in chart.lines.iter().enumerate() {
        let (w, _) = root.estimate_text_size(&line.label, &text_style)?;
        let col = i / rows;
        text_widths[col] = text_widths[col].max(w as i32);
    }
    let column_widths: Vec<i32> = text_widths
        .iter()
        .map(|w| SAMPLE_LEN + SAMPLE_GAP + w + COLUMN_GAP)
        .collect();
    let entry_h = font_px.ceil() as i32 + 6;

    let left = plot_origin.0 + LEGEND_INSET;
    let top = plot_origin.1 + LEGEND_INSET;
    let right = left + column_widths.iter().sum::<i32>() - COLUMN_GAP + 2 * LEGEND_PAD;
    let bottom = top + rows as i32 * entry_h + 2 * LEGEND_PAD;
    let radius = if layout.rounded { CORNER_RADIUS } else { 0.0 };

    if layout.shadow {
        let shadow = outline(
            left + SHADOW_OFFSET,
            top + SHADOW_OFFSET,
            right + SHADOW_OFFSET,
            bottom + SHADOW_OFFSET,
            radius,
        );
        root.draw(&Polygon::new(shadow, BLACK.mix(0.25).filled()))?;
    }
    let mut frame = outline(left, top, right, bottom, radius);
    root.draw(&Polygon::new(frame.clone(), WHITE.mix(0.9).filled()))?;
    frame.push(frame[0]);
    root.draw(&PathElement::new(frame, RGBColor(204, 204, 204).stroke_width(1)))?;

    for (i, line) in chart.lines.iter().enumerate() {
        let col = i / rows;
        let row = (i % rows) as i32;
        let x = left + LEGEND_PAD + column_widths[..col].iter().sum::<i32>();
        let y = top + LEGEND_PAD + row * entry_h + entry_h / 2;

        let style = to_rgb_color(line.color).stroke_width(STROKE_PX);
        let sample = [(x as f64, y as f64), ((x + SAMPLE_LEN) as f64, y as f64)];
        stroke(root, &sample, line, style)?;
        root.draw(&Text::new(
            line.label.clone(),
            (x + SAMPLE_LEN + SAMPLE_GAP, y),
            text_style.clone(),
        ))?;
    }
    Ok(())
}

/// Closed outline of a rectangle with optionally rounded corners.
fn outline(left: i32, top: i32, right: i32, bottom: i32, radius: f64) -> Vec<(i32, i32)> {
    if radius <= 0.0 {
        return vec![(left, top), (right, top), (right, bottom), (left, bottom)];
    }
    let r = radius;
    let (l, t, rt, b) = (left as f64, top as f64, right as f64, bottom as f64);
    // Corner centres with their starting angle, walking clockwise on screen.
    let corners = [
        (rt - r, t + r, -90.0f64),
        (rt - r, b - r, 0.0),
        (l + r, b - r, 90.0),
        (l + r, t + r, 180.0),
    ];
    let mut points = Vec::with_capacity(corners.len() * 5);
    for (cx, cy, start) in corners {
        for step in 0..=4 {
            let a = (start + 22.5 * step as f64).to_radians();
            points.push(to_coord((cx + r * a.cos(), cy + r * a.sin())));
        }
    }
    points
}

fn to_coord((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

// ---------------------------------------------------------------------------
// Axis ranges and labels
// ---------------------------------------------------------------------------

/// Decade-aligned positive range for the log axis.
fn log_bounds(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        Some((lo, hi)) if lo > 0.0 => {
            let lo = 10f64.powi(lo.log10().floor() as i32);
            let hi = 10f64.powi(hi.log10().ceil() as i32);
            if hi > lo {
                (lo, hi)
            } else {
                (lo, lo * 10.0)
            }
        }
        _ => (1.0, 10.0),
    }
}

/// Data range widened by 5% on each side.
fn linear_bounds(range: Option<(f64, f64)>) -> (f64, f64) {
    match range {
        Some((lo, hi)) if hi > lo => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
        Some((v, _)) => (v - 1.0, v + 1.0),
        None => (0.0, 1.0),
    }
}

/// Tick label for an element count: exact below 10^5, scientific above.
pub fn format_elements(v: f64) -> String {
    if v <= 0.0 || !v.is_finite() {
        return String::new();
    }
    let exp = v.log10();
    let rounded = exp.round();
    if (exp - rounded).abs() < 1e-9 && !(0.0..5.0).contains(&rounded) {
        format!("1e{}", rounded as i32)
    } else if v >= 1.0 && v < 1e5 {
        format!("{}", v.round() as u64)
    } else {
        format!("{v:.0e}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::tests::full_csv;
    use crate::chart::ChartSpec;
    use crate::data::loader::load_reader;

    fn chart(name: &str) -> ChartSpec {
        let table = load_reader(full_csv(&[(10.0, 5.0), (100.0, 12.0), (1000.0, 0.0)]).as_bytes()).unwrap();
        ChartSpec::from_table(name, &table).unwrap()
    }

    #[test]
    fn svg_carries_title_axes_and_legend() {
        let svg = render_svg(&chart("bench1")).unwrap();
        assert!(svg.contains("Fenwick tree: bench1"));
        assert!(svg.contains("# elements"));
        assert!(svg.contains("time (nS)"));
        assert!(svg.contains("fixed[ℓ]"));
        assert!(svg.contains("byte[20]bit"));
    }

    #[test]
    fn strokes_use_fixed_pixel_width() {
        let svg = render_svg(&chart("bench3")).unwrap();
        assert!(svg.contains(&format!("stroke-width=\"{STROKE_PX}\"")));
        assert_eq!(LINE_WIDTH, 1.5);
    }

    #[test]
    fn export_writes_named_file() {
        let dir = std::env::temp_dir().join(format!("fenwick-plot-export-{}", std::process::id()));
        let path = export_svg(&chart("bench2"), &dir).unwrap();
        assert_eq!(path, dir.join("bench2.svg"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, render_svg(&chart("bench2")).unwrap());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn log_bounds_snap_to_decades() {
        assert_eq!(log_bounds(Some((12.0, 950.0))), (10.0, 1000.0));
        assert_eq!(log_bounds(Some((100.0, 100.0))), (100.0, 1000.0));
        assert_eq!(log_bounds(None), (1.0, 10.0));
    }

    #[test]
    fn linear_bounds_pad_range() {
        assert_eq!(linear_bounds(Some((0.0, 100.0))), (-5.0, 105.0));
        assert_eq!(linear_bounds(Some((4.0, 4.0))), (3.0, 5.0));
    }

    #[test]
    fn element_labels() {
        assert_eq!(format_elements(10.0), "10");
        assert_eq!(format_elements(1000.0), "1000");
        assert_eq!(format_elements(1e6), "1e6");
        assert_eq!(format_elements(0.0), "");
    }

    #[test]
    fn rounded_outline_stays_inside_box() {
        let pts = outline(0, 0, 100, 50, 6.0);
        assert_eq!(pts.len(), 20);
        assert!(pts.iter().all(|&(x, y)| (0..=100).contains(&x) && (0..=50).contains(&y)));
        assert_eq!(outline(0, 0, 10, 10, 0.0).len(), 4);
    }
}
