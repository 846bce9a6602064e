use std::path::Path;

use palette::Srgb;

use crate::data::error::TableError;
use crate::data::model::BenchTable;
use crate::series::{self, Dash};

pub const TITLE_PREFIX: &str = "Fenwick tree: ";
/// Independent variable: number of elements in the tree.
pub const X_COLUMN: &str = "Elements";
pub const X_LABEL: &str = "# elements";
pub const Y_LABEL: &str = "time (nS)";

// ---------------------------------------------------------------------------
// Chart description, independent of the drawing backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log10,
}

/// Legend box anchored at the upper-left corner of the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendLayout {
    pub columns: usize,
    pub shadow: bool,
    pub rounded: bool,
    pub font_size: f32,
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            shadow: true,
            rounded: true,
            font_size: 10.0,
        }
    }
}

impl LegendLayout {
    /// Rows needed for `n` entries; entries fill column by column.
    pub fn rows(&self, n: usize) -> usize {
        n.div_ceil(self.columns.clamp(1, n.max(1)))
    }

    /// Entry shown at `(row, col)`, if any.
    pub fn entry_at(&self, row: usize, col: usize, n: usize) -> Option<usize> {
        let rows = self.rows(n);
        let i = col * rows + row;
        (row < rows && i < n).then_some(i)
    }
}

/// One series, split into runs of consecutive rows where both values exist.
#[derive(Debug, Clone)]
pub struct PlotLine {
    pub column: &'static str,
    pub label: String,
    pub color: Srgb<u8>,
    pub dash: Dash,
    pub segments: Vec<Vec<[f64; 2]>>,
}

impl PlotLine {
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.segments.iter().flatten().copied()
    }
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// File stem; also names exported images.
    pub name: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub legend: LegendLayout,
    pub lines: Vec<PlotLine>,
}

/// File name without its final extension: `bench1.csv` → `bench1`.
pub fn chart_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl ChartSpec {
    /// Build the chart for one table.
    ///
    /// Every enabled series must be present in the table; the first absent
    /// column is returned as [`TableError::MissingColumn`].
    pub fn from_table(name: &str, table: &BenchTable) -> Result<Self, TableError> {
        let xs = table.column(X_COLUMN)?;

        let mut lines = Vec::new();
        for spec in series::enabled() {
            let ys = table.column(spec.column)?;
            let segments = segments(xs, ys);
            log::debug!(
                "{}: {} segments, {} points",
                spec.column,
                segments.len(),
                segments.iter().map(Vec::len).sum::<usize>()
            );
            lines.push(PlotLine {
                column: spec.column,
                label: spec.label(),
                color: spec.rgb(),
                dash: spec.dash,
                segments,
            });
        }

        for spec in series::SERIES.iter().filter(|s| !s.enabled) {
            if table.has_column(spec.column) {
                log::debug!("skipping disabled series {} ({:?})", spec.column, spec.block);
            }
        }
        for column in table.names() {
            if column != X_COLUMN && series::lookup(column).is_none() {
                log::warn!("column '{column}' is not a known series, ignoring it");
            }
        }

        Ok(Self {
            name: name.to_string(),
            title: format!("{TITLE_PREFIX}{name}"),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            x_scale: AxisScale::Log10,
            y_scale: AxisScale::Linear,
            legend: LegendLayout::default(),
            lines,
        })
    }

    pub fn point_count(&self) -> usize {
        self.lines.iter().map(|l| l.points().count()).sum()
    }

    /// Smallest and largest x over all drawn points.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        min_max(self.lines.iter().flat_map(|l| l.points()).map(|[x, _]| x))
    }

    pub fn y_range(&self) -> Option<(f64, f64)> {
        min_max(self.lines.iter().flat_map(|l| l.points()).map(|[_, y]| y))
    }
}

/// Pair up x and y, breaking the line wherever a value is missing or x
/// cannot sit on a log axis.
fn segments(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (x, y) in xs.iter().zip(ys) {
        match (x, y) {
            (Some(x), Some(y)) if *x > 0.0 && x.is_finite() && y.is_finite() => {
                current.push([*x, *y]);
            }
            _ => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    /// CSV text with every known column; `fixed[F]` carries the given
    /// values, all other series a constant.
    pub(crate) fn full_csv(rows: &[(f64, f64)]) -> String {
        let mut header = vec![X_COLUMN.to_string()];
        header.extend(series::SERIES.iter().map(|s| s.column.to_string()));
        let mut text = header.join(",");
        text.push('\n');
        for &(x, y) in rows {
            let mut cells = vec![x.to_string()];
            for s in series::SERIES {
                cells.push(if s.column == "fixed[F]" {
                    y.to_string()
                } else {
                    "3".to_string()
                });
            }
            text.push_str(&cells.join(","));
            text.push('\n');
        }
        text
    }

    fn line<'a>(chart: &'a ChartSpec, column: &str) -> Option<&'a PlotLine> {
        chart.lines.iter().find(|l| l.column == column)
    }

    fn chart(text: &str) -> Result<ChartSpec, TableError> {
        let table = load_reader(text.as_bytes())?;
        ChartSpec::from_table("bench1", &table)
    }

    #[test]
    fn title_uses_file_stem() {
        assert_eq!(chart_name(Path::new("results/bench1.csv")), "bench1");
        assert_eq!(chart_name(Path::new("a.b.csv")), "a.b");
        assert_eq!(chart_name(Path::new("noext")), "noext");
        let c = chart(&full_csv(&[(10.0, 5.0)])).unwrap();
        assert_eq!(c.title, "Fenwick tree: bench1");
        assert_eq!(c.x_label, "# elements");
        assert_eq!(c.y_label, "time (nS)");
    }

    #[test]
    fn x_is_logarithmic_and_y_linear() {
        let c = chart(&full_csv(&[(10.0, 5.0)])).unwrap();
        assert_eq!(c.x_scale, AxisScale::Log10);
        assert_eq!(c.y_scale, AxisScale::Linear);
        assert_eq!(c.legend.columns, 4);
    }

    #[test]
    fn legend_fills_column_by_column() {
        let layout = LegendLayout::default();
        assert_eq!(layout.rows(24), 6);
        assert_eq!(layout.entry_at(0, 0, 24), Some(0));
        assert_eq!(layout.entry_at(5, 0, 24), Some(5));
        assert_eq!(layout.entry_at(0, 1, 24), Some(6));
        assert_eq!(layout.entry_at(5, 3, 24), Some(23));
        // 7 entries: rows of 2, the last column holds one.
        assert_eq!(layout.rows(7), 2);
        assert_eq!(layout.entry_at(1, 3, 7), None);
        assert_eq!(layout.entry_at(0, 0, 0), None);
    }

    #[test]
    fn line_passes_through_data_points() {
        let c = chart(&full_csv(&[(10.0, 5.0), (100.0, 12.0)])).unwrap();
        let line = line(&c, "fixed[F]").unwrap();
        assert_eq!(line.segments, vec![vec![[10.0, 5.0], [100.0, 12.0]]]);
        assert_eq!(line.label, "fixed[F]");
        assert_eq!(line.dash, Dash::Solid);
    }

    #[test]
    fn exactly_the_enabled_series_are_drawn() {
        let c = chart(&full_csv(&[(10.0, 5.0)])).unwrap();
        assert_eq!(c.lines.len(), 24);
        for (line, spec) in c.lines.iter().zip(series::enabled()) {
            assert_eq!(line.column, spec.column);
            assert_eq!(line.label, spec.label());
            assert_eq!(line.color, spec.rgb());
            assert_eq!(line.dash, spec.dash);
        }
        assert!(line(&c, "bit[$14$]bit").is_none());
    }

    #[test]
    fn zero_values_break_the_line() {
        let c = chart(&full_csv(&[(10.0, 5.0), (100.0, 0.0), (1000.0, 7.0), (10000.0, 8.0)])).unwrap();
        let line = line(&c, "fixed[F]").unwrap();
        assert_eq!(
            line.segments,
            vec![vec![[10.0, 5.0]], vec![[1000.0, 7.0], [10000.0, 8.0]]]
        );
        assert!(line.points().all(|[_, y]| y != 0.0));
    }

    #[test]
    fn all_missing_series_still_has_a_line() {
        let c = chart(&full_csv(&[(10.0, 0.0), (100.0, 0.0)])).unwrap();
        let line = line(&c, "fixed[F]").unwrap();
        assert!(line.segments.is_empty());
        assert_eq!(c.lines.len(), 24);
    }

    #[test]
    fn missing_column_fails_with_lookup_error() {
        let text = full_csv(&[(10.0, 5.0)]).replace("byte[F],", "byte[X],");
        match chart(&text) {
            Err(TableError::MissingColumn { name }) => assert_eq!(name, "byte[F]"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn missing_elements_column_fails() {
        let text = full_csv(&[(10.0, 5.0)]).replacen("Elements", "Size", 1);
        assert!(matches!(
            chart(&text),
            Err(TableError::MissingColumn { name }) if name == X_COLUMN
        ));
    }

    #[test]
    fn ranges_cover_all_points() {
        let c = chart(&full_csv(&[(10.0, 5.0), (100.0, 12.0)])).unwrap();
        assert_eq!(c.x_range(), Some((10.0, 100.0)));
        assert_eq!(c.y_range(), Some((3.0, 12.0)));
        assert_eq!(c.point_count(), 48);
    }

    #[test]
    fn non_positive_x_is_dropped() {
        let s = segments(
            &[Some(-1.0), Some(10.0), None, Some(100.0)],
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        );
        assert_eq!(s, vec![vec![[10.0, 2.0]], vec![[100.0, 4.0]]]);
    }
}
