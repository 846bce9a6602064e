mod app;
mod chart;
mod color;
mod dash;
mod data;
mod export;
mod series;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use chart::ChartSpec;

/// Plot Fenwick tree benchmark CSV files as log-x line charts.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opts {
    /// Benchmark result files; one chart per file, in order.
    files: Vec<PathBuf>,

    /// Write each chart as `<DIR>/<name>.svg` instead of opening a window.
    /// A bare `--export` writes into `fenwickpdf`; use `--export=DIR` for another directory.
    #[arg(
        long,
        value_name = "DIR",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = export::DEFAULT_DIR
    )]
    export: Option<PathBuf>,
}

/// Where each chart goes.
#[derive(Debug, Clone, PartialEq)]
enum Output {
    /// Interactive window; its export button writes into the directory.
    Window(PathBuf),
    Svg(PathBuf),
}

impl Opts {
    fn output(&self) -> Output {
        match &self.export {
            Some(dir) => Output::Svg(dir.clone()),
            None => Output::Window(PathBuf::from(export::DEFAULT_DIR)),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    let output = opts.output();
    run(&opts.files, &output).inspect_err(|e| log::error!("{e:#}"))
}

/// Render every file in order; the first failure stops the run.
fn run(files: &[PathBuf], output: &Output) -> Result<()> {
    if files.is_empty() {
        log::debug!("no input files");
    }
    for path in files {
        render(path, output).with_context(|| format!("plotting {}", path.display()))?;
    }
    Ok(())
}

/// Load one benchmark file and show or export its chart.
fn render(path: &Path, output: &Output) -> Result<()> {
    let table = data::loader::load_file(path)?;
    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        table.rows(),
        table.names(),
        path.display()
    );
    if table.is_empty() {
        log::warn!("{} has no data rows", path.display());
    }

    let chart = ChartSpec::from_table(&chart::chart_name(path), &table)?;
    match output {
        Output::Window(dir) => app::show(chart, dir.clone()),
        Output::Svg(dir) => export::export_svg(&chart, dir).map(|_| ()),
    }
}
