/// Data layer: error type, table model, and CSV loading.
///
/// Architecture:
/// ```text
///   bench.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → BenchTable   (`0` → missing)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ BenchTable │  named columns of Option<f64>
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  chart    │  fixed series table → ChartSpec
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
