use std::collections::BTreeSet;

use super::error::TableError;

// ---------------------------------------------------------------------------
// BenchTable – one parsed benchmark result file
// ---------------------------------------------------------------------------

/// Column-oriented numeric table.
///
/// Column names are kept exactly as they appear in the header, including
/// brackets, dollar signs and backslashes. A cell is `None` when the
/// measurement is missing.
#[derive(Debug, Clone, Default)]
pub struct BenchTable {
    names: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
    rows: usize,
}

impl BenchTable {
    /// Create an empty table with the given header.
    pub fn new(names: Vec<String>) -> Result<Self, TableError> {
        if names.is_empty() {
            return Err(TableError::MissingHeader);
        }
        let mut seen = BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }
        let columns = vec![Vec::new(); names.len()];
        Ok(Self {
            names,
            columns,
            rows: 0,
        })
    }

    /// Append one row; `cells` must hold one value per column.
    pub(crate) fn push_row(&mut self, cells: Vec<Option<f64>>) {
        debug_assert_eq!(cells.len(), self.columns.len());
        for (column, cell) in self.columns.iter_mut().zip(cells) {
            column.push(cell);
        }
        self.rows += 1;
    }

    /// Look up a column by its exact header name.
    pub fn column(&self, name: &str) -> Result<&[Option<f64>], TableError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| TableError::MissingColumn {
                name: name.to_string(),
            })
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Header names in file order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of data rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
