use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::TableError;
use super::model::BenchTable;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a benchmark table from a CSV file.
pub fn load_file(path: &Path) -> Result<BenchTable, TableError> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file)
}

/// Parse benchmark CSV text.
///
/// Layout: a header row of column names followed by numeric rows, e.g.
///
/// ```text
/// Elements, fixed[F], fixed[$\ell$], byte[F], ...
/// 10,       5,        7,             0,       ...
/// ```
///
/// Whitespace around fields is stripped. A field that is empty or equal to
/// zero is a missing measurement.
pub fn load_reader<R: Read>(reader: R) -> Result<BenchTable, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let names: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if names.iter().all(|n| n.is_empty()) {
        return Err(TableError::MissingHeader);
    }
    let mut table = BenchTable::new(names)?;

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let cells = record
            .iter()
            .enumerate()
            .map(|(col, field)| {
                parse_cell(field).ok_or_else(|| TableError::NotNumeric {
                    row: row_no + 1,
                    column: table.names()[col].clone(),
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        table.push_row(cells);
    }

    log::debug!(
        "parsed {} rows x {} columns",
        table.rows(),
        table.names().len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// `None` for non-numeric text, `Some(None)` for a missing measurement.
fn parse_cell(field: &str) -> Option<Option<f64>> {
    if field.is_empty() {
        return Some(None);
    }
    let value = field.parse::<f64>().ok()?;
    if value == 0.0 {
        Some(None)
    } else {
        Some(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows_with_whitespace() {
        let text = "Elements , fixed[F] ,fixed[$\\ell$]\n 10 , 5 , 7.5\n100,12,  9\n";
        let t = load_reader(text.as_bytes()).unwrap();
        assert_eq!(t.names(), &["Elements", "fixed[F]", "fixed[$\\ell$]"]);
        assert_eq!(t.rows(), 2);
        assert_eq!(t.column("Elements").unwrap(), &[Some(10.0), Some(100.0)]);
        assert_eq!(t.column("fixed[$\\ell$]").unwrap(), &[Some(7.5), Some(9.0)]);
    }

    #[test]
    fn zero_and_empty_fields_are_missing() {
        let text = "Elements,bit[F],bit[$\\ell$]\n10,0,\n100,0.0,3\n";
        let t = load_reader(text.as_bytes()).unwrap();
        assert_eq!(t.column("bit[F]").unwrap(), &[None, None]);
        assert_eq!(t.column("bit[$\\ell$]").unwrap(), &[None, Some(3.0)]);
    }

    #[test]
    fn non_numeric_field_reports_position() {
        let text = "Elements,byte[F]\n10,5\n100,fast\n";
        match load_reader(text.as_bytes()) {
            Err(TableError::NotNumeric { row, column, value }) => {
                assert_eq!(row, 2);
                assert_eq!(column, "byte[F]");
                assert_eq!(value, "fast");
            }
            other => panic!("expected NotNumeric, got {other:?}"),
        }
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let text = "Elements,byte[F]\n10,5,7\n";
        assert!(matches!(
            load_reader(text.as_bytes()),
            Err(TableError::Csv(_))
        ));
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(
            load_reader("".as_bytes()),
            Err(TableError::MissingHeader)
        ));
    }

    #[test]
    fn header_only_yields_empty_table() {
        let t = load_reader("Elements,fixed[F]\n".as_bytes()).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.column("fixed[F]").unwrap(), &[] as &[Option<f64>]);
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let path = std::env::temp_dir().join("fenwick-plot-does-not-exist.csv");
        match load_file(&path) {
            Err(TableError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
