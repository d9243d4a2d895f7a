//! Reader for the `*_HilltopData.csv` files written by the hilltop flow
//! routing model.
//!
//! Only four columns are consumed. Rows the model marks as failed and rows
//! that are still being written are skipped; anything else that does not
//! parse is an error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{FitError, Result};

/// Column holding the hillslope relief (m).
pub const RELIEF_COLUMN: usize = 4;
/// Column holding the hillslope length (m).
pub const LENGTH_COLUMN: usize = 5;
/// Column holding the hilltop slope.
pub const SLOPE_COLUMN: usize = 8;
/// Column holding the straight-line ridge to channel distance (m).
pub const EUCLIDEAN_COLUMN: usize = 13;

/// Rows with this many fields or fewer are incomplete.
///
/// The threshold follows the column count of the upstream writer and is not
/// derived from the columns read here: a row of 11 to 13 fields passes it and
/// then fails on the Euclidean distance column.
pub const MIN_ROW_FIELDS: usize = 10;

/// Marker the upstream writer puts in rows whose trace failed.
pub const FAIL_MARKER: &str = "fail";

/// One traced hillslope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HilltopRecord {
    pub relief: f64,
    pub length: f64,
    pub hilltop_slope: f64,
    pub euclidean_distance: f64,
}

/// Read hilltop records from a file.
pub fn read_hilltop_csv(path: impl AsRef<Path>) -> Result<Vec<HilltopRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = parse_hilltop_csv(BufReader::new(file))?;
    info!(
        path = %path.display(),
        records = records.len(),
        "Read hilltop data"
    );
    Ok(records)
}

/// Parse hilltop records from any buffered reader.
///
/// The first line is a column header and is not parsed.
pub fn parse_hilltop_csv<R: BufRead>(reader: R) -> Result<Vec<HilltopRecord>> {
    let mut records = Vec::new();
    let mut failed = 0usize;
    let mut incomplete = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        if index == 0 {
            continue;
        }
        if line.contains(FAIL_MARKER) {
            failed += 1;
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() <= MIN_ROW_FIELDS {
            incomplete += 1;
            continue;
        }

        records.push(HilltopRecord {
            relief: column(&fields, RELIEF_COLUMN, line_no)?,
            length: column(&fields, LENGTH_COLUMN, line_no)?,
            hilltop_slope: column(&fields, SLOPE_COLUMN, line_no)?,
            euclidean_distance: column(&fields, EUCLIDEAN_COLUMN, line_no)?,
        });
    }

    debug!(
        records = records.len(),
        failed,
        incomplete,
        "Parsed hilltop rows"
    );
    Ok(records)
}

fn column(fields: &[&str], index: usize, line: usize) -> Result<f64> {
    let raw = fields.get(index).copied().unwrap_or("");
    raw.trim()
        .parse::<f64>()
        .map_err(|_| FitError::format(line, index, raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{hilltop_csv_row, HILLTOP_CSV_HEADER};

    fn parse(text: &str) -> Result<Vec<HilltopRecord>> {
        parse_hilltop_csv(text.as_bytes())
    }

    #[test]
    fn test_parses_consumed_columns() {
        let text = format!(
            "{}\n{}\n",
            HILLTOP_CSV_HEADER,
            hilltop_csv_row(0, 40.0, 50.0, 0.3, 50.001)
        );
        let records = parse(&text).unwrap();
        assert_eq!(
            records,
            vec![HilltopRecord {
                relief: 40.0,
                length: 50.0,
                hilltop_slope: 0.3,
                euclidean_distance: 50.001,
            }]
        );
    }

    #[test]
    fn test_header_line_is_skipped() {
        // a header full of numbers would otherwise parse
        let text = format!(
            "{}\n{}\n",
            hilltop_csv_row(1, 9.0, 9.0, 0.1, 9.0),
            hilltop_csv_row(2, 40.0, 50.0, 0.3, 50.0)
        );
        let records = parse(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].relief, 40.0);
    }

    #[test]
    fn test_fail_rows_are_skipped() {
        let mut bad = hilltop_csv_row(1, 40.0, 50.0, 0.3, 50.0);
        bad.push_str(",fail");
        let text = format!("{}\n{}\n", HILLTOP_CSV_HEADER, bad);
        assert!(parse(&text).unwrap().is_empty());
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let text = format!("{}\n1,2,3,4,5,6,7,8,9,10\n\n", HILLTOP_CSV_HEADER);
        assert!(parse(&text).unwrap().is_empty());
    }

    #[test]
    fn test_row_without_euclidean_column_is_an_error() {
        let text = format!("{}\n0,1,2,3,40,50,6,7,0.3,9,10,11\n", HILLTOP_CSV_HEADER);
        match parse(&text) {
            Err(FitError::Format { line, column, value }) => {
                assert_eq!(line, 2);
                assert_eq!(column, EUCLIDEAN_COLUMN);
                assert_eq!(value, "");
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_value_is_an_error() {
        let row = hilltop_csv_row(0, 40.0, 50.0, 0.3, 50.0).replacen("40", "NA", 1);
        let text = format!("{}\n{}\n", HILLTOP_CSV_HEADER, row);
        assert!(matches!(
            parse(&text),
            Err(FitError::Format {
                column: RELIEF_COLUMN,
                ..
            })
        ));
    }

    #[test]
    fn test_trailing_whitespace_is_tolerated() {
        let text = format!(
            "{}\r\n{} \r\n",
            HILLTOP_CSV_HEADER,
            hilltop_csv_row(0, 40.0, 50.0, 0.3, 50.0)
        );
        assert_eq!(parse(&text).unwrap().len(), 1);
    }
}
