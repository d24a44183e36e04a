use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use thiserror::Error;

use super::model::{GrowthTable, WellAddress, active_wells};

/// Name of the mandatory timepoint column.
pub const TIME_COLUMN: &str = "Time [s]";

/// Fatal ingestion failure: the upload cannot become a [`GrowthTable`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The one required-column check the tool performs.
    #[error("CSV must contain a '{TIME_COLUMN}' column")]
    MissingTimeColumn,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a growth-curve table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<GrowthTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    load_csv(file)
}

/// Parse CSV from any reader.
///
/// Layout: header row with `Time [s]` plus one column per well. Columns whose
/// name is not a well address (`A1`..`H12`, exact match) are loaded but never
/// become addressable; their names are kept for the status line only.
pub fn load_csv<R: Read>(input: R) -> Result<GrowthTable> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let time_idx = headers
        .iter()
        .position(|h| h == TIME_COLUMN)
        .ok_or(LoadError::MissingTimeColumn)?;

    let data_columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != time_idx)
        .map(|(_, h)| h.clone())
        .collect();
    let active = active_wells(&data_columns);

    // Column index per active well, for record slicing below.
    let well_indices: Vec<(WellAddress, usize)> = active
        .iter()
        .filter_map(|&well| {
            let name = well.to_string();
            headers.iter().position(|h| *h == name).map(|idx| (well, idx))
        })
        .collect();

    let ignored_columns: Vec<String> = data_columns
        .iter()
        .filter(|h| h.parse::<WellAddress>().is_err())
        .cloned()
        .collect();

    let mut timepoints = Vec::new();
    let mut wells: BTreeMap<WellAddress, Vec<f64>> =
        active.iter().map(|&w| (w, Vec::new())).collect();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let t = parse_float(record.get(time_idx).unwrap_or(""), row_no, TIME_COLUMN)?;
        timepoints.push(t);

        for &(well, idx) in &well_indices {
            let v = parse_float(record.get(idx).unwrap_or(""), row_no, &well.to_string())?;
            if let Some(series) = wells.get_mut(&well) {
                series.push(v);
            }
        }
    }

    if timepoints.is_empty() {
        bail!("CSV contains a header but no data rows");
    }

    Ok(GrowthTable {
        timepoints,
        wells,
        ignored_columns,
    })
}

fn parse_float(s: &str, row: usize, col: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}, column '{col}': '{s}' is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_wells_and_skips_other_columns() {
        let csv = "Time [s],A1,A2,Temp [C],notes\n\
                   0.0,1.0,3.0,37.0,1\n\
                   3600.0,2.0,4.0,37.1,2\n";
        let table = load_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.timepoints, [0.0, 3600.0]);
        assert_eq!(table.wells.len(), 2);
        let a1 = "A1".parse::<WellAddress>().unwrap();
        assert_eq!(table.wells[&a1], [1.0, 2.0]);
        assert_eq!(table.ignored_columns, ["Temp [C]", "notes"]);
    }

    #[test]
    fn missing_time_column_is_fatal() {
        let csv = "t,A1\n0.0,1.0\n";
        let err = load_csv(csv.as_bytes()).unwrap_err();
        assert!(err.downcast_ref::<LoadError>().is_some());
        assert!(err.to_string().contains("Time [s]"));
    }

    #[test]
    fn non_numeric_well_cell_is_an_ingestion_error() {
        let csv = "Time [s],A1\n0.0,abc\n";
        assert!(load_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn empty_table_is_an_ingestion_error() {
        let csv = "Time [s],A1\n";
        assert!(load_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn zero_padded_column_never_becomes_a_well() {
        let csv = "Time [s],A01,B2\n0.0,1.0,2.0\n";
        let table = load_csv(csv.as_bytes()).unwrap();
        let names: Vec<String> = table.active_wells().map(|w| w.to_string()).collect();
        assert_eq!(names, ["B2"]);
        assert_eq!(table.ignored_columns, ["A01"]);
    }
}
