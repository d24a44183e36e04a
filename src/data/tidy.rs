use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;

use super::model::GrowthTable;
use super::selection::ReplicateSet;

/// Default file name offered for the export artifact.
pub const EXPORT_FILE_NAME: &str = "tidy_output.csv";

// ---------------------------------------------------------------------------
// Tidy output types
// ---------------------------------------------------------------------------

/// One row of the tidy export: one (replicate set × timepoint) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyRow {
    /// Timestamp in seconds, rounded to 3 decimals.
    #[serde(rename = "Time")]
    pub time: f64,
    /// Condition label: the set's first member address.
    #[serde(rename = "Condition")]
    pub condition: String,
    /// Mean across member wells at this timepoint.
    #[serde(rename = "Mean")]
    pub mean: f64,
    /// Population standard deviation (divisor = member count).
    #[serde(rename = "SD")]
    pub sd: f64,
}

/// Non-fatal problem hit while aggregating one set; the set is skipped and
/// the export continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportWarning {
    #[error(
        "Mismatch in replicate data size for set '{label}': \
         expected {expected} series, found {found}"
    )]
    ReplicateSizeMismatch {
        label: String,
        expected: usize,
        found: usize,
    },
}

/// Aggregation result: the tidy rows plus any per-set warnings.
#[derive(Debug, Clone, Default)]
pub struct TidyReport {
    pub rows: Vec<TidyRow>,
    pub warnings: Vec<ExportWarning>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Turn the committed replicate sets into tidy rows.
///
/// Sets are processed in commit order; within a set, rows follow the
/// timepoint order. A set whose members do not all resolve to a series in the
/// table is skipped with a [`ExportWarning::ReplicateSizeMismatch`]; nothing
/// aborts the export. Export never mutates state.
pub fn aggregate(committed: &[ReplicateSet], table: &GrowthTable) -> TidyReport {
    let mut report = TidyReport::default();

    for set in committed {
        if set.is_empty() {
            continue;
        }

        let members: Vec<&[f64]> = set
            .wells()
            .iter()
            .filter_map(|w| table.wells.get(w).map(Vec::as_slice))
            .collect();

        if members.len() != set.len() {
            let warning = ExportWarning::ReplicateSizeMismatch {
                label: set.label(),
                expected: set.len(),
                found: members.len(),
            };
            log::warn!("{warning}");
            report.warnings.push(warning);
            continue;
        }

        let label = set.label();
        for (t, &time) in table.timepoints.iter().enumerate() {
            let values: Vec<f64> = members.iter().map(|series| series[t]).collect();
            report.rows.push(TidyRow {
                time: round3(time),
                condition: label.clone(),
                mean: mean(&values),
                sd: population_sd(&values),
            });
        }
    }

    report
}

/// Serialize tidy rows as CSV with the `Time,Condition,Mean,SD` header.
pub fn write_csv<W: Write>(rows: &[TidyRow], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row).context("writing tidy row")?;
    }
    writer.flush().context("flushing tidy CSV")?;
    Ok(())
}

/// Tidy rows as in-memory CSV bytes, ready for a save dialog.
pub fn to_csv_bytes(rows: &[TidyRow]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    Ok(buf)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_sd(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::data::model::WellAddress;
    use crate::data::selection::SelectionState;

    fn well(s: &str) -> WellAddress {
        s.parse().unwrap()
    }

    fn table(timepoints: &[f64], series: &[(&str, &[f64])]) -> GrowthTable {
        let wells: BTreeMap<WellAddress, Vec<f64>> = series
            .iter()
            .map(|&(name, values)| (well(name), values.to_vec()))
            .collect();
        GrowthTable {
            timepoints: timepoints.to_vec(),
            wells,
            ignored_columns: Vec::new(),
        }
    }

    #[test]
    fn concrete_two_well_scenario() {
        let table = table(
            &[0.0, 3600.0],
            &[("A1", &[1.0, 2.0]), ("A2", &[3.0, 4.0])],
        );
        let mut state = SelectionState::default();
        state.commit_wells([well("A1"), well("A2")]);

        let report = aggregate(state.committed(), &table);
        assert!(report.warnings.is_empty());
        assert_eq!(
            report.rows,
            [
                TidyRow {
                    time: 0.0,
                    condition: "A1".into(),
                    mean: 2.0,
                    sd: 1.0
                },
                TidyRow {
                    time: 3600.0,
                    condition: "A1".into(),
                    mean: 3.0,
                    sd: 1.0
                },
            ]
        );
    }

    #[test]
    fn identical_members_have_zero_sd() {
        let table = table(
            &[0.0, 1.0, 2.0],
            &[("B1", &[5.0, 6.0, 7.0]), ("B2", &[5.0, 6.0, 7.0])],
        );
        let mut state = SelectionState::default();
        state.commit_wells([well("B1"), well("B2")]);

        let report = aggregate(state.committed(), &table);
        for (row, expected_mean) in report.rows.iter().zip([5.0, 6.0, 7.0]) {
            assert_eq!(row.mean, expected_mean);
            assert_eq!(row.sd, 0.0);
        }
    }

    #[test]
    fn reset_then_export_is_empty() {
        let table = table(&[0.0], &[("A1", &[1.0])]);
        let mut state = SelectionState::default();
        state.commit_wells([well("A1")]);
        state.reset_all();

        let report = aggregate(state.committed(), &table);
        assert!(report.rows.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn mismatched_set_is_skipped_with_warning() {
        let table = table(&[0.0, 1.0], &[("A1", &[1.0, 2.0])]);
        let mut state = SelectionState::default();
        state.commit_wells([well("A1"), well("A2")]);
        state.commit_wells([well("A1")]);

        let report = aggregate(state.committed(), &table);
        // First set skipped entirely, second set exported.
        assert_eq!(report.rows.len(), 2);
        assert!(report.rows.iter().all(|r| r.condition == "A1"));
        assert_eq!(
            report.warnings,
            [ExportWarning::ReplicateSizeMismatch {
                label: "A1".into(),
                expected: 2,
                found: 1
            }]
        );
    }

    #[test]
    fn rows_preserve_set_then_timepoint_order() {
        let table = table(
            &[0.0, 1.0],
            &[("A1", &[1.0, 1.0]), ("B1", &[2.0, 2.0]), ("C1", &[3.0, 3.0])],
        );
        let mut state = SelectionState::default();
        state.commit_wells([well("C1")]);
        state.commit_wells([well("A1"), well("B1")]);

        let report = aggregate(state.committed(), &table);
        let order: Vec<(f64, &str)> = report
            .rows
            .iter()
            .map(|r| (r.time, r.condition.as_str()))
            .collect();
        assert_eq!(
            order,
            [(0.0, "C1"), (1.0, "C1"), (0.0, "A1"), (1.0, "A1")]
        );
    }

    #[test]
    fn time_is_rounded_to_three_decimals() {
        let table = table(&[0.123456], &[("A1", &[1.0])]);
        let mut state = SelectionState::default();
        state.commit_wells([well("A1")]);

        let report = aggregate(state.committed(), &table);
        assert_eq!(report.rows[0].time, 0.123);
    }

    #[test]
    fn csv_output_has_expected_header_and_rows() {
        let rows = [TidyRow {
            time: 0.0,
            condition: "A1".into(),
            mean: 2.0,
            sd: 1.0,
        }];
        let bytes = to_csv_bytes(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Time,Condition,Mean,SD"));
        assert_eq!(lines.next(), Some("0.0,A1,2.0,1.0"));
        assert_eq!(lines.next(), None);
    }
}
