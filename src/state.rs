use std::collections::BTreeSet;

use crate::color::SetPalette;
use crate::data::model::{GrowthTable, WellAddress};
use crate::data::selection::SelectionState;
use crate::data::tidy::{self, TidyRow};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which front end drives the grouping engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Click wells on the plate map to toggle them, then commit.
    PlateMap,
    /// Tick wells in a list and commit the whole batch at once.
    PickList,
}

/// The full UI state, independent of rendering. Session-scoped: a new file
/// or a reset reinitialises the grouping state, nothing persists on disk.
pub struct AppState {
    /// Loaded table (None until the user loads a file).
    pub table: Option<GrowthTable>,

    /// Pending + committed replicate sets.
    pub selection: SelectionState,

    /// Set / highlight colours.
    pub palette: SetPalette,

    /// Active interaction mode.
    pub mode: SelectionMode,

    /// Checked wells in pick-list mode (row-major by construction).
    pub picks: BTreeSet<WellAddress>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Warnings from the last export, one line each.
    pub export_warnings: Vec<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            selection: SelectionState::default(),
            palette: SetPalette::default(),
            mode: SelectionMode::PlateMap,
            picks: BTreeSet::new(),
            status_message: None,
            export_warnings: Vec::new(),
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table; grouping state starts fresh.
    pub fn set_table(&mut self, table: GrowthTable) {
        self.selection = SelectionState::default();
        self.picks.clear();
        self.export_warnings.clear();
        self.table = Some(table);
        self.status_message = None;
        self.loading = false;
    }

    /// Tick or untick a well in pick-list mode.
    pub fn toggle_pick(&mut self, well: WellAddress) {
        if !self.picks.remove(&well) {
            self.picks.insert(well);
        }
    }

    /// "Add Replicate Set": commit whatever the active mode has selected.
    pub fn add_replicate_set(&mut self) {
        match self.mode {
            SelectionMode::PlateMap => self.selection.commit_pending(),
            SelectionMode::PickList => {
                let picks: Vec<WellAddress> = self.picks.iter().copied().collect();
                self.selection.commit_wells(picks);
                self.picks.clear();
            }
        }
    }

    /// "Reset All Selections": clears committed sets, pending wells and picks.
    pub fn reset_selections(&mut self) {
        self.selection.reset_all();
        self.picks.clear();
        self.export_warnings.clear();
    }

    /// Run the aggregation for export. Warnings land in `export_warnings`;
    /// returns None when no table is loaded.
    pub fn run_export(&mut self) -> Option<Vec<TidyRow>> {
        let table = self.table.as_ref()?;
        let report = tidy::aggregate(self.selection.committed(), table);
        self.export_warnings = report.warnings.iter().map(ToString::to_string).collect();
        Some(report.rows)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn well(s: &str) -> WellAddress {
        s.parse().unwrap()
    }

    fn one_well_table() -> GrowthTable {
        GrowthTable {
            timepoints: vec![0.0, 1.0],
            wells: BTreeMap::from([(well("A1"), vec![1.0, 2.0])]),
            ignored_columns: Vec::new(),
        }
    }

    #[test]
    fn both_modes_commit_through_the_same_engine() {
        let mut state = AppState::default();

        state.mode = SelectionMode::PlateMap;
        state.selection.toggle_pending(well("A1"));
        state.add_replicate_set();

        state.mode = SelectionMode::PickList;
        state.toggle_pick(well("B1"));
        state.toggle_pick(well("B2"));
        state.add_replicate_set();

        let committed = state.selection.committed();
        assert_eq!(committed.len(), 2);
        assert_eq!(committed[0].label(), "A1");
        assert_eq!(committed[1].wells(), [well("B1"), well("B2")]);
        assert!(state.picks.is_empty());
    }

    #[test]
    fn empty_batch_commit_is_a_no_op() {
        let mut state = AppState::default();
        state.mode = SelectionMode::PickList;
        state.add_replicate_set();
        assert!(state.selection.committed().is_empty());
    }

    #[test]
    fn export_after_reset_is_empty() {
        let mut state = AppState::default();
        state.set_table(one_well_table());
        state.selection.commit_wells([well("A1")]);
        state.reset_selections();

        let rows = state.run_export().unwrap();
        assert!(rows.is_empty());
        assert!(state.export_warnings.is_empty());
    }

    #[test]
    fn export_surfaces_mismatch_warnings() {
        let mut state = AppState::default();
        state.set_table(one_well_table());
        state.selection.commit_wells([well("A1"), well("A2")]);

        let rows = state.run_export().unwrap();
        assert!(rows.is_empty());
        assert_eq!(state.export_warnings.len(), 1);
        assert!(state.export_warnings[0].contains("Mismatch"));
    }

    #[test]
    fn loading_a_table_resets_the_session() {
        let mut state = AppState::default();
        state.selection.commit_wells([well("A1")]);
        state.toggle_pick(well("B1"));
        state.set_table(one_well_table());
        assert!(state.selection.committed().is_empty());
        assert!(state.picks.is_empty());
    }
}
