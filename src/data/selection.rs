use std::collections::BTreeSet;

use super::model::WellAddress;

// ---------------------------------------------------------------------------
// ReplicateSet – one committed group of wells
// ---------------------------------------------------------------------------

/// A user-defined group of wells treated as repeated measurements of one
/// condition. Insertion-ordered and duplicate-free; never empty.
///
/// Sets carry no name: on export the condition label is simply the first
/// member's address, a quirk kept from the tool's original behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicateSet {
    wells: Vec<WellAddress>,
}

impl ReplicateSet {
    /// Build from a candidate list, dropping duplicates while keeping the
    /// first occurrence's position. Returns `None` for an empty result.
    pub fn from_wells<I: IntoIterator<Item = WellAddress>>(wells: I) -> Option<Self> {
        let mut seen = BTreeSet::new();
        let wells: Vec<WellAddress> = wells
            .into_iter()
            .filter(|w| seen.insert(*w))
            .collect();
        if wells.is_empty() {
            None
        } else {
            Some(ReplicateSet { wells })
        }
    }

    /// Member addresses in stored order.
    pub fn wells(&self) -> &[WellAddress] {
        &self.wells
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    /// Always false by construction; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Whether the given well belongs to this set.
    pub fn contains(&self, well: WellAddress) -> bool {
        self.wells.contains(&well)
    }

    /// Condition label: the first member's address as text.
    pub fn label(&self) -> String {
        self.wells[0].to_string()
    }
}

// ---------------------------------------------------------------------------
// SelectionState – session-scoped grouping state
// ---------------------------------------------------------------------------

/// All grouping state for one session: the wells highlighted but not yet
/// committed, and the ordered committed replicate sets.
///
/// Two front ends drive this: the plate map toggles `pending` well by well and
/// commits it, while the pick list hands a whole candidate list to
/// [`commit_wells`](SelectionState::commit_wells) at once. Committed sets can
/// only be cleared wholesale; there is no per-set delete or edit.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pending: BTreeSet<WellAddress>,
    committed: Vec<ReplicateSet>,
}

impl SelectionState {
    /// Flip a well in or out of the pending selection. Double-toggling is a
    /// no-op. Inactive addresses are tracked like any other; they simply have
    /// no visual effect and no series behind them.
    pub fn toggle_pending(&mut self, well: WellAddress) {
        if !self.pending.remove(&well) {
            self.pending.insert(well);
        }
    }

    /// Whether the well is currently highlighted.
    pub fn is_pending(&self, well: WellAddress) -> bool {
        self.pending.contains(&well)
    }

    /// Highlighted wells in row-major order.
    pub fn pending(&self) -> impl Iterator<Item = WellAddress> + '_ {
        self.pending.iter().copied()
    }

    /// Number of highlighted wells.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Freeze the pending selection as a new committed set (members in
    /// row-major order, the stable order the pending set maintains) and clear
    /// it. No-op when nothing is pending.
    pub fn commit_pending(&mut self) {
        let wells: Vec<WellAddress> = self.pending.iter().copied().collect();
        if let Some(set) = ReplicateSet::from_wells(wells) {
            self.committed.push(set);
            self.pending.clear();
        }
    }

    /// Batch front end: commit a whole candidate list directly as one set,
    /// bypassing `pending`. No-op for an empty list.
    pub fn commit_wells<I: IntoIterator<Item = WellAddress>>(&mut self, wells: I) {
        if let Some(set) = ReplicateSet::from_wells(wells) {
            self.committed.push(set);
        }
    }

    /// Committed sets in commit order.
    pub fn committed(&self) -> &[ReplicateSet] {
        &self.committed
    }

    /// Index of the committed set whose colour the well displays. When sets
    /// overlap the later commit wins, matching the original colour-map
    /// overwrite order.
    pub fn set_index_for(&self, well: WellAddress) -> Option<usize> {
        self.committed
            .iter()
            .rposition(|set| set.contains(well))
    }

    /// Clear everything: pending and committed alike.
    pub fn reset_all(&mut self) {
        self.pending.clear();
        self.committed.clear();
    }
}
