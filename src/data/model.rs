use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// WellAddress – one position on the 96-well plate
// ---------------------------------------------------------------------------

/// Number of plate rows (A–H).
pub const PLATE_ROWS: u8 = 8;
/// Number of plate columns (1–12).
pub const PLATE_COLS: u8 = 12;

/// A single well on an 8×12 microplate, e.g. `A1` or `H12`.
///
/// Ordering is row-major (A1..A12, B1..B12, …, H12), which is also the order
/// the plate map is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WellAddress {
    /// Row index 0–7 (A–H).
    row: u8,
    /// Column number 1–12.
    col: u8,
}

impl WellAddress {
    /// Build from a row letter and column number; `None` if out of range.
    pub fn new(row_letter: char, col: u8) -> Option<Self> {
        let row = (row_letter as u32).checked_sub('A' as u32)?;
        if row >= u32::from(PLATE_ROWS) || col < 1 || col > PLATE_COLS {
            return None;
        }
        Some(WellAddress {
            row: row as u8,
            col,
        })
    }

    /// Row letter, `'A'..='H'`.
    pub fn row_letter(&self) -> char {
        (b'A' + self.row) as char
    }

    /// Zero-based row index (A = 0).
    pub fn row_index(&self) -> usize {
        usize::from(self.row)
    }

    /// Column number, 1–12.
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Zero-based column index (1 = 0).
    pub fn col_index(&self) -> usize {
        usize::from(self.col - 1)
    }

    /// All 96 addresses in row-major order.
    pub fn all() -> impl Iterator<Item = WellAddress> {
        (0..PLATE_ROWS).flat_map(|row| (1..=PLATE_COLS).map(move |col| WellAddress { row, col }))
    }
}

impl fmt::Display for WellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_letter(), self.col)
    }
}

/// Parse error for [`WellAddress`]; carries no detail because non-matching
/// column names are silently ignored, never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWellAddress;

impl FromStr for WellAddress {
    type Err = InvalidWellAddress;

    /// Accepts only the exact rendering of an address: `"A1"` yes, `"A01"`,
    /// `"a1"`, `"I3"`, `"A13"` no.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let row_letter = chars.next().ok_or(InvalidWellAddress)?;
        let col: u8 = chars.as_str().parse().map_err(|_| InvalidWellAddress)?;
        let addr = WellAddress::new(row_letter, col).ok_or(InvalidWellAddress)?;
        // Reject zero-padded spellings such as "A01".
        if addr.to_string() != s {
            return Err(InvalidWellAddress);
        }
        Ok(addr)
    }
}

// ---------------------------------------------------------------------------
// Plate grid model
// ---------------------------------------------------------------------------

/// Which of the 96 addresses are backed by a column in the loaded table.
///
/// Pure function of the column names (timepoint column excluded by the
/// caller): an address is active iff a column named exactly `"{row}{col}"`
/// exists. Result is in row-major order with no duplicates. Column names that
/// match no address are ignored.
pub fn active_wells<S: AsRef<str>>(column_names: &[S]) -> Vec<WellAddress> {
    WellAddress::all()
        .filter(|addr| {
            let name = addr.to_string();
            column_names.iter().any(|c| c.as_ref() == name)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// GrowthTable – the loaded dataset
// ---------------------------------------------------------------------------

/// A parsed growth-curve table: one shared timepoint axis plus one numeric
/// series per active well. Read-only after load.
#[derive(Debug, Clone)]
pub struct GrowthTable {
    /// Timestamps in seconds, length T ≥ 1. Assumed non-decreasing but not
    /// enforced.
    pub timepoints: Vec<f64>,
    /// Series per active well, each of length T. BTreeMap keeps row-major
    /// iteration order for free via `WellAddress: Ord`.
    pub wells: BTreeMap<WellAddress, Vec<f64>>,
    /// Columns that are neither the timepoint column nor a well address.
    /// Kept only for the status line.
    pub ignored_columns: Vec<String>,
}

impl GrowthTable {
    /// Number of timepoints (T).
    pub fn len(&self) -> usize {
        self.timepoints.len()
    }

    /// Whether the table holds no timepoints.
    pub fn is_empty(&self) -> bool {
        self.timepoints.is_empty()
    }

    /// Active addresses in row-major order.
    pub fn active_wells(&self) -> impl Iterator<Item = WellAddress> + '_ {
        self.wells.keys().copied()
    }

    /// Whether the table has a series for the given address.
    pub fn is_active(&self, well: WellAddress) -> bool {
        self.wells.contains_key(&well)
    }
}
