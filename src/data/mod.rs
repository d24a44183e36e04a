/// Data layer: plate model, loading, grouping, and tidy aggregation.
///
/// Architecture:
/// ```text
///  growth-curve .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → GrowthTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ GrowthTable │  timepoints + per-well series (active wells only)
///   └────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ selection   │  pending toggles / batch picks → committed ReplicateSets
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   tidy    │  per-set mean/SD per timepoint → tidy_output.csv
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod selection;
pub mod tidy;
