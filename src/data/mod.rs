/// Data layer: cell types, CSV loading, and row filtering.
///
/// Architecture:
/// ```text
///  data/data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  lazy CSV reader → Record (coerced cells)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ SubjectRow  │  typed view, checked against the header
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  OSPAN group predicate
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
