/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (column kinds inferred once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, column schema, shared read-only
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  school type + score range → FilteredView
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
