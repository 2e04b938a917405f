/// Data layer: core types, loading, aggregation and sorting.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet / http(s) URL
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalaryDataset │  Vec<JobRecord>, immutable after load
///   └──────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  YearSummary / TitleCount / TrendPoint
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   sort    │  SortState → row order of the summary table
///   └──────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
pub mod sort;
