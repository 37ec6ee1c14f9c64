/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmployeeDataset (+ PromotionRiskScore via score)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ EmployeeDataset  │  Vec<EmployeeRecord>, category domains
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  department / risk / cluster → EmployeeView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  counts, means, value counts, histogram
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod score;
