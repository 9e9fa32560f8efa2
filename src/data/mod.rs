/// Data layer: record types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → QuakeDataset (bad cells → None)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ QuakeDataset  │  Vec<QuakeRecord>, read-only after load
///   └──────────────┘
///        │   threshold
///        ▼
///   ┌──────────┐     ┌───────────┐
///   │  filter   │ ──▶ │ aggregate  │  depth buckets → mean magnitude
///   └──────────┘     └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  scatter / map / timeline / bar projections
///   └──────────┘
/// ```

pub mod aggregate;
pub mod bucket;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod view;
