//! Data layer: core types, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file, split Sector → Table   (memoised by `cache`)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  apply Location / Industry selections → new Table
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌───────────┐  ┌──────────┐
//!   │ aggregate │  │ summary  │  per-group series / scalar rollups
//!   └───────────┘  └──────────┘
//! ```

pub mod aggregate;
pub mod cache;
pub mod columns;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
