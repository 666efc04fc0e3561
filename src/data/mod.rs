//! Data layer: tables, model mappings, column naming and loading.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ Models<Table> │  model name → Table, insertion ordered
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ columns   │  `<well>_<mode>_true` / `_pred` lookup
//!   └──────────┘
//! ```

pub mod columns;
pub mod loader;
pub mod model;

pub use columns::{ProductionMode, Side};
pub use model::{Models, Table, TableError};
