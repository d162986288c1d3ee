//! Table-to-tree ingestion.
//!
//! Reads a flat sequence of labeled rows from a grid source and
//! reconstructs a typed object tree: grouping nodes linked by reference
//! ids and terminal attribute nodes attached by the continuation rule.
//! One [`IngestionDriver`] owns the accumulating model for a whole run and
//! applies the error policy row by row.

pub mod builder;
pub mod classify;
pub mod driver;
pub mod error;
pub mod grid;
pub mod layout;
pub mod typespec;

pub use builder::{GroupOutcome, TreeBuilder};
pub use classify::{RowKind, classify};
pub use driver::{ErrorPolicy, IngestionDriver, RunReport, SourceSummary};
pub use error::{Result, RowError, SourceError};
pub use grid::{CsvGrid, GridSource, MemoryGrid, XlsxGrid, open_grid};
pub use layout::{LayoutError, SheetLayout};
pub use typespec::{LengthSpec, resolve_length_spec};
