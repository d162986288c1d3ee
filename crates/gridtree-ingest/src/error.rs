//! Error types for definition ingestion.
//!
//! The taxonomy distinguishes per-row failures, which the error policy may
//! recover from by skipping the row, from source-level failures, which are
//! always fatal for the source they occur in.

use std::path::PathBuf;

use thiserror::Error;

/// A failure confined to a single row.
///
/// Under [`crate::ErrorPolicy::ContinueOnErrors`] the row is skipped with a
/// warning; under [`crate::ErrorPolicy::Strict`] the failure aborts the
/// whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// Non-numeric, duplicate, or otherwise invalid reference id.
    #[error("invalid group identifier '{value}' at row {row}, column {column}")]
    MalformedIdentifier { row: u32, column: u32, value: String },

    /// Parent id does not reference a group declared on an earlier row.
    #[error("parent id {parent} at row {row} does not reference an already declared group")]
    UnresolvedParent { row: u32, parent: u32 },

    /// Group row with an empty name cell.
    #[error("missing group name at row {row}, column {column}")]
    MissingGroupName { row: u32, column: u32 },

    /// Attribute row with an empty name cell.
    #[error("missing attribute name at row {row}, column {column}")]
    MissingAttributeName { row: u32, column: u32 },
}

/// A failure that aborts processing of a whole source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source file could not be opened or read.
    #[error("failed to open {path}: {message}")]
    Open { path: PathBuf, message: String },

    /// No grid reader exists for this file extension.
    #[error("unsupported source format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// The workbook has no sheet with the configured definition name.
    #[error(
        "sheet '{sheet}' not found in {source_id}; provide the object definition in a sheet with that name"
    )]
    SheetNotFound { source_id: String, sheet: String },

    /// The object name cell is empty.
    #[error(
        "could not find the object name at [{row}, {column}] in {source_id}; check the layout file"
    )]
    MissingObjectName {
        source_id: String,
        row: u32,
        column: u32,
    },

    /// The object description cell is empty.
    #[error(
        "could not find the object description at [{row}, {column}] in {source_id}; check the layout file"
    )]
    MissingObjectDescription {
        source_id: String,
        row: u32,
        column: u32,
    },

    /// The scan completed without ingesting a single attribute. This signals
    /// a layout/configuration mismatch rather than bad data, so it is fatal
    /// regardless of policy.
    #[error(
        "{source_id}: definition produced no attributes; check data_start_row and data_start_column in the layout"
    )]
    EmptyDefinition { source_id: String },

    /// A row-level failure promoted to a run abort under the strict policy.
    #[error("{source_id}: {error}")]
    Row {
        source_id: String,
        #[source]
        error: RowError,
    },

    #[error(transparent)]
    Model(#[from] gridtree_model::ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_error_display_names_the_cell() {
        let err = RowError::MalformedIdentifier {
            row: 9,
            column: 8,
            value: "first".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid group identifier 'first' at row 9, column 8"
        );
    }

    #[test]
    fn strict_promotion_keeps_the_row_error_as_source() {
        let err = SourceError::Row {
            source_id: "customer.xlsx".to_string(),
            error: RowError::UnresolvedParent { row: 12, parent: 3 },
        };
        assert!(err.to_string().starts_with("customer.xlsx: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn structural_errors_carry_the_source_identity_as_plain_context() {
        let err = SourceError::EmptyDefinition {
            source_id: "empty.xlsx".to_string(),
        };
        assert!(err.to_string().starts_with("empty.xlsx: "));
        // The source identity is display context only, not an error cause.
        assert!(std::error::Error::source(&err).is_none());

        let err = SourceError::SheetNotFound {
            source_id: "customer.xlsx".to_string(),
            sheet: "Definition".to_string(),
        };
        assert!(err.to_string().contains("customer.xlsx"));
        assert!(std::error::Error::source(&err).is_none());
    }
}
