//! Sheet layout configuration.
//!
//! A [`SheetLayout`] tells the engine where everything lives in a definition
//! sheet: the object name/description cells, the column that marks group
//! rows, the reference-id columns, and the attribute data columns. All
//! coordinates are 1-indexed. Defaults match the layout the original
//! conversion templates shipped with.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse layout file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Name of the worksheet holding the object definition.
    pub sheet_name: String,

    /// Cell coordinates of the object (root group) name.
    pub object_name_row: u32,
    pub object_name_column: u32,

    /// Cell coordinates of the object description.
    pub object_desc_row: u32,
    pub object_desc_column: u32,

    /// Column whose value is compared against `group_keyword` to classify a
    /// row as a group declaration.
    pub check_column: u32,
    /// Column holding the group reference id.
    pub id_column: u32,
    /// Column holding the parent reference id.
    pub parent_id_column: u32,
    /// Keyword marking a group row; compared trimmed and case-insensitively.
    pub group_keyword: String,

    /// First data row, and the column that must be non-empty for the scan to
    /// continue.
    pub data_start_row: u32,
    pub data_start_column: u32,

    /// Attribute data columns.
    pub name_column: u32,
    pub description_column: u32,
    pub type_column: u32,
    /// Length/decimals specification, e.g. "10.2" or "5-".
    pub length_column: u32,
    /// Explicit shared-type reference name.
    pub base_type_column: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Definition".to_string(),
            object_name_row: 2,
            object_name_column: 2,
            object_desc_row: 3,
            object_desc_column: 2,
            check_column: 3,
            id_column: 8,
            parent_id_column: 9,
            group_keyword: "LVL".to_string(),
            data_start_row: 7,
            data_start_column: 2,
            name_column: 7,
            description_column: 6,
            type_column: 8,
            length_column: 9,
            base_type_column: 10,
        }
    }
}

impl SheetLayout {
    /// Load a layout from a JSON file. Missing fields fall back to defaults,
    /// so a layout file only needs to state what differs.
    pub fn from_json_file(path: &Path) -> Result<Self, LayoutError> {
        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| LayoutError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_layout_file_keeps_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, r#"{"group_keyword": "TBL", "id_column": 4}"#).unwrap();

        let layout = SheetLayout::from_json_file(&path).unwrap();
        assert_eq!(layout.group_keyword, "TBL");
        assert_eq!(layout.id_column, 4);
        assert_eq!(layout.sheet_name, "Definition");
        assert_eq!(layout.data_start_row, 7);
    }

    #[test]
    fn malformed_layout_file_reports_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("layout.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = SheetLayout::from_json_file(&path).unwrap_err();
        assert!(matches!(err, LayoutError::Parse { .. }));
    }

    #[test]
    fn layout_round_trips_through_json() {
        let layout = SheetLayout::default();
        let json = serde_json::to_string_pretty(&layout).unwrap();
        let back: SheetLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }
}
