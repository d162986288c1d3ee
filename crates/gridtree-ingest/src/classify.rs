//! Row classification.
//!
//! One row is either a group declaration, an attribute definition, or the
//! end of the data block. Classification inspects cells only; it never
//! mutates anything.

use crate::error::RowError;
use crate::grid::{GridSource, non_blank};
use crate::layout::SheetLayout;

/// Outcome of classifying one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// The start column is empty: the data block has ended.
    EndOfData,
    /// The check column matches the group keyword. `id` is `None` when the
    /// id column is empty (the "no explicit id" sentinel).
    Group { id: Option<u32> },
    /// Any other non-empty row.
    Attribute,
}

/// Classify `row`.
///
/// Fails with [`RowError::MalformedIdentifier`] when a group row carries a
/// non-numeric id.
pub fn classify(
    grid: &dyn GridSource,
    layout: &SheetLayout,
    row: u32,
) -> Result<RowKind, RowError> {
    if grid.cell(row, layout.data_start_column).is_none() {
        return Ok(RowKind::EndOfData);
    }

    let check = grid.cell(row, layout.check_column).unwrap_or_default();
    let keyword = layout.group_keyword.trim();
    if !check.trim().eq_ignore_ascii_case(keyword) {
        return Ok(RowKind::Attribute);
    }

    let id = match non_blank(grid.cell(row, layout.id_column)) {
        None => None,
        Some(raw) => Some(raw.parse::<u32>().map_err(|_| RowError::MalformedIdentifier {
            row,
            column: layout.id_column,
            value: raw,
        })?),
    };
    Ok(RowKind::Group { id })
}

/// Resolve the parent reference id for a group row: the parent-id column if
/// present and numeric, else the root id 0.
pub fn resolve_parent_id(grid: &dyn GridSource, layout: &SheetLayout, row: u32) -> u32 {
    non_blank(grid.cell(row, layout.parent_id_column))
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(0)
}

/// Explicit group target for an attribute row.
///
/// `None` when the parent-id column is empty (continuation row). A present
/// but non-numeric value resolves to the root, matching the parent-id rule.
pub fn explicit_attribute_target(
    grid: &dyn GridSource,
    layout: &SheetLayout,
    row: u32,
) -> Option<u32> {
    non_blank(grid.cell(row, layout.parent_id_column))
        .map(|raw| raw.parse::<u32>().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MemoryGrid;

    fn layout() -> SheetLayout {
        SheetLayout {
            data_start_row: 1,
            data_start_column: 1,
            check_column: 2,
            id_column: 3,
            parent_id_column: 4,
            name_column: 5,
            ..SheetLayout::default()
        }
    }

    #[test]
    fn empty_start_column_ends_the_scan() {
        let grid = MemoryGrid::from_rows("test", &[&["", "LVL", "1"]]);
        assert_eq!(classify(&grid, &layout(), 1).unwrap(), RowKind::EndOfData);
    }

    #[test]
    fn keyword_match_is_case_insensitive_and_trimmed() {
        let grid = MemoryGrid::from_rows("test", &[&["x", "  lvl ", "1"]]);
        assert_eq!(
            classify(&grid, &layout(), 1).unwrap(),
            RowKind::Group { id: Some(1) }
        );
    }

    #[test]
    fn group_row_without_id_yields_sentinel() {
        let grid = MemoryGrid::from_rows("test", &[&["x", "LVL", ""]]);
        assert_eq!(
            classify(&grid, &layout(), 1).unwrap(),
            RowKind::Group { id: None }
        );
    }

    #[test]
    fn non_numeric_id_on_group_row_is_malformed() {
        let grid = MemoryGrid::from_rows("test", &[&["x", "LVL", "first"]]);
        let err = classify(&grid, &layout(), 1).unwrap_err();
        assert_eq!(
            err,
            RowError::MalformedIdentifier {
                row: 1,
                column: 3,
                value: "first".to_string(),
            }
        );
    }

    #[test]
    fn other_rows_are_attributes() {
        let grid = MemoryGrid::from_rows("test", &[&["x", "", "", "", "Amount"]]);
        assert_eq!(classify(&grid, &layout(), 1).unwrap(), RowKind::Attribute);
    }

    #[test]
    fn parent_id_defaults_to_root() {
        let grid = MemoryGrid::from_rows("test", &[&["x", "LVL", "1", ""], &["x", "LVL", "2", "abc"]]);
        assert_eq!(resolve_parent_id(&grid, &layout(), 1), 0);
        assert_eq!(resolve_parent_id(&grid, &layout(), 2), 0);
    }

    #[test]
    fn explicit_target_is_absent_for_continuation_rows() {
        let grid = MemoryGrid::from_rows("test", &[&["x", "", "", "2"], &["x", "", "", ""]]);
        assert_eq!(explicit_attribute_target(&grid, &layout(), 1), Some(2));
        assert_eq!(explicit_attribute_target(&grid, &layout(), 2), None);
    }
}
