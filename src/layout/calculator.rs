//! Pure layout computation.

use super::types::{
    Direction, GridBase, GridOverride, Layout, LayoutSelection, LayoutType, ToolbarItem,
};
use std::collections::BTreeSet;

fn clamp_to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Compute the concrete layout for a selection and page count.
///
/// # Contract
/// - `total_pages == 0` always yields `LayoutType::None` with `0 × 0`
/// - Grid: `columns = min(configured_columns, total_pages)` and
///   `rows = min(configured_rows, ceil(total_pages / columns))`, where the
///   configured shape is the selection's override, else `base`
/// - SingleScrollable: one column, one row per page
/// - SinglePage: `1 × 1`
pub fn compute_layout(selection: &LayoutSelection, total_pages: usize, base: GridBase) -> Layout {
    let total = clamp_to_u32(total_pages);
    let layout_type = if total == 0 {
        LayoutType::None
    } else {
        selection.layout_type
    };

    let (rows, columns, direction) = match layout_type {
        LayoutType::None => (0, 0, Direction::Vertical),
        LayoutType::Grid => {
            let configured = selection
                .grid_override
                .unwrap_or(GridOverride::new(base.rows, base.columns));
            let shape = clamp_grid(configured, total);
            (shape.rows, shape.columns, Direction::Horizontal)
        }
        LayoutType::SingleScrollable => (total, 1, Direction::Vertical),
        LayoutType::SinglePage => (1, 1, Direction::Horizontal),
    };

    Layout {
        layout_type,
        rows,
        columns,
        direction,
        available_actions: available_actions(layout_type),
    }
}

/// Clamp a grid shape to the number of pages it has to show.
fn clamp_grid(configured: GridOverride, total: u32) -> GridOverride {
    let columns = configured.columns.min(total);
    let rows = if columns == 0 {
        0
    } else {
        configured.rows.min(total.div_ceil(columns))
    };
    GridOverride::new(rows, columns)
}

/// Grid override used when a multi-document datasource forces the grid.
pub fn grid_override_for(total_pages: usize, base: GridBase) -> GridOverride {
    clamp_grid(
        GridOverride::new(base.rows, base.columns),
        clamp_to_u32(total_pages),
    )
}

/// Toolbar items enabled for a layout type.
pub fn available_actions(layout_type: LayoutType) -> BTreeSet<ToolbarItem> {
    use ToolbarItem::*;

    let items: &[ToolbarItem] = match layout_type {
        LayoutType::None => &[],
        LayoutType::Grid => &[
            ZoomIn,
            ZoomOut,
            FullScreen,
            LayoutGrid,
            LayoutSingleScrollable,
            LayoutSinglePage,
        ],
        LayoutType::SingleScrollable => &[
            ZoomIn,
            ZoomOut,
            RotateLeft,
            RotateRight,
            FullScreen,
            BestFit,
            LayoutGrid,
            LayoutSingleScrollable,
            LayoutSinglePage,
            TextLayer,
        ],
        LayoutType::SinglePage => &[
            ZoomIn,
            ZoomOut,
            RotateLeft,
            RotateRight,
            FullScreen,
            BestFit,
            LayoutGrid,
            LayoutSingleScrollable,
            LayoutSinglePage,
            TextLayer,
            PageNavigation,
        ],
    };
    items.iter().copied().collect()
}

#[cfg(test)]
#[path = "calculator_tests.rs"]
mod tests;
