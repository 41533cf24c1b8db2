//! Layout value types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Presentation of the page set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutType {
    /// Nothing to show (empty datasource).
    None,
    /// Thumbnail grid of rows × columns.
    Grid,
    /// One page per row, scrolled vertically.
    SingleScrollable,
    /// Exactly one page at a time.
    SinglePage,
}

impl LayoutType {
    /// Name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::None => "none",
            LayoutType::Grid => "grid",
            LayoutType::SingleScrollable => "single-scrollable",
            LayoutType::SinglePage => "single-page",
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown layout name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown layout '{0}' (expected grid, single-scrollable or single-page)")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutType {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(LayoutType::None),
            "grid" => Ok(LayoutType::Grid),
            "single-scrollable" | "scrollable" => Ok(LayoutType::SingleScrollable),
            "single-page" | "page" => Ok(LayoutType::SinglePage),
            other => Err(UnknownLayout(other.to_string())),
        }
    }
}

/// Explicit grid shape overriding the configured base grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridOverride {
    /// Rows of pages.
    pub rows: u32,
    /// Columns of pages.
    pub columns: u32,
}

impl GridOverride {
    /// Grid of `rows × columns` pages.
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }
}

/// Base grid from configuration. Not user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBase {
    /// Default rows.
    pub rows: u32,
    /// Default columns.
    pub columns: u32,
}

impl GridBase {
    /// Base grid of `rows × columns`.
    pub fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of cells. Widened so any pair of `u32` sides fits.
    pub fn cells(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }
}

impl Default for GridBase {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 4,
        }
    }
}

/// The layout part of the view state: type plus optional grid override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSelection {
    /// Selected layout.
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    /// Grid shape, for `Grid` only.
    #[serde(default, rename = "override", skip_serializing_if = "Option::is_none")]
    pub grid_override: Option<GridOverride>,
}

impl LayoutSelection {
    /// Selection without a grid override.
    pub fn new(layout_type: LayoutType) -> Self {
        Self {
            layout_type,
            grid_override: None,
        }
    }

    /// Grid selection with an explicit shape.
    pub fn grid(grid_override: GridOverride) -> Self {
        Self {
            layout_type: LayoutType::Grid,
            grid_override: Some(grid_override),
        }
    }
}

/// Flow direction of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Pages flow left to right.
    Horizontal,
    /// Pages flow top to bottom.
    Vertical,
}

/// Toolbar actions the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolbarItem {
    /// Zoom in by one step.
    ZoomIn,
    /// Zoom out by one step.
    ZoomOut,
    /// Rotate counter-clockwise.
    RotateLeft,
    /// Rotate clockwise.
    RotateRight,
    /// Toggle full screen.
    FullScreen,
    /// Toggle best fit.
    BestFit,
    /// Switch to the grid.
    LayoutGrid,
    /// Switch to the scrollable single view.
    LayoutSingleScrollable,
    /// Switch to one page at a time.
    LayoutSinglePage,
    /// Toggle the text layer.
    TextLayer,
    /// Previous and next page.
    PageNavigation,
}

/// Concrete layout derived from the view state and the page count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    /// Layout kind, `None` when there are no pages.
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    /// Visible rows.
    pub rows: u32,
    /// Visible columns.
    pub columns: u32,
    /// Page flow.
    pub direction: Direction,
    /// Toolbar actions offered in this layout.
    pub available_actions: BTreeSet<ToolbarItem>,
}

impl Layout {
    /// Whether `item` is offered in this layout.
    pub fn is_action_available(&self, item: ToolbarItem) -> bool {
        self.available_actions.contains(&item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_base_cells_do_not_overflow() {
        assert_eq!(GridBase::default().cells(), 12);
        let huge = GridBase::new(u32::MAX, u32::MAX);
        assert_eq!(huge.cells(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn layout_type_parses_names_and_aliases() {
        assert_eq!("grid".parse::<LayoutType>(), Ok(LayoutType::Grid));
        assert_eq!(
            "scrollable".parse::<LayoutType>(),
            Ok(LayoutType::SingleScrollable)
        );
        assert_eq!("page".parse::<LayoutType>(), Ok(LayoutType::SinglePage));
        assert!("carousel".parse::<LayoutType>().is_err());
    }

    #[test]
    fn layout_type_display_round_trips_through_from_str() {
        for t in [
            LayoutType::None,
            LayoutType::Grid,
            LayoutType::SingleScrollable,
            LayoutType::SinglePage,
        ] {
            assert_eq!(t.to_string().parse::<LayoutType>(), Ok(t));
        }
    }

    #[test]
    fn layout_selection_serializes_type_and_override() {
        let sel = LayoutSelection::grid(GridOverride::new(2, 3));
        let json = serde_json::to_string(&sel).expect("serializable");
        assert_eq!(json, r#"{"type":"grid","override":{"rows":2,"columns":3}}"#);
    }
}
