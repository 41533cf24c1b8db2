//! Layout calculator.
//!
//! Pure functions mapping the selected layout, the page count and zoom
//! changes to a concrete [`Layout`]. Consumed by the viewer state store.
//!
//! - `types`: layout types, grid shapes, toolbar items
//! - `calculator`: `compute_layout` and the multi-document grid override
//! - `density`: grid re-density and scrollable-to-grid promotion under zoom

pub mod calculator;
pub mod density;
pub mod types;

pub use calculator::{available_actions, compute_layout, grid_override_for};
pub use density::{redensify_grid, should_promote_to_grid, GridDensity};
pub use types::{
    Direction, GridBase, GridOverride, Layout, LayoutSelection, LayoutType, ToolbarItem,
    UnknownLayout,
};
