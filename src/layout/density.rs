//! Zoom-driven layout transitions.
//!
//! Zooming in on a grid shows fewer, larger cells; zooming out shows more.
//! Zooming far enough out of the scrollable view switches to the grid.

use super::types::{GridBase, GridOverride};

/// Outcome of re-computing grid density after a zoom change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDensity {
    /// Zoom did not move (or the old zoom was zero).
    Unchanged,
    /// Keep the grid with a new override.
    Grid(GridOverride),
    /// The grid collapsed; switch to the single vertical (scrollable) view.
    FallbackToSingle,
}

/// Scale the grid shape proportionally to a zoom change.
///
/// `p = |new - old| / old` and `factor = p × step / (base.rows × base.columns)`.
/// Rows and columns are multiplied by `1 - factor` and rounded down when
/// zooming in, or by `1 + factor` and rounded up when zooming out. A result
/// with a non-positive side, or a `1 × 1` result, falls back to the single view.
pub fn redensify_grid(
    current: GridOverride,
    old_zoom: u32,
    new_zoom: u32,
    step: u32,
    base: GridBase,
) -> GridDensity {
    if old_zoom == 0 || old_zoom == new_zoom || base.cells() == 0 {
        return GridDensity::Unchanged;
    }

    let change = (new_zoom as f64 - old_zoom as f64).abs() / old_zoom as f64;
    let factor = change * step as f64 / base.cells() as f64;
    let zooming_in = new_zoom > old_zoom;

    let resize = |n: u32| -> i64 {
        let n = n as f64;
        if zooming_in {
            (n * (1.0 - factor)).floor() as i64
        } else {
            (n * (1.0 + factor)).ceil() as i64
        }
    };

    let rows = resize(current.rows);
    let columns = resize(current.columns);

    if rows <= 0 || columns <= 0 || (rows == 1 && columns == 1) {
        return GridDensity::FallbackToSingle;
    }

    GridDensity::Grid(GridOverride::new(
        u32::try_from(rows).unwrap_or(u32::MAX),
        u32::try_from(columns).unwrap_or(u32::MAX),
    ))
}

/// Whether zooming out of the scrollable view crossed half the default zoom.
pub fn should_promote_to_grid(old_zoom: u32, new_zoom: u32, default_zoom: u32) -> bool {
    new_zoom < old_zoom && u64::from(new_zoom) * 2 <= u64::from(default_zoom)
}
