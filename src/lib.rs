//! docview: viewer state and text-layer interaction engine.
//!
//! The library holds the view state of a paginated document viewer (zoom,
//! rotation, layout, page selection), derives the layout geometry, and runs
//! the per-page text overlay (hit testing, rubber-band and double-click
//! selection, tooltips). Rendering is left to the host through small traits.
//!
//! Pure data and transitions live in `geometry`, `layout` and `state`; time
//! and collaborators are injected so every module is testable without a UI.

pub mod config;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod model;
pub mod scheduler;
pub mod state;
pub mod text_layer;
