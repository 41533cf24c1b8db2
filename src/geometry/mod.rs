//! Geometry primitives shared by the text layer and the presentation layer.
//!
//! - `rect`: actual/scaled rectangles, points, container geometry
//! - `primitive`: tagged overlay primitive, draw contract, highlight record
//! - `rubber_band`: drag-selection rectangle with per-edge scaled setters

pub mod primitive;
pub mod rect;
pub mod rubber_band;

pub use primitive::{
    draw, highlight, text_element, DrawStyle, DrawSurface, HighlightRecord, Primitive,
    PrimitiveKind, Rgba, Stroke, TextData,
};
pub use rect::{ContainerRect, Point, Rect, ScaledRect, Size};
pub use rubber_band::RubberBand;
