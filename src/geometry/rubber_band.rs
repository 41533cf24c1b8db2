//! Rubber-band (drag selection) rectangle.
//!
//! Edges are set in scaled units, the unit the pointer reports, and converted
//! back to actual units with the band's scale before storage. Width and height
//! go negative when the user drags up or left.

use super::primitive::{DrawStyle, Primitive, PrimitiveKind, TextData};
use super::rect::{Point, Rect, ScaledRect};

/// A drag-selection rectangle backed by a [`Primitive`] of kind `RubberBand`.
#[derive(Debug, Clone, PartialEq)]
pub struct RubberBand(Primitive);

impl RubberBand {
    /// Create a band at scaled position `(x, y)` with scaled size `(width, height)`.
    pub fn new_instance(x: f64, y: f64, width: f64, height: f64, scale: f64) -> Self {
        let actual = Rect::new(x / scale, y / scale, width / scale, height / scale);
        Self(Primitive {
            kind: PrimitiveKind::RubberBand,
            actual,
            scale,
            style: DrawStyle::RUBBER_BAND,
            text: TextData::default(),
        })
    }

    /// Set the left edge from scaled units.
    pub fn set_left(&mut self, left: f64) {
        self.0.actual.left = left / self.0.scale;
    }

    /// Set the top edge from scaled units.
    pub fn set_top(&mut self, top: f64) {
        self.0.actual.top = top / self.0.scale;
    }

    /// Set the width from scaled units.
    pub fn set_width(&mut self, width: f64) {
        self.0.actual.width = width / self.0.scale;
    }

    /// Set the height from scaled units.
    pub fn set_height(&mut self, height: f64) {
        self.0.actual.height = height / self.0.scale;
    }

    /// Stretch the band so its free corner sits at `point` (scaled units).
    pub fn track_to(&mut self, point: Point) {
        let anchor = self.anchor();
        self.set_width(point.x - anchor.x);
        self.set_height(point.y - anchor.y);
    }

    /// Anchor corner (where the drag started) in scaled units.
    pub fn anchor(&self) -> Point {
        Point::new(
            self.0.actual.left * self.0.scale,
            self.0.actual.top * self.0.scale,
        )
    }

    /// Replace the actual rect wholesale (used when snapping to selected text).
    pub fn snap_to(&mut self, actual: Rect) {
        self.0.actual = actual;
    }

    /// Attach the selected text.
    pub fn set_text(&mut self, text: TextData) {
        self.0.text = text;
    }

    /// Selected text, empty while dragging.
    pub fn text(&self) -> &str {
        &self.0.text.text
    }

    /// Band in actual page units.
    pub fn actual(&self) -> Rect {
        self.0.actual
    }

    /// Band in scaled units.
    pub fn scaled_rect(&self) -> ScaledRect {
        self.0.scaled_rect()
    }

    /// Change the scale. The actual rect is kept.
    pub fn rescale(&mut self, scale: f64) {
        self.0.scale = scale;
    }

    /// Inclusive containment of a scaled point; reversed bands are normalized first.
    pub fn contains(&self, point: Point) -> bool {
        self.0.actual.scaled_by(self.0.scale).contains_point(point)
    }

    /// Whether both corners of a scaled rect lie inside the band.
    pub fn contains_scaled(&self, rect: &ScaledRect) -> bool {
        self.0.actual.scaled_by(self.0.scale).contains_rect(&rect.to_rect())
    }

    /// Band as a draw primitive.
    pub fn as_primitive(&self) -> &Primitive {
        &self.0
    }

    /// Consume the band into its primitive.
    pub fn into_primitive(self) -> Primitive {
        self.0
    }
}
