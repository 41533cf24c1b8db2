//! Rectangle value types.
//!
//! `Rect` is in page-native ("actual") units and is the source of truth.
//! `ScaledRect` is the on-screen projection at some scale, rounded to whole
//! units, and is what hit tests and drawing use.

use serde::{Deserialize, Serialize};

/// A point in container (scaled) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Point at `(x, y)`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Size {
    /// Size of `width × height`.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Geometry of the hosting surface, as reported by the container provider.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerRect {
    /// Container width.
    pub width: f64,
    /// Container height.
    pub height: f64,
    /// Offset from the top of the viewport.
    pub top: f64,
    /// Offset from the left of the viewport.
    pub left: f64,
}

impl ContainerRect {
    /// Container rect with its viewport offset.
    pub fn new(width: f64, height: f64, top: f64, left: f64) -> Self {
        Self {
            width,
            height,
            top,
            left,
        }
    }

    /// Zero or negative sized containers are ignored by every consumer.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Rectangle in actual (unscaled) units. Width/height may be negative while
/// a rubber band is dragged up or left; use [`Rect::normalized`] to compare.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width, negative when reversed.
    pub width: f64,
    /// Height, negative when reversed.
    pub height: f64,
}

impl Rect {
    /// Rect from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Same area with non-negative width and height.
    pub fn normalized(&self) -> Self {
        let (left, width) = if self.width < 0.0 {
            (self.left + self.width, -self.width)
        } else {
            (self.left, self.width)
        };
        let (top, height) = if self.height < 0.0 {
            (self.top + self.height, -self.height)
        } else {
            (self.top, self.height)
        };
        Self::new(left, top, width, height)
    }

    /// Multiply every component by `factor`.
    pub fn scaled_by(&self, factor: f64) -> Self {
        Self::new(
            self.left * factor,
            self.top * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Project to integer screen units at `scale`.
    pub fn to_scaled(&self, scale: f64) -> ScaledRect {
        ScaledRect {
            left: (self.left * scale).round() as i64,
            top: (self.top * scale).round() as i64,
            width: (self.width * scale).round() as i64,
            height: (self.height * scale).round() as i64,
        }
    }

    /// Inclusive containment, after normalizing.
    pub fn contains_point(&self, point: Point) -> bool {
        let r = self.normalized();
        point.x >= r.left && point.x <= r.right() && point.y >= r.top && point.y <= r.bottom()
    }

    /// Both the top-left and bottom-right corners of `other` lie inside.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let other = other.normalized();
        self.contains_point(Point::new(other.left, other.top))
            && self.contains_point(Point::new(other.right(), other.bottom()))
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Self {
        let a = self.normalized();
        let b = other.normalized();
        let left = a.left.min(b.left);
        let top = a.top.min(b.top);
        let right = a.right().max(b.right());
        let bottom = a.bottom().max(b.bottom());
        Self::new(left, top, right - left, bottom - top)
    }

    /// Grow by `fraction` of the width on the left and on the right, and by
    /// `fraction` of the height on the top and on the bottom.
    pub fn expanded_by_fraction(&self, fraction: f64) -> Self {
        let r = self.normalized();
        let dx = r.width * fraction;
        let dy = r.height * fraction;
        Self::new(r.left - dx, r.top - dy, r.width + 2.0 * dx, r.height + 2.0 * dy)
    }
}

/// Rectangle in scaled (screen) units, rounded to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScaledRect {
    /// Left edge.
    pub left: i64,
    /// Top edge.
    pub top: i64,
    /// Width, negative when reversed.
    pub width: i64,
    /// Height, negative when reversed.
    pub height: i64,
}

impl ScaledRect {
    /// Rect from its top-left corner and size.
    pub fn new(left: i64, top: i64, width: i64, height: i64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> i64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> i64 {
        self.top + self.height
    }

    /// Same rect with non-negative width and height.
    pub fn normalized(&self) -> Self {
        self.to_rect().normalized().to_scaled(1.0)
    }

    /// Same rect in floating point.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left as f64,
            self.top as f64,
            self.width as f64,
            self.height as f64,
        )
    }

    /// Inclusive containment, after normalizing.
    pub fn contains_point(&self, point: Point) -> bool {
        self.to_rect().contains_point(point)
    }

    /// Both corners of `other` lie inside (inclusive).
    pub fn contains_rect(&self, other: &ScaledRect) -> bool {
        self.to_rect().contains_rect(&other.to_rect())
    }

    /// Whether any part of this rectangle lies on a canvas of `size`.
    pub fn intersects_canvas(&self, size: Size) -> bool {
        let r = self.to_rect().normalized();
        r.right() >= 0.0 && r.bottom() >= 0.0 && r.left <= size.width && r.top <= size.height
    }
}
