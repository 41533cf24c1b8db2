//! Drawable overlay primitives.
//!
//! A [`Primitive`] is a tagged value: its [`PrimitiveKind`] decides how it is
//! styled and which operations apply. The actual rect is the source of truth;
//! the scaled rect is derived on demand from the current scale.

use super::rect::{Point, Rect, ScaledRect, Size};
use crate::model::{DocumentId, PageId, PageRef, TextBox};
use serde::{Deserialize, Serialize};

/// What a primitive represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveKind {
    /// Text element or search/annotation highlight.
    Highlight,
    /// Drag-selection rectangle.
    RubberBand,
}

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

/// Outline of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Stroke color.
    pub color: Rgba,
    /// Line width in scaled units.
    pub width: f64,
}

/// Drawing-style tag carried by each primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawStyle {
    /// Fill color; `None` leaves the interior unpainted.
    pub fill: Option<Rgba>,
    /// Outline; `None` draws no border.
    pub stroke: Option<Stroke>,
}

impl DrawStyle {
    /// Translucent yellow marker used for text and search highlights.
    pub const HIGHLIGHT: Self = Self {
        fill: Some(Rgba(255, 235, 59, 96)),
        stroke: None,
    };

    /// Dashed-look selection rectangle: light fill plus a blue outline.
    pub const RUBBER_BAND: Self = Self {
        fill: Some(Rgba(33, 150, 243, 32)),
        stroke: Some(Stroke {
            color: Rgba(33, 150, 243, 255),
            width: 1.0,
        }),
    };

    /// Invisible text box: hit-testable but not painted.
    pub const TEXT: Self = Self {
        fill: None,
        stroke: None,
    };
}

/// Text and metadata attached to a primitive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextData {
    /// Text shown or copied.
    pub text: String,
    /// Page the primitive belongs to.
    pub page_id: Option<PageId>,
    /// Document of `page_id`. `None` means the document of the page it is shown on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,
    /// Free-form metadata carried over from the OCR box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl TextData {
    /// Text on `page_id`, without document or payload.
    pub fn new(text: impl Into<String>, page_id: Option<PageId>) -> Self {
        Self {
            text: text.into(),
            page_id,
            document_id: None,
            payload: None,
        }
    }

    /// Text on a page of a specific document.
    pub fn on_page(text: impl Into<String>, page: PageRef) -> Self {
        Self {
            text: text.into(),
            page_id: Some(page.page_id),
            document_id: Some(page.document_id),
            payload: None,
        }
    }

    /// Page this text points at, resolving a missing document to `host_document`.
    pub fn page_ref(&self, host_document: &DocumentId) -> Option<PageRef> {
        let page_id = self.page_id.clone()?;
        let document_id = self
            .document_id
            .clone()
            .unwrap_or_else(|| host_document.clone());
        Some(PageRef::new(document_id, page_id))
    }
}

/// A rectangle drawn over a page image.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    /// What the primitive stands for.
    pub kind: PrimitiveKind,
    /// Rect in page-native units.
    pub actual: Rect,
    /// Current page-to-screen factor.
    pub scale: f64,
    /// How the primitive is drawn.
    pub style: DrawStyle,
    /// Attached text and page reference.
    pub text: TextData,
}

/// Build a highlight from an actual-unit rect.
pub fn highlight(actual: Rect, scale: f64, text: TextData) -> Primitive {
    Primitive {
        kind: PrimitiveKind::Highlight,
        actual,
        scale,
        style: DrawStyle::HIGHLIGHT,
        text,
    }
}

/// Build an (invisible) hit-testable text element from an OCR box.
pub fn text_element(text_box: &TextBox, page_id: &PageId, scale: f64) -> Primitive {
    Primitive {
        kind: PrimitiveKind::Highlight,
        actual: Rect::new(text_box.left, text_box.top, text_box.width, text_box.height),
        scale,
        style: DrawStyle::TEXT,
        text: TextData {
            text: text_box.text.clone(),
            page_id: Some(page_id.clone()),
            document_id: None,
            payload: text_box.payload.clone(),
        },
    }
}

impl Primitive {
    /// Actual rect projected to screen units at the current scale.
    pub fn scaled_rect(&self) -> ScaledRect {
        self.actual.to_scaled(self.scale)
    }

    /// Same primitive at another scale. The actual rect is untouched.
    pub fn rescaled(&self, scale: f64) -> Self {
        Self {
            scale,
            ..self.clone()
        }
    }

    /// Whether the primitive is tagged with `page_id`.
    pub fn is_on_page(&self, page_id: &PageId) -> bool {
        self.text.page_id.as_ref() == Some(page_id)
    }

    /// Whether the primitive belongs to `page`. A primitive without a
    /// document id matches on the page id alone.
    pub fn is_on(&self, page: &PageRef) -> bool {
        self.is_on_page(&page.page_id)
            && self
                .text
                .document_id
                .as_ref()
                .map_or(true, |doc| *doc == page.document_id)
    }

    /// Inclusive containment of a scaled point.
    pub fn contains_point(&self, point: Point) -> bool {
        self.scaled_rect().contains_point(point)
    }

    /// Flatten into the serializable record handed to highlight consumers.
    pub fn to_highlight_record(&self) -> HighlightRecord {
        let scaled = self.scaled_rect().normalized();
        HighlightRecord {
            kind: self.kind,
            left: scaled.left,
            top: scaled.top,
            width: scaled.width,
            height: scaled.height,
            actual: self.actual.normalized(),
            text: self.text.text.clone(),
            page_id: self.text.page_id.clone(),
            document_id: self.text.document_id.clone(),
            payload: self.text.payload.clone(),
        }
    }
}

/// Flat, serializable form of a primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRecord {
    /// Kind of the primitive.
    pub kind: PrimitiveKind,
    /// Normalized scaled rect.
    pub left: i64,
    /// Top edge of the normalized scaled rect.
    pub top: i64,
    /// Width of the normalized scaled rect.
    pub width: i64,
    /// Height of the normalized scaled rect.
    pub height: i64,
    /// Normalized actual rect.
    pub actual: Rect,
    /// Attached text.
    pub text: String,
    /// Page the highlight belongs to.
    pub page_id: Option<PageId>,
    /// Document of the page, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<DocumentId>,
    /// Caller data passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// 2D drawing target. The engine does not prescribe a pixel format.
pub trait DrawSurface {
    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: ScaledRect, color: Rgba);
    /// Outline `rect` with `stroke`.
    fn stroke_rect(&mut self, rect: ScaledRect, stroke: Stroke);
}

/// Paint a primitive onto a surface of `canvas` size.
///
/// Primitives entirely outside the canvas are skipped.
pub fn draw(primitive: &Primitive, surface: &mut dyn DrawSurface, canvas: Size) {
    let rect = primitive.scaled_rect().normalized();
    if !rect.intersects_canvas(canvas) {
        return;
    }
    if let Some(fill) = primitive.style.fill {
        surface.fill_rect(rect, fill);
    }
    if let Some(stroke) = primitive.style.stroke {
        surface.stroke_rect(rect, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        fills: Vec<ScaledRect>,
        strokes: Vec<ScaledRect>,
    }

    impl DrawSurface for RecordingSurface {
        fn fill_rect(&mut self, rect: ScaledRect, _color: Rgba) {
            self.fills.push(rect);
        }

        fn stroke_rect(&mut self, rect: ScaledRect, _stroke: Stroke) {
            self.strokes.push(rect);
        }
    }

    fn page_id(s: &str) -> PageId {
        PageId::new(s).expect("valid page id")
    }

    #[test]
    fn scaled_rect_follows_scale() {
        let p = highlight(
            Rect::new(10.0, 20.0, 30.0, 40.0),
            2.0,
            TextData::new("x", None),
        );
        assert_eq!(p.scaled_rect(), ScaledRect::new(20, 40, 60, 80));
        assert_eq!(p.rescaled(0.5).scaled_rect(), ScaledRect::new(5, 10, 15, 20));
        assert_eq!(p.rescaled(0.5).actual, p.actual);
    }

    #[test]
    fn text_element_keeps_page_and_payload() {
        let mut tb = TextBox::new(1.0, 2.0, 3.0, 4.0, "word");
        tb.payload = Some(serde_json::json!({"confidence": 0.9}));
        let p = text_element(&tb, &page_id("p1"), 1.0);
        assert!(p.is_on_page(&page_id("p1")));
        assert!(!p.is_on_page(&page_id("p2")));
        assert_eq!(p.text.payload, tb.payload);
        assert_eq!(p.style, DrawStyle::TEXT);
    }

    #[test]
    fn page_membership_checks_document_when_known() {
        let doc = |s: &str| DocumentId::new(s).expect("valid document id");
        let host = PageRef::new(doc("a"), page_id("p1"));
        let untagged = highlight(Rect::default(), 1.0, TextData::new("x", Some(page_id("p1"))));
        let same = highlight(
            Rect::default(),
            1.0,
            TextData::on_page("x", PageRef::new(doc("a"), page_id("p1"))),
        );
        let other = highlight(
            Rect::default(),
            1.0,
            TextData::on_page("x", PageRef::new(doc("b"), page_id("p1"))),
        );

        assert!(untagged.is_on(&host));
        assert!(same.is_on(&host));
        assert!(!other.is_on(&host), "same page id in another document");
        assert_eq!(
            other.text.page_ref(&doc("a")),
            Some(PageRef::new(doc("b"), page_id("p1")))
        );
        assert_eq!(
            untagged.text.page_ref(&doc("a")),
            Some(PageRef::new(doc("a"), page_id("p1")))
        );
    }

    #[test]
    fn draw_paints_fill_then_stroke() {
        let mut surface = RecordingSurface::default();
        let p = Primitive {
            kind: PrimitiveKind::RubberBand,
            actual: Rect::new(10.0, 10.0, 20.0, 20.0),
            scale: 1.0,
            style: DrawStyle::RUBBER_BAND,
            text: TextData::default(),
        };
        draw(&p, &mut surface, Size::new(100.0, 100.0));
        assert_eq!(surface.fills, vec![ScaledRect::new(10, 10, 20, 20)]);
        assert_eq!(surface.strokes, vec![ScaledRect::new(10, 10, 20, 20)]);
    }

    #[test]
    fn draw_skips_primitives_outside_canvas() {
        let mut surface = RecordingSurface::default();
        let p = highlight(
            Rect::new(500.0, 500.0, 20.0, 20.0),
            1.0,
            TextData::default(),
        );
        draw(&p, &mut surface, Size::new(100.0, 100.0));
        assert!(surface.fills.is_empty());
    }

    #[test]
    fn invisible_text_is_not_painted() {
        let mut surface = RecordingSurface::default();
        let p = text_element(&TextBox::new(1.0, 1.0, 5.0, 5.0, "t"), &page_id("p"), 1.0);
        draw(&p, &mut surface, Size::new(100.0, 100.0));
        assert!(surface.fills.is_empty() && surface.strokes.is_empty());
    }

    #[test]
    fn highlight_record_serializes_flat() {
        let p = highlight(
            Rect::new(10.0, 20.0, 30.0, 40.0),
            1.5,
            TextData::new("Invoice", Some(page_id("p1"))),
        );
        let json = serde_json::to_string_pretty(&p.to_highlight_record()).expect("serializable");
        insta::assert_snapshot!(json, @r#"
        {
          "kind": "highlight",
          "left": 15,
          "top": 30,
          "width": 45,
          "height": 60,
          "actual": {
            "left": 10.0,
            "top": 20.0,
            "width": 30.0,
            "height": 40.0
          },
          "text": "Invoice",
          "pageId": "p1"
        }
        "#);
    }
}
