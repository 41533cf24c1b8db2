//! Hit testing and rubber-band completion over a page's text elements.

use crate::geometry::{Point, Primitive, Rect, RubberBand, ScaledRect, TextData};
use crate::model::PageId;
use serde::Serialize;

/// Whether `point` falls on `rect`, allowing one unit of slack on the
/// leading (left and top) edges. Trailing edges are exact and inclusive.
pub fn within_hit_bounds(rect: &ScaledRect, point: Point) -> bool {
    let r = rect.normalized();
    let (left, top) = ((r.left - 1) as f64, (r.top - 1) as f64);
    let (right, bottom) = (r.right() as f64, r.bottom() as f64);
    point.x >= left && point.x <= right && point.y >= top && point.y <= bottom
}

/// Texts lying entirely inside the band, in document order.
pub fn contained_texts<'a>(band: &RubberBand, texts: &'a [Primitive]) -> Vec<&'a Primitive> {
    texts
        .iter()
        .filter(|t| band.contains_scaled(&t.scaled_rect()))
        .collect()
}

/// Snap a finished band to the text it encloses.
///
/// The band becomes the bounding box of the enclosed texts grown by
/// `margin` of its size on every side, and carries their text joined by
/// single spaces. Returns `None` when nothing is enclosed.
pub fn complete_band(
    mut band: RubberBand,
    texts: &[Primitive],
    margin: f64,
    page_id: &PageId,
) -> Option<RubberBand> {
    let enclosed = contained_texts(&band, texts);
    let (first, rest) = enclosed.split_first()?;

    let bounds = rest
        .iter()
        .fold(first.actual.normalized(), |acc, t| acc.union(&t.actual));
    let joined = enclosed
        .iter()
        .map(|t| t.text.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    band.snap_to(bounds.expanded_by_fraction(margin));
    band.set_text(TextData::new(joined, Some(page_id.clone())));
    Some(band)
}

/// A text element picked by double click.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSelection {
    /// Element in page units.
    pub actual: Rect,
    /// Element in scaled units.
    pub scaled: ScaledRect,
    /// Element text.
    pub text: TextData,
}

impl TextSelection {
    /// Selection of `primitive`.
    pub fn of(primitive: &Primitive) -> Self {
        Self {
            actual: primitive.actual,
            scaled: primitive.scaled_rect(),
            text: primitive.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::text_element;
    use crate::model::TextBox;

    fn page() -> PageId {
        PageId::new("p1").expect("valid page id")
    }

    fn text(l: f64, t: f64, w: f64, h: f64, s: &str) -> Primitive {
        text_element(&TextBox::new(l, t, w, h, s), &page(), 1.0)
    }

    #[test]
    fn hit_bounds_have_leading_slack_only() {
        let rect = ScaledRect::new(20, 10, 30, 40);
        assert!(within_hit_bounds(&rect, Point::new(20.0, 10.0)));
        assert!(within_hit_bounds(&rect, Point::new(19.0, 9.0)));
        assert!(within_hit_bounds(&rect, Point::new(50.0, 50.0)));
        assert!(!within_hit_bounds(&rect, Point::new(51.0, 10.0)));
        assert!(!within_hit_bounds(&rect, Point::new(18.5, 10.0)));
    }

    #[test]
    fn completion_joins_enclosed_text_in_order() {
        let texts = vec![
            text(10.0, 10.0, 40.0, 10.0, "hello"),
            text(60.0, 10.0, 40.0, 10.0, "world"),
            text(300.0, 300.0, 10.0, 10.0, "outside"),
        ];
        let mut band = RubberBand::new_instance(5.0, 5.0, 0.0, 0.0, 1.0);
        band.track_to(Point::new(200.0, 200.0));

        let band = complete_band(band, &texts, 0.05, &page()).expect("text enclosed");

        assert_eq!(band.text(), "hello world");
        // union (10, 10, 90, 10) grown by 5% per side
        let actual = band.actual();
        assert!((actual.left - 5.5).abs() < 1e-9);
        assert!((actual.top - 9.5).abs() < 1e-9);
        assert!((actual.width - 99.0).abs() < 1e-9);
        assert!((actual.height - 11.0).abs() < 1e-9);
    }

    #[test]
    fn completion_without_text_discards_band() {
        let texts = vec![text(300.0, 300.0, 10.0, 10.0, "far")];
        let band = RubberBand::new_instance(0.0, 0.0, 50.0, 50.0, 1.0);
        assert!(complete_band(band, &texts, 0.05, &page()).is_none());
    }

    #[test]
    fn partially_covered_text_is_not_enclosed() {
        let texts = vec![text(40.0, 40.0, 20.0, 20.0, "edge")];
        let band = RubberBand::new_instance(0.0, 0.0, 50.0, 50.0, 1.0);
        assert!(contained_texts(&band, &texts).is_empty());
    }

    #[test]
    fn reverse_drag_encloses_the_same_text() {
        let texts = vec![text(10.0, 10.0, 20.0, 20.0, "word")];
        let mut band = RubberBand::new_instance(100.0, 100.0, 0.0, 0.0, 1.0);
        band.track_to(Point::new(0.0, 0.0));
        assert_eq!(contained_texts(&band, &texts).len(), 1);
    }
}
