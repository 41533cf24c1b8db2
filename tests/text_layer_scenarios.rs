//! Text layer scenarios at a non-unit scale, observed through the output streams.

use docview::config::TextLayerConfig;
use docview::geometry::{ContainerRect, Point, Primitive, ScaledRect};
use docview::model::{NoClipboard, NoNavigation, TextBox};
use docview::text_layer::{DragPhase, HostContext, PointerEvent, TextLayerEngine};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Page of 1000 × 1000 shown in a 500 × 500 container (scale 0.5).
fn half_scale_engine() -> TextLayerEngine {
    let mut engine = TextLayerEngine::new(
        TextLayerConfig::default(),
        Box::new(NoClipboard),
        Box::new(NoNavigation),
    );
    let host = HostContext::from_raw("doc", "p1", 1000.0, 1000.0, None).expect("valid host");
    engine.initialize(host).expect("valid host");
    engine.on_resize(ContainerRect::new(500.0, 500.0, 0.0, 0.0));
    engine.set_text_boxes(vec![
        TextBox::new(20.0, 20.0, 100.0, 40.0, "Invoice"),
        TextBox::new(140.0, 20.0, 100.0, 40.0, "Total"),
        TextBox::new(20.0, 600.0, 100.0, 40.0, "Footer"),
    ]);
    engine
}

#[test]
fn hit_test_uses_scaled_coordinates() {
    let engine = half_scale_engine();
    assert_eq!(engine.scale(), 0.5);

    // "Invoice" occupies (10, 10, 50, 20) on screen.
    let hits = engine.hit_test(Point::new(30.0, 15.0));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text.text, "Invoice");
    assert_eq!(hits[0].scaled_rect(), ScaledRect::new(10, 10, 50, 20));

    assert!(engine.hit_test(Point::new(100.0, 100.0)).is_empty());
}

#[test]
fn rubber_band_selects_the_enclosed_words() {
    let mut engine = half_scale_engine();
    let t0 = Instant::now();

    engine.handle_pointer(PointerEvent::down(5.0, 5.0, t0));
    engine.handle_pointer(PointerEvent::drag(90.0, 60.0, t0));
    engine.handle_pointer(PointerEvent::up(130.0, 40.0, t0 + Duration::from_millis(50)));

    assert_eq!(engine.drag_phase(), DragPhase::Completed);
    let band = engine.rubber_band().expect("completed band");
    assert_eq!(band.text(), "Invoice Total");
    // Snapped to the words, in page units, with the margin added.
    let actual = band.actual();
    assert!(actual.left < 20.0 && actual.left > 0.0);
    assert!(actual.right() > 240.0);
    assert!(actual.bottom() < 600.0, "Footer is not part of the band");
}

#[test]
fn rubber_band_stream_replays_latest_value() {
    let mut engine = half_scale_engine();
    let t0 = Instant::now();
    engine.handle_pointer(PointerEvent::down(5.0, 5.0, t0));
    engine.handle_pointer(PointerEvent::drag(130.0, 40.0, t0));
    engine.handle_pointer(PointerEvent::up(130.0, 40.0, t0));

    let seen: Rc<RefCell<Vec<Option<Primitive>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine
        .outputs()
        .rubber_band
        .subscribe(move |band| sink.borrow_mut().push(band.clone()));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    let band = seen[0].as_ref().expect("band replayed");
    assert_eq!(band.text.text, "Invoice Total");
}

#[test]
fn resizing_rescales_texts_in_place() {
    let mut engine = half_scale_engine();
    engine.on_resize(ContainerRect::new(1000.0, 1000.0, 0.0, 0.0));

    assert_eq!(engine.scale(), 1.0);
    let footer = engine
        .texts()
        .iter()
        .find(|t| t.text.text == "Footer")
        .expect("footer text");
    assert_eq!(footer.scaled_rect(), ScaledRect::new(20, 600, 100, 40));
}
