//! Per-page text overlay engine.
//!
//! Owns the text elements, active highlights and the rubber band of one host
//! page. All inputs carry their own timestamp; [`TextLayerEngine::tick`]
//! releases throttled moves, the pointer-leave debounce and deferred OCR
//! loads. Output signals are published once at the end of each entry point.

use super::host::{compute_scale, HostContext};
use super::input::{KeyInput, PointerEvent, PointerKind};
use super::selection::{complete_band, within_hit_bounds, TextSelection};
use super::tooltip::{place_tooltip, Tooltip};
use crate::config::TextLayerConfig;
use crate::geometry::{text_element, ContainerRect, Point, Primitive, RubberBand};
use crate::model::{Clipboard, Loaded, PageLoader, PageNavigator, TextBox, TextLayerError};
use crate::scheduler::{Debounce, DeferredQueue, Signal, Throttle};
use std::fmt;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Drag selection phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No drag in progress and no band shown.
    #[default]
    Idle,
    /// Primary button is down and the band follows the pointer.
    Dragging,
    /// A completed band is shown.
    Completed,
}

/// Output streams. Each replays its latest value to new subscribers.
#[derive(Debug)]
pub struct TextLayerOutputs {
    /// Page text elements in screen units.
    pub scaled_texts: Signal<Vec<Primitive>>,
    /// Highlights of the current page.
    pub active_highlights: Signal<Vec<Primitive>>,
    /// Rubber band, `None` once discarded.
    pub rubber_band: Signal<Option<Primitive>>,
    /// Text picked by a double click.
    pub text_selection: Signal<Option<TextSelection>>,
    /// Tooltips of the hovered elements.
    pub tooltips: Signal<Vec<Tooltip>>,
}

impl Default for TextLayerOutputs {
    fn default() -> Self {
        Self {
            scaled_texts: Signal::replaying(),
            active_highlights: Signal::replaying(),
            rubber_band: Signal::replaying(),
            text_selection: Signal::replaying(),
            tooltips: Signal::replaying(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Texts,
    Highlights,
    RubberBand,
    Selection,
    Tooltips,
}

/// Text overlay of one host page.
pub struct TextLayerEngine {
    config: TextLayerConfig,
    clipboard: Box<dyn Clipboard>,
    navigator: Box<dyn PageNavigator>,

    host: Option<HostContext>,
    container: Option<ContainerRect>,
    scale: f64,

    /// OCR boxes as delivered, in actual page units.
    text_boxes: Vec<TextBox>,
    texts: Vec<Primitive>,
    highlights: Vec<Primitive>,
    band: Option<RubberBand>,
    /// Primary press waiting for a move to become a drag.
    press_anchor: Option<Point>,
    drag: DragPhase,
    selection: Option<TextSelection>,
    tooltips: Vec<Tooltip>,

    /// Text features are on only while OCR data exists for the page.
    text_enabled: bool,
    auto_navigation: bool,
    pending_ocr: Option<Loaded<Vec<TextBox>>>,

    drag_throttle: Throttle<Point>,
    hover_throttle: Throttle<Point>,
    leave_debounce: Debounce<()>,
    last_click: Option<Instant>,

    pending_outputs: DeferredQueue<Output>,
    outputs: TextLayerOutputs,
}

impl fmt::Debug for TextLayerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLayerEngine")
            .field("host", &self.host)
            .field("container", &self.container)
            .field("scale", &self.scale)
            .field("texts", &self.texts.len())
            .field("highlights", &self.highlights.len())
            .field("drag", &self.drag)
            .field("text_enabled", &self.text_enabled)
            .finish_non_exhaustive()
    }
}

impl TextLayerEngine {
    /// Engine with no host attached. Text features stay off until a host
    /// and OCR boxes are provided.
    pub fn new(
        config: TextLayerConfig,
        clipboard: Box<dyn Clipboard>,
        navigator: Box<dyn PageNavigator>,
    ) -> Self {
        Self {
            drag_throttle: Throttle::new(config.move_throttle),
            hover_throttle: Throttle::new(config.move_throttle),
            leave_debounce: Debounce::new(config.leave_debounce),
            config,
            clipboard,
            navigator,
            host: None,
            container: None,
            scale: 1.0,
            text_boxes: Vec::new(),
            texts: Vec::new(),
            highlights: Vec::new(),
            band: None,
            press_anchor: None,
            drag: DragPhase::Idle,
            selection: None,
            tooltips: Vec::new(),
            text_enabled: false,
            auto_navigation: false,
            pending_ocr: None,
            last_click: None,
            pending_outputs: DeferredQueue::new(),
            outputs: TextLayerOutputs::default(),
        }
    }

    // ===== Accessors =====

    /// Output streams for subscribers.
    pub fn outputs(&mut self) -> &mut TextLayerOutputs {
        &mut self.outputs
    }

    /// Attached host page.
    pub fn host(&self) -> Option<&HostContext> {
        self.host.as_ref()
    }

    /// Screen units per page unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Text elements in screen units.
    pub fn texts(&self) -> &[Primitive] {
        &self.texts
    }

    /// Active highlights of the current page.
    pub fn highlights(&self) -> &[Primitive] {
        &self.highlights
    }

    /// Rubber band being dragged or completed.
    pub fn rubber_band(&self) -> Option<&RubberBand> {
        self.band.as_ref()
    }

    /// Current drag phase.
    pub fn drag_phase(&self) -> DragPhase {
        self.drag
    }

    /// Last double-click selection.
    pub fn selection(&self) -> Option<&TextSelection> {
        self.selection.as_ref()
    }

    /// Tooltips currently shown.
    pub fn tooltips(&self) -> &[Tooltip] {
        &self.tooltips
    }

    /// Whether OCR text is available for the page.
    pub fn is_text_enabled(&self) -> bool {
        self.text_enabled
    }

    // ===== Host wiring =====

    /// Attach to a host page. Moving to another page drops all page state.
    pub fn initialize(&mut self, host: HostContext) -> Result<(), TextLayerError> {
        host.validate()?;

        let page_changed = self
            .host
            .as_ref()
            .map_or(true, |current| current.page_ref() != host.page_ref());
        if page_changed {
            debug!(page = %host.page_id, "Text layer attached to page");
            self.clear_page_state();
        }
        self.host = Some(host);
        self.refresh_scale();
        self.rebuild_texts();

        self.publish(Output::Texts);
        self.publish(Output::Highlights);
        self.publish(Output::RubberBand);
        self.publish(Output::Selection);
        self.publish(Output::Tooltips);
        self.flush();
        Ok(())
    }

    /// Container geometry changed. Degenerate and repeated sizes are ignored.
    pub fn on_resize(&mut self, container: ContainerRect) {
        if container.is_degenerate() {
            trace!(?container, "Ignoring degenerate container");
            return;
        }
        if self.container == Some(container) {
            return;
        }
        self.container = Some(container);
        if self.refresh_scale() {
            self.publish(Output::Texts);
            self.publish(Output::Highlights);
            self.publish(Output::RubberBand);
        }
        self.flush();
    }

    /// Replace the page's OCR boxes and enable text features.
    pub fn set_text_boxes(&mut self, boxes: Vec<TextBox>) {
        self.apply_text_boxes(boxes);
        self.flush();
    }

    /// Ask `loader` for the page's OCR text.
    ///
    /// Ready text is applied at once, deferred text on a later [`tick`](Self::tick).
    /// A loader without OCR support disables text features.
    pub fn load_text(&mut self, loader: &dyn PageLoader) {
        let Some(host) = &self.host else {
            debug!("load_text before initialize, ignoring");
            return;
        };
        match loader.load_page_ocr(&host.page_id) {
            None => {
                debug!(page = %host.page_id, "No OCR loader, text features disabled");
                self.pending_ocr = None;
                self.text_enabled = false;
                self.text_boxes.clear();
                self.texts.clear();
                self.publish(Output::Texts);
            }
            Some(Loaded::Ready(boxes)) => self.apply_text_boxes(boxes),
            Some(deferred) => {
                self.text_enabled = true;
                self.pending_ocr = Some(deferred);
            }
        }
        self.flush();
    }

    /// Show `primitives` as the active highlights.
    ///
    /// Only primitives of the current page are kept. Any rubber band is
    /// discarded. With auto navigation on, a first highlight on another page
    /// asks the navigator to switch pages. A highlight without a document id
    /// is taken to be in the host's document.
    pub fn set_active_primitives(&mut self, primitives: Vec<Primitive>) {
        self.reset_drag();

        if let Some(host) = &self.host {
            let current = host.page_ref();
            if self.auto_navigation {
                let target = primitives
                    .first()
                    .and_then(|p| p.text.page_ref(&host.document_id));
                if let Some(target) = target.filter(|t| *t != current) {
                    debug!(
                        from = %host.page_id,
                        document = %target.document_id,
                        to = %target.page_id,
                        "Navigating to highlight"
                    );
                    self.navigator.request_page_change(&target);
                }
            }
            let scale = self.scale;
            self.highlights = primitives
                .iter()
                .filter(|p| p.is_on(&current))
                .map(|p| p.rescaled(scale))
                .collect();
        } else {
            self.highlights.clear();
        }

        self.publish(Output::Highlights);
        self.publish(Output::RubberBand);
        self.flush();
    }

    /// Follow the first highlight to its page when it is set.
    pub fn set_auto_navigation_to_highlight(&mut self, enabled: bool) {
        self.auto_navigation = enabled;
    }

    // ===== Queries =====

    /// Text elements under `point` (scaled units).
    ///
    /// With a rubber band present only texts inside the band are candidates.
    pub fn hit_test(&self, point: Point) -> Vec<Primitive> {
        self.texts
            .iter()
            .filter(|t| {
                self.band
                    .as_ref()
                    .map_or(true, |band| band.contains_scaled(&t.scaled_rect()))
            })
            .filter(|t| within_hit_bounds(&t.scaled_rect(), point))
            .cloned()
            .collect()
    }

    // ===== Input =====

    /// Feed one pointer event.
    ///
    /// Ignored until text is available. Presses, releases and clicks of
    /// buttons other than the primary one are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if !self.text_enabled || self.host.is_none() {
            return;
        }
        match event.kind {
            PointerKind::Down | PointerKind::Up | PointerKind::Click if !event.is_primary() => {
                trace!(button = ?event.button, kind = ?event.kind, "Ignoring non-primary button");
            }
            PointerKind::Down => self.on_pointer_down(event.position),
            PointerKind::Move => self.on_pointer_move(event),
            PointerKind::Up => self.on_pointer_up(event.position),
            PointerKind::Click => self.on_click(event.position, event.at),
            PointerKind::Leave => self.on_pointer_leave(event.at),
        }
        self.flush();
    }

    /// Handle a key press. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &KeyInput) -> bool {
        if !key.is_copy() {
            return false;
        }
        match &self.band {
            Some(band) if !band.text().is_empty() => {
                self.clipboard.copy(band.text());
                true
            }
            _ => false,
        }
    }

    /// Advance time: trailing moves, leave completion, deferred OCR.
    pub fn tick(&mut self, now: Instant) {
        if let Some(point) = self.drag_throttle.poll(now) {
            self.track_band(point);
        }
        if let Some(point) = self.hover_throttle.poll(now) {
            self.update_tooltips(point);
        }
        if self.leave_debounce.poll(now).is_some() && self.drag == DragPhase::Dragging {
            debug!("Pointer left while dragging, completing selection");
            if let Some(point) = self.drag_throttle.take_pending() {
                self.track_band(point);
            }
            self.complete_drag();
        }
        self.poll_ocr();
        self.flush();
    }

    // ===== Pointer handling =====

    /// A press outside the band drops it and arms a drag at `position`.
    /// The band itself appears with the first move.
    fn on_pointer_down(&mut self, position: Point) {
        if self.band.as_ref().is_some_and(|band| band.contains(position)) {
            trace!("Pointer down inside band, keeping selection");
            return;
        }
        if self.band.is_some() {
            self.publish(Output::RubberBand);
        }
        self.reset_drag();
        self.press_anchor = Some(position);
    }

    fn start_drag(&mut self, anchor: Point) {
        self.band = Some(RubberBand::new_instance(
            anchor.x, anchor.y, 0.0, 0.0, self.scale,
        ));
        self.drag = DragPhase::Dragging;
        self.publish(Output::RubberBand);
    }

    fn on_pointer_move(&mut self, event: PointerEvent) {
        if self.drag == DragPhase::Idle && event.primary_held {
            if let Some(anchor) = self.press_anchor.take() {
                trace!(?anchor, "Drag started");
                self.start_drag(anchor);
            }
        }
        if self.drag == DragPhase::Dragging {
            self.leave_debounce.cancel();
            if event.primary_held {
                if let Some(point) = self.drag_throttle.offer(event.at, event.position) {
                    self.track_band(point);
                }
            }
            return;
        }
        if !event.primary_held {
            if let Some(point) = self.hover_throttle.offer(event.at, event.position) {
                self.update_tooltips(point);
            }
        }
    }

    fn on_pointer_up(&mut self, position: Point) {
        self.press_anchor = None;
        if self.drag != DragPhase::Dragging {
            return;
        }
        self.drag_throttle.take_pending();
        self.track_band(position);
        self.complete_drag();
    }

    fn on_pointer_leave(&mut self, at: Instant) {
        self.hover_throttle.reset();
        if !self.tooltips.is_empty() {
            self.tooltips.clear();
            self.publish(Output::Tooltips);
        }
        if self.drag == DragPhase::Dragging {
            self.leave_debounce.schedule(at, ());
        }
    }

    fn on_click(&mut self, position: Point, at: Instant) {
        let is_double = self
            .last_click
            .is_some_and(|last| at.saturating_duration_since(last) <= self.config.double_click_window);
        if !is_double {
            self.last_click = Some(at);
            return;
        }
        self.last_click = None;

        let Some(hit) = self.hit_test(position).into_iter().next() else {
            trace!(?position, "Double click outside text");
            return;
        };
        let selection = TextSelection::of(&hit);
        self.clipboard.copy(&selection.text.text);
        debug!(text = %selection.text.text, "Text selected by double click");
        self.selection = Some(selection);
        self.publish(Output::Selection);
    }

    fn track_band(&mut self, point: Point) {
        if self.drag != DragPhase::Dragging {
            return;
        }
        if let Some(band) = self.band.as_mut() {
            band.track_to(point);
            self.publish(Output::RubberBand);
        }
    }

    fn complete_drag(&mut self) {
        self.leave_debounce.cancel();
        let (Some(band), Some(host)) = (self.band.take(), self.host.as_ref()) else {
            self.drag = DragPhase::Idle;
            return;
        };
        match complete_band(band, &self.texts, self.config.selection_margin, &host.page_id) {
            Some(band) => {
                debug!(text = %band.text(), "Rubber band completed");
                self.band = Some(band);
                self.drag = DragPhase::Completed;
            }
            None => {
                trace!("Rubber band enclosed no text, discarded");
                self.drag = DragPhase::Idle;
            }
        }
        self.publish(Output::RubberBand);
    }

    fn update_tooltips(&mut self, point: Point) {
        let height = self.container.map_or(f64::INFINITY, |c| c.height);
        self.tooltips = self
            .texts
            .iter()
            .filter(|t| within_hit_bounds(&t.scaled_rect(), point))
            .map(|t| place_tooltip(t, height, &self.config))
            .collect();
        self.publish(Output::Tooltips);
    }

    // ===== State helpers =====

    /// Drop the band and any in-flight drag. Cancels a pending leave completion.
    fn reset_drag(&mut self) {
        self.band = None;
        self.press_anchor = None;
        self.drag = DragPhase::Idle;
        self.leave_debounce.cancel();
        self.drag_throttle.reset();
    }

    fn clear_page_state(&mut self) {
        self.reset_drag();
        self.text_boxes.clear();
        self.texts.clear();
        self.highlights.clear();
        self.selection = None;
        self.tooltips.clear();
        self.text_enabled = false;
        self.pending_ocr = None;
        self.hover_throttle.reset();
        self.last_click = None;
    }

    /// Recompute the scale; returns whether it changed.
    fn refresh_scale(&mut self) -> bool {
        let (Some(host), Some(container)) = (&self.host, &self.container) else {
            return false;
        };
        let scale = compute_scale(host, container);
        if scale == self.scale {
            return false;
        }
        trace!(scale, "Text layer scale changed");
        self.scale = scale;
        self.texts = self.texts.iter().map(|t| t.rescaled(scale)).collect();
        self.highlights = self.highlights.iter().map(|h| h.rescaled(scale)).collect();
        if let Some(band) = self.band.as_mut() {
            band.rescale(scale);
        }
        true
    }

    fn apply_text_boxes(&mut self, boxes: Vec<TextBox>) {
        self.text_boxes = boxes;
        self.text_enabled = true;
        self.pending_ocr = None;
        self.rebuild_texts();
        self.publish(Output::Texts);
    }

    fn rebuild_texts(&mut self) {
        let Some(host) = &self.host else {
            return;
        };
        self.texts = self
            .text_boxes
            .iter()
            .map(|b| text_element(b, &host.page_id, self.scale))
            .collect();
    }

    fn poll_ocr(&mut self) {
        let Some(pending) = self.pending_ocr.as_mut() else {
            return;
        };
        match pending.poll() {
            Ok(Some(boxes)) => {
                debug!(count = boxes.len(), "Deferred OCR text arrived");
                self.apply_text_boxes(boxes);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "OCR loader went away");
                self.pending_ocr = None;
            }
        }
    }

    // ===== Publication =====

    fn publish(&mut self, output: Output) {
        self.pending_outputs.cancel_where(|o| *o == output);
        self.pending_outputs.schedule(output);
    }

    fn flush(&mut self) {
        while let Some(output) = self.pending_outputs.next() {
            match output {
                Output::Texts => self.outputs.scaled_texts.emit(self.texts.clone()),
                Output::Highlights => self.outputs.active_highlights.emit(self.highlights.clone()),
                Output::RubberBand => self
                    .outputs
                    .rubber_band
                    .emit(self.band.as_ref().map(|b| b.as_primitive().clone())),
                Output::Selection => self.outputs.text_selection.emit(self.selection.clone()),
                Output::Tooltips => self.outputs.tooltips.emit(self.tooltips.clone()),
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
