//! Pointer and keyboard input delivered by the host.

use crate::geometry::Point;
use std::time::Instant;

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// A button was pressed.
    Down,
    /// The pointer moved, with or without a button held.
    Move,
    /// A button was released.
    Up,
    /// A completed press and release; two in a row form a double click.
    Click,
    /// The pointer left the page.
    Leave,
}

/// Button that changed state in a `Down`, `Up` or `Click` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    /// Left button, or the only button of a touch or pen.
    #[default]
    Primary,
    /// Right button.
    Secondary,
    /// Middle button or wheel press.
    Auxiliary,
}

/// A pointer event in scaled (container) units, stamped by the host clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Kind of the event.
    pub kind: PointerKind,
    /// Pointer position in scaled units.
    pub position: Point,
    /// Button that changed state. Ignored for `Move` and `Leave`.
    pub button: PointerButton,
    /// Primary button held during the event.
    pub primary_held: bool,
    /// Host timestamp of the event.
    pub at: Instant,
}

impl PointerEvent {
    /// Primary button pressed.
    pub fn down(x: f64, y: f64, at: Instant) -> Self {
        Self {
            kind: PointerKind::Down,
            position: Point::new(x, y),
            button: PointerButton::Primary,
            primary_held: true,
            at,
        }
    }

    /// Move with the primary button held.
    pub fn drag(x: f64, y: f64, at: Instant) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Point::new(x, y),
            button: PointerButton::Primary,
            primary_held: true,
            at,
        }
    }

    /// Move without any button held.
    pub fn hover(x: f64, y: f64, at: Instant) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Point::new(x, y),
            button: PointerButton::Primary,
            primary_held: false,
            at,
        }
    }

    /// Primary button released.
    pub fn up(x: f64, y: f64, at: Instant) -> Self {
        Self {
            kind: PointerKind::Up,
            position: Point::new(x, y),
            button: PointerButton::Primary,
            primary_held: false,
            at,
        }
    }

    /// Primary button clicked.
    pub fn click(x: f64, y: f64, at: Instant) -> Self {
        Self {
            kind: PointerKind::Click,
            position: Point::new(x, y),
            button: PointerButton::Primary,
            primary_held: false,
            at,
        }
    }

    /// Pointer left the page.
    pub fn leave(at: Instant) -> Self {
        Self {
            kind: PointerKind::Leave,
            position: Point::default(),
            button: PointerButton::Primary,
            primary_held: false,
            at,
        }
    }

    /// Same event for `button`. Pressing another button does not count as
    /// holding the primary one.
    pub fn with_button(self, button: PointerButton) -> Self {
        Self {
            button,
            primary_held: self.primary_held && button == PointerButton::Primary,
            ..self
        }
    }

    /// Whether the event's button is the primary one.
    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

/// A key press with its modifier state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Key name as reported by the host ("c", "Enter", ...).
    pub key: String,
    /// Ctrl held.
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
}

impl KeyInput {
    /// Key press with explicit modifiers.
    pub fn new(key: impl Into<String>, ctrl: bool, meta: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            meta,
        }
    }

    /// Ctrl+C or Cmd+C.
    pub fn is_copy(&self) -> bool {
        (self.ctrl || self.meta) && self.key.eq_ignore_ascii_case("c")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_accepts_ctrl_or_meta() {
        assert!(KeyInput::new("c", true, false).is_copy());
        assert!(KeyInput::new("C", false, true).is_copy());
        assert!(!KeyInput::new("c", false, false).is_copy());
        assert!(!KeyInput::new("v", true, false).is_copy());
    }

    #[test]
    fn secondary_button_never_counts_as_primary_held() {
        let at = Instant::now();
        let down = PointerEvent::down(1.0, 2.0, at).with_button(PointerButton::Secondary);
        assert_eq!(down.kind, PointerKind::Down);
        assert!(!down.is_primary());
        assert!(!down.primary_held);
        assert!(PointerEvent::up(1.0, 2.0, at).is_primary());
    }
}
