//! Collaborator contracts the engine calls out to.
//!
//! All of them are fire-and-forget: the engine never depends on a return value,
//! so hosts can implement them with whatever UI plumbing they have.

use super::identifiers::PageRef;
use tracing::info;

/// User-facing advisory raised by an automatic view change.
///
/// Carries a message key for the host's translation service rather than text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// Zooming in collapsed the grid; the view switched to a single scrollable column.
    GridToSingleView,
    /// Zooming out of the scrollable view switched to the grid.
    SingleViewToGrid,
}

impl Advisory {
    /// Translation key for the advisory text.
    pub fn message_key(&self) -> &'static str {
        match self {
            Advisory::GridToSingleView => "viewer.notification.gridToSingleView",
            Advisory::SingleViewToGrid => "viewer.notification.singleViewToGrid",
        }
    }
}

/// Receives advisories. Implementations must not block.
pub trait Notifier {
    /// Show `advisory` to the user.
    fn notify(&self, advisory: Advisory);
}

/// Notifier that only records advisories in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, advisory: Advisory) {
        info!(key = advisory.message_key(), "View advisory");
    }
}

/// Clipboard used for text selections and rubber-band copy.
pub trait Clipboard {
    /// Put `text` on the clipboard.
    fn copy(&self, text: &str);
}

/// Clipboard that discards everything. Used when the host has no clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn copy(&self, _text: &str) {}
}

/// Navigation requests issued by the text layer.
///
/// The text layer never changes page state itself; it asks the host.
pub trait PageNavigator {
    /// Ask the host to show `target`.
    fn request_page_change(&self, target: &PageRef);
}

/// Navigator that ignores requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoNavigation;

impl PageNavigator for NoNavigation {
    fn request_page_change(&self, _target: &PageRef) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisory_message_keys_are_distinct() {
        assert_ne!(
            Advisory::GridToSingleView.message_key(),
            Advisory::SingleViewToGrid.message_key()
        );
    }

    #[test]
    fn tracing_notifier_does_not_panic_without_subscriber() {
        TracingNotifier.notify(Advisory::GridToSingleView);
    }
}
