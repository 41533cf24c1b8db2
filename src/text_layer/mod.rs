//! Text overlay of a single page.
//!
//! - `host`: host page context and scale computation
//! - `input`: pointer and key events
//! - `selection`: hit bounds, rubber-band completion, double-click selection
//! - `tooltip`: hover tooltip placement
//! - `engine`: `TextLayerEngine`, the state machine tying them together

pub mod engine;
pub mod host;
pub mod input;
pub mod selection;
pub mod tooltip;

pub use engine::{DragPhase, TextLayerEngine, TextLayerOutputs};
pub use host::{compute_scale, HostContext};
pub use input::{KeyInput, PointerButton, PointerEvent, PointerKind};
pub use selection::{complete_band, contained_texts, within_hit_bounds, TextSelection};
pub use tooltip::{place_tooltip, Placement, Tooltip};
