//! Viewer state (pure values plus the store that owns them).
//!
//! - `view_state`: `ViewState` and its patch/override types
//! - `event`: change events published to subscribers
//! - `viewer`: `ViewerStore`, the single owner of the state

pub mod event;
pub mod view_state;
pub mod viewer;

pub use event::{format_timestamp, EventData, EventType, ViewerEvent};
pub use view_state::{
    InvalidRotation, Layer, PageNav, PageSelection, Rotation, ToolbarPosition, ViewState,
    ViewStateOverrides, ViewStatePatch,
};
pub use viewer::ViewerStore;
