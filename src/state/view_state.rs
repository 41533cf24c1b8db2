//! Viewer state value types.
//!
//! `ViewState` is pure data. The store never mutates it in place: every
//! transition builds a new value with [`ViewState::apply`] and swaps it in.

use crate::config::ViewerConfig;
use crate::layout::{LayoutSelection, LayoutType, ToolbarItem};
use crate::model::{DocumentId, PageId, PageRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Page rotation. Only quarter turns exist, so rotation is always a multiple of 90.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    /// Upright.
    #[default]
    Deg0,
    /// Quarter turn clockwise.
    Deg90,
    /// Upside down.
    Deg180,
    /// Quarter turn counter-clockwise.
    Deg270,
}

impl Rotation {
    /// Angle in degrees.
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Next rotation clockwise.
    pub fn clockwise(&self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Next rotation counter-clockwise.
    pub fn counter_clockwise(&self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg270,
            Rotation::Deg90 => Rotation::Deg0,
            Rotation::Deg180 => Rotation::Deg90,
            Rotation::Deg270 => Rotation::Deg180,
        }
    }

    /// 90 or 270: width and height trade places.
    pub fn is_quarter_turn(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Error for rotations that are not a multiple of 90 in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rotation must be 0, 90, 180 or 270 (got {0})")]
pub struct InvalidRotation(pub u16);

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(InvalidRotation(other)),
        }
    }
}

/// Where the host draws its toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarPosition {
    /// Above the pages.
    #[default]
    Top,
    /// Below the pages.
    Bottom,
    /// Left of the pages.
    Left,
    /// Right of the pages.
    Right,
}

/// Which layer of the page is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layer {
    /// Page image with the text layer over it.
    #[default]
    Image,
    /// Text layer only.
    TextOnly,
}

/// Page navigation cursor.
///
/// `current_page_index` is stored as supplied. Indices the store computes
/// itself are always within `[0, total_pages)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNav {
    /// Raw selected index, possibly out of range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page_index: Option<i64>,
    /// Pages in the datasource.
    pub total_pages: usize,
}

impl PageNav {
    /// The current index if it addresses an existing page.
    pub fn valid_index(&self) -> Option<usize> {
        self.current_page_index
            .and_then(|i| usize::try_from(i).ok())
            .filter(|i| *i < self.total_pages)
    }
}

/// Current visualization state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Zoom in percent.
    pub zoom_level: u32,
    /// Page rotation.
    pub rotation: Rotation,
    /// Layout choice.
    pub layout: LayoutSelection,
    /// Toolbar placement.
    pub toolbar_position: ToolbarPosition,
    /// Document of the current page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_document_id: Option<DocumentId>,
    /// Current page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page_id: Option<PageId>,
    /// Full screen on.
    pub fullscreen: bool,
    /// Best fit on.
    pub best_fit: bool,
    /// Page index and count.
    pub page_nav: PageNav,
    /// Layer shown.
    pub current_layer: Layer,
    /// Toggled toolbar items.
    pub selected_toolbar_items: BTreeSet<ToolbarItem>,
}

impl ViewState {
    /// Fresh state from configured defaults with caller overrides applied.
    pub fn initial(config: &ViewerConfig, overrides: &ViewStateOverrides) -> Self {
        let state = Self {
            zoom_level: config.zoom.default,
            rotation: Rotation::Deg0,
            layout: LayoutSelection::new(LayoutType::None),
            toolbar_position: config.toolbar_position,
            current_document_id: None,
            current_page_id: None,
            fullscreen: false,
            best_fit: false,
            page_nav: PageNav::default(),
            current_layer: Layer::Image,
            selected_toolbar_items: BTreeSet::new(),
        };
        overrides.applied_to(state)
    }

    /// New state with every `Some` field of `patch` replaced.
    pub fn apply(&self, patch: ViewStatePatch) -> Self {
        let mut next = self.clone();
        if let Some(zoom_level) = patch.zoom_level {
            next.zoom_level = zoom_level;
        }
        if let Some(rotation) = patch.rotation {
            next.rotation = rotation;
        }
        if let Some(layout) = patch.layout {
            next.layout = layout;
        }
        if let Some(toolbar_position) = patch.toolbar_position {
            next.toolbar_position = toolbar_position;
        }
        if let Some(page_ref) = patch.current_page {
            next.current_document_id = Some(page_ref.document_id);
            next.current_page_id = Some(page_ref.page_id);
        }
        if let Some(fullscreen) = patch.fullscreen {
            next.fullscreen = fullscreen;
        }
        if let Some(best_fit) = patch.best_fit {
            next.best_fit = best_fit;
        }
        if let Some(page_nav) = patch.page_nav {
            next.page_nav = page_nav;
        }
        if let Some(current_layer) = patch.current_layer {
            next.current_layer = current_layer;
        }
        if let Some(items) = patch.selected_toolbar_items {
            next.selected_toolbar_items = items;
        }
        next
    }

    /// Currently targeted page, when both ids are set.
    pub fn current_page(&self) -> Option<PageRef> {
        match (&self.current_document_id, &self.current_page_id) {
            (Some(doc), Some(page)) => Some(PageRef::new(doc.clone(), page.clone())),
            _ => None,
        }
    }
}

/// Partial update of a [`ViewState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStatePatch {
    /// New zoom level.
    pub zoom_level: Option<u32>,
    /// New rotation.
    pub rotation: Option<Rotation>,
    /// New layout choice.
    pub layout: Option<LayoutSelection>,
    /// New toolbar position.
    pub toolbar_position: Option<ToolbarPosition>,
    /// Sets both the current document and page id.
    pub current_page: Option<PageRef>,
    /// New full screen flag.
    pub fullscreen: Option<bool>,
    /// New best fit flag.
    pub best_fit: Option<bool>,
    /// New page navigation.
    pub page_nav: Option<PageNav>,
    /// New layer.
    pub current_layer: Option<Layer>,
    /// New toolbar selection.
    pub selected_toolbar_items: Option<BTreeSet<ToolbarItem>>,
}

/// Caller-provided fields that survive datasource resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewStateOverrides {
    /// Toolbar position to keep.
    pub toolbar_position: Option<ToolbarPosition>,
    /// Layer to keep.
    pub current_layer: Option<Layer>,
    /// Full screen flag to keep.
    pub fullscreen: Option<bool>,
    /// Best fit flag to keep.
    pub best_fit: Option<bool>,
}

impl ViewStateOverrides {
    /// Copy of `state` with the overrides applied.
    pub fn applied_to(&self, mut state: ViewState) -> ViewState {
        if let Some(position) = self.toolbar_position {
            state.toolbar_position = position;
        }
        if let Some(layer) = self.current_layer {
            state.current_layer = layer;
        }
        if let Some(fullscreen) = self.fullscreen {
            state.fullscreen = fullscreen;
        }
        if let Some(best_fit) = self.best_fit {
            state.best_fit = best_fit;
        }
        state
    }
}

/// Arguments of a page selection change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSelection {
    /// Requested index.
    pub page_index: Option<i64>,
    /// Page count, when known to the caller.
    pub total_pages: Option<usize>,
}

impl PageSelection {
    /// Selection of `page_index`.
    pub fn index(page_index: i64) -> Self {
        Self {
            page_index: Some(page_index),
            total_pages: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_turns_wrap_around() {
        assert_eq!(Rotation::Deg270.clockwise(), Rotation::Deg0);
        assert_eq!(Rotation::Deg0.counter_clockwise(), Rotation::Deg270);
        assert!(Rotation::Deg90.is_quarter_turn());
        assert!(!Rotation::Deg180.is_quarter_turn());
    }

    #[test]
    fn rotation_rejects_non_quarter_degrees() {
        assert_eq!(Rotation::try_from(45), Err(InvalidRotation(45)));
        assert_eq!(Rotation::try_from(180), Ok(Rotation::Deg180));
        assert!(serde_json::from_str::<Rotation>("360").is_err());
    }

    #[test]
    fn initial_state_uses_config_and_overrides() {
        let config = ViewerConfig::default();
        let overrides = ViewStateOverrides {
            toolbar_position: Some(ToolbarPosition::Right),
            current_layer: Some(Layer::TextOnly),
            ..ViewStateOverrides::default()
        };
        let state = ViewState::initial(&config, &overrides);
        assert_eq!(state.zoom_level, config.zoom.default);
        assert_eq!(state.toolbar_position, ToolbarPosition::Right);
        assert_eq!(state.current_layer, Layer::TextOnly);
        assert_eq!(state.layout.layout_type, LayoutType::None);
    }

    #[test]
    fn apply_replaces_only_patched_fields() {
        let state = ViewState::initial(&ViewerConfig::default(), &ViewStateOverrides::default());
        let next = state.apply(ViewStatePatch {
            zoom_level: Some(150),
            fullscreen: Some(true),
            ..ViewStatePatch::default()
        });
        assert_eq!(next.zoom_level, 150);
        assert!(next.fullscreen);
        assert_eq!(next.rotation, state.rotation);
        assert_eq!(state.zoom_level, 100, "original is untouched");
    }

    #[test]
    fn valid_index_filters_out_of_range() {
        let nav = PageNav {
            current_page_index: Some(-1),
            total_pages: 3,
        };
        assert_eq!(nav.valid_index(), None);
        let nav = PageNav {
            current_page_index: Some(2),
            total_pages: 3,
        };
        assert_eq!(nav.valid_index(), Some(2));
    }

    #[test]
    fn view_state_serializes_camel_case() {
        let state = ViewState::initial(&ViewerConfig::default(), &ViewStateOverrides::default());
        let json = serde_json::to_value(&state).expect("serializable");
        assert_eq!(json["zoomLevel"], 100);
        assert_eq!(json["rotation"], 0);
        assert_eq!(json["layout"]["type"], "none");
        assert_eq!(json["pageNav"]["totalPages"], 0);
    }
}
