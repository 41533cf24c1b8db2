//! Viewer state store.
//!
//! [`ViewerStore`] is the single owner of the [`ViewState`]. Every public
//! operation builds a new state value, swaps it in and publishes a
//! [`ViewerEvent`]. Follow-up reactions (zoom-driven layout changes and the
//! zoom reset after a layout change) are queued and run once the operation's
//! own swap has completed, never from inside it.

use super::event::{EventData, EventType, ViewerEvent};
use super::view_state::{
    Layer, PageNav, PageSelection, Rotation, ToolbarPosition, ViewState, ViewStateOverrides,
    ViewStatePatch,
};
use crate::config::ViewerConfig;
use crate::geometry::ContainerRect;
use crate::layout::{
    compute_layout, grid_override_for, redensify_grid, should_promote_to_grid, GridDensity,
    GridOverride, Layout, LayoutSelection, LayoutType, ToolbarItem,
};
use crate::model::{Advisory, Datasource, Notifier, PageId, PageRef};
use crate::scheduler::{DeferredQueue, Signal, SubscriptionId};
use std::fmt;
use tracing::{debug, info};

/// Who asked for a state change.
///
/// Only user-originated zoom changes drive layout density; zoom changes made
/// by a reaction must not feed back into the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeOrigin {
    User,
    Reaction,
}

/// Follow-up work queued by a state swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    /// Zoom moved from `old` to `new`.
    Zoom { old: u32, new: u32 },
    /// Layout type, page count or user layout changed: restore default zoom.
    ResetZoom,
}

/// Owner of the viewer state.
pub struct ViewerStore {
    config: ViewerConfig,
    overrides: ViewStateOverrides,
    notifier: Box<dyn Notifier>,
    datasource: Datasource,
    /// Last layout explicitly chosen by the user, if any.
    user_selected_layout: Option<LayoutType>,
    state: ViewState,
    reactions: DeferredQueue<Reaction>,
    events: Signal<ViewerEvent>,
}

impl fmt::Debug for ViewerStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewerStore")
            .field("state", &self.state)
            .field("user_selected_layout", &self.user_selected_layout)
            .field("pending_reactions", &self.reactions.len())
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl ViewerStore {
    /// Store with an empty datasource.
    pub fn new(config: ViewerConfig, notifier: Box<dyn Notifier>) -> Self {
        Self::with_overrides(config, notifier, ViewStateOverrides::default())
    }

    /// Store whose overrides are re-applied on every datasource reset.
    pub fn with_overrides(
        config: ViewerConfig,
        notifier: Box<dyn Notifier>,
        overrides: ViewStateOverrides,
    ) -> Self {
        let state = ViewState::initial(&config, &overrides);
        Self {
            config,
            overrides,
            notifier,
            datasource: Datasource::default(),
            user_selected_layout: None,
            state,
            reactions: DeferredQueue::new(),
            events: Signal::broadcast(),
        }
    }

    // ===== Accessors =====

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Layout derived from the current state and page count.
    pub fn layout(&self) -> Layout {
        compute_layout(
            &self.state.layout,
            self.state.page_nav.total_pages,
            self.config.grid,
        )
    }

    /// Loaded datasource.
    pub fn datasource(&self) -> &Datasource {
        &self.datasource
    }

    /// Resolved configuration.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Last layout the user picked, if any.
    pub fn user_selected_layout(&self) -> Option<LayoutType> {
        self.user_selected_layout
    }

    /// Register for events emitted after this call.
    pub fn subscribe(&mut self, listener: impl FnMut(&ViewerEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Remove an event listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.events.unsubscribe(id);
    }

    // ===== Core operations =====

    /// Replace the datasource and reset the view state.
    ///
    /// Multi-document datasources always open in the grid. A single document
    /// reopens in the user's last single-page or scrollable choice, else in the
    /// configured default layout. The single-page layout starts on page 0.
    pub fn update_datasource(&mut self, datasource: Datasource) {
        let total = datasource.total_pages();
        let selection = self.initial_layout(&datasource);

        let mut next = ViewState::initial(&self.config, &self.overrides);
        next.layout = selection;
        next.page_nav = PageNav {
            current_page_index: None,
            total_pages: total,
        };
        if selection.layout_type == LayoutType::SinglePage {
            if let Some(first) = datasource.page_at(0) {
                next.page_nav.current_page_index = Some(0);
                next.current_document_id = Some(first.document_id);
                next.current_page_id = Some(first.page_id);
            }
        }

        info!(
            documents = datasource.document_count(),
            pages = total,
            layout = %selection.layout_type,
            "Datasource updated"
        );
        self.datasource = datasource;
        self.commit(next, EventType::DataSourceChanged, ChangeOrigin::User, true);
        self.drain_reactions();
    }

    /// Merge a partial state and publish an event of `event_type`.
    ///
    /// A `PageSelected` change that involves the single-page layout (before or
    /// after) always resets rotation to 0, whatever the patch says. Page
    /// selections outside the single-page layout are applied silently.
    pub fn change_viewer_state(&mut self, patch: ViewStatePatch, event_type: EventType) {
        self.apply_change(patch, event_type, ChangeOrigin::User);
        self.drain_reactions();
    }

    /// Move the page cursor and/or change the page count.
    ///
    /// The index is stored as given. When it addresses an existing page the
    /// current document and page ids follow it.
    pub fn change_page_selection(&mut self, selection: PageSelection) {
        let mut nav = self.state.page_nav;
        if let Some(total) = selection.total_pages {
            nav.total_pages = total;
        }
        if let Some(index) = selection.page_index {
            nav.current_page_index = Some(index);
        }
        let current_page = nav.valid_index().and_then(|i| self.datasource.page_at(i));
        if nav.current_page_index.is_some() && current_page.is_none() {
            debug!(index = ?nav.current_page_index, total = nav.total_pages, "Page index outside datasource");
        }

        self.change_viewer_state(
            ViewStatePatch {
                page_nav: Some(nav),
                current_page,
                ..ViewStatePatch::default()
            },
            EventType::PageSelected,
        );
    }

    /// Select the first page with `page_id`. Unknown ids are ignored.
    pub fn change_page_by_id(&mut self, page_id: &PageId) {
        let Some((index, page_ref)) = self.datasource.find_page(page_id) else {
            debug!(page = %page_id, "Unknown page id, selection unchanged");
            return;
        };

        let nav = PageNav {
            current_page_index: Some(i64::try_from(index).unwrap_or(i64::MAX)),
            total_pages: self.state.page_nav.total_pages,
        };
        self.change_viewer_state(
            ViewStatePatch {
                page_nav: Some(nav),
                current_page: Some(page_ref),
                ..ViewStatePatch::default()
            },
            EventType::PageSelected,
        );
    }

    /// Toggle a toolbar item's selected state.
    ///
    /// Items the current layout does not offer are ignored.
    pub fn change_toolbar_item_selection_state(&mut self, item: ToolbarItem, event_type: EventType) {
        if !self.layout().is_action_available(item) {
            debug!(?item, "Toolbar item not available in current layout");
            return;
        }

        let mut items = self.state.selected_toolbar_items.clone();
        if !items.remove(&item) {
            items.insert(item);
        }
        self.change_viewer_state(
            ViewStatePatch {
                selected_toolbar_items: Some(items),
                ..ViewStatePatch::default()
            },
            event_type,
        );
    }

    /// Apply a layout chosen by the user and remember the choice.
    pub fn change_user_selected_layout(&mut self, layout_type: LayoutType) {
        if layout_type == LayoutType::None {
            debug!("Ignoring explicit selection of the empty layout");
            return;
        }

        let changed = self.user_selected_layout != Some(layout_type);
        self.user_selected_layout = Some(layout_type);

        let selection = if layout_type == LayoutType::Grid {
            LayoutSelection::grid(grid_override_for(
                self.datasource.total_pages(),
                self.config.grid,
            ))
        } else {
            LayoutSelection::new(layout_type)
        };

        let mut patch = ViewStatePatch {
            layout: Some(selection),
            ..ViewStatePatch::default()
        };
        if layout_type == LayoutType::SinglePage && self.state.page_nav.valid_index().is_none() {
            if let Some(first) = self.datasource.page_at(0) {
                patch.page_nav = Some(PageNav {
                    current_page_index: Some(0),
                    total_pages: self.state.page_nav.total_pages,
                });
                patch.current_page = Some(first);
            }
        }

        info!(layout = %layout_type, "User selected layout");
        self.apply_change(patch, EventType::LayoutChanged, ChangeOrigin::User);
        if changed {
            self.schedule_zoom_reset();
        }
        self.drain_reactions();
    }

    // ===== Toolbar conveniences =====

    /// Zoom in by one step.
    pub fn zoom_in(&mut self) {
        let level = self.state.zoom_level.saturating_add(self.config.zoom.step);
        self.toolbar_zoom(ToolbarItem::ZoomIn, level);
    }

    /// Zoom out by one step.
    pub fn zoom_out(&mut self) {
        let level = self.state.zoom_level.saturating_sub(self.config.zoom.step);
        self.toolbar_zoom(ToolbarItem::ZoomOut, level);
    }

    fn toolbar_zoom(&mut self, item: ToolbarItem, level: u32) {
        if !self.layout().is_action_available(item) {
            debug!(?item, "Zoom not available in current layout");
            return;
        }
        self.set_zoom(level);
    }

    /// Set the zoom level, clamped to the configured bounds.
    pub fn set_zoom(&mut self, level: u32) {
        let level = self.config.zoom.clamp(level);
        if level == self.state.zoom_level {
            return;
        }
        self.change_viewer_state(
            ViewStatePatch {
                zoom_level: Some(level),
                ..ViewStatePatch::default()
            },
            EventType::ZoomChanged,
        );
    }

    /// Rotate a quarter turn clockwise.
    pub fn rotate_clockwise(&mut self) {
        let rotation = self.state.rotation.clockwise();
        self.rotate(ToolbarItem::RotateRight, rotation);
    }

    /// Rotate a quarter turn counter-clockwise.
    pub fn rotate_counter_clockwise(&mut self) {
        let rotation = self.state.rotation.counter_clockwise();
        self.rotate(ToolbarItem::RotateLeft, rotation);
    }

    fn rotate(&mut self, item: ToolbarItem, rotation: Rotation) {
        if !self.layout().is_action_available(item) {
            debug!(?item, "Rotation not available in current layout");
            return;
        }
        self.change_viewer_state(
            ViewStatePatch {
                rotation: Some(rotation),
                ..ViewStatePatch::default()
            },
            EventType::RotationChanged,
        );
    }

    /// Enter or leave fullscreen. Sticks across datasource changes.
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.overrides.fullscreen = Some(fullscreen);
        if self.state.fullscreen == fullscreen {
            return;
        }
        let event_type = if fullscreen {
            EventType::FullScreenEnter
        } else {
            EventType::FullScreenExit
        };
        self.change_viewer_state(
            ViewStatePatch {
                fullscreen: Some(fullscreen),
                ..ViewStatePatch::default()
            },
            event_type,
        );
    }

    /// Turn best fit on or off.
    pub fn set_best_fit(&mut self, best_fit: bool) {
        if best_fit && !self.layout().is_action_available(ToolbarItem::BestFit) {
            debug!("Best fit not available in current layout");
            return;
        }
        self.overrides.best_fit = Some(best_fit);
        if self.state.best_fit == best_fit {
            return;
        }
        self.change_viewer_state(
            ViewStatePatch {
                best_fit: Some(best_fit),
                ..ViewStatePatch::default()
            },
            EventType::ViewChanged,
        );
    }

    /// Show `layer`.
    pub fn set_current_layer(&mut self, layer: Layer) {
        self.overrides.current_layer = Some(layer);
        if self.state.current_layer == layer {
            return;
        }
        self.change_viewer_state(
            ViewStatePatch {
                current_layer: Some(layer),
                ..ViewStatePatch::default()
            },
            EventType::ViewChanged,
        );
    }

    /// Move the toolbar.
    pub fn set_toolbar_position(&mut self, position: ToolbarPosition) {
        self.overrides.toolbar_position = Some(position);
        if self.state.toolbar_position == position {
            return;
        }
        self.change_viewer_state(
            ViewStatePatch {
                toolbar_position: Some(position),
                ..ViewStatePatch::default()
            },
            EventType::ViewChanged,
        );
    }

    /// Select the next page.
    pub fn next_page(&mut self) {
        self.step_page(1);
    }

    /// Select the previous page.
    pub fn previous_page(&mut self) {
        self.step_page(-1);
    }

    /// Move the cursor by `delta`, clamped to the page range.
    /// Without a valid cursor, navigation starts at page 0.
    fn step_page(&mut self, delta: i64) {
        let nav = self.state.page_nav;
        if nav.total_pages == 0 {
            return;
        }
        let last = i64::try_from(nav.total_pages - 1).unwrap_or(i64::MAX);
        let target = match nav.valid_index() {
            Some(current) => {
                let current = i64::try_from(current).unwrap_or(i64::MAX);
                (current.saturating_add(delta)).clamp(0, last)
            }
            None => 0,
        };
        if nav.current_page_index == Some(target) {
            return;
        }
        self.change_page_selection(PageSelection::index(target));
    }

    // ===== Host notifications =====

    /// Publish a `Resize` event. Degenerate containers are ignored.
    pub fn notify_resize(&mut self, container: ContainerRect) {
        if container.is_degenerate() {
            debug!(?container, "Ignoring degenerate container");
            return;
        }
        self.events.emit(ViewerEvent::now(EventType::Resize, None));
    }

    /// Publish an `ImageLoaded` event for `page`.
    pub fn notify_image_loaded(&mut self, page: PageRef) {
        let data = EventData {
            old_value: self.state.clone(),
            new_value: self.state.clone(),
            data_source_ref: vec![page],
        };
        self.events
            .emit(ViewerEvent::now(EventType::ImageLoaded, Some(data)));
    }

    // ===== Internals =====

    fn initial_layout(&self, datasource: &Datasource) -> LayoutSelection {
        let total = datasource.total_pages();
        if total == 0 {
            return LayoutSelection::new(LayoutType::None);
        }
        if datasource.document_count() > 1 {
            return LayoutSelection::grid(grid_override_for(total, self.config.grid));
        }

        let layout_type = match self.user_selected_layout {
            Some(t @ (LayoutType::SingleScrollable | LayoutType::SinglePage)) => t,
            _ => self.config.default_layout,
        };
        if layout_type == LayoutType::Grid {
            LayoutSelection::grid(grid_override_for(total, self.config.grid))
        } else {
            LayoutSelection::new(layout_type)
        }
    }

    fn apply_change(&mut self, patch: ViewStatePatch, event_type: EventType, origin: ChangeOrigin) {
        let mut next = self.state.apply(patch);
        let mut publish = true;

        if event_type == EventType::PageSelected {
            let single_page = self.state.layout.layout_type == LayoutType::SinglePage
                || next.layout.layout_type == LayoutType::SinglePage;
            if single_page {
                next.rotation = Rotation::Deg0;
            }
            publish = single_page;
        }

        self.commit(next, event_type, origin, publish);
    }

    /// Swap in `next`, publish and queue the reactions the swap triggers.
    fn commit(&mut self, next: ViewState, event_type: EventType, origin: ChangeOrigin, publish: bool) {
        let old = std::mem::replace(&mut self.state, next);
        let old_layout = compute_layout(&old.layout, old.page_nav.total_pages, self.config.grid);
        let new_layout = self.layout();

        debug!(?event_type, ?origin, publish, "View state swapped");

        if event_type == EventType::ZoomChanged
            && origin == ChangeOrigin::User
            && old.zoom_level != self.state.zoom_level
        {
            self.reactions.schedule(Reaction::Zoom {
                old: old.zoom_level,
                new: self.state.zoom_level,
            });
        }
        if old_layout.layout_type != new_layout.layout_type
            || old.page_nav.total_pages != self.state.page_nav.total_pages
        {
            self.schedule_zoom_reset();
        }

        if publish {
            let data = EventData {
                data_source_ref: self.affected_pages(),
                old_value: old,
                new_value: self.state.clone(),
            };
            self.events.emit(ViewerEvent::now(event_type, Some(data)));
        }
    }

    /// Pages an event refers to: the current page in the single-page layout,
    /// otherwise every page.
    fn affected_pages(&self) -> Vec<PageRef> {
        if self.state.layout.layout_type == LayoutType::SinglePage {
            return self.state.current_page().into_iter().collect();
        }
        self.datasource.page_refs()
    }

    fn schedule_zoom_reset(&mut self) {
        self.reactions.cancel_where(|r| *r == Reaction::ResetZoom);
        self.reactions.schedule(Reaction::ResetZoom);
    }

    fn drain_reactions(&mut self) {
        while let Some(reaction) = self.reactions.next() {
            match reaction {
                Reaction::Zoom { old, new } => self.react_to_zoom(old, new),
                Reaction::ResetZoom => self.reset_zoom(),
            }
        }
    }

    fn react_to_zoom(&mut self, old: u32, new: u32) {
        let layout = self.layout();
        let base = self.config.grid;

        match layout.layout_type {
            LayoutType::Grid => {
                let current = self
                    .state
                    .layout
                    .grid_override
                    .unwrap_or(GridOverride::new(base.rows, base.columns));
                match redensify_grid(current, old, new, self.config.zoom.step, base) {
                    GridDensity::Unchanged => {}
                    GridDensity::Grid(shape) => {
                        debug!(rows = shape.rows, columns = shape.columns, "Grid density changed");
                        self.apply_reaction_layout(LayoutSelection::grid(shape));
                    }
                    GridDensity::FallbackToSingle => {
                        info!("Grid collapsed, switching to single scrollable view");
                        self.apply_reaction_layout(LayoutSelection::new(
                            LayoutType::SingleScrollable,
                        ));
                        self.notifier.notify(Advisory::GridToSingleView);
                    }
                }
            }
            LayoutType::SingleScrollable
                if should_promote_to_grid(old, new, self.config.zoom.default) =>
            {
                info!(old, new, "Zoomed out of scrollable view, switching to grid");
                let shape = grid_override_for(self.state.page_nav.total_pages, base);
                self.apply_reaction_layout(LayoutSelection::grid(shape));
                self.notifier.notify(Advisory::SingleViewToGrid);
            }
            _ => {}
        }
    }

    fn apply_reaction_layout(&mut self, selection: LayoutSelection) {
        self.apply_change(
            ViewStatePatch {
                layout: Some(selection),
                ..ViewStatePatch::default()
            },
            EventType::LayoutChanged,
            ChangeOrigin::Reaction,
        );
    }

    fn reset_zoom(&mut self) {
        let default = self.config.zoom.default;
        if self.state.zoom_level == default {
            return;
        }
        debug!(from = self.state.zoom_level, to = default, "Resetting zoom after layout change");
        self.apply_change(
            ViewStatePatch {
                zoom_level: Some(default),
                ..ViewStatePatch::default()
            },
            EventType::ZoomChanged,
            ChangeOrigin::Reaction,
        );
    }
}

#[cfg(test)]
#[path = "viewer_tests.rs"]
mod tests;
