//! Change events published by the viewer store.

use super::view_state::ViewState;
use crate::model::PageRef;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Kind of change a [`ViewerEvent`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventType {
    /// Zoom level changed.
    ZoomChanged,
    /// Rotation changed.
    RotationChanged,
    /// Full screen turned on.
    FullScreenEnter,
    /// Full screen turned off.
    FullScreenExit,
    /// Layout type or grid shape changed.
    LayoutChanged,
    /// Another page was selected.
    PageSelected,
    /// A view toggle changed.
    ViewChanged,
    /// A new datasource was loaded.
    DataSourceChanged,
    /// The container was resized.
    Resize,
    /// A page image finished loading.
    ImageLoaded,
}

/// Before/after snapshot attached to state-changing events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    /// State before the change.
    pub old_value: ViewState,
    /// State after the change.
    pub new_value: ViewState,
    /// Pages the change applies to.
    pub data_source_ref: Vec<PageRef>,
}

/// Change notification sent to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerEvent {
    /// Kind of change.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// When the change happened.
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Snapshot, absent for events without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<EventData>,
}

impl ViewerEvent {
    /// Event stamped with the current time.
    pub fn now(event_type: EventType, data: Option<EventData>) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }
}

/// `YYYY-MM-DD HH:MM:SS:mmm`, UTC.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S:%3f").to_string()
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(timestamp))
}
