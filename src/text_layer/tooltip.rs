//! Hover tooltips for text elements.

use crate::config::TextLayerConfig;
use crate::geometry::{Primitive, ScaledRect};
use serde::Serialize;

/// Side of the element a tooltip goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    /// Under the element.
    Below,
    /// Over the element.
    Above,
}

/// Tooltip for one hovered element, positioned in scaled units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    /// Tooltip text.
    pub text: String,
    /// The element the tooltip describes.
    pub anchor: ScaledRect,
    /// Side of the element.
    pub placement: Placement,
    /// Left edge in scaled units.
    pub left: f64,
    /// Top edge in scaled units.
    pub top: f64,
}

/// Place a tooltip below `element`, or above it when it would not fit
/// inside `container_height`.
pub fn place_tooltip(element: &Primitive, container_height: f64, config: &TextLayerConfig) -> Tooltip {
    let anchor = element.scaled_rect().normalized();
    let below = anchor.bottom() as f64 + config.tooltip_offset;
    let overflows = below + config.tooltip_height + config.tooltip_buffer > container_height;

    let (placement, top) = if overflows {
        (
            Placement::Above,
            anchor.top as f64 - config.tooltip_offset - config.tooltip_height,
        )
    } else {
        (Placement::Below, below)
    };

    Tooltip {
        text: element.text.text.clone(),
        anchor,
        placement,
        left: anchor.left as f64,
        top,
    }
}
