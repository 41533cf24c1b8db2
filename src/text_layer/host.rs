//! Host page context and scale computation.

use crate::geometry::ContainerRect;
use crate::model::{DocumentId, PageId, PageRef, TextLayerError};
use crate::state::Rotation;

/// The page a text layer is attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct HostContext {
    /// Document of the page.
    pub document_id: DocumentId,
    /// Page the layer belongs to.
    pub page_id: PageId,
    /// Natural (unrotated) page width in actual units.
    pub natural_width: f64,
    /// Natural (unrotated) page height in actual units.
    pub natural_height: f64,
    /// Rotation the page is shown with.
    pub rotation: Option<Rotation>,
}

impl HostContext {
    /// Validated host context.
    pub fn new(
        document_id: DocumentId,
        page_id: PageId,
        natural_width: f64,
        natural_height: f64,
        rotation: Option<Rotation>,
    ) -> Result<Self, TextLayerError> {
        let host = Self {
            document_id,
            page_id,
            natural_width,
            natural_height,
            rotation,
        };
        host.validate()?;
        Ok(host)
    }

    /// Build from raw ids as received from the host UI.
    pub fn from_raw(
        document_id: &str,
        page_id: &str,
        natural_width: f64,
        natural_height: f64,
        rotation: Option<Rotation>,
    ) -> Result<Self, TextLayerError> {
        let document_id = DocumentId::new(document_id)
            .map_err(|e| TextLayerError::invalid_host(e.to_string()))?;
        let page_id =
            PageId::new(page_id).map_err(|e| TextLayerError::invalid_host(e.to_string()))?;
        Self::new(document_id, page_id, natural_width, natural_height, rotation)
    }

    /// Reject empty or degenerate page sizes.
    pub fn validate(&self) -> Result<(), TextLayerError> {
        if !(self.natural_width.is_finite() && self.natural_width > 0.0) {
            return Err(TextLayerError::invalid_host(format!(
                "naturalWidth must be > 0 (got {})",
                self.natural_width
            )));
        }
        if !(self.natural_height.is_finite() && self.natural_height > 0.0) {
            return Err(TextLayerError::invalid_host(format!(
                "naturalHeight must be > 0 (got {})",
                self.natural_height
            )));
        }
        Ok(())
    }

    /// Natural size as displayed: swapped for quarter turns.
    pub fn oriented_size(&self) -> (f64, f64) {
        match self.rotation {
            Some(r) if r.is_quarter_turn() => (self.natural_height, self.natural_width),
            _ => (self.natural_width, self.natural_height),
        }
    }

    /// Reference to the host page.
    pub fn page_ref(&self) -> PageRef {
        PageRef::new(self.document_id.clone(), self.page_id.clone())
    }
}

/// Average of the horizontal and vertical fit ratios.
pub fn compute_scale(host: &HostContext, container: &ContainerRect) -> f64 {
    let (width, height) = host.oriented_size();
    (container.width / width + container.height / height) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(w: f64, h: f64, rotation: Option<Rotation>) -> Result<HostContext, TextLayerError> {
        HostContext::from_raw("doc", "p1", w, h, rotation)
    }

    #[test]
    fn scale_averages_both_axes() {
        let host = host(100.0, 200.0, None).expect("valid host");
        let container = ContainerRect::new(200.0, 200.0, 0.0, 0.0);
        // (200 / 100 + 200 / 200) / 2 = 1.5
        assert_eq!(compute_scale(&host, &container), 1.5);
    }

    #[test]
    fn quarter_turn_swaps_natural_size() {
        let host = host(100.0, 200.0, Some(Rotation::Deg90)).expect("valid host");
        let container = ContainerRect::new(200.0, 100.0, 0.0, 0.0);
        assert_eq!(compute_scale(&host, &container), 1.0);

        let upside_down = HostContext {
            rotation: Some(Rotation::Deg180),
            ..host
        };
        assert_eq!(upside_down.oriented_size(), (100.0, 200.0));
    }

    #[test]
    fn rejects_empty_ids() {
        let err = HostContext::from_raw("", "p1", 10.0, 10.0, None).unwrap_err();
        assert!(matches!(err, TextLayerError::InvalidHostContext { .. }));
        assert!(HostContext::from_raw("doc", "", 10.0, 10.0, None).is_err());
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(host(0.0, 10.0, None).is_err());
        assert!(host(10.0, -1.0, None).is_err());
        assert!(host(f64::NAN, 10.0, None).is_err());
    }
}
