//! Datasource description and page loader contract.
//!
//! The datasource is supplied by the hosting application. The engine only
//! reads document/page structure from it; images, thumbnails and OCR text
//! are fetched lazily through a [`PageLoader`].

use super::identifiers::{DocumentId, PageId, PageRef};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Receiver, TryRecvError};

/// One page of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page id, unique within its document.
    pub id: PageId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Whether the page starts selected.
    #[serde(default)]
    pub is_selected: bool,
    /// Extra CSS classes for the page panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_classes: Option<Vec<String>>,
}

/// A document: an ordered list of pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document id.
    pub id: DocumentId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Pages in display order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// Document/page structure shown by the viewer.
///
/// Page order is document order, then page order within each document.
/// Global page indices used by page navigation follow that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasource {
    /// Documents in display order.
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Datasource {
    /// Datasource over `documents`.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Number of documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Total number of pages across all documents.
    pub fn total_pages(&self) -> usize {
        self.documents.iter().map(|doc| doc.pages.len()).sum()
    }

    /// Every page of every document, in order.
    pub fn page_refs(&self) -> Vec<PageRef> {
        self.documents
            .iter()
            .flat_map(|doc| {
                doc.pages
                    .iter()
                    .map(move |page| PageRef::new(doc.id.clone(), page.id.clone()))
            })
            .collect()
    }

    /// Page at a global (0-based) index.
    pub fn page_at(&self, index: usize) -> Option<PageRef> {
        self.documents
            .iter()
            .flat_map(|doc| doc.pages.iter().map(move |page| (doc, page)))
            .nth(index)
            .map(|(doc, page)| PageRef::new(doc.id.clone(), page.id.clone()))
    }

    /// Linear scan for a page id. First match wins.
    ///
    /// Returns the global index and the page reference.
    pub fn find_page(&self, page_id: &PageId) -> Option<(usize, PageRef)> {
        self.documents
            .iter()
            .flat_map(|doc| doc.pages.iter().map(move |page| (doc, page)))
            .enumerate()
            .find(|(_, (_, page))| &page.id == page_id)
            .map(|(index, (doc, page))| (index, PageRef::new(doc.id.clone(), page.id.clone())))
    }
}

/// OCR text box in page-native (unscaled) units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    /// Left edge in page units.
    pub left: f64,
    /// Top edge in page units.
    pub top: f64,
    /// Width in page units.
    pub width: f64,
    /// Height in page units.
    pub height: f64,
    /// Recognized text.
    pub text: String,
    /// Free-form metadata passed through to selections and highlight records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl TextBox {
    /// OCR box at the given page position.
    pub fn new(left: f64, top: f64, width: f64, height: f64, text: impl Into<String>) -> Self {
        Self {
            left,
            top,
            width,
            height,
            text: text.into(),
            payload: None,
        }
    }
}

/// Image data returned by a page loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Encoded bytes or a URL, as the host prefers. Opaque to the engine.
    pub data: Vec<u8>,
}

/// A value that is either available now or delivered later.
#[derive(Debug)]
pub enum Loaded<T> {
    /// Value available now.
    Ready(T),
    /// Value sent later on the channel.
    Deferred(Receiver<T>),
}

impl<T> Loaded<T> {
    /// Poll a deferred value without blocking.
    ///
    /// Returns `Ok(Some(value))` once available, `Ok(None)` while still
    /// pending, and `Err(LoaderGone)` if the producer went away.
    pub fn poll(&mut self) -> Result<Option<T>, LoaderGone>
    where
        T: Default,
    {
        match self {
            Loaded::Ready(value) => Ok(Some(std::mem::take(value))),
            Loaded::Deferred(rx) => match rx.try_recv() {
                Ok(value) => Ok(Some(value)),
                Err(TryRecvError::Empty) => Ok(None),
                Err(TryRecvError::Disconnected) => Err(LoaderGone),
            },
        }
    }
}

/// The producer of a deferred value was dropped before delivering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deferred loader was dropped before delivering a value")]
pub struct LoaderGone;

/// Per-page loaders provided by the host.
///
/// The presence of an OCR loader (`load_page_ocr` returning `Some`) is the only
/// signal that text-layer features are active for a datasource.
pub trait PageLoader {
    /// Page image.
    fn load_image(&self, page_id: &PageId) -> Loaded<PageImage>;

    /// Page thumbnail as a URL or data URI.
    fn load_thumbnail(&self, page_id: &PageId) -> Loaded<String>;

    /// OCR boxes of the page, `None` when the source has no OCR.
    fn load_page_ocr(&self, _page_id: &PageId) -> Option<Loaded<Vec<TextBox>>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn page(id: &str) -> Page {
        Page {
            id: PageId::new(id).expect("valid page id"),
            name: id.to_string(),
            is_selected: false,
            panel_classes: None,
        }
    }

    fn doc(id: &str, pages: &[&str]) -> Document {
        Document {
            id: DocumentId::new(id).expect("valid doc id"),
            name: id.to_string(),
            pages: pages.iter().map(|p| page(p)).collect(),
        }
    }

    #[test]
    fn total_pages_sums_all_documents() {
        let ds = Datasource::new(vec![doc("a", &["a1", "a2"]), doc("b", &["b1"])]);
        assert_eq!(ds.total_pages(), 3);
        assert_eq!(ds.document_count(), 2);
    }

    #[test]
    fn page_at_walks_documents_in_order() {
        let ds = Datasource::new(vec![doc("a", &["a1", "a2"]), doc("b", &["b1"])]);
        let page_ref = ds.page_at(2).expect("third page exists");
        assert_eq!(page_ref.document_id.as_str(), "b");
        assert_eq!(page_ref.page_id.as_str(), "b1");
        assert!(ds.page_at(3).is_none());
    }

    #[test]
    fn find_page_returns_first_match() {
        let ds = Datasource::new(vec![doc("a", &["x", "a2"]), doc("b", &["x"])]);
        let (index, page_ref) = ds
            .find_page(&PageId::new("x").expect("valid"))
            .expect("page exists");
        assert_eq!(index, 0);
        assert_eq!(page_ref.document_id.as_str(), "a");
    }

    #[test]
    fn find_page_unknown_id_is_none() {
        let ds = Datasource::new(vec![doc("a", &["a1"])]);
        assert!(ds.find_page(&PageId::new("zz").expect("valid")).is_none());
    }

    #[test]
    fn deserializes_camel_case_json() {
        let json = r#"{"documents":[{"id":"d1","name":"Doc","pages":[{"id":"p1","name":"P1","isSelected":true,"panelClasses":["x"]}]}]}"#;
        let ds: Datasource = serde_json::from_str(json).expect("valid datasource");
        assert!(ds.documents[0].pages[0].is_selected);
        assert_eq!(
            ds.documents[0].pages[0].panel_classes,
            Some(vec!["x".to_string()])
        );
    }

    #[test]
    fn deferred_value_polls_pending_then_ready() {
        let (tx, rx) = mpsc::channel();
        let mut loaded: Loaded<Vec<TextBox>> = Loaded::Deferred(rx);
        assert_eq!(loaded.poll(), Ok(None));
        tx.send(vec![TextBox::new(0.0, 0.0, 1.0, 1.0, "a")])
            .expect("receiver alive");
        let value = loaded.poll().expect("not disconnected").expect("ready");
        assert_eq!(value.len(), 1);
    }

    #[test]
    fn deferred_value_reports_dropped_producer() {
        let (tx, rx) = mpsc::channel::<Vec<TextBox>>();
        drop(tx);
        let mut loaded = Loaded::Deferred(rx);
        assert_eq!(loaded.poll(), Err(LoaderGone));
    }
}
