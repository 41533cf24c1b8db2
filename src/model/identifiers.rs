//! Document and page identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time, including
//! when they are deserialized from a datasource description.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a document inside a datasource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Smart constructor: validates non-empty document ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidDocumentId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidDocumentId::Empty);
        }
        Ok(Self(raw))
    }

    /// Id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = InvalidDocumentId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

/// Identifier of a page. Unique across the whole datasource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageId(String);

impl PageId {
    /// Smart constructor: validates non-empty page ID
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidPageId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidPageId::Empty);
        }
        Ok(Self(raw))
    }

    /// Id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PageId {
    type Error = InvalidPageId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageId> for String {
    fn from(id: PageId) -> Self {
        id.0
    }
}

/// Reference to one page of one document.
///
/// Carried by events (`dataSourceRef`) and navigation requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRef {
    /// Document holding the page.
    pub document_id: DocumentId,
    /// Page within the document.
    pub page_id: PageId,
}

impl PageRef {
    /// Reference to `page_id` in `document_id`.
    pub fn new(document_id: DocumentId, page_id: PageId) -> Self {
        Self {
            document_id,
            page_id,
        }
    }
}

// ===== Error Types =====

/// Rejected document id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDocumentId {
    /// The id was empty.
    #[error("Document ID cannot be empty")]
    Empty,
}

/// Rejected page id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPageId {
    /// The id was empty.
    #[error("Page ID cannot be empty")]
    Empty,
}

// ===== Tests =====
