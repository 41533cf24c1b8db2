//! Domain model types (pure).
//!
//! Identifiers, the datasource description, error types and the
//! collaborator traits the engine calls out to.

pub mod collaborators;
pub mod datasource;
pub mod error;
pub mod identifiers;

// Re-export for convenience
pub use collaborators::{
    Advisory, Clipboard, NoClipboard, NoNavigation, Notifier, PageNavigator, TracingNotifier,
};
pub use datasource::{Datasource, Document, Loaded, LoaderGone, Page, PageImage, PageLoader, TextBox};
pub use error::{AppError, TextLayerError};
pub use identifiers::{DocumentId, InvalidDocumentId, InvalidPageId, PageId, PageRef};
