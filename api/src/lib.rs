//! In-memory document repository.
//!
//! [`DocumentManager`] is the in-process entry point: `save` upserts a
//! document, `search` filters every stored document by optional criteria and
//! `find_by_id` looks one up.
//!
//! ```no_run
//! # async fn demo() -> Result<(), docstore::ApplicationError> {
//! use docstore::{Author, Document, DocumentManager, SearchRequest};
//!
//! let manager = DocumentManager::in_memory();
//! let saved = manager
//!     .save(Document::draft("First Document", "Hello", Author::new("a1", "Ada")))
//!     .await?;
//! let hits = manager
//!     .search(SearchRequest::default().with_title_prefixes(["First"]))
//!     .await?;
//! assert_eq!(hits, vec![saved]);
//! # Ok(())
//! # }
//! ```

pub mod logging;

use std::sync::Arc;
use tracing::info;

use application::DocumentService;
use infrastructure::InMemoryDocumentRepository;

pub use application::{ApplicationError, DocumentRepository};
pub use domain::{Author, Document, DocumentId, DomainError, SearchRequest};

/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct DocumentManager {
    service: Arc<DocumentService>,
}

impl DocumentManager {
    /// A manager over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        let document_repository = Arc::new(InMemoryDocumentRepository::new());
        info!("In-memory document store initialized.");
        Self::with_repository(document_repository)
    }

    /// A manager over any repository implementation.
    pub fn with_repository(repository: Arc<dyn DocumentRepository>) -> Self {
        Self {
            service: Arc::new(DocumentService::new(repository)),
        }
    }

    /// Upserts `document` and returns the stored value, carrying the assigned
    /// id and creation time for new documents.
    pub async fn save(&self, document: Document) -> Result<Document, ApplicationError> {
        self.service.save(document).await
    }

    /// Every stored document matching all criteria present in `request`.
    pub async fn search(&self, request: SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        self.service.search(&request).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Document>, ApplicationError> {
        self.service.find_by_id(id).await
    }

    pub async fn len(&self) -> Result<usize, ApplicationError> {
        self.service.document_count().await
    }

    pub async fn is_empty(&self) -> Result<bool, ApplicationError> {
        Ok(self.len().await? == 0)
    }
}

impl Default for DocumentManager {
    fn default() -> Self {
        Self::in_memory()
    }
}
