use async_trait::async_trait;
use chrono::Utc;
use domain::{Document, DocumentId, DomainError, SearchRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
    #[error("Domain validation error: {0}")]
    DomainError(#[from] DomainError), // Propagate domain errors cleanly
}

// --- Infrastructure Interfaces (Traits) ---

/// Interface for storing and retrieving documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Inserts or replaces a document that already carries an identifier.
    /// When a record with the same id exists its `created` value is kept.
    /// Reading the old record and writing the new one must be atomic per id.
    /// Returns the value that was stored.
    async fn upsert(&self, document: Document) -> Result<Document, ApplicationError>;
    /// Retrieves a document by its ID.
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError>;
    /// Returns every stored document satisfying all criteria of the request.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError>;
    /// Number of stored documents.
    async fn count(&self) -> Result<usize, ApplicationError>;
}

// --- Application Services (Use Cases) ---

/// Save / search / lookup over a document repository.
pub struct DocumentService {
    doc_repo: Arc<dyn DocumentRepository>,
}

impl DocumentService {
    pub fn new(doc_repo: Arc<dyn DocumentRepository>) -> Self {
        Self { doc_repo }
    }

    /// Upserts a document.
    ///
    /// A document without an id (or with an empty one) gets a generated id and
    /// the current time as `created`. A document whose id is already stored
    /// replaces it but keeps the stored `created`. A document with an unknown
    /// id is stored as submitted, `created` included.
    #[instrument(skip(self, document), fields(is_new = document.is_new()))]
    pub async fn save(&self, document: Document) -> Result<Document, ApplicationError> {
        let document = if document.is_new() {
            let record = document.into_new_record(Utc::now());
            debug!(doc_id = ?record.id(), "Assigned identifier to new document");
            record
        } else {
            document
        };

        let doc_id = document.require_id()?.clone();
        let saved = self.doc_repo.upsert(document).await?;
        info!(doc_id = %doc_id, created = ?saved.created(), "Document saved");
        Ok(saved)
    }

    #[instrument(skip(self, request), fields(unconstrained = request.is_unconstrained()))]
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        debug!(?request, "Searching documents");
        let documents = self.doc_repo.search(request).await?;
        info!(hits = documents.len(), "Search finished");
        Ok(documents)
    }

    /// Looks a document up by id. Unknown or empty ids yield `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Document>, ApplicationError> {
        if id.is_empty() {
            warn!("Lookup with empty identifier");
            return Ok(None);
        }
        let found = self.doc_repo.get(&DocumentId::from(id)).await?;
        debug!(found = found.is_some(), "Lookup finished");
        Ok(found)
    }

    pub async fn document_count(&self) -> Result<usize, ApplicationError> {
        self.doc_repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Author;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal repository used to exercise the service in isolation.
    #[derive(Default)]
    struct MapRepository {
        docs: Mutex<HashMap<DocumentId, Document>>,
    }

    #[async_trait]
    impl DocumentRepository for MapRepository {
        async fn upsert(&self, document: Document) -> Result<Document, ApplicationError> {
            let id = document.require_id()?.clone();
            let mut docs = self.docs.lock().unwrap();
            let stored = document.replacing(docs.get(&id));
            docs.insert(id, stored.clone());
            Ok(stored)
        }

        async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
            Ok(self.docs.lock().unwrap().get(id).cloned())
        }

        async fn search(
            &self,
            request: &SearchRequest,
        ) -> Result<Vec<Document>, ApplicationError> {
            Ok(self
                .docs
                .lock()
                .unwrap()
                .values()
                .filter(|doc| request.matches(doc))
                .cloned()
                .collect())
        }

        async fn count(&self) -> Result<usize, ApplicationError> {
            Ok(self.docs.lock().unwrap().len())
        }
    }

    fn service() -> DocumentService {
        DocumentService::new(Arc::new(MapRepository::default()))
    }

    fn author() -> Author {
        Author::new("author1", "John Doe")
    }

    #[tokio::test]
    async fn save_new_document_assigns_id_and_created() {
        let service = service();
        let before = Utc::now();
        let saved = service
            .save(Document::draft("Test Document", "Test content", author()))
            .await
            .unwrap();

        let id = saved.require_id().unwrap();
        assert!(!id.is_empty());
        let created = saved.created().expect("created assigned");
        assert!(created >= before && created <= Utc::now());

        let found = service.find_by_id(id.as_str()).await.unwrap();
        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn save_with_empty_id_generates_one() {
        let service = service();
        let saved = service
            .save(Document::draft("T", "C", author()).with_id(DocumentId::from("")))
            .await
            .unwrap();
        assert!(!saved.require_id().unwrap().is_empty());
        assert!(saved.created().is_some());
    }

    #[tokio::test]
    async fn resave_keeps_original_created() {
        let service = service();
        let saved = service
            .save(Document::draft("Document to be updated", "Initial content", author()))
            .await
            .unwrap();
        let original_created = saved.created();

        let later = Utc::now() + chrono::Duration::days(1);
        let updated = service
            .save(
                saved
                    .clone()
                    .with_content("Updated content")
                    .with_created(Some(later)),
            )
            .await
            .unwrap();
        assert_eq!(updated.created(), original_created);

        let found = service
            .find_by_id(saved.require_id().unwrap().as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.content(), "Updated content");
        assert_eq!(found.created(), original_created);
        assert_eq!(service.document_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn save_with_unknown_id_keeps_submitted_created() {
        let service = service();
        let saved = service
            .save(Document::new(Some("fixed".into()), "T", "C", Some(author()), None))
            .await
            .unwrap();
        assert_eq!(saved.id(), Some(&DocumentId::from("fixed")));
        assert!(saved.created().is_none());
    }

    #[tokio::test]
    async fn find_by_id_missing_is_none() {
        let service = service();
        assert!(service.find_by_id("non-existent-id").await.unwrap().is_none());
        assert!(service.find_by_id("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_delegates_to_repository() {
        let service = service();
        let first = service
            .save(Document::draft("First Document", "Content of the first document", author()))
            .await
            .unwrap();
        service
            .save(Document::draft("Second Document", "Content of the second document", author()))
            .await
            .unwrap();

        let hits = service
            .search(&SearchRequest::default().with_title_prefixes(["First"]))
            .await
            .unwrap();
        assert_eq!(hits, vec![first]);
        assert_eq!(service.search(&SearchRequest::default()).await.unwrap().len(), 2);
    }
}
