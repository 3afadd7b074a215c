use crate::search::scan;
use application::{ApplicationError, DocumentRepository};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Document store backed by a concurrent map.
///
/// Clones share the same underlying map. An upsert holds the key's shard lock
/// while it reads the stored `created` and writes the replacement, so two
/// concurrent saves of one id cannot lose the original timestamp.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    // Document ID -> Document
    documents: Arc<DashMap<DocumentId, Arc<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(DashMap::new()),
        }
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    async fn upsert(&self, document: Document) -> Result<Document, ApplicationError> {
        let id = document.require_id()?.clone();
        debug!(doc_id = %id, "Upserting document in in-memory store");

        let stored = match self.documents.entry(id) {
            Entry::Occupied(mut entry) => {
                let replacement = document.replacing(Some(&**entry.get()));
                entry.insert(Arc::new(replacement.clone()));
                debug!("Replaced existing document, creation time kept");
                replacement
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(document.clone()));
                debug!("Inserted document");
                document
            }
        };
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        debug!(doc_id = %id, "Getting document from in-memory store");
        // Get returns a Ref, so we clone the Arc's contents out
        let doc = self.documents.get(id).map(|doc_ref| (**doc_ref).clone());
        Ok(doc)
    }

    #[instrument(skip(self, request))]
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        debug!(store_size = self.documents.len(), "Scanning in-memory store");
        let hits = scan(&self.documents, request);
        debug!(hits = hits.len(), "In-memory search finished.");
        Ok(hits)
    }

    async fn count(&self) -> Result<usize, ApplicationError> {
        Ok(self.documents.len())
    }
}
