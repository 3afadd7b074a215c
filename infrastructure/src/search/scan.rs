use dashmap::DashMap;
use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use tracing::trace;

/// Unindexed linear scan: every stored document is checked against the request.
/// Results follow the map's iteration order, which is unspecified.
pub(crate) fn scan(
    documents: &DashMap<DocumentId, Arc<Document>>,
    request: &SearchRequest,
) -> Vec<Document> {
    if request.is_unconstrained() {
        trace!("No criteria given, returning every document");
    }

    documents
        .iter()
        .filter(|entry| {
            let matched = request.matches(entry.value());
            trace!(doc_id = %entry.key(), matched, "Applied search criteria");
            matched
        })
        .map(|entry| (**entry.value()).clone())
        .collect()
}
