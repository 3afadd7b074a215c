use chrono::{DateTime, Utc}; // For creation timestamps
use serde::{Deserialize, Serialize}; // For document shapes & search requests
use std::fmt;
use thiserror::Error; // For domain-specific errors
use uuid::Uuid;

// --- Domain Errors ---
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Document has no identifier")]
    MissingIdentifier,
}

// --- Document ID ---
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generates a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty identifier is treated the same as an absent one: "new document".
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id.to_string())
    }
}

impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Author ---

/// Author referenced by a document. Not checked against any registry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// --- Document ---

/// A stored record. Values are immutable; use the `with_*` methods to derive
/// a changed copy and re-submit it through `save`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Document {
    #[serde(default)]
    id: Option<DocumentId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    author: Option<Author>,
    /// Set once per identifier, never changed by later upserts.
    #[serde(default)]
    created: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new(
        id: Option<DocumentId>,
        title: impl Into<String>,
        content: impl Into<String>,
        author: Option<Author>,
        created: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            author,
            created,
        }
    }

    /// A document that has never been saved: no id, no creation time.
    pub fn draft(title: impl Into<String>, content: impl Into<String>, author: Author) -> Self {
        Self::new(None, title, content, Some(author), None)
    }

    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    /// The store key of this document, or an error if it has none.
    pub fn require_id(&self) -> Result<&DocumentId, DomainError> {
        self.id
            .as_ref()
            .filter(|id| !id.is_empty())
            .ok_or(DomainError::MissingIdentifier)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    /// True when the id is absent or empty.
    pub fn is_new(&self) -> bool {
        self.id.as_ref().is_none_or(DocumentId::is_empty)
    }

    pub fn with_id(self, id: DocumentId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self
        }
    }

    pub fn with_author(self, author: Author) -> Self {
        Self {
            author: Some(author),
            ..self
        }
    }

    pub fn with_created(self, created: Option<DateTime<Utc>>) -> Self {
        Self { created, ..self }
    }

    /// Assigns a generated identifier and the given creation time.
    pub fn into_new_record(self, now: DateTime<Utc>) -> Self {
        self.with_id(DocumentId::generate()).with_created(Some(now))
    }

    /// Resolves the value to store when this document replaces `existing`.
    /// All fields come from `self` except `created`, which is kept from the
    /// stored record. With nothing stored the document is kept as submitted,
    /// including a missing `created`.
    pub fn replacing(self, existing: Option<&Document>) -> Self {
        match existing {
            Some(stored) => self.with_created(stored.created),
            None => self,
        }
    }
}

// --- Search Request ---

/// Independently optional filter criteria. `None` means "no constraint".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    #[serde(default)]
    pub title_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub contains_contents: Option<Vec<String>>,
    #[serde(default)]
    pub author_ids: Option<Vec<String>>,
    #[serde(default)]
    pub created_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    pub fn with_title_prefixes<I, S>(self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title_prefixes: Some(prefixes.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    pub fn with_contains_contents<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contains_contents: Some(fragments.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    pub fn with_author_ids<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            author_ids: Some(ids.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    pub fn with_created_from(self, from: DateTime<Utc>) -> Self {
        Self {
            created_from: Some(from),
            ..self
        }
    }

    pub fn with_created_to(self, to: DateTime<Utc>) -> Self {
        Self {
            created_to: Some(to),
            ..self
        }
    }

    /// True when no criterion is set.
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }

    /// A document matches when it passes every present criterion.
    pub fn matches(&self, doc: &Document) -> bool {
        self.matches_title(doc)
            && self.matches_content(doc)
            && self.matches_author(doc)
            && self.matches_created_from(doc)
            && self.matches_created_to(doc)
    }

    fn matches_title(&self, doc: &Document) -> bool {
        self.title_prefixes
            .as_ref()
            .is_none_or(|prefixes| prefixes.iter().any(|p| doc.title.starts_with(p.as_str())))
    }

    fn matches_content(&self, doc: &Document) -> bool {
        self.contains_contents
            .as_ref()
            .is_none_or(|fragments| fragments.iter().any(|f| doc.content.contains(f.as_str())))
    }

    fn matches_author(&self, doc: &Document) -> bool {
        self.author_ids.as_ref().is_none_or(|ids| {
            doc.author
                .as_ref()
                .is_some_and(|author| ids.contains(&author.id))
        })
    }

    // Inclusive bounds; a document without `created` fails any present bound.
    fn matches_created_from(&self, doc: &Document) -> bool {
        self.created_from
            .is_none_or(|from| doc.created.is_some_and(|created| created >= from))
    }

    fn matches_created_to(&self, doc: &Document) -> bool {
        self.created_to
            .is_none_or(|to| doc.created.is_some_and(|created| created <= to))
    }
}
