use assistant_provider::{ContextPayload, DocumentSummary, SopDocument};

/// Cache of the last-fetched reference-document set.
///
/// A read-only snapshot between refreshes; the lifecycle controller only
/// reads it when building an outbound request. An empty set is a valid
/// state, not an error.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SopCatalog {
    documents: Vec<SopDocument>,
}

impl SopCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a fresh snapshot, replacing the previous one.
    pub fn replace(&mut self, documents: Vec<SopDocument>) {
        self.documents = documents;
    }

    /// Listing view (id and title) in snapshot order.
    #[must_use]
    pub fn summaries(&self) -> Vec<DocumentSummary> {
        self.documents.iter().map(SopDocument::summary).collect()
    }

    /// Exact-match lookup by id. No fuzzy matching.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SopDocument> {
        self.documents.iter().find(|document| document.id == id)
    }

    /// Resolve a selection into the context payload for an outbound request.
    ///
    /// `None` when nothing is selected or when the id is not in the cache;
    /// a stale selection means "no context", never an error.
    #[must_use]
    pub fn resolve_context(&self, selected: Option<&str>) -> Option<ContextPayload> {
        let id = selected?;
        self.get(id).map(SopDocument::context_payload)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
