//! Provider-neutral contract for the safety assistant's two external
//! boundaries: asking one question and listing reference documents.
//!
//! This crate intentionally defines only the request/reply/failure shapes and
//! the async traits the conversation core consumes. It excludes transport
//! details, wire payloads, retry policy, and UI coupling.

use async_trait::async_trait;
use thiserror::Error;

/// Title and full body of the reference document grounding a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPayload {
    pub title: String,
    pub body: String,
}

/// One outbound question, with the document context captured at submission
/// time. Changing the selection after submission must not alter a request
/// already built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub question: String,
    pub context: Option<ContextPayload>,
}

/// Successful assistant answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskReply {
    pub response: String,
    /// True when the backend applied a safety filter to this response.
    /// A wire value absent on decode means false.
    pub filtered: bool,
}

/// Reference document as returned by the listing boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
}

/// Full reference document, including the body context payloads are built
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SopDocument {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl SopDocument {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Listing-boundary view of this document.
    #[must_use]
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }

    /// Context payload carrying this document's title and full body.
    #[must_use]
    pub fn context_payload(&self) -> ContextPayload {
        ContextPayload {
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }
}

/// Typed failure for one transport exchange.
///
/// The conversation core does not branch on the variant for user-visible
/// behavior; the distinction only reaches diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connectivity failure, timeout, or an exhausted retry budget.
    #[error("network failure: {0}")]
    Network(String),

    /// Non-2xx status from the backend, with its detail message when one was
    /// decodable.
    #[error("server error (HTTP {}): {}", .status, .detail.as_deref().unwrap_or("request failed"))]
    Server { status: u16, detail: Option<String> },

    /// A success status whose body could not be decoded.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// Transport boundary: performs one question/answer exchange.
#[async_trait]
pub trait AssistantTransport: Send + Sync {
    async fn ask(&self, request: AskRequest) -> Result<AskReply, TransportError>;
}

/// Reference-document boundary.
#[async_trait]
pub trait SopDirectory: Send + Sync {
    /// Lists available documents in backend order. An empty listing is
    /// valid, not an error.
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, TransportError>;

    /// Fetches one document by exact id.
    async fn fetch_document(&self, id: &str) -> Result<SopDocument, TransportError>;
}
