//! Deterministic mock implementation of the shared `assistant_provider`
//! contract.
//!
//! This crate contains no transport logic and is intended for local
//! development and contract-level integration testing. Outcomes are
//! scripted FIFO; every received request is captured so tests can assert
//! on the exact payload the conversation core built.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use assistant_provider::{
    AskReply, AskRequest, AssistantTransport, DocumentSummary, SopDirectory, SopDocument,
    TransportError,
};
use async_trait::async_trait;

/// Reply content used when the scripted queue is empty.
pub const DEFAULT_MOCK_RESPONSE: &str =
    "Follow the posted procedure and wear the required PPE.";

/// Deterministic mock provider used by `safety_chat` tests and local runs.
#[derive(Debug, Default)]
pub struct MockAssistant {
    outcomes: Mutex<VecDeque<Result<AskReply, TransportError>>>,
    requests: Mutex<Vec<AskRequest>>,
    documents: Vec<SopDocument>,
}

impl MockAssistant {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock serving the given document set through `SopDirectory`.
    #[must_use]
    pub fn with_documents(documents: Vec<SopDocument>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    /// Scripts the next successful reply.
    pub fn push_reply(&self, reply: AskReply) {
        lock_unpoisoned(&self.outcomes).push_back(Ok(reply));
    }

    /// Scripts the next transport failure.
    pub fn push_failure(&self, failure: TransportError) {
        lock_unpoisoned(&self.outcomes).push_back(Err(failure));
    }

    /// Every request received, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<AskRequest> {
        lock_unpoisoned(&self.requests).clone()
    }

    /// Number of `ask` calls received.
    #[must_use]
    pub fn ask_count(&self) -> usize {
        lock_unpoisoned(&self.requests).len()
    }
}

#[async_trait]
impl AssistantTransport for MockAssistant {
    async fn ask(&self, request: AskRequest) -> Result<AskReply, TransportError> {
        lock_unpoisoned(&self.requests).push(request);

        lock_unpoisoned(&self.outcomes)
            .pop_front()
            .unwrap_or_else(|| {
                Ok(AskReply {
                    response: DEFAULT_MOCK_RESPONSE.to_string(),
                    filtered: false,
                })
            })
    }
}

#[async_trait]
impl SopDirectory for MockAssistant {
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, TransportError> {
        Ok(self.documents.iter().map(SopDocument::summary).collect())
    }

    async fn fetch_document(&self, id: &str) -> Result<SopDocument, TransportError> {
        self.documents
            .iter()
            .find(|document| document.id == id)
            .cloned()
            .ok_or_else(|| TransportError::Server {
                status: 404,
                detail: Some(format!("SOP '{id}' not found")),
            })
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
