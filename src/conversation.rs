use std::sync::Arc;

use assistant_provider::{
    AssistantTransport, DocumentSummary, SopDirectory, TransportError,
};

use crate::session::{ChatSession, Phase};
use crate::transcript::Transcript;

/// How one [`Conversation::submit`] call settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The input trimmed to empty or an exchange was outstanding; nothing
    /// changed and no request was issued.
    Ignored,
    /// The round trip succeeded; the assistant turn carries the real answer.
    Answered,
    /// The round trip failed; the assistant turn carries the fixed fallback
    /// text and `last_error` holds the diagnostic.
    Fallback,
}

/// Async driver composing a [`ChatSession`] with the provider boundaries.
///
/// The await on the transport is the session's single suspension point; all
/// transcript and state mutations happen strictly before or strictly after
/// it, never concurrently. Dropping a `submit` future abandons its exchange
/// without applying a completion.
pub struct Conversation {
    session: ChatSession,
    transport: Arc<dyn AssistantTransport>,
    directory: Arc<dyn SopDirectory>,
}

impl Conversation {
    #[must_use]
    pub fn new(transport: Arc<dyn AssistantTransport>, directory: Arc<dyn SopDirectory>) -> Self {
        Self {
            session: ChatSession::new(),
            transport,
            directory,
        }
    }

    /// Convenience constructor for one object implementing both boundaries.
    #[must_use]
    pub fn with_provider<P>(provider: Arc<P>) -> Self
    where
        P: AssistantTransport + SopDirectory + 'static,
    {
        Self::new(provider.clone(), provider)
    }

    /// Submits one question and drives it to settlement.
    ///
    /// Transport failures are recovered into the transcript (fallback turn
    /// plus `last_error`) and never propagated to the caller.
    pub async fn submit(&mut self, raw_text: &str) -> SubmitOutcome {
        let Some(request) = self.session.submit(raw_text) else {
            return SubmitOutcome::Ignored;
        };

        match self.transport.ask(request).await {
            Ok(reply) => {
                self.session.on_reply(reply);
                SubmitOutcome::Answered
            }
            Err(failure) => {
                self.session.on_failure(&failure);
                SubmitOutcome::Fallback
            }
        }
    }

    /// Refreshes the reference-document cache from the directory boundary.
    ///
    /// Returns the number of documents cached. An empty listing succeeds
    /// with zero documents. The current selection is left untouched; a
    /// selection orphaned by the refresh resolves to no context.
    pub async fn refresh_documents(&mut self) -> Result<usize, TransportError> {
        let summaries = self.directory.list_documents().await?;

        let mut documents = Vec::with_capacity(summaries.len());
        for summary in summaries {
            documents.push(self.directory.fetch_document(&summary.id).await?);
        }

        let count = documents.len();
        self.session.replace_documents(documents);
        log::debug!("session {}: cached {count} reference documents", self.session.id());
        Ok(count)
    }

    /// Selects the reference document for future submissions; `None` means
    /// general, document-less context.
    pub fn select_document(&mut self, id: Option<&str>) {
        self.session.select_document(id);
    }

    #[must_use]
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        self.session.transcript()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.session.last_error()
    }

    /// Cached document listing (id and title) in snapshot order.
    #[must_use]
    pub fn documents(&self) -> Vec<DocumentSummary> {
        self.session.catalog().summaries()
    }
}
