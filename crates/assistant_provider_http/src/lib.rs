//! HTTP-backed implementation of the shared `assistant_provider` contract.
//!
//! This adapter translates `sop_api` responses and failures into the
//! contract shapes the conversation core consumes. It owns no conversation
//! state and no retry logic; both live on their respective sides of the
//! boundary.

use assistant_provider::{
    AskReply, AskRequest, AssistantTransport, DocumentSummary, SopDirectory, SopDocument,
    TransportError,
};
use async_trait::async_trait;
use sop_api::{ChatContext, ChatRequestBody, SopApiClient, SopApiConfig, SopApiError};

/// `AssistantTransport`/`SopDirectory` adapter backed by `sop_api` transport
/// primitives.
#[derive(Debug)]
pub struct HttpAssistant {
    client: SopApiClient,
}

impl HttpAssistant {
    /// Creates an adapter using real backend transport.
    pub fn new(config: SopApiConfig) -> Result<Self, SopApiError> {
        Ok(Self {
            client: SopApiClient::new(config)?,
        })
    }

    #[must_use]
    pub fn client(&self) -> &SopApiClient {
        &self.client
    }
}

#[async_trait]
impl AssistantTransport for HttpAssistant {
    async fn ask(&self, request: AskRequest) -> Result<AskReply, TransportError> {
        let body = ChatRequestBody::new(
            request.question,
            request.context.map(|context| ChatContext {
                title: context.title,
                body: context.body,
            }),
        );

        let response = self.client.ask(&body).await.map_err(map_transport_error)?;
        Ok(AskReply {
            response: response.response,
            filtered: response.filtered,
        })
    }
}

#[async_trait]
impl SopDirectory for HttpAssistant {
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, TransportError> {
        let listing = self
            .client
            .list_sops()
            .await
            .map_err(map_transport_error)?;

        Ok(listing
            .into_iter()
            .map(|info| DocumentSummary {
                id: info.id,
                title: info.title,
            })
            .collect())
    }

    async fn fetch_document(&self, id: &str) -> Result<SopDocument, TransportError> {
        let record = self
            .client
            .fetch_sop(id)
            .await
            .map_err(map_transport_error)?;

        Ok(SopDocument::new(record.id, record.title, record.content))
    }
}

fn map_transport_error(error: SopApiError) -> TransportError {
    match error {
        SopApiError::Status { status, message } => TransportError::Server {
            status: status.as_u16(),
            detail: Some(message),
        },
        SopApiError::Decode(error) => TransportError::MalformedBody(error.to_string()),
        other => TransportError::Network(other.to_string()),
    }
}
