use serde::{Deserialize, Serialize};

/// Request payload for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequestBody {
    pub question: String,
    /// Serialized as `null` for general, document-less questions.
    pub context: Option<ChatContext>,
}

impl ChatRequestBody {
    #[must_use]
    pub fn new(question: impl Into<String>, context: Option<ChatContext>) -> Self {
        Self {
            question: question.into(),
            context,
        }
    }
}

/// Selected-document context sent alongside a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatContext {
    pub title: String,
    pub body: String,
}

/// Response payload from the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatResponseBody {
    pub response: String,
    /// True when the backend applied a safety filter; absent means false.
    #[serde(default)]
    pub filtered: bool,
    /// Advisory flag the backend emits alongside every answer; absent means
    /// true. The conversation core does not consume it.
    #[serde(default = "default_safe")]
    pub safe: bool,
}

fn default_safe() -> bool {
    true
}

/// One entry of the SOP listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SopInfo {
    pub id: String,
    pub title: String,
}

/// One full SOP document, as served by the per-document endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SopRecord {
    pub id: String,
    pub title: String,
    pub content: String,
}
