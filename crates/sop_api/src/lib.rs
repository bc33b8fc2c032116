//! Transport-only client primitives for the safety assistant backend.
//!
//! This crate owns request/response building and parsing for the backend's
//! chat and SOP-listing endpoints only. It intentionally contains no
//! conversation state and no UI coupling; the conversation core consumes it
//! through the `assistant_provider` contract.
//!
//! Failure taxonomy: connectivity errors and exhausted retry budgets,
//! non-2xx statuses with the backend's `detail` message when one is
//! decodable, and malformed success bodies are all kept distinct for
//! caller-side diagnostics.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod payload;
pub mod retry;
pub mod url;

pub use client::SopApiClient;
pub use config::SopApiConfig;
pub use error::SopApiError;
pub use payload::{ChatContext, ChatRequestBody, ChatResponseBody, SopInfo, SopRecord};
pub use url::DEFAULT_SOP_BASE_URL;
