/// Default base URL for the assistant backend during development.
pub const DEFAULT_SOP_BASE_URL: &str = "http://localhost:8000";

fn normalize_base(input: &str) -> &str {
    let base = input.trim();
    if base.is_empty() {
        return DEFAULT_SOP_BASE_URL;
    }
    base.trim_end_matches('/')
}

/// Resolve a base URL to the chat endpoint.
#[must_use]
pub fn chat_url(base: &str) -> String {
    format!("{}/api/chat", normalize_base(base))
}

/// Resolve a base URL to the SOP listing endpoint.
#[must_use]
pub fn sops_url(base: &str) -> String {
    format!("{}/api/sops", normalize_base(base))
}

/// Resolve a base URL to the endpoint for one SOP document.
#[must_use]
pub fn sop_url(base: &str, sop_id: &str) -> String {
    format!("{}/api/sops/{}", normalize_base(base), sop_id)
}
