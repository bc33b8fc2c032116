use std::fmt;

use assistant_provider::{AskReply, AskRequest, SopDocument, TransportError};
use uuid::Uuid;

use crate::catalog::SopCatalog;
use crate::transcript::{Role, Transcript};

/// Fixed user-safe text appended when a round trip fails. The raw error is
/// never shown as assistant content.
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error. Please try again or consult your supervisor.";

/// Request lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No exchange outstanding.
    Idle,
    /// Exactly one exchange outstanding; new submissions are dropped until
    /// it settles.
    Awaiting,
    /// The last exchange ended in a transport failure. Transient: gates
    /// nothing, and the next accepted submission clears it.
    Failed,
}

/// Identifier for one conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conversation session state machine.
///
/// Owns the transcript, document cache, selection, and request lifecycle
/// for one conversation. All methods are synchronous; the transport call
/// happens between [`ChatSession::submit`] and
/// [`ChatSession::on_reply`]/[`ChatSession::on_failure`], driven by
/// [`crate::conversation::Conversation`] or by a host event loop.
///
/// One instance per conversation, constructed explicitly; no process-wide
/// state is involved.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: SessionId,
    transcript: Transcript,
    catalog: SopCatalog,
    phase: Phase,
    selected_sop: Option<String>,
    last_error: Option<String>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            transcript: Transcript::new(),
            catalog: SopCatalog::new(),
            phase: Phase::Idle,
            selected_sop: None,
            last_error: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Short diagnostic for the last failed exchange. Cleared whenever a
    /// new submission is accepted.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn selected_document(&self) -> Option<&str> {
        self.selected_sop.as_deref()
    }

    #[must_use]
    pub fn catalog(&self) -> &SopCatalog {
        &self.catalog
    }

    /// Installs a fresh document snapshot.
    ///
    /// The current selection is left untouched; a selection orphaned by the
    /// new snapshot resolves to no context at submission time.
    pub fn replace_documents(&mut self, documents: Vec<SopDocument>) {
        self.catalog.replace(documents);
    }

    /// Selects the reference document for future submissions.
    ///
    /// Allowed in any phase and applied immediately. An in-flight exchange
    /// keeps the context captured when it was submitted. Unknown ids are
    /// accepted here and resolve to no context later.
    pub fn select_document(&mut self, id: Option<&str>) {
        self.selected_sop = id.map(str::to_owned);
    }

    /// Accepts or drops one submission.
    ///
    /// Returns the outbound request on accept; `None` when the text trims
    /// to empty or an exchange is already outstanding. Dropped submissions
    /// cause no state change and no side effect, so rapid re-submissions
    /// while a request is in flight are discarded rather than queued.
    ///
    /// On accept the user turn carries the raw untrimmed text (only
    /// validation trims), `last_error` is cleared, and the request context
    /// is resolved from the selection as of this call.
    #[must_use]
    pub fn submit(&mut self, raw_text: &str) -> Option<AskRequest> {
        if raw_text.trim().is_empty() {
            return None;
        }

        if self.phase == Phase::Awaiting {
            log::debug!("session {}: submission dropped, exchange outstanding", self.id);
            return None;
        }

        self.transcript.append(Role::User, raw_text.to_owned(), false);
        self.last_error = None;
        self.phase = Phase::Awaiting;

        let context = self.catalog.resolve_context(self.selected_sop.as_deref());
        log::debug!(
            "session {}: submission accepted (with context: {})",
            self.id,
            context.is_some()
        );

        Some(AskRequest {
            question: raw_text.to_owned(),
            context,
        })
    }

    /// Applies a successful reply: exactly one assistant turn, back to idle.
    pub fn on_reply(&mut self, reply: AskReply) {
        if !self.settle() {
            return;
        }

        self.transcript
            .append(Role::Assistant, reply.response, reply.filtered);
        self.phase = Phase::Idle;
    }

    /// Applies a transport failure: exactly one fallback assistant turn and
    /// a short diagnostic in `last_error`. The session stays immediately
    /// retryable.
    pub fn on_failure(&mut self, failure: &TransportError) {
        if !self.settle() {
            return;
        }

        log::warn!("session {}: exchange failed: {failure}", self.id);
        self.transcript
            .append(Role::Assistant, FALLBACK_REPLY.to_owned(), false);
        self.last_error = Some(failure.to_string());
        self.phase = Phase::Failed;
    }

    // Completion handlers must be no-ops unless an exchange is outstanding,
    // so a stale completion (for example after the driving future was
    // dropped) can never append a spurious turn.
    fn settle(&mut self) -> bool {
        if self.phase != Phase::Awaiting {
            log::warn!(
                "session {}: completion ignored, no exchange outstanding",
                self.id
            );
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use assistant_provider::{AskReply, SopDocument, TransportError};

    use super::{ChatSession, Phase, FALLBACK_REPLY};
    use crate::transcript::Role;

    fn reply(text: &str) -> AskReply {
        AskReply {
            response: text.to_string(),
            filtered: false,
        }
    }

    fn session_with_lockout_tagout() -> ChatSession {
        let mut session = ChatSession::new();
        session.replace_documents(vec![SopDocument::new(
            "sop-001",
            "Lockout/Tagout",
            "Step 1: notify affected employees.",
        )]);
        session
    }

    #[test]
    fn blank_submissions_are_dropped_without_side_effects() {
        let mut session = ChatSession::new();

        assert!(session.submit("").is_none());
        assert!(session.submit("   ").is_none());
        assert!(session.transcript().is_empty());
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn accepted_submission_appends_the_raw_user_turn_and_awaits() {
        let mut session = ChatSession::new();

        let request = session
            .submit("  What PPE is required?  ")
            .expect("non-blank submission must be accepted");

        assert_eq!(request.question, "  What PPE is required?  ");
        assert_eq!(session.phase(), Phase::Awaiting);

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "  What PPE is required?  ");
    }

    #[test]
    fn submission_while_awaiting_is_dropped() {
        let mut session = ChatSession::new();
        let _first = session.submit("first question").expect("accepted");

        assert!(session.submit("second question").is_none());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.phase(), Phase::Awaiting);
    }

    #[test]
    fn reply_appends_exactly_one_assistant_turn_and_returns_idle() {
        let mut session = ChatSession::new();
        let _request = session.submit("What PPE is required?").expect("accepted");

        session.on_reply(AskReply {
            response: "Wear gloves and goggles.".to_string(),
            filtered: true,
        });

        assert_eq!(session.phase(), Phase::Idle);
        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, "Wear gloves and goggles.");
        assert!(turns[1].filtered);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn failure_appends_the_fallback_and_records_a_diagnostic() {
        let mut session = ChatSession::new();
        let _request = session.submit("What PPE is required?").expect("accepted");

        session.on_failure(&TransportError::Network("connection refused".to_string()));

        assert_eq!(session.phase(), Phase::Failed);
        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, FALLBACK_REPLY);
        assert!(!turns[1].filtered);

        let diagnostic = session.last_error().expect("failure must record a diagnostic");
        assert!(diagnostic.contains("connection refused"));
    }

    #[test]
    fn failed_sessions_accept_the_next_submission_immediately() {
        let mut session = ChatSession::new();
        let _request = session.submit("first").expect("accepted");
        session.on_failure(&TransportError::Network("boom".to_string()));

        let retry = session.submit("second").expect("retry must be accepted");

        assert_eq!(retry.question, "second");
        assert_eq!(session.phase(), Phase::Awaiting);
        assert!(session.last_error().is_none(), "accepting a submission clears last_error");
    }

    #[test]
    fn stale_completions_are_ignored() {
        let mut session = ChatSession::new();

        session.on_reply(reply("nobody asked"));
        session.on_failure(&TransportError::Network("nobody asked".to_string()));

        assert!(session.transcript().is_empty());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn selection_is_resolved_at_submission_time() {
        let mut session = session_with_lockout_tagout();
        session.select_document(Some("sop-001"));

        let request = session.submit("What PPE is required?").expect("accepted");

        let context = request.context.expect("selected document must resolve");
        assert_eq!(context.title, "Lockout/Tagout");
        assert_eq!(context.body, "Step 1: notify affected employees.");
    }

    #[test]
    fn clearing_the_selection_sends_no_context() {
        let mut session = session_with_lockout_tagout();
        session.select_document(Some("sop-001"));
        session.select_document(None);

        let request = session.submit("What PPE is required?").expect("accepted");

        assert!(request.context.is_none());
    }

    #[test]
    fn unknown_selection_behaves_like_no_selection() {
        let mut session = session_with_lockout_tagout();
        session.select_document(Some("sop-999"));

        let request = session.submit("What PPE is required?").expect("accepted");

        assert!(request.context.is_none());
    }

    #[test]
    fn changing_the_selection_mid_flight_only_affects_the_next_request() {
        let mut session = session_with_lockout_tagout();
        session.select_document(Some("sop-001"));
        let first = session.submit("first").expect("accepted");
        assert!(first.context.is_some());

        session.select_document(None);
        session.on_reply(reply("answer"));

        let second = session.submit("second").expect("accepted");
        assert!(second.context.is_none());
    }

    #[test]
    fn refresh_orphaning_the_selection_degrades_to_no_context() {
        let mut session = session_with_lockout_tagout();
        session.select_document(Some("sop-001"));
        session.replace_documents(Vec::new());

        assert_eq!(session.selected_document(), Some("sop-001"));
        let request = session.submit("still selected?").expect("accepted");
        assert!(request.context.is_none());
    }

    #[test]
    fn turns_alternate_one_to_one_across_mixed_outcomes() {
        let mut session = ChatSession::new();

        let _request = session.submit("one").expect("accepted");
        session.on_reply(reply("answer one"));
        let _request = session.submit("two").expect("accepted");
        session.on_failure(&TransportError::Server {
            status: 500,
            detail: None,
        });
        let _request = session.submit("three").expect("accepted");
        session.on_reply(reply("answer three"));

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 6);
        for (index, turn) in turns.iter().enumerate() {
            let expected = if index % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(turn.role, expected, "turn {index}");
        }
    }
}
