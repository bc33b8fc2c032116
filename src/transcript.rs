use std::fmt;

use time::OffsetDateTime;

/// Identifier for one transcript turn.
///
/// Assigned from a per-session monotonic counter rather than wall-clock
/// time, so two turns created within the same clock tick can never collide
/// or reorder. Sort order equals insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurnId(u64);

impl TurnId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author of one transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One immutable entry of the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub id: TurnId,
    pub role: Role,
    pub content: String,
    /// Assigned at append time, never mutated. Ordering comes from `id`,
    /// not from this timestamp.
    pub created_at: OffsetDateTime,
    /// True when the backend applied a safety filter to this response.
    /// Always false on user turns.
    pub filtered: bool,
}

/// Append-only ordered conversation log.
///
/// Turn ids are assigned internally, which makes duplicate ids
/// unconstructible. No mutation or deletion operations exist, so hosts can
/// render optimistically without turns disappearing mid-render.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
    next_id: u64,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable read-only snapshot in insertion order.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub(crate) fn append(&mut self, role: Role, content: String, filtered: bool) -> TurnId {
        let id = TurnId(self.next_id);
        self.next_id += 1;

        debug_assert!(
            self.turns.last().map_or(true, |turn| turn.id < id),
            "turn ids must be strictly increasing"
        );

        self.turns.push(Turn {
            id,
            role,
            content,
            created_at: OffsetDateTime::now_utc(),
            filtered,
        });
        id
    }
}
