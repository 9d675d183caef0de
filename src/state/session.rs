//! Dialogue session state
//!
//! Tracks a user's progress through the multi-step product entry. A user
//! with no session is idle; at most one session exists per user.

use chrono::{DateTime, Utc};

/// Steps of the product-entry dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStep {
    AwaitingName,
    AwaitingDescription,
    AwaitingPrice,
}

/// Partially collected product fields. Each field is written exactly
/// once; restarting the dialogue discards the whole draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Ephemeral per-user dialogue state.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub step: DialogueStep,
    pub draft: ProductDraft,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session at the first dialogue step.
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            step: DialogueStep::AwaitingName,
            draft: ProductDraft::default(),
            started_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
