//! Product-entry dialogue engine
//!
//! Explicit state machine over a user's session slot:
//! `AwaitingName -> AwaitingDescription -> AwaitingPrice`, ending back at
//! idle (no session) on completion or cancellation. The price step is the
//! one retry point; every other reply is accepted verbatim.

use tracing::debug;

use crate::models::NewProduct;
use crate::state::session::{DialogueStep, Session};

/// Result of entering the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStart {
    /// No prior session existed.
    Started,
    /// An active session was reset and its draft discarded.
    Restarted,
}

/// Result of feeding one reply into an active dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Name accepted, now awaiting the description.
    DescriptionPrompt,
    /// Description accepted, now awaiting the price.
    PricePrompt,
    /// Price rejected; the session stays at the price step.
    InvalidPrice,
    /// Price accepted. The session is intentionally left in place: the
    /// caller destroys it only once the catalog insert has succeeded, so
    /// a store failure leaves the step retryable.
    Completed(NewProduct),
    /// No active session for this user.
    NoSession,
}

/// Enter the dialogue for a user. An already active session is reset and
/// its draft discarded; the caller is expected to have authorized the
/// user beforehand.
pub fn begin(slot: &mut Option<Session>, user_id: i64) -> DialogueStart {
    let start = if slot.is_some() {
        DialogueStart::Restarted
    } else {
        DialogueStart::Started
    };

    debug!(
        user_id = user_id,
        restarted = matches!(start, DialogueStart::Restarted),
        "Dialogue started"
    );
    *slot = Some(Session::new(user_id));
    start
}

/// Feed a free-text reply into the dialogue and advance the state machine.
pub fn advance(slot: &mut Option<Session>, text: &str) -> StepOutcome {
    let Some(session) = slot.as_mut() else {
        return StepOutcome::NoSession;
    };

    match session.step {
        DialogueStep::AwaitingName => {
            session.draft.name = Some(text.to_string());
            session.step = DialogueStep::AwaitingDescription;
            session.touch();
            StepOutcome::DescriptionPrompt
        }
        DialogueStep::AwaitingDescription => {
            session.draft.description = Some(text.to_string());
            session.step = DialogueStep::AwaitingPrice;
            session.touch();
            StepOutcome::PricePrompt
        }
        DialogueStep::AwaitingPrice => match parse_price(text) {
            Some(price) => {
                session.touch();
                StepOutcome::Completed(NewProduct {
                    // Both fields were filled on the way to this step.
                    name: session.draft.name.clone().unwrap_or_default(),
                    description: session.draft.description.clone().unwrap_or_default(),
                    price,
                })
            }
            None => {
                debug!(user_id = session.user_id, input = text, "Rejected price input");
                session.touch();
                StepOutcome::InvalidPrice
            }
        },
    }
}

/// Cancel the dialogue, discarding any draft. Returns whether a session
/// existed.
pub fn cancel(slot: &mut Option<Session>) -> bool {
    slot.take().is_some()
}

/// Parse a price reply: the text must be non-empty and entirely decimal
/// digits. Values beyond `i64` are rejected like any other invalid input.
fn parse_price(text: &str) -> Option<i64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}
