//! Inbound events and outbound replies
//!
//! Transport-agnostic types at the router boundary: the Telegram adapter
//! converts updates into [`InboundEvent`]s and delivers [`Reply`]s back;
//! nothing below the adapter touches transport types.

/// A bot command, already parsed by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Public welcome with the view-products control.
    Start,
    /// Begin the admin product-entry dialogue.
    AddProduct,
    /// Admin catalog dump with delete controls.
    ListProducts,
    /// Abort the active dialogue.
    Cancel,
}

/// A single inbound event from the messaging endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command { user_id: i64, command: Command },
    Text { user_id: i64, text: String },
    Callback { user_id: i64, payload: String },
}

impl InboundEvent {
    /// The acting user, used to key per-user serialization.
    pub fn user_id(&self) -> i64 {
        match self {
            InboundEvent::Command { user_id, .. }
            | InboundEvent::Text { user_id, .. }
            | InboundEvent::Callback { user_id, .. } => *user_id,
        }
    }
}

/// One interactive control attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    /// Opaque payload echoed back by the transport as a callback press.
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// An outbound message: text plus optional rows of controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Vec<Button>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    pub fn with_buttons(text: impl Into<String>, buttons: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            buttons,
        }
    }
}
