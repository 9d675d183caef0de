//! State management module
//!
//! This module handles per-user conversation state for the product-entry
//! dialogue

pub mod dialogue;
pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use dialogue::{DialogueStart, StepOutcome};
pub use session::{DialogueStep, ProductDraft, Session};
pub use storage::SessionStore;
