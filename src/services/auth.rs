//! Authorization service implementation
//!
//! Admin authorization against the roster configured at startup. The
//! roster is read-only at runtime; every administrative entry point
//! calls [`AuthService::require_admin`] before doing anything else.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::Settings;
use crate::utils::errors::{Result, StoreBotError};

#[derive(Debug, Clone)]
pub struct AuthService {
    admin_ids: Arc<HashSet<i64>>,
}

impl AuthService {
    /// Create a new AuthService from the configured admin roster.
    pub fn new(settings: &Settings) -> Self {
        Self {
            admin_ids: Arc::new(settings.bot.admin_ids.iter().copied().collect()),
        }
    }

    /// Check if the user may perform administrative operations. Pure
    /// lookup, no side effects.
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Require admin rights or fail with `PermissionDenied`. A denial is
    /// terminal for the invocation; there are no retries.
    pub fn require_admin(&self, user_id: i64) -> Result<()> {
        if self.is_admin(user_id) {
            Ok(())
        } else {
            Err(StoreBotError::PermissionDenied { user_id })
        }
    }
}
