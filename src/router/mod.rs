//! Event routing
//!
//! Dispatches each inbound event to exactly one handler: the dialogue
//! engine when a session is active, otherwise the stateless catalog
//! handlers behind the authorization gate. All events of one user are
//! handled under that user's session lock, in arrival order.

pub mod events;
pub mod render;

use tracing::{debug, error, info, warn};

use crate::database::DatabaseService;
use crate::router::events::{Command, InboundEvent, Reply};
use crate::services::AuthService;
use crate::state::dialogue::{self, DialogueStart, StepOutcome};
use crate::state::session::Session;
use crate::state::SessionStore;
use crate::utils::errors::{Result, StoreBotError};

#[derive(Debug, Clone)]
pub struct Router {
    auth: AuthService,
    db: DatabaseService,
    sessions: SessionStore,
}

impl Router {
    pub fn new(auth: AuthService, db: DatabaseService, sessions: SessionStore) -> Self {
        Self { auth, db, sessions }
    }

    /// Route one inbound event and produce the replies to deliver.
    ///
    /// Errors never escape: an authorization failure turns into a denial
    /// reply and tears down the user's session; a store failure turns
    /// into a generic failure reply and leaves all state untouched.
    pub async fn dispatch(&self, event: InboundEvent) -> Vec<Reply> {
        let user_id = event.user_id();
        let mut slot = self.sessions.lock(user_id).await;

        let result = match event {
            InboundEvent::Command { command, .. } => {
                self.handle_command(user_id, command, &mut slot).await
            }
            InboundEvent::Text { text, .. } => self.handle_text(user_id, &text, &mut slot).await,
            InboundEvent::Callback { payload, .. } => self.handle_callback(user_id, &payload).await,
        };

        match result {
            Ok(replies) => replies,
            Err(StoreBotError::PermissionDenied { .. }) => {
                warn!(user_id = user_id, "Denied administrative action");
                *slot = None;
                vec![render::access_denied()]
            }
            Err(e) => {
                error!(
                    user_id = user_id,
                    error = %e,
                    recoverable = e.is_recoverable(),
                    "Event handling failed"
                );
                vec![render::store_failure()]
            }
        }
    }

    async fn handle_command(
        &self,
        user_id: i64,
        command: Command,
        slot: &mut Option<Session>,
    ) -> Result<Vec<Reply>> {
        debug!(user_id = user_id, command = ?command, "Processing command");

        match command {
            Command::Start => Ok(vec![render::welcome()]),
            Command::AddProduct => {
                self.auth.require_admin(user_id)?;
                match dialogue::begin(slot, user_id) {
                    DialogueStart::Started => Ok(vec![render::name_prompt()]),
                    DialogueStart::Restarted => {
                        Ok(vec![render::draft_discarded(), render::name_prompt()])
                    }
                }
            }
            Command::ListProducts => {
                self.auth.require_admin(user_id)?;
                let products = self.db.products.list_all().await?;
                Ok(vec![render::admin_catalog(&products)])
            }
            Command::Cancel => {
                if dialogue::cancel(slot) {
                    info!(user_id = user_id, "Dialogue cancelled");
                    Ok(vec![render::cancelled()])
                } else {
                    Ok(vec![render::nothing_to_cancel()])
                }
            }
        }
    }

    async fn handle_text(
        &self,
        user_id: i64,
        text: &str,
        slot: &mut Option<Session>,
    ) -> Result<Vec<Reply>> {
        match dialogue::advance(slot, text) {
            StepOutcome::DescriptionPrompt => Ok(vec![render::description_prompt()]),
            StepOutcome::PricePrompt => Ok(vec![render::price_prompt()]),
            StepOutcome::InvalidPrice => Ok(vec![render::invalid_price()]),
            StepOutcome::Completed(new_product) => {
                let product = self.db.products.create(new_product).await?;
                *slot = None;
                info!(
                    user_id = user_id,
                    product_id = product.id,
                    "Product added to catalog"
                );
                Ok(vec![render::product_added(&product)])
            }
            // Free text outside a dialogue is not addressed to the bot.
            StepOutcome::NoSession => Ok(Vec::new()),
        }
    }

    async fn handle_callback(&self, user_id: i64, payload: &str) -> Result<Vec<Reply>> {
        debug!(user_id = user_id, payload = payload, "Processing callback");

        if payload == render::SHOW_PRODUCTS {
            let products = self.db.products.list_all().await?;
            return Ok(vec![render::catalog(&products)]);
        }

        if let Some(id) = payload
            .strip_prefix(render::DELETE_PREFIX)
            .and_then(|raw| raw.parse::<i64>().ok())
        {
            self.auth.require_admin(user_id)?;
            let existed = self.db.products.delete_by_id(id).await?;
            if existed {
                info!(user_id = user_id, product_id = id, "Product deleted");
            } else {
                // Idempotent: deleting a missing id is not an error.
                debug!(user_id = user_id, product_id = id, "Delete of missing product");
            }
            return Ok(vec![render::product_deleted()]);
        }

        warn!(user_id = user_id, payload = payload, "Unrecognized callback payload");
        Ok(vec![render::unrecognized()])
    }
}
