//! Bot handlers module
//!
//! The Telegram side of the bot: command parsing, update endpoints, and
//! delivery of router replies as messages with inline keyboards.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{
    CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, Message,
};
use teloxide::utils::command::BotCommands;
use tracing::{debug, warn};

use crate::router::events::{Command, InboundEvent, Reply};
use crate::router::Router;
use crate::utils::errors::Result;

/// Commands understood by the bot.
#[derive(BotCommands, Clone, Copy)]
#[command(rename_rule = "lowercase", description = "Storefront bot commands")]
pub enum StoreCommand {
    #[command(description = "Show the welcome message")]
    Start,
    #[command(description = "Add a product to the catalog (admin only)")]
    AddProduct,
    #[command(description = "List products with delete controls (admin only)")]
    ListProducts,
    #[command(description = "Cancel the current operation")]
    Cancel,
}

impl From<StoreCommand> for Command {
    fn from(command: StoreCommand) -> Self {
        match command {
            StoreCommand::Start => Command::Start,
            StoreCommand::AddProduct => Command::AddProduct,
            StoreCommand::ListProducts => Command::ListProducts,
            StoreCommand::Cancel => Command::Cancel,
        }
    }
}

/// Handle a parsed bot command.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    command: StoreCommand,
    router: Arc<Router>,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!(chat_id = ?msg.chat.id, "Command without a sender, ignoring");
        return Ok(());
    };

    let event = InboundEvent::Command {
        user_id: user.id.0 as i64,
        command: command.into(),
    };
    deliver(&bot, msg.chat.id, router.dispatch(event).await).await
}

/// Handle a free-text message (a dialogue step reply, if any).
pub async fn handle_message(bot: Bot, msg: Message, router: Arc<Router>) -> Result<()> {
    let (Some(user), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        return Ok(());
    };

    let event = InboundEvent::Text {
        user_id: user.id.0 as i64,
        text: text.to_string(),
    };
    deliver(&bot, msg.chat.id, router.dispatch(event).await).await
}

/// Handle an inline keyboard press.
pub async fn handle_callback(bot: Bot, query: CallbackQuery, router: Arc<Router>) -> Result<()> {
    let user_id = query.from.id.0 as i64;

    // Answer first so the client drops its loading state.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(user_id = user_id, error = %e, "Failed to answer callback query");
    }

    let Some(payload) = query.data else {
        return Ok(());
    };

    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    let event = InboundEvent::Callback { user_id, payload };
    deliver(&bot, chat_id, router.dispatch(event).await).await
}

/// Send each reply, attaching its controls as an inline keyboard.
async fn deliver(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> Result<()> {
    for reply in replies {
        let request = bot.send_message(chat_id, reply.text);
        if reply.buttons.is_empty() {
            request.await?;
        } else {
            let keyboard = InlineKeyboardMarkup::new(reply.buttons.into_iter().map(|row| {
                row.into_iter()
                    .map(|button| InlineKeyboardButton::callback(button.label, button.payload))
                    .collect::<Vec<_>>()
            }));
            request.reply_markup(keyboard).await?;
        }
    }

    Ok(())
}
