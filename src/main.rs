//! Storebot Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message, Update};
use tracing::info;

use storebot::{
    config::Settings,
    database::{connection, DatabaseService},
    handlers::{self, StoreCommand},
    router::Router,
    services::AuthService,
    state::SessionStore,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer alive.
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting storebot...");

    info!("Connecting to database...");
    let pool = connection::create_pool(&settings.database).await?;
    connection::run_migrations(&pool).await?;

    let db = DatabaseService::new(pool);
    let auth = AuthService::new(&settings);
    let sessions = SessionStore::new();
    let router = Arc::new(Router::new(auth, db, sessions));

    let bot = Bot::new(&settings.bot.token);

    info!("Setting up bot handlers...");
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<StoreCommand>()
                        .endpoint(command_endpoint),
                )
                .branch(dptree::endpoint(message_endpoint)),
        )
        .branch(Update::filter_callback_query().endpoint(callback_endpoint));

    info!("storebot is ready, starting polling...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router])
        .default_handler(|upd| async move {
            tracing::warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("storebot has been shut down.");

    Ok(())
}

async fn command_endpoint(
    bot: Bot,
    msg: Message,
    command: StoreCommand,
    router: Arc<Router>,
) -> HandlerResult {
    handlers::handle_command(bot, msg, command, router).await?;
    Ok(())
}

async fn message_endpoint(bot: Bot, msg: Message, router: Arc<Router>) -> HandlerResult {
    handlers::handle_message(bot, msg, router).await?;
    Ok(())
}

async fn callback_endpoint(bot: Bot, query: CallbackQuery, router: Arc<Router>) -> HandlerResult {
    handlers::handle_callback(bot, query, router).await?;
    Ok(())
}
