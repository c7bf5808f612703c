use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing_subscriber::EnvFilter;

mod commands;
mod repositories;
mod services;
mod state;

use crate::{
    commands::{handle_exchange, handle_help, handle_rates, Command},
    state::AppState,
};

fn schema() -> UpdateHandler<anyhow::Error> {
    use dptree::case;

    // Anything that is not one of our commands is ignored.
    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Help].endpoint(handle_help))
        .branch(case![Command::Start].endpoint(handle_help))
        .branch(case![Command::Exchange(args)].endpoint(handle_exchange))
        .branch(case![Command::Rates].endpoint(handle_rates));

    Update::filter_message().branch(command_handler)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting currency rates bot...");

    let app_state = Arc::new(AppState::new().await?);
    tracing::info!("AppState initialized");

    let bot = Bot::new(&app_state.bot_token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }
    tracing::info!("Bot created");

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![app_state.clone()])
        .enable_ctrlc_handler()
        .build();

    tracing::info!("Bot is running and waiting for updates...");
    dispatcher.dispatch().await;

    drop(dispatcher);
    match Arc::try_unwrap(app_state) {
        Ok(state) => state.close().await,
        Err(_) => tracing::warn!("AppState still shared at shutdown"),
    }

    Ok(())
}
