use std::sync::Arc;
use std::time::Instant;
use teloxide::prelude::*;

use super::reply;
use crate::state::{AppState, HandlerResult};

/// Handler for `/rates`, lists every stored rate.
pub async fn handle_rates(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> HandlerResult {
    let start_time = Instant::now();
    tracing::info!("Handling /rates command in chat {}", msg.chat.id);

    let answer = state.rate_service.list_rates().await;
    reply(&bot, &msg, answer).await?;

    tracing::info!("Time taken to handle /rates command: {:?}", start_time.elapsed());
    Ok(())
}
