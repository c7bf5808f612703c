use std::sync::Arc;
use std::time::Instant;
use teloxide::prelude::*;

use super::reply;
use crate::state::{AppState, HandlerResult};

/// Handler for `/exchange <FROM> <TO> <AMOUNT>`.
pub async fn handle_exchange(
    bot: Bot,
    msg: Message,
    state: Arc<AppState>,
) -> HandlerResult {
    let start_time = Instant::now();
    let text = msg.text().unwrap_or_default();
    let user_id = msg.from.as_ref().map(|user| user.id.0);

    tracing::info!("Handling /exchange command: {:?} (user: {:?})", text, user_id);

    let answer = state.rate_service.convert(text).await;
    reply(&bot, &msg, answer).await?;

    tracing::info!("Time taken to handle /exchange command: {:?}", start_time.elapsed());
    Ok(())
}
