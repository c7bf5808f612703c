use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{Message, ReplyParameters};
use teloxide::utils::command::BotCommands;

use crate::state::HandlerResult;

pub mod exchange;
pub mod rates;

pub use exchange::handle_exchange;
pub use rates::handle_rates;

/// 💱 Курсы валют ЦБ РФ. Доступные команды:
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// ❓ Список команд
    Help,
    /// 🚀 Начать работу с ботом
    Start,
    /// 💱 Конвертация: /exchange <FROM> <TO> <AMOUNT>
    Exchange(String),
    /// 📋 Актуальные курсы валют
    Rates,
}

pub async fn handle_help(bot: Bot, msg: Message) -> HandlerResult {
    tracing::info!("Handling /help command in chat {}", msg.chat.id);

    reply(&bot, &msg, Command::descriptions().to_string()).await
}

/// Sends `text` as a reply to `msg`.
pub(crate) async fn reply(bot: &Bot, msg: &Message, text: String) -> Result<()> {
    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_keeps_arguments_as_one_string() {
        let command = Command::parse("/exchange USD RUB 10", "RatesBot").unwrap();
        assert!(matches!(command, Command::Exchange(args) if args == "USD RUB 10"));

        let command = Command::parse("/exchange@RatesBot USD RUB abc", "RatesBot").unwrap();
        assert!(matches!(command, Command::Exchange(args) if args == "USD RUB abc"));
    }

    #[test]
    fn test_rates_command() {
        assert!(matches!(Command::parse("/rates", "RatesBot"), Ok(Command::Rates)));
    }

    #[test]
    fn test_unknown_commands_are_not_parsed() {
        for text in ["/version", "/convert USD RUB 10", "hello"] {
            assert!(Command::parse(text, "RatesBot").is_err(), "{} should not parse", text);
        }
    }
}
