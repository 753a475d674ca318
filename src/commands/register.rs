use std::sync::Arc;

use teloxide::{prelude::*, types::UserId};

use crate::{errors::HandlerResult, schema::Form};

const UNKNOWN_SENDER: &str =
    "Не удалось определить отправителя. Регистрация доступна только от имени пользователя.";

pub async fn register(bot: Bot, msg: Message, form: Arc<Form>) -> HandlerResult {
    let user = msg.from.as_ref().map(|user| user.id);
    if user.is_none() {
        log::warn!("/register without a sender in chat {}", msg.chat.id);
    }

    let reply = registration_reply(&form, user).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// Open a form for a known sender, otherwise explain why not
async fn registration_reply(form: &Form, user: Option<UserId>) -> String {
    match user {
        Some(user) => form.start(user).await.to_string(),
        None => UNKNOWN_SENDER.to_string(),
    }
}
