use std::sync::Arc;

use teloxide::prelude::*;

use crate::{errors::HandlerResult, form::FormReply, schema::Form};

pub async fn cancel(bot: Bot, msg: Message, form: Arc<Form>) -> HandlerResult {
    let reply = match msg.from.as_ref() {
        Some(user) => form.cancel(user.id).await,
        None => FormReply::NothingToCancel,
    };
    bot.send_message(msg.chat.id, reply.to_string()).await?;
    Ok(())
}
