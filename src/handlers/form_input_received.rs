use std::sync::Arc;

use teloxide::prelude::*;

use crate::{errors::HandlerResult, schema::Form};

/// Any non-command message from a user with an open registration form
pub async fn form_input_received(bot: Bot, msg: Message, form: Arc<Form>) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    match form.handle_input(user.id, msg.text()).await {
        Some(reply) => {
            bot.send_message(msg.chat.id, reply.to_string()).await?;
        }
        None => {
            log::warn!("Registration session of user {} closed before input arrived", user.id.0);
        }
    }

    Ok(())
}
