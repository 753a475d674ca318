use teloxide::prelude::*;

use crate::{
    errors::HandlerResult,
    utils::{MenuButton, first_name, sender_id},
};

pub async fn menu_button_pressed(bot: Bot, msg: Message, button: MenuButton) -> HandlerResult {
    let name = first_name(msg.from.as_ref());
    let text = match button {
        MenuButton::Hello => format!("Привет, {}!", name),
        MenuButton::Bye => format!("До свидания, {}!", name),
    };

    bot.send_message(msg.chat.id, text).await?;
    log::info!("User {} pressed {:?} button", sender_id(&msg), button);
    Ok(())
}
