use std::sync::Arc;

use strum::IntoEnumIterator;
use teloxide::{
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup},
};

use crate::{
    errors::HandlerResult,
    schema::Form,
    utils::{MenuButton, full_name, sender_id},
};

pub fn menu_keyboard() -> KeyboardMarkup {
    let row: Vec<KeyboardButton> = MenuButton::iter()
        .map(|button| KeyboardButton::new(button.to_string()))
        .collect();

    KeyboardMarkup::new(vec![row])
        .resize_keyboard()
        .input_field_placeholder("Нажмите 'Привет' или 'Пока'...")
}

pub async fn start(bot: Bot, msg: Message, form: Arc<Form>) -> HandlerResult {
    // /start also abandons an unfinished registration
    if let Some(user) = msg.from.as_ref() {
        form.reset(user.id).await;
    }

    bot.send_message(
        msg.chat.id,
        format!(
            "Привет, {}!\n\
            Я твой бот-помощник. Выбери действие из меню ниже или используй команды:\n\
            /help - показать справку\n\
            /register - зарегистрировать студента\n\
            /links - показать полезные ссылки\n\
            /dynamic - динамическая клавиатура",
            full_name(msg.from.as_ref())
        ),
    )
    .reply_markup(menu_keyboard())
    .await?;

    log::info!("User {} ran /start, menu shown", sender_id(&msg));
    Ok(())
}
