use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
};

use crate::{errors::HandlerResult, utils::{DynamicAction, sender_id}};

pub fn show_more_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        "Показать больше",
        DynamicAction::ShowMore.to_string(),
    )]])
}

/// Replaces the "show more" button after it is pressed
pub fn options_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::default().append_row([
        InlineKeyboardButton::callback("Опция 1", DynamicAction::SelectOption1.to_string()),
        InlineKeyboardButton::callback("Опция 2", DynamicAction::SelectOption2.to_string()),
    ])
}

pub async fn dynamic(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Нажмите кнопку ниже, чтобы увидеть больше опций:",
    )
    .reply_markup(show_more_keyboard())
    .await?;

    log::info!("User {} requested /dynamic keyboard", sender_id(&msg));
    Ok(())
}

#[cfg(test)]
mod tests {
    use teloxide::types::InlineKeyboardButtonKind;

    use super::*;

    fn callback_data(button: &InlineKeyboardButton) -> Option<&str> {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => Some(data.as_str()),
            _ => None,
        }
    }

    #[test]
    fn show_more_button_carries_callback() {
        let keyboard = show_more_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(
            callback_data(&keyboard.inline_keyboard[0][0]),
            Some("show_more_options")
        );
    }

    #[test]
    fn options_share_one_row() {
        let keyboard = options_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 1);
        let data: Vec<_> = keyboard.inline_keyboard[0]
            .iter()
            .filter_map(callback_data)
            .collect();
        assert_eq!(data, vec!["select_option_1", "select_option_2"]);
    }
}
