use teloxide::{prelude::*, types::MaybeInaccessibleMessage};

use crate::{
    commands::options_keyboard,
    errors::HandlerResult,
    utils::{DynamicAction, first_name},
};

pub async fn dynamic_action_received(
    bot: Bot,
    query: CallbackQuery,
    action: DynamicAction,
) -> HandlerResult {
    let Some(message) = query.message.as_ref() else {
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };
    let chat_id = match message {
        MaybeInaccessibleMessage::Regular(m) => m.chat.id,
        MaybeInaccessibleMessage::Inaccessible(m) => m.chat.id,
    };
    let user_id = query.from.id.0;

    let Some(option) = action.option_number() else {
        show_more_options(&bot, message, chat_id, user_id).await?;
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(());
    };

    bot.send_message(
        chat_id,
        format!("{}, вы выбрали Опцию {}!", first_name(Some(&query.from)), option),
    )
    .await?;
    log::info!("User {} selected option {}", user_id, option);

    bot.answer_callback_query(query.id.clone())
        .text(format!("Вы выбрали Опцию {}!", option))
        .await?;
    Ok(())
}

/// Swap the single button for the two options, or send a notice if the
/// message can no longer be edited
async fn show_more_options(
    bot: &Bot,
    message: &MaybeInaccessibleMessage,
    chat_id: ChatId,
    user_id: u64,
) -> HandlerResult {
    let edited = match message {
        MaybeInaccessibleMessage::Regular(m) => bot
            .edit_message_text(chat_id, m.id, "Выберите одну из опций:")
            .reply_markup(options_keyboard())
            .await
            .map(|_| ())
            .map_err(|e| e.to_string()),
        MaybeInaccessibleMessage::Inaccessible(_) => Err("message is inaccessible".to_string()),
    };

    match edited {
        Ok(()) => log::info!("User {} pressed 'show more', keyboard updated", user_id),
        Err(e) => {
            log::error!("Failed to edit message for callback 'show_more_options': {}", e);
            bot.send_message(
                chat_id,
                "Не удалось обновить предыдущее меню. Пожалуйста, попробуйте /dynamic снова.",
            )
            .await?;
        }
    }

    Ok(())
}
