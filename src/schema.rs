use std::str::FromStr;
use std::sync::Arc;

use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

use crate::{
    commands::*,
    db::StudentDb,
    errors::BotError,
    form::FormController,
    handlers::{
        dynamic_action_received, form_input_received, menu_button_pressed, photo_received,
        text_received,
    },
    utils::{DynamicAction, MenuButton},
};

pub type Form = FormController<StudentDb>;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "начало работы, показать меню")]
    Start,
    #[command(description = "показать справку")]
    Help,
    #[command(description = "зарегистрировать студента")]
    Register,
    #[command(description = "отменить регистрацию")]
    Cancel,
    #[command(description = "показать полезные ссылки")]
    Links,
    #[command(description = "динамическая клавиатура")]
    Dynamic,
    #[command(description = "получить тестовое голосовое сообщение")]
    SendVoice,
}

/// Message routing, first match wins: command, menu button, photo,
/// open registration form, any other text.
pub fn schema() -> UpdateHandler<BotError> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start))
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Register].endpoint(register))
        .branch(case![Command::Cancel].endpoint(cancel))
        .branch(case![Command::Links].endpoint(links))
        .branch(case![Command::Dynamic].endpoint(dynamic))
        .branch(case![Command::SendVoice].endpoint(send_voice));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(
            Message::filter_text()
                .filter_map(|text: String| MenuButton::from_str(&text).ok())
                .endpoint(menu_button_pressed),
        )
        .branch(Message::filter_photo().endpoint(photo_received))
        .branch(
            dptree::filter_async(|msg: Message, form: Arc<Form>| async move {
                match msg.from.as_ref() {
                    Some(user) => form.has_session(user.id).await,
                    None => false,
                }
            })
            .endpoint(form_input_received),
        )
        .branch(Message::filter_text().endpoint(text_received));

    let callback_handler = Update::filter_callback_query()
        .filter_map(|query: CallbackQuery| {
            query
                .data
                .as_deref()
                .and_then(|data| DynamicAction::from_str(data).ok())
        })
        .endpoint(dynamic_action_received);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}
