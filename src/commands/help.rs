use teloxide::prelude::*;

use crate::errors::HandlerResult;

const HELP_TEXT: &str = "Это бот для демонстрации различных функций Telegram:\n\
    - Используйте кнопки 'Привет 👋' и 'Пока Bye' для простого общения.\n\
    - Отправьте /register для регистрации нового студента.\n\
    - Отправьте /cancel для отмены текущей операции (например, регистрации).\n\
    - Отправьте /links для получения набора полезных ссылок.\n\
    - Отправьте /dynamic для работы с динамически изменяемой клавиатурой.\n\
    - Отправьте фото, и я его сохраню в папку 'img'.\n\
    - Отправьте /sendvoice для получения тестового голосового сообщения.\n\
    - Отправьте любой другой текст, и я переведу его на английский язык.\n\
    \nОсновные команды:\n\
    /start - начало работы, показать меню\n\
    /help - это сообщение";

pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, HELP_TEXT).await?;
    Ok(())
}
