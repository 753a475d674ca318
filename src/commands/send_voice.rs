use std::sync::Arc;

use teloxide::{prelude::*, types::InputFile};
use tokio::fs;

use crate::{config::Config, errors::HandlerResult, utils::sender_id};

pub async fn send_voice(bot: Bot, msg: Message, config: Arc<Config>) -> HandlerResult {
    let voice_path = config.voice_sample_path();

    if !fs::try_exists(&voice_path).await.unwrap_or(false) {
        log::error!("Voice sample {} not found", voice_path.display());
        bot.send_message(
            msg.chat.id,
            "Не удалось найти аудиофайл для отправки. Пожалуйста, сообщите администратору.",
        )
        .await?;
        return Ok(());
    }

    match bot
        .send_voice(msg.chat.id, InputFile::file(&voice_path))
        .await
    {
        Ok(_) => {
            log::info!(
                "Voice sample {} sent to user {}",
                voice_path.display(),
                sender_id(&msg)
            );
        }
        Err(e) => {
            log::error!("Failed to send voice sample: {}", e);
            bot.send_message(msg.chat.id, "Произошла ошибка при отправке голосового сообщения.")
                .await?;
        }
    }

    Ok(())
}
