use std::sync::Arc;

use teloxide::{prelude::*, types::ParseMode, utils::html};

use crate::{
    errors::HandlerResult,
    translate::{Translation, Translator},
    utils::sender_id,
};

const NOTHING_TO_TRANSLATE: &str = "Отправьте текст, и я переведу его на английский.";

/// Translate any other text to English
pub async fn text_received(
    bot: Bot,
    msg: Message,
    text: String,
    translator: Arc<Translator>,
) -> HandlerResult {
    if let Some(notice) = blank_notice(&text) {
        bot.send_message(msg.chat.id, notice).await?;
        return Ok(());
    }

    match translator.translate(&text).await {
        Ok(translation) => {
            bot.send_message(msg.chat.id, translation_reply(&translation))
                .parse_mode(ParseMode::Html)
                .await?;

            log::info!(
                "Translated '{}' ({}) to '{}' for user {}",
                text,
                translation.source_language.as_deref().unwrap_or("?"),
                translation.text,
                sender_id(&msg)
            );
        }
        Err(e) => {
            log::error!("Failed to translate '{}': {}", text, e);
            bot.send_message(
                msg.chat.id,
                "К сожалению, не удалось перевести текст. Попробуйте еще раз или измените ваш запрос.",
            )
            .await?;
        }
    }

    Ok(())
}

/// Whitespace-only text is answered without calling the translator
fn blank_notice(text: &str) -> Option<&'static str> {
    text.trim().is_empty().then_some(NOTHING_TO_TRANSLATE)
}

fn translation_reply(translation: &Translation) -> String {
    format!(
        "<b>Перевод на английский:</b>\n{}",
        html::escape(&translation.text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_gets_a_notice() {
        assert_eq!(blank_notice("   \n\t"), Some(NOTHING_TO_TRANSLATE));
        assert_eq!(blank_notice(""), Some(NOTHING_TO_TRANSLATE));
        assert_eq!(blank_notice(" Привет "), None);
    }

    #[test]
    fn translation_is_escaped_html() {
        let translation = Translation {
            text: "a < b & c".to_string(),
            source_language: Some("ru".to_string()),
        };
        assert_eq!(
            translation_reply(&translation),
            "<b>Перевод на английский:</b>\na &lt; b &amp; c"
        );
    }
}
