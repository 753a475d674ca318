use reqwest::Url;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
};

use crate::{
    errors::{BotError, BotResult, HandlerResult},
    utils::sender_id,
};

const LINKS: [(&str, &str); 3] = [
    ("📰 Новости", "https://www.youtube.com/watch?v=IlOXIhixkG8"),
    (
        "🎵 Музыка",
        "https://www.youtube.com/watch?v=ak-uvw-mQJA&list=RDak-uvw-mQJA&start_radio=1&ab_channel=PowerplantBand",
    ),
    ("🎬 Видео", "https://www.youtube.com/watch?v=FlsrEP77jSI"),
];

/// One URL button per row
pub fn links_keyboard() -> BotResult<InlineKeyboardMarkup> {
    let rows = LINKS
        .iter()
        .map(|(label, url)| {
            let url = Url::parse(url)
                .map_err(|e| BotError::general(format!("Invalid link {}: {}", url, e)))?;
            Ok(vec![InlineKeyboardButton::url(*label, url)])
        })
        .collect::<BotResult<Vec<_>>>()?;

    Ok(InlineKeyboardMarkup::new(rows))
}

pub async fn links(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Вот несколько полезных ссылок:")
        .reply_markup(links_keyboard()?)
        .await?;

    log::info!("User {} requested /links", sender_id(&msg));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_link_gets_its_own_row() {
        let keyboard = links_keyboard().unwrap();
        assert_eq!(keyboard.inline_keyboard.len(), LINKS.len());
        for (row, (label, _)) in keyboard.inline_keyboard.iter().zip(LINKS) {
            assert_eq!(row.len(), 1);
            assert_eq!(row[0].text, label);
        }
    }
}
