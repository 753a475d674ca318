use std::path::Path;
use std::sync::Arc;

use teloxide::{net::Download, prelude::*, types::PhotoSize};
use tokio::{fs, io::AsyncWriteExt};

use crate::{
    config::Config,
    errors::{BotError, HandlerResult},
    utils::photo_path,
};

pub async fn photo_received(
    bot: Bot,
    msg: Message,
    photos: Vec<PhotoSize>,
    config: Arc<Config>,
) -> HandlerResult {
    // Sizes come smallest first
    let Some(photo) = photos.last() else {
        return Ok(());
    };

    let file_id = &photo.file.id;
    let output_path = photo_path(&config.img_dir, file_id);

    match save_photo(&bot, photo, &output_path).await {
        Ok(()) => {
            let file_name = output_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            bot.send_message(msg.chat.id, format!("Фото сохранено как {}!", file_name))
                .await?;
            log::info!("Photo saved to {}", output_path.display());
        }
        Err(e) => {
            log::error!("Failed to save photo {}: {}", file_id, e);
            bot.send_message(
                msg.chat.id,
                "Произошла ошибка при сохранении фото. Попробуйте пожалуйста позже.",
            )
            .await?;
        }
    }

    Ok(())
}

async fn save_photo(bot: &Bot, photo: &PhotoSize, output_path: &Path) -> HandlerResult {
    let file = bot.get_file(photo.file.id.clone()).await?;
    log::debug!("Downloading photo {} to {}", file.path, output_path.display());

    let mut destination = fs::File::create(output_path).await?;
    let downloaded = bot
        .download_file(&file.path, &mut destination)
        .await
        .map_err(BotError::from);

    finish_file(destination, output_path, downloaded).await
}

/// Flush a downloaded file, or remove it if the download failed
async fn finish_file(
    mut destination: fs::File,
    output_path: &Path,
    downloaded: HandlerResult,
) -> HandlerResult {
    let result = match downloaded {
        Ok(()) => destination.flush().await.map_err(BotError::from),
        Err(e) => Err(e),
    };

    if result.is_err() {
        drop(destination);
        let _ = fs::remove_file(output_path).await;
    }

    result
}
