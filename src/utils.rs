use std::path::{Path, PathBuf};

use strum::{Display, EnumIter, EnumString};
use teloxide::types::{Message, User};

/// Photos are stored as `<file_id>.jpg`
pub fn photo_path(img_dir: &Path, file_id: &str) -> PathBuf {
    img_dir.join(format!("{}.jpg", file_id))
}

pub fn first_name(user: Option<&User>) -> &str {
    user.map(|u| u.first_name.as_str()).unwrap_or("друг")
}

pub fn full_name(user: Option<&User>) -> String {
    user.map(User::full_name).unwrap_or_else(|| "друг".to_string())
}

/// Telegram id of the sender, for logs
pub fn sender_id(msg: &Message) -> u64 {
    msg.from.as_ref().map(|u| u.id.0).unwrap_or(0)
}

/// Buttons of the reply keyboard shown by /start
#[derive(EnumIter, Display, EnumString, Debug, Clone, Copy, PartialEq)]
pub enum MenuButton {
    #[strum(to_string = "Привет 👋")]
    Hello,
    #[strum(to_string = "Пока Bye")]
    Bye,
}

/// Callback data of the /dynamic inline keyboard
#[derive(EnumIter, Display, EnumString, Debug, Clone, Copy, PartialEq)]
pub enum DynamicAction {
    #[strum(to_string = "show_more_options")]
    ShowMore,
    #[strum(to_string = "select_option_1")]
    SelectOption1,
    #[strum(to_string = "select_option_2")]
    SelectOption2,
}

impl DynamicAction {
    /// Option number shown to the user, `None` for the "show more" button
    pub fn option_number(self) -> Option<u8> {
        match self {
            DynamicAction::ShowMore => None,
            DynamicAction::SelectOption1 => Some(1),
            DynamicAction::SelectOption2 => Some(2),
        }
    }
}
