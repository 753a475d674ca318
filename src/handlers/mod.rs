mod dynamic_action_received;
mod form_input_received;
mod menu_button_pressed;
mod photo_received;
mod text_received;

pub use dynamic_action_received::dynamic_action_received;
pub use form_input_received::form_input_received;
pub use menu_button_pressed::menu_button_pressed;
pub use photo_received::photo_received;
pub use text_received::text_received;
