mod cancel;
mod dynamic;
mod help;
mod links;
mod register;
mod send_voice;
mod start;

pub use cancel::cancel;
pub use dynamic::{dynamic, options_keyboard};
pub use help::help;
pub use links::links;
pub use register::register;
pub use send_voice::send_voice;
pub use start::start;
