mod config;
mod folders;
mod message;

pub use config::{Config, Layout};
pub use folders::{folder_for_year, DEFAULT_FOLDER};
pub use message::{MessageEntry, FLAG_READ};
