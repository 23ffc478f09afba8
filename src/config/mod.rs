//! Hotkey binding configuration

pub mod parser;
pub mod store;

pub use parser::{shortcut_token_string, BindingEntry, BindingsFile, ConfigParseError, ConfigParser};
pub use store::{BindingStore, BINDINGS_FILE_NAME};
