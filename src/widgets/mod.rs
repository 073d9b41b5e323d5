pub mod base;
pub mod confirm;
pub mod keypad;
pub mod prompt;
pub mod selector;
pub mod text_edit;
pub mod traits;

pub use confirm::ConfirmDialog;
pub use keypad::{KeypadDialog, KeypadRequest};
pub use prompt::TextPrompt;
pub use selector::Selector;

