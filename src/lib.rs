pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod logging;
pub mod numeric;
pub mod store;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use config::AppConfig;
pub use core::DialogId;
pub use error::{ConfigError, DialogError, StoreError};
pub use host::{DialogHost, ModalDialog, ModalStack, TerminalHost};
pub use numeric::{Accumulator, NumericBounds, Radix, is_within_bounds};
pub use store::{FileStorage, KeyValueStore, MemoryStorage, StorageBackend, UnavailableStorage};
pub use widgets::{ConfirmDialog, KeypadDialog, KeypadRequest, Selector, TextPrompt};
