//! Hosts own mounted dialogs and route input to them.
//!
//! The active input target is explicit: the topmost dialog on the host's
//! stack receives every key and click. Opening a dialog while another is
//! mounted stacks it on top; keys go to the newest one until it closes.

pub mod stack;
pub mod terminal_host;

pub use stack::ModalStack;
pub use terminal_host::TerminalHost;

use crate::core::DialogId;
use crate::widgets::base::ModalBase;
use crate::widgets::traits::{Drawable, Interactive};

pub trait ModalDialog: Drawable + Interactive {
    fn modal(&self) -> &ModalBase;

    fn dialog_id(&self) -> DialogId {
        self.modal().id()
    }

    fn title(&self) -> &str {
        self.modal().title()
    }

    fn width(&self) -> u16 {
        self.modal().width()
    }
}

/// Surface that can mount a dialog as a modal overlay.
///
/// Mounting is terminal for the dialog: once it reports close the host
/// drops it and it never receives input again.
pub trait DialogHost {
    fn mount(&mut self, dialog: Box<dyn ModalDialog>);
}
