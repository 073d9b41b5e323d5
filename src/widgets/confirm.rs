use crate::core::DialogId;
use crate::host::{DialogHost, ModalDialog};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::widgets::base::{ModalBase, ReplySlot, button_span, typed_char, wrap_text};
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

const KIND: &str = "alert";
pub const DEFAULT_WIDTH: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Proceed,
    Cancel,
}

/// Confirm or alert dialog.
///
/// Informational dialogs show a single Okay that delivers `None`. Otherwise
/// Proceed delivers `Some(true)` and Cancel `Some(false)`.
pub struct ConfirmDialog {
    id: DialogId,
    width: u16,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self {
            id: DialogId::next(),
            width: DEFAULT_WIDTH,
        }
    }

    pub fn id(&self) -> DialogId {
        self.id
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn open<H, F>(
        self,
        host: &mut H,
        title: &str,
        instruction: &str,
        informational: bool,
        on_result: F,
    ) where
        H: DialogHost + ?Sized,
        F: FnOnce(Option<bool>) + Send + 'static,
    {
        host.mount(Box::new(Confirm {
            base: ModalBase::new(self.id, KIND, title, self.width),
            instruction: instruction.to_string(),
            informational,
            focus: Choice::Proceed,
            reply: ReplySlot::new(on_result),
        }));
    }
}

struct Confirm {
    base: ModalBase,
    instruction: String,
    informational: bool,
    focus: Choice,
    reply: ReplySlot<bool>,
}

impl Confirm {
    fn finish(&mut self, value: Option<bool>) -> InteractionResult {
        self.reply.deliver(value);
        InteractionResult::close()
    }

    fn choose(&mut self, choice: Choice) -> InteractionResult {
        self.finish(Some(choice == Choice::Proceed))
    }

    fn toggle_focus(&mut self) -> InteractionResult {
        if self.informational {
            return InteractionResult::consumed();
        }
        self.focus = match self.focus {
            Choice::Proceed => Choice::Cancel,
            Choice::Cancel => Choice::Proceed,
        };
        InteractionResult::handled()
    }
}

impl Drawable for Confirm {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let mut out =
            DrawOutput::plain_lines(wrap_text(&self.instruction, ctx.content_width as usize));
        out.push(vec![Span::new("")]);

        if self.informational {
            out.push(vec![button_span("Okay", self.base.element("ok"), true)]);
        } else {
            out.push(vec![
                button_span(
                    "Proceed",
                    self.base.element("proceed"),
                    self.focus == Choice::Proceed,
                ),
                Span::new("  "),
                button_span(
                    "Cancel",
                    self.base.element("cancel"),
                    self.focus == Choice::Cancel,
                ),
            ]);
        }
        out
    }
}

impl Interactive for Confirm {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.reply.is_pending() {
            return InteractionResult::ignored();
        }

        if self.informational {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc => self.finish(None),
                _ if typed_char(key) == Some(' ') => self.finish(None),
                _ => InteractionResult::ignored(),
            };
        }

        match key.code {
            KeyCode::Enter => self.choose(self.focus),
            KeyCode::Esc => self.choose(Choice::Cancel),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus()
            }
            _ => match typed_char(key) {
                Some('y' | 'Y') => self.choose(Choice::Proceed),
                Some('n' | 'N') => self.choose(Choice::Cancel),
                Some(' ') => self.choose(self.focus),
                _ => InteractionResult::ignored(),
            },
        }
    }

    fn on_click(&mut self, element: &str) -> InteractionResult {
        if !self.reply.is_pending() {
            return InteractionResult::ignored();
        }
        match (self.informational, self.base.local_part(element)) {
            (true, Some("ok")) => self.finish(None),
            (false, Some("proceed")) => self.choose(Choice::Proceed),
            (false, Some("cancel")) => self.choose(Choice::Cancel),
            _ => InteractionResult::ignored(),
        }
    }
}

impl ModalDialog for Confirm {
    fn modal(&self) -> &ModalBase {
        &self.base
    }
}
