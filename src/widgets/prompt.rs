use crate::core::DialogId;
use crate::host::{DialogHost, ModalDialog};
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::Style;
use crate::widgets::base::{ModalBase, ReplySlot, button_span, instruction_lines, typed_char};
use crate::widgets::text_edit::LineBuffer;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use unicode_width::UnicodeWidthChar;

const KIND: &str = "stringpad";
pub const DEFAULT_WIDTH: u16 = 44;

/// Free-text prompt. No validation: whatever is in the field on Okay is
/// the result.
pub struct TextPrompt {
    id: DialogId,
    width: u16,
}

impl Default for TextPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPrompt {
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

    pub fn open<H, F>(self, host: &mut H, title: &str, instruction: Option<&str>, on_result: F)
    where
        H: DialogHost + ?Sized,
        F: FnOnce(Option<String>) + Send + 'static,
    {
        host.mount(Box::new(Prompt {
            base: ModalBase::new(self.id, KIND, title, self.width),
            instruction: instruction.map(str::to_owned),
            line: LineBuffer::new(),
            reply: ReplySlot::new(on_result),
        }));
    }
}

struct Prompt {
    base: ModalBase,
    instruction: Option<String>,
    line: LineBuffer,
    reply: ReplySlot<String>,
}

impl Prompt {
    fn okay(&mut self) -> InteractionResult {
        self.reply.deliver(Some(self.line.text()));
        InteractionResult::close()
    }

    fn cancel(&mut self) -> InteractionResult {
        self.reply.deliver(None);
        InteractionResult::close()
    }

    fn clear(&mut self) -> InteractionResult {
        self.line.clear();
        InteractionResult::handled()
    }

    fn field_width(ctx: &RenderContext) -> usize {
        (ctx.content_width as usize).saturating_sub(2).max(1)
    }

    /// First visible char and the cursor column inside the field.
    fn viewport(&self, field: usize) -> (usize, usize) {
        let widths: Vec<usize> = self
            .line
            .chars()
            .iter()
            .map(|ch| UnicodeWidthChar::width(*ch).unwrap_or(0))
            .collect();
        let cursor = self.line.cursor();

        let mut start = 0;
        let mut col: usize = widths[..cursor].iter().sum();
        while col >= field && start < cursor {
            col -= widths[start];
            start += 1;
        }
        (start, col)
    }

    fn edited(changed: bool) -> InteractionResult {
        if changed {
            InteractionResult::handled()
        } else {
            InteractionResult::consumed()
        }
    }

    fn instruction_rows(&self, ctx: &RenderContext) -> usize {
        instruction_lines(self.instruction.as_deref(), ctx.content_width as usize).len()
    }
}

impl Drawable for Prompt {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let mut out = DrawOutput {
            lines: instruction_lines(self.instruction.as_deref(), ctx.content_width as usize),
        };

        let field = Self::field_width(ctx);
        let (start, _) = self.viewport(field);
        let mut visible = String::new();
        let mut used = 0;
        for &ch in self.line.chars().iter().skip(start) {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + w > field {
                break;
            }
            visible.push(ch);
            used += w;
        }
        visible.push_str(&" ".repeat(field - used));
        out.push(vec![
            Span::new(" "),
            Span::styled(visible, Style::new().reversed()),
        ]);
        out.push(vec![Span::new("")]);
        out.push(vec![
            button_span("Okay", self.base.element("okay"), false),
            Span::new(" "),
            button_span("Clear", self.base.element("clear"), false),
            Span::new(" "),
            button_span("Cancel", self.base.element("cancel"), false),
        ]);
        out
    }
}

impl Interactive for Prompt {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.reply.is_pending() {
            return InteractionResult::ignored();
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => self.okay(),
            KeyCode::Esc => self.cancel(),
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Backspace if ctrl => Self::edited(self.line.delete_word_left()),
            KeyCode::Backspace => Self::edited(self.line.backspace()),
            KeyCode::Delete => Self::edited(self.line.delete()),
            KeyCode::Left => Self::edited(self.line.left()),
            KeyCode::Right => Self::edited(self.line.right()),
            KeyCode::Home => Self::edited(self.line.home()),
            KeyCode::End => Self::edited(self.line.end()),
            _ => match typed_char(key) {
                Some(ch) => {
                    self.line.insert(ch);
                    InteractionResult::handled()
                }
                None => InteractionResult::ignored(),
            },
        }
    }

    fn on_click(&mut self, element: &str) -> InteractionResult {
        if !self.reply.is_pending() {
            return InteractionResult::ignored();
        }
        match self.base.local_part(element) {
            Some("okay") => self.okay(),
            Some("clear") => self.clear(),
            Some("cancel") => self.cancel(),
            _ => InteractionResult::ignored(),
        }
    }

    fn cursor_pos(&self, ctx: &RenderContext) -> Option<CursorPos> {
        let (_, col) = self.viewport(Self::field_width(ctx));
        Some(CursorPos {
            col: (1 + col).min(u16::MAX as usize) as u16,
            row: self.instruction_rows(ctx).min(u16::MAX as usize) as u16,
        })
    }
}

impl ModalDialog for Prompt {
    fn modal(&self) -> &ModalBase {
        &self.base
    }
}
