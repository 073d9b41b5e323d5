use super::{DialogHost, ModalDialog};
use crate::core::DialogId;
use crate::terminal::{CursorPos, KeyEvent, TerminalSize};
use crate::ui::canvas::{Canvas, RenderFrame};
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{InteractionResult, RenderContext};
use log::debug;

const CHROME_COLS: u16 = 4;
const STACK_OFFSET: usize = 2;

/// Headless dialog host. Dialogs are kept in opening order and the last one
/// is the active input target.
#[derive(Default)]
pub struct ModalStack {
    dialogs: Vec<Box<dyn ModalDialog>>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    pub fn active_id(&self) -> Option<DialogId> {
        self.dialogs.last().map(|dialog| dialog.dialog_id())
    }

    pub fn active_title(&self) -> Option<&str> {
        self.dialogs.last().map(|dialog| dialog.title())
    }

    pub fn dispatch_key(&mut self, key: KeyEvent) -> InteractionResult {
        let Some(active) = self.dialogs.last_mut() else {
            return InteractionResult::ignored();
        };
        let result = active.on_key(key);
        self.settle(&result);
        result
    }

    pub fn click(&mut self, element: &str) -> InteractionResult {
        let Some(active) = self.dialogs.last_mut() else {
            return InteractionResult::ignored();
        };
        let result = active.on_click(element);
        self.settle(&result);
        result
    }

    pub fn render(&self, size: TerminalSize) -> RenderFrame {
        let mut canvas = Canvas::new(size);
        let mut cursor = None;
        let border = Style::new().color(Color::Green);

        for (depth, dialog) in self.dialogs.iter().enumerate() {
            let width = dialog.width().min(size.width);
            let ctx = RenderContext {
                content_width: width.saturating_sub(CHROME_COLS),
            };
            let body = dialog.draw(&ctx);

            let col = (canvas.width().saturating_sub(width as usize) / 2)
                .saturating_add(depth * STACK_OFFSET);
            let row = 1 + depth * STACK_OFFSET;
            let height = body.lines.len() + 2;

            canvas.draw_box(row, col, width as usize, height, dialog.title(), border);
            for (offset, line) in body.lines.iter().enumerate() {
                canvas.draw_line(row + 1 + offset, col + 2, line, ctx.content_width as usize);
            }

            cursor = dialog.cursor_pos(&ctx).map(|local| CursorPos {
                col: (col + 2 + local.col as usize).min(u16::MAX as usize) as u16,
                row: (row + 1 + local.row as usize).min(u16::MAX as usize) as u16,
            });
        }

        canvas.into_frame(cursor)
    }

    fn settle(&mut self, result: &InteractionResult) {
        if !result.closes() {
            return;
        }
        if let Some(dialog) = self.dialogs.pop() {
            debug!(
                "closed dialog {} ({:?}); {} still mounted",
                dialog.dialog_id(),
                dialog.title(),
                self.dialogs.len()
            );
        }
    }
}

impl DialogHost for ModalStack {
    fn mount(&mut self, dialog: Box<dyn ModalDialog>) {
        debug!("mounted dialog {} ({:?})", dialog.dialog_id(), dialog.title());
        self.dialogs.push(dialog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::KeyCode;
    use crate::widgets::{ConfirmDialog, TextPrompt};

    const SIZE: TerminalSize = TerminalSize {
        width: 60,
        height: 20,
    };

    #[test]
    fn empty_stack_ignores_input() {
        let mut stack = ModalStack::new();
        assert!(!stack.dispatch_key(KeyEvent::plain(KeyCode::Enter)).handled);
        assert!(!stack.click("numpad1-enter").handled);
        assert!(stack.render(SIZE).hits.is_empty());
    }

    #[test]
    fn dialogs_render_in_opening_order() {
        let mut stack = ModalStack::new();
        TextPrompt::new().open(&mut stack, "Name", None, |_| {});
        ConfirmDialog::new().open(&mut stack, "Sure", "Really?", false, |_| {});

        let lines = stack.render(SIZE).plain_lines();
        let name_row = lines.iter().position(|line| line.contains("Name"));
        let sure_row = lines.iter().position(|line| line.contains("Sure"));
        assert!(name_row.is_some());
        assert!(sure_row > name_row);
        assert_eq!(stack.active_title(), Some("Sure"));
    }

    #[test]
    fn cursor_follows_active_prompt() {
        let mut stack = ModalStack::new();
        TextPrompt::new().open(&mut stack, "Name", None, |_| {});
        stack.dispatch_key(KeyEvent::char('a'));
        assert!(stack.render(SIZE).cursor.is_some());

        ConfirmDialog::new().open(&mut stack, "Sure", "Really?", false, |_| {});
        assert_eq!(stack.render(SIZE).cursor, None);
    }
}
