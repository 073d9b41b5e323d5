use crate::core::DialogId;
use crate::error::DialogError;
use crate::host::{DialogHost, ModalDialog};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::{ModalBase, ReplySlot, button_span};
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use log::warn;

const KIND: &str = "selector";
pub const DEFAULT_WIDTH: u16 = 34;
pub const DEFAULT_ROWS: usize = 5;

/// Single-choice list. The first option starts selected.
pub struct Selector {
    id: DialogId,
    width: u16,
    rows: usize,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector {
    pub fn new() -> Self {
        Self {
            id: DialogId::next(),
            width: DEFAULT_WIDTH,
            rows: DEFAULT_ROWS,
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

    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows.max(1);
        self
    }

    pub fn open<H, F>(
        self,
        host: &mut H,
        title: &str,
        options: Vec<String>,
        on_result: F,
    ) -> Result<(), DialogError>
    where
        H: DialogHost + ?Sized,
        F: FnOnce(Option<String>) + Send + 'static,
    {
        if options.is_empty() {
            warn!("selector {} refused to open: no options", self.id);
            return Err(DialogError::NoOptions);
        }

        host.mount(Box::new(SelectList {
            base: ModalBase::new(self.id, KIND, title, self.width),
            options,
            selected: 0,
            scroll: 0,
            rows: self.rows,
            reply: ReplySlot::new(on_result),
        }));
        Ok(())
    }
}

struct SelectList {
    base: ModalBase,
    options: Vec<String>,
    selected: usize,
    scroll: usize,
    rows: usize,
    reply: ReplySlot<String>,
}

impl SelectList {
    fn select(&mut self, index: usize) -> InteractionResult {
        self.selected = index.min(self.options.len() - 1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.rows {
            self.scroll = self.selected + 1 - self.rows;
        }
        InteractionResult::handled()
    }

    fn move_up(&mut self) -> InteractionResult {
        let len = self.options.len();
        self.select((self.selected + len - 1) % len)
    }

    fn move_down(&mut self) -> InteractionResult {
        self.select((self.selected + 1) % self.options.len())
    }

    fn okay(&mut self) -> InteractionResult {
        let choice = self.options[self.selected].clone();
        self.reply.deliver(Some(choice));
        InteractionResult::close()
    }

    fn cancel(&mut self) -> InteractionResult {
        self.reply.deliver(None);
        InteractionResult::close()
    }
}

impl Drawable for SelectList {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let width = ctx.content_width as usize;
        let mut out = DrawOutput::default();

        for index in self.scroll..self.scroll + self.rows {
            let Some(option) = self.options.get(index) else {
                out.push(vec![Span::new("")]);
                continue;
            };
            let selected = index == self.selected;
            let marker = if selected { ">" } else { " " };
            let text = format!("{marker} {option:<width$}", width = width.saturating_sub(2));
            let style = if selected {
                Style::new().reversed()
            } else {
                Style::new()
            };
            out.push(vec![
                Span::styled(text, style).clickable(self.base.element(&format!("option-{index}"))),
            ]);
        }

        let more = self.options.len().saturating_sub(self.scroll + self.rows);
        let hint = match (self.scroll, more) {
            (0, 0) => String::new(),
            (above, below) => format!("  {above} above, {below} below"),
        };
        out.push(vec![Span::styled(hint, Style::new().color(Color::DarkGrey))]);
        out.push(vec![
            button_span("Okay", self.base.element("okay"), false),
            Span::new(" "),
            button_span("Cancel", self.base.element("cancel"), false),
        ]);
        out
    }
}

impl Interactive for SelectList {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.reply.is_pending() {
            return InteractionResult::ignored();
        }

        match key.code {
            KeyCode::Enter => self.okay(),
            KeyCode::Esc => self.cancel(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.options.len() - 1),
            _ => InteractionResult::ignored(),
        }
    }

    fn on_click(&mut self, element: &str) -> InteractionResult {
        if !self.reply.is_pending() {
            return InteractionResult::ignored();
        }
        match self.base.local_part(element) {
            Some("okay") => self.okay(),
            Some("cancel") => self.cancel(),
            Some(part) => match part
                .strip_prefix("option-")
                .and_then(|index| index.parse::<usize>().ok())
            {
                Some(index) if index < self.options.len() => self.select(index),
                _ => InteractionResult::ignored(),
            },
            None => InteractionResult::ignored(),
        }
    }
}

impl ModalDialog for SelectList {
    fn modal(&self) -> &ModalBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ModalStack;
    use crate::terminal::TerminalSize;
    use std::sync::mpsc;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn open(items: &[&str]) -> (ModalStack, DialogId, mpsc::Receiver<Option<String>>) {
        let mut stack = ModalStack::new();
        let (tx, rx) = mpsc::channel();
        let selector = Selector::new();
        let id = selector.id();
        selector
            .open(&mut stack, "Pick", options(items), move |value| {
                let _ = tx.send(value);
            })
            .expect("selector should open");
        (stack, id, rx)
    }

    #[test]
    fn first_option_is_selected_by_default() {
        let (mut stack, _, rx) = open(&["A", "B", "C"]);
        stack.dispatch_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(rx.try_recv(), Ok(Some("A".to_string())));
    }

    #[test]
    fn clicking_an_option_then_okay_delivers_it() {
        let (mut stack, id, rx) = open(&["A", "B", "C"]);
        stack.click(&id.element(KIND, "option-1"));
        stack.click(&id.element(KIND, "okay"));
        assert!(stack.is_empty());
        assert_eq!(rx.try_recv(), Ok(Some("B".to_string())));
    }

    #[test]
    fn cancel_delivers_absent_value() {
        let (mut stack, id, rx) = open(&["A", "B", "C"]);
        stack.click(&id.element(KIND, "option-2"));
        stack.click(&id.element(KIND, "cancel"));
        assert_eq!(rx.try_recv(), Ok(None));
    }

    #[test]
    fn arrow_keys_wrap() {
        let (mut stack, _, rx) = open(&["A", "B", "C"]);
        stack.dispatch_key(KeyEvent::plain(KeyCode::Up));
        stack.dispatch_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(rx.try_recv(), Ok(Some("C".to_string())));
    }

    #[test]
    fn out_of_range_option_click_is_ignored() {
        let (mut stack, id, _rx) = open(&["A"]);
        assert!(!stack.click(&id.element(KIND, "option-4")).handled);
        assert!(!stack.click(&id.element(KIND, "option-x")).handled);
    }

    #[test]
    fn empty_option_list_is_refused() {
        let mut stack = ModalStack::new();
        let result = Selector::new().open(&mut stack, "Pick", Vec::new(), |_| {});
        assert_eq!(result, Err(DialogError::NoOptions));
        assert!(stack.is_empty());
    }

    #[test]
    fn list_scrolls_to_follow_selection() {
        let items: Vec<String> = (0..12).map(|n| format!("item {n}")).collect();
        let refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let (mut stack, _, rx) = open(&refs);
        stack.dispatch_key(KeyEvent::plain(KeyCode::End));

        let lines = stack
            .render(TerminalSize {
                width: 60,
                height: 16,
            })
            .plain_lines();
        assert!(lines.iter().any(|line| line.contains("> item 11")));
        assert!(!lines.iter().any(|line| line.contains("item 0 ")));
        assert!(lines.iter().any(|line| line.contains("7 above, 0 below")));

        stack.dispatch_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(rx.try_recv(), Ok(Some("item 11".to_string())));
    }
}
