use crate::core::DialogId;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use log::debug;
use unicode_width::UnicodeWidthChar;

/// One-shot result callback. `None` is the cancellation sentinel.
pub type ResultCallback<T> = Box<dyn FnOnce(Option<T>) + Send>;

/// Holds a dialog's callback until the user closes it; delivery takes the
/// callback out, so a second delivery is impossible.
pub struct ReplySlot<T> {
    callback: Option<ResultCallback<T>>,
}

impl<T> ReplySlot<T> {
    pub fn new(callback: impl FnOnce(Option<T>) + Send + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.callback.is_some()
    }

    pub fn deliver(&mut self, value: Option<T>) -> bool {
        match self.callback.take() {
            Some(callback) => {
                callback(value);
                true
            }
            None => false,
        }
    }
}

/// Chrome shared by every dialog: identity, title and fixed width.
#[derive(Debug, Clone)]
pub struct ModalBase {
    id: DialogId,
    kind: &'static str,
    title: String,
    width: u16,
}

impl ModalBase {
    pub fn new(id: DialogId, kind: &'static str, title: impl Into<String>, width: u16) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            width,
        }
    }

    pub fn id(&self) -> DialogId {
        self.id
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn element(&self, part: &str) -> String {
        self.id.element(self.kind, part)
    }

    pub fn local_part<'a>(&self, element: &'a str) -> Option<&'a str> {
        let local = self.id.local_part(self.kind, element);
        if local.is_none() {
            debug!("{} ignored foreign element {element}", self.id.scope(self.kind));
        }
        local
    }
}

pub fn button_span(label: &str, element: String, focused: bool) -> Span {
    let style = if focused {
        Style::new().reversed().bold()
    } else {
        Style::new().color(Color::Cyan)
    };
    Span::styled(format!("[{label:^6}]"), style).clickable(element)
}

pub fn instruction_lines(instruction: Option<&str>, width: usize) -> Vec<Vec<Span>> {
    let style = Style::new().color(Color::DarkGrey);
    instruction
        .map(|text| wrap_text(text, width))
        .unwrap_or_default()
        .into_iter()
        .map(|line| vec![Span::styled(line, style)])
        .collect()
}

/// Greedy word wrap by display width. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width: usize = word
                .chars()
                .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
                .sum();
            let gap = usize::from(!current.is_empty());

            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            for ch in word.chars() {
                let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }
        lines.push(current);
    }

    lines
}

/// Chars typed together with Ctrl or Alt are shortcuts, never text.
pub fn typed_char(key: KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn reply_slot_delivers_once() {
        let (tx, rx) = mpsc::channel();
        let mut slot = ReplySlot::new(move |value: Option<u8>| {
            let _ = tx.send(value);
        });

        assert!(slot.deliver(Some(1)));
        assert!(!slot.deliver(Some(2)));
        assert!(!slot.is_pending());
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![Some(1)]);
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("Enter the number of bytes to copy", 12),
            vec!["Enter the", "number of", "bytes to", "copy"]
        );
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }
}
