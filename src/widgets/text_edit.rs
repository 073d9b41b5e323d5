//! Single-line edit buffer with a char-indexed cursor.

/// Text is held as chars so the cursor never lands inside a UTF-8 sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Always `<= len()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor == self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    pub fn left(&mut self) -> bool {
        self.seek(self.cursor.saturating_sub(1))
    }

    pub fn right(&mut self) -> bool {
        self.seek((self.cursor + 1).min(self.chars.len()))
    }

    pub fn home(&mut self) -> bool {
        self.seek(0)
    }

    pub fn end(&mut self) -> bool {
        self.seek(self.chars.len())
    }

    /// Removes trailing separators, then the word before them.
    pub fn delete_word_left(&mut self) -> bool {
        let end = self.cursor;
        let word_start = self.chars[..end]
            .iter()
            .rposition(|ch| !is_separator(*ch))
            .map(|last_word_char| {
                self.chars[..last_word_char]
                    .iter()
                    .rposition(|ch| is_separator(*ch))
                    .map_or(0, |sep| sep + 1)
            })
            .unwrap_or(0);
        if word_start == end {
            return false;
        }
        self.chars.drain(word_start..end);
        self.cursor = word_start;
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.chars.is_empty();
        self.chars.clear();
        self.cursor = 0;
        changed
    }

    fn seek(&mut self, to: usize) -> bool {
        let moved = to != self.cursor;
        self.cursor = to;
        moved
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '_' | ':' | '@')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> LineBuffer {
        let mut buffer = LineBuffer::new();
        text.chars().for_each(|ch| buffer.insert(ch));
        buffer
    }

    #[test]
    fn edits_respect_multibyte_chars() {
        let mut line = buffer("héllo");
        line.home();
        line.right();
        line.right();
        line.insert('x');
        assert_eq!(line.text(), "héxllo");
        assert!(line.backspace());
        assert!(line.backspace());
        assert_eq!(line.text(), "hllo");
        assert_eq!(line.cursor(), 1);
        assert!(line.delete());
        assert_eq!(line.text(), "hlo");
    }

    #[test]
    fn movement_stops_at_edges() {
        let mut line = buffer("ab");
        assert!(!line.right());
        assert!(line.home());
        assert!(!line.left());
        assert!(!line.backspace());
        assert!(line.end());
        assert!(!line.delete());
    }

    #[test]
    fn delete_word_left_stops_at_separator() {
        let mut line = buffer("chapter 12");
        assert!(line.delete_word_left());
        assert_eq!(line.text(), "chapter ");
        assert!(line.delete_word_left());
        assert_eq!(line.text(), "");
        assert!(!line.delete_word_left());
    }

    #[test]
    fn delete_word_left_keeps_text_after_cursor() {
        let mut line = buffer("a.b c");
        line.left();
        line.left();
        assert!(line.delete_word_left());
        assert_eq!(line.text(), "a. c");
        assert_eq!(line.cursor(), 2);
    }

    #[test]
    fn clear_reports_change() {
        let mut line = buffer("x");
        assert!(line.clear());
        assert!(!line.clear());
        assert!(line.is_empty());
    }
}
