use crate::core::DialogId;
use crate::error::DialogError;
use crate::host::{DialogHost, ModalDialog};
use crate::numeric::{Accumulator, Edit, EditOutcome, NumericBounds, Radix};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::Style;
use crate::widgets::base::{ModalBase, ReplySlot, button_span, instruction_lines, typed_char};
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use log::{debug, warn};

const KIND: &str = "numpad";
pub const DEFAULT_WIDTH: u16 = 30;

const DECIMAL_LAYOUT: &[[&str; 3]] = &[
    ["7", "8", "9"],
    ["4", "5", "6"],
    ["1", "2", "3"],
    ["-", "0", "."],
];

// Blank cells keep `0` in the middle column.
const HEX_LAYOUT: &[[&str; 3]] = &[
    ["D", "E", "F"],
    ["A", "B", "C"],
    ["7", "8", "9"],
    ["4", "5", "6"],
    ["1", "2", "3"],
    ["", "0", ""],
];

const FUNCTION_COL: usize = 3;
const FUNCTION_KEYS: [(&str, &str, KeypadAction); 3] = [
    ("Enter", "enter", KeypadAction::Enter),
    ("Clear", "clear", KeypadAction::Edit(Edit::Clear)),
    ("Cancel", "cancel", KeypadAction::Cancel),
];

/// Parameters for opening a keypad.
#[derive(Debug, Clone, PartialEq)]
pub struct KeypadRequest {
    pub bounds: NumericBounds,
    pub title: String,
    pub instruction: Option<String>,
    /// Only meaningful for base 10.
    pub decimal_allowed: bool,
    /// 10 or 16; anything else fails to open.
    pub base: u32,
}

impl KeypadRequest {
    pub fn new(title: impl Into<String>, base: u32) -> Self {
        Self {
            bounds: NumericBounds::UNBOUNDED,
            title: title.into(),
            instruction: None,
            decimal_allowed: false,
            base,
        }
    }

    pub fn decimal(title: impl Into<String>) -> Self {
        Self::new(title, 10)
    }

    pub fn hex(title: impl Into<String>) -> Self {
        Self::new(title, 16)
    }

    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.bounds = NumericBounds::new(min, max);
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn allow_decimal(mut self, allowed: bool) -> Self {
        self.decimal_allowed = allowed;
        self
    }
}

/// Decimal or hex number pad.
///
/// ```no_run
/// use modalpad::host::ModalStack;
/// use modalpad::widgets::keypad::{KeypadDialog, KeypadRequest};
///
/// let mut host = ModalStack::new();
/// KeypadDialog::new()
///     .open(
///         &mut host,
///         KeypadRequest::hex("Byte").with_bounds(Some(0.0), Some(255.0)),
///         |value| println!("{value:?}"),
///     )
///     .expect("valid bounds");
/// ```
pub struct KeypadDialog {
    id: DialogId,
    width: u16,
}

impl Default for KeypadDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl KeypadDialog {
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

    /// Validates `request` and mounts the pad on `host`.
    ///
    /// Checks run in order: base, range ordering, zero inside the range.
    /// On error nothing is mounted and `on_result` is dropped uncalled.
    /// Otherwise `on_result` fires exactly once: `Some(text)` on Enter,
    /// `None` on Cancel.
    pub fn open<H, F>(
        self,
        host: &mut H,
        request: KeypadRequest,
        on_result: F,
    ) -> Result<(), DialogError>
    where
        H: DialogHost + ?Sized,
        F: FnOnce(Option<String>) + Send + 'static,
    {
        let radix = Radix::try_from(request.base)
            .and_then(|radix| request.bounds.check_open().map(|()| radix))
            .inspect_err(|err| warn!("keypad {} refused to open: {err}", self.id))?;

        host.mount(Box::new(Keypad::new(
            self,
            request,
            radix,
            ReplySlot::new(on_result),
        )));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeypadAction {
    Edit(Edit),
    Enter,
    Cancel,
}

#[derive(Debug, Clone)]
struct KeypadButton {
    label: &'static str,
    part: String,
    action: KeypadAction,
    row: usize,
    col: usize,
}

struct Keypad {
    base: ModalBase,
    instruction: Option<String>,
    accumulator: Accumulator,
    buttons: Vec<KeypadButton>,
    rows: usize,
    focus: usize,
    reply: ReplySlot<String>,
}

impl Keypad {
    fn new(
        dialog: KeypadDialog,
        request: KeypadRequest,
        radix: Radix,
        reply: ReplySlot<String>,
    ) -> Self {
        let layout = match radix {
            Radix::Decimal => DECIMAL_LAYOUT,
            Radix::Hex => HEX_LAYOUT,
        };
        debug!(
            "keypad {} opened: base {}, bounds {:?}",
            dialog.id,
            radix.base(),
            request.bounds
        );

        Self {
            base: ModalBase::new(dialog.id, KIND, request.title, dialog.width),
            instruction: request.instruction,
            accumulator: Accumulator::new(radix, request.decimal_allowed, request.bounds),
            buttons: layout_buttons(layout),
            rows: layout.len(),
            focus: 0,
            reply,
        }
    }

    fn act(&mut self, action: KeypadAction) -> InteractionResult {
        match action {
            KeypadAction::Edit(edit) => match self.accumulator.apply(edit) {
                EditOutcome::Applied => InteractionResult::handled(),
                EditOutcome::Rejected => InteractionResult::consumed(),
            },
            KeypadAction::Enter => {
                self.reply.deliver(Some(self.accumulator.text().to_string()));
                InteractionResult::close()
            }
            KeypadAction::Cancel => {
                self.reply.deliver(None);
                InteractionResult::close()
            }
        }
    }

    fn edit_for_char(&self, ch: char) -> Option<Edit> {
        match self.accumulator.radix() {
            Radix::Decimal => match ch {
                '0'..='9' => Some(Edit::Digit(ch)),
                '-' => Some(Edit::ToggleSign),
                '.' => Some(Edit::Point),
                _ => None,
            },
            Radix::Hex => ch
                .is_ascii_hexdigit()
                .then(|| Edit::Digit(ch.to_ascii_uppercase())),
        }
    }

    fn button_at(&self, row: usize, col: usize) -> Option<usize> {
        self.buttons
            .iter()
            .position(|button| button.row == row && button.col == col)
    }

    fn move_focus(&mut self, d_row: isize, d_col: isize) -> InteractionResult {
        let current = &self.buttons[self.focus];
        let (mut row, mut col) = (current.row as isize, current.col as isize);

        loop {
            row += d_row;
            col += d_col;
            if row < 0 || col < 0 || row >= self.rows as isize || col > FUNCTION_COL as isize {
                return InteractionResult::consumed();
            }
            if let Some(index) = self.button_at(row as usize, col as usize) {
                self.focus = index;
                return InteractionResult::handled();
            }
        }
    }

    fn cycle_focus(&mut self, forward: bool) -> InteractionResult {
        let len = self.buttons.len();
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
        InteractionResult::handled()
    }

    fn key_line(&self, row: usize) -> SpanLine {
        let mut line = SpanLine::new();
        for col in 0..3 {
            if col > 0 {
                line.push(Span::new(" "));
            }
            match self.button_at(row, col) {
                Some(index) => line.push(self.key_span(index)),
                None => line.push(Span::new("   ")),
            }
        }
        if let Some(index) = self.button_at(row, FUNCTION_COL) {
            let button = &self.buttons[index];
            line.push(Span::new("   "));
            line.push(button_span(
                button.label,
                self.base.element(&button.part),
                index == self.focus,
            ));
        }
        line
    }

    fn key_span(&self, index: usize) -> Span {
        let button = &self.buttons[index];
        let style = if index == self.focus {
            Style::new().reversed().bold()
        } else {
            Style::new()
        };
        Span::styled(format!("[{}]", button.label), style).clickable(self.base.element(&button.part))
    }
}

impl Drawable for Keypad {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let width = ctx.content_width as usize;
        let mut out = DrawOutput {
            lines: instruction_lines(self.instruction.as_deref(), width),
        };

        let field = width.saturating_sub(2).max(1);
        let text = self.accumulator.text();
        let skip = text.chars().count().saturating_sub(field);
        let visible: String = text.chars().skip(skip).collect();
        out.push(vec![Span::styled(
            format!(" {visible:>field$} "),
            Style::new().reversed(),
        )]);
        out.push(vec![Span::new("")]);

        for row in 0..self.rows {
            out.push(self.key_line(row));
        }
        out
    }
}

impl Interactive for Keypad {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.reply.is_pending() {
            return InteractionResult::ignored();
        }

        match key.code {
            KeyCode::Enter => self.act(KeypadAction::Enter),
            KeyCode::Esc => self.act(KeypadAction::Cancel),
            // Always swallowed, even when there is nothing to delete.
            KeyCode::Backspace => self.act(KeypadAction::Edit(Edit::Backspace)),
            KeyCode::Delete => self.act(KeypadAction::Edit(Edit::Clear)),
            KeyCode::Left => self.move_focus(0, -1),
            KeyCode::Right => self.move_focus(0, 1),
            KeyCode::Up => self.move_focus(-1, 0),
            KeyCode::Down => self.move_focus(1, 0),
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            _ => match typed_char(key) {
                Some(' ') => self.act(self.buttons[self.focus].action),
                Some(ch) => match self.edit_for_char(ch) {
                    Some(edit) => self.act(KeypadAction::Edit(edit)),
                    None => InteractionResult::ignored(),
                },
                None => InteractionResult::ignored(),
            },
        }
    }

    fn on_click(&mut self, element: &str) -> InteractionResult {
        if !self.reply.is_pending() {
            return InteractionResult::ignored();
        }
        let Some(part) = self.base.local_part(element) else {
            return InteractionResult::ignored();
        };
        match self.buttons.iter().position(|button| button.part == part) {
            Some(index) => {
                self.focus = index;
                self.act(self.buttons[index].action)
            }
            None => InteractionResult::ignored(),
        }
    }
}

impl ModalDialog for Keypad {
    fn modal(&self) -> &ModalBase {
        &self.base
    }
}

fn layout_buttons(layout: &[[&'static str; 3]]) -> Vec<KeypadButton> {
    let mut buttons = Vec::new();
    for (row, labels) in layout.iter().enumerate() {
        for (col, label) in labels.iter().enumerate() {
            let Some((part, action)) = key_binding(label) else {
                continue;
            };
            buttons.push(KeypadButton {
                label: *label,
                part,
                action,
                row,
                col,
            });
        }
        if let Some(&(label, part, action)) = FUNCTION_KEYS.get(row) {
            buttons.push(KeypadButton {
                label,
                part: part.to_string(),
                action,
                row,
                col: FUNCTION_COL,
            });
        }
    }
    buttons
}

fn key_binding(label: &str) -> Option<(String, KeypadAction)> {
    match label {
        "" => None,
        "-" => Some(("key-sign".into(), KeypadAction::Edit(Edit::ToggleSign))),
        "." => Some(("key-point".into(), KeypadAction::Edit(Edit::Point))),
        digit => {
            let ch = digit.chars().next()?;
            Some((format!("key-{digit}"), KeypadAction::Edit(Edit::Digit(ch))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ModalStack;
    use crate::terminal::TerminalSize;
    use std::sync::mpsc;

    fn open(request: KeypadRequest) -> (ModalStack, DialogId, mpsc::Receiver<Option<String>>) {
        let mut stack = ModalStack::new();
        let (tx, rx) = mpsc::channel();
        let dialog = KeypadDialog::new();
        let id = dialog.id();
        dialog
            .open(&mut stack, request, move |value| {
                let _ = tx.send(value);
            })
            .expect("keypad should open");
        (stack, id, rx)
    }

    fn click(stack: &mut ModalStack, id: DialogId, part: &str) -> InteractionResult {
        stack.click(&id.element(KIND, part))
    }

    fn typed(stack: &mut ModalStack, keys: &str) {
        for ch in keys.chars() {
            stack.dispatch_key(KeyEvent::char(ch));
        }
    }

    #[test]
    fn enter_delivers_typed_text() {
        let (mut stack, _, rx) = open(KeypadRequest::decimal("Amount").allow_decimal(true));
        typed(&mut stack, "12.5-");
        let result = stack.dispatch_key(KeyEvent::plain(KeyCode::Enter));

        assert!(result.closes());
        assert!(stack.is_empty());
        assert_eq!(rx.try_recv(), Ok(Some("-12.5".to_string())));
    }

    #[test]
    fn cancel_delivers_absent_value() {
        let (mut stack, id, rx) = open(KeypadRequest::decimal("Amount"));
        typed(&mut stack, "42");
        click(&mut stack, id, "cancel");

        assert!(stack.is_empty());
        assert_eq!(rx.try_recv(), Ok(None));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn second_nine_is_rejected_past_max() {
        let (mut stack, id, rx) = open(
            KeypadRequest::decimal("Offset").with_bounds(Some(-5.0), Some(10.0)),
        );
        click(&mut stack, id, "key-9");
        let rejected = click(&mut stack, id, "key-9");
        assert!(rejected.handled);
        assert!(!rejected.request_render);

        click(&mut stack, id, "enter");
        assert_eq!(rx.try_recv(), Ok(Some("9".to_string())));
    }

    #[test]
    fn sign_toggle_reaches_inclusive_minimum() {
        let (mut stack, id, rx) = open(
            KeypadRequest::decimal("Offset").with_bounds(Some(-5.0), Some(10.0)),
        );
        click(&mut stack, id, "key-5");
        click(&mut stack, id, "key-sign");
        click(&mut stack, id, "enter");
        assert_eq!(rx.try_recv(), Ok(Some("-5".to_string())));
    }

    #[test]
    fn hex_pad_caps_at_ff() {
        let (mut stack, id, rx) =
            open(KeypadRequest::hex("Byte").with_bounds(Some(0.0), Some(255.0)));
        click(&mut stack, id, "key-F");
        click(&mut stack, id, "key-F");
        click(&mut stack, id, "key-A");
        stack.dispatch_key(KeyEvent::char('3'));
        stack.dispatch_key(KeyEvent::plain(KeyCode::Enter));

        assert_eq!(rx.try_recv(), Ok(Some("FF".to_string())));
    }

    #[test]
    fn hex_keyboard_is_case_insensitive() {
        let (mut stack, _, rx) = open(KeypadRequest::hex("Word"));
        typed(&mut stack, "bEeF-.");
        stack.dispatch_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(rx.try_recv(), Ok(Some("BEEF".to_string())));
    }

    #[test]
    fn hex_pad_has_no_sign_or_point_buttons() {
        let (mut stack, id, _rx) = open(KeypadRequest::hex("Word"));
        assert!(!click(&mut stack, id, "key-sign").handled);
        assert!(!click(&mut stack, id, "key-point").handled);
    }

    #[test]
    fn backspace_is_always_consumed() {
        let (mut stack, _, rx) = open(KeypadRequest::decimal("Amount"));
        let result = stack.dispatch_key(KeyEvent::plain(KeyCode::Backspace));
        assert!(result.handled);

        typed(&mut stack, "7-");
        stack.dispatch_key(KeyEvent::plain(KeyCode::Backspace));
        stack.dispatch_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(rx.try_recv(), Ok(Some("0".to_string())));
    }

    #[test]
    fn clear_resets_without_closing() {
        let (mut stack, id, rx) = open(KeypadRequest::decimal("Amount"));
        typed(&mut stack, "314");
        click(&mut stack, id, "clear");
        assert_eq!(stack.len(), 1);
        assert!(rx.try_recv().is_err());

        stack.dispatch_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(rx.try_recv(), Ok(Some("0".to_string())));
    }

    #[test]
    fn ctrl_chords_are_not_digits() {
        let (mut stack, _, rx) = open(KeypadRequest::hex("Word"));
        stack.dispatch_key(KeyEvent::ctrl(KeyCode::Char('c')));
        stack.dispatch_key(KeyEvent::plain(KeyCode::Enter));
        assert_eq!(rx.try_recv(), Ok(Some("0".to_string())));
    }

    #[test]
    fn arrow_focus_and_space_press_buttons() {
        let (mut stack, _, rx) = open(KeypadRequest::decimal("Amount"));
        // Focus starts on 7.
        stack.dispatch_key(KeyEvent::plain(KeyCode::Right));
        stack.dispatch_key(KeyEvent::char(' '));
        stack.dispatch_key(KeyEvent::plain(KeyCode::Down));
        stack.dispatch_key(KeyEvent::char(' '));
        // From 5, far right is the Clear button, one row up is Enter.
        stack.dispatch_key(KeyEvent::plain(KeyCode::Right));
        stack.dispatch_key(KeyEvent::plain(KeyCode::Right));
        stack.dispatch_key(KeyEvent::plain(KeyCode::Up));
        stack.dispatch_key(KeyEvent::char(' '));

        assert_eq!(rx.try_recv(), Ok(Some("85".to_string())));
    }

    #[test]
    fn foreign_elements_are_ignored() {
        let (mut stack, _, rx) = open(KeypadRequest::decimal("Amount"));
        let stranger = KeypadDialog::new().id();
        assert!(!click(&mut stack, stranger, "enter").handled);
        assert_eq!(stack.len(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn configuration_errors_never_mount_or_call_back() {
        let cases = [
            (
                KeypadRequest::new("Oct", 8).with_bounds(Some(5.0), Some(1.0)),
                DialogError::UnsupportedBase(8),
            ),
            (
                KeypadRequest::decimal("Backwards").with_bounds(Some(3.0), Some(3.0)),
                DialogError::InvalidRange { min: 3.0, max: 3.0 },
            ),
            (
                KeypadRequest::hex("Positive").with_bounds(Some(5.0), Some(10.0)),
                DialogError::ZeroOutOfRange,
            ),
        ];

        for (request, expected) in cases {
            let mut stack = ModalStack::new();
            let (tx, rx) = mpsc::channel::<Option<String>>();
            let result = KeypadDialog::new().open(&mut stack, request, move |value| {
                let _ = tx.send(value);
            });
            assert_eq!(result, Err(expected));
            assert!(stack.is_empty());
            assert_eq!(rx.try_recv(), Err(mpsc::TryRecvError::Disconnected));
        }
    }

    #[test]
    fn render_shows_value_and_clickable_keys() {
        let (mut stack, id, _rx) = open(
            KeypadRequest::hex("Byte")
                .with_bounds(Some(0.0), Some(255.0))
                .with_instruction("Pick a byte"),
        );
        typed(&mut stack, "c8");
        let frame = stack.render(TerminalSize {
            width: 40,
            height: 16,
        });
        let lines = frame.plain_lines();

        assert!(lines.iter().any(|line| line.contains("Byte")));
        assert!(lines.iter().any(|line| line.contains("Pick a byte")));
        assert!(lines.iter().any(|line| line.trim_end_matches(['│', ' ']).ends_with("C8")));
        assert!(lines.iter().any(|line| line.contains("[D] [E] [F]")));
        assert!(
            frame
                .hits
                .iter()
                .any(|hit| hit.element == id.element(KIND, "key-0"))
        );
    }
}
