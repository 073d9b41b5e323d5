use crate::terminal::{CursorPos, KeyEvent};
use crate::ui::span::{Span, SpanLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Columns available inside the dialog chrome.
    pub content_width: u16,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

impl DrawOutput {
    pub fn plain_lines(lines: Vec<String>) -> Self {
        Self {
            lines: lines.into_iter().map(|line| vec![Span::new(line)]).collect(),
        }
    }

    pub fn push(&mut self, line: SpanLine) {
        self.lines.push(line);
    }
}

pub trait Drawable: Send {
    fn draw(&self, ctx: &RenderContext) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

/// Actions a dialog hands back to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// The result callback has fired; the host must dispose the dialog.
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub actions: Vec<DialogAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    /// Input was swallowed without changing anything visible.
    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            actions: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: DialogAction) -> Self {
        Self {
            handled: true,
            request_render: true,
            actions: vec![action],
        }
    }

    pub fn close() -> Self {
        Self::with_action(DialogAction::Close)
    }

    pub fn closes(&self) -> bool {
        self.actions.contains(&DialogAction::Close)
    }
}

// ---------------------------------------------------------------------------
// Interactive
// ---------------------------------------------------------------------------

pub trait Interactive: Send {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;

    /// A click on one of the element ids this dialog put on screen.
    fn on_click(&mut self, _element: &str) -> InteractionResult {
        InteractionResult::ignored()
    }

    fn cursor_pos(&self, _ctx: &RenderContext) -> Option<CursorPos> {
        None
    }
}
