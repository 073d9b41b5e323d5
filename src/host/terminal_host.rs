use super::{DialogHost, ModalDialog, ModalStack};
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers, Terminal, TerminalEvent};
use crate::ui::canvas::RenderFrame;
use std::io;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Interactive host drawing dialogs on an alternate-screen terminal.
pub struct TerminalHost {
    terminal: Terminal,
    stack: ModalStack,
    last_frame: RenderFrame,
}

impl TerminalHost {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new()?,
            stack: ModalStack::new(),
            last_frame: RenderFrame::default(),
        })
    }

    /// Pumps terminal events until every mounted dialog has closed.
    pub fn run_until_closed(&mut self) -> io::Result<()> {
        if self.stack.is_empty() {
            return Ok(());
        }

        self.terminal.enter()?;
        let result = self.event_loop();
        let exit = self.terminal.exit();
        result.and(exit)
    }

    fn event_loop(&mut self) -> io::Result<()> {
        let mut render_requested = true;

        while !self.stack.is_empty() {
            if render_requested {
                let size = self.terminal.refresh_size()?;
                self.last_frame = self.stack.render(size);
                self.terminal.render_frame(&self.last_frame)?;
                render_requested = false;
            }

            match self.terminal.poll_event(POLL_INTERVAL)? {
                TerminalEvent::Key(key) => {
                    let result = self.stack.dispatch_key(interrupt_as_cancel(key));
                    render_requested |= result.request_render;
                }
                TerminalEvent::Click { col, row } => {
                    if let Some(element) = self.last_frame.element_at(col, row).map(str::to_owned)
                    {
                        let result = self.stack.click(&element);
                        render_requested |= result.request_render;
                    }
                }
                TerminalEvent::Resize(_) => render_requested = true,
                TerminalEvent::Tick => {}
            }
        }

        Ok(())
    }
}

impl DialogHost for TerminalHost {
    fn mount(&mut self, dialog: Box<dyn ModalDialog>) {
        self.stack.mount(dialog);
    }
}

/// Raw mode swallows SIGINT; Ctrl+C cancels the active dialog instead.
fn interrupt_as_cancel(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyEvent::plain(KeyCode::Esc)
        }
        _ => key,
    }
}
