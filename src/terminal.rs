use crate::frame::{FrameBuffer, Viewport};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Nothing,
    Quit,
    Resize(Viewport),
}

/// What the frame loop needs from a screen.
pub trait Terminal {
    fn size(&self) -> io::Result<Viewport>;
    /// Never blocks; `Input::Nothing` when no event is pending.
    fn poll_input(&mut self) -> io::Result<Input>;
    fn present(&mut self, frame: &mut FrameBuffer) -> io::Result<()>;
    fn show_message(&mut self, text: &str) -> io::Result<()>;
}

/// Full-screen raw-mode terminal. Restores the original mode when dropped,
/// including while a panic unwinds.
pub struct CrosstermTerminal {
    out: BufWriter<Stdout>,
}

impl CrosstermTerminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut term = Self {
            out: BufWriter::with_capacity(1024 * 64, stdout()),
        };
        execute!(term.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(term)
    }

    fn classify(event: Event) -> Input {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc || ctrl_c {
                    Input::Quit
                } else {
                    Input::Nothing
                }
            }
            Event::Resize(cols, rows) => Input::Resize(Viewport::new(rows as usize, cols as usize)),
            _ => Input::Nothing,
        }
    }
}

impl Terminal for CrosstermTerminal {
    fn size(&self) -> io::Result<Viewport> {
        let (cols, rows) = terminal::size()?;
        Ok(Viewport::new(rows as usize, cols as usize))
    }

    fn poll_input(&mut self) -> io::Result<Input> {
        // Drain whatever is queued; quit wins, otherwise the latest resize.
        let mut input = Input::Nothing;
        while event::poll(Duration::ZERO)? {
            match Self::classify(event::read()?) {
                Input::Quit => return Ok(Input::Quit),
                Input::Resize(viewport) => input = Input::Resize(viewport),
                Input::Nothing => {}
            }
        }
        Ok(input)
    }

    fn present(&mut self, frame: &mut FrameBuffer) -> io::Result<()> {
        frame.write_to(&mut self.out)
    }

    fn show_message(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0), Print(text))?;
        self.out.flush()
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
