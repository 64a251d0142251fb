use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use log::{debug, warn};

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, KEY_COUNT};
use emu8_core::{Display, FrameBuffer, InputSource, Keypad};

use crate::keymap::keymap_char;

/// How long a key reads as held after its last press or repeat.
///
/// Terminals report presses and auto-repeats but no releases.
const HOLD_TICKS: u8 = 6;

/// # Terminal display
/// Draws the 64x32 frame into the alternate screen, two pixel rows per text
/// line using half blocks, so the whole frame takes 64x16 cells.
///
/// Leaves the alternate screen and shows the cursor again when dropped.
pub struct TerminalDisplay {
    out: Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(TerminalDisplay { out, last: None })
    }
}

impl Display for TerminalDisplay {
    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        if self.last.as_ref() == Some(frame) {
            return Ok(());
        }
        for (row, line) in frame_to_lines(frame).iter().enumerate() {
            queue!(self.out, MoveTo(0, row as u16))?;
            write!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        self.last = Some(*frame);
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
    }
}

/// Formats a frame as text, pairing pixel rows into half block cells.
fn frame_to_lines(frame: &FrameBuffer) -> Vec<String> {
    (0..DISPLAY_HEIGHT)
        .step_by(2)
        .map(|y| {
            (0..DISPLAY_WIDTH)
                .map(|x| match (frame.get(x, y), frame.get(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect()
        })
        .collect()
}

/// # Terminal input
/// Reads key events from the terminal in raw mode.
///
/// A mapped key reads as pressed for `HOLD_TICKS` polls after its last event.
/// Esc and Ctrl-C request a quit.
pub struct TerminalInput {
    held: [u8; KEY_COUNT],
    quit: bool,
    raw: bool,
}

impl TerminalInput {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut input = TerminalInput::detached();
        input.raw = true;
        Ok(input)
    }

    /// An input that never touches the terminal; only fed through `handle`.
    fn detached() -> Self {
        TerminalInput {
            held: [0; KEY_COUNT],
            quit: false,
            raw: false,
        }
    }

    fn handle(&mut self, event: Event) {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event
        else {
            return;
        };
        if kind == KeyEventKind::Release {
            return;
        }
        match code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Char(c) => {
                if let Some(key) = keymap_char(c) {
                    self.held[key as usize] = HOLD_TICKS;
                }
            }
            _ => {}
        }
        if self.quit {
            debug!("quit requested from the terminal");
        }
    }

    /// The keypad as of now, then ages every held key by one poll.
    fn snapshot(&mut self) -> Keypad {
        let mut keypad = Keypad::new();
        for (key, ticks) in self.held.iter_mut().enumerate() {
            if *ticks > 0 {
                keypad.press(key as u8);
                *ticks -= 1;
            }
        }
        keypad
    }

    fn drain(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.handle(event);
        }
        Ok(())
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Keypad {
        if let Err(err) = self.drain() {
            warn!("lost the terminal: {}", err);
            self.quit = true;
        }
        self.snapshot()
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        if self.raw {
            let _ = terminal::disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut TerminalInput, code: KeyCode, modifiers: KeyModifiers) {
        input.handle(Event::Key(KeyEvent::new(code, modifiers)));
    }

    #[test]
    fn test_frame_to_lines_pairs_rows() {
        let mut frame = FrameBuffer::new();
        frame.xor(0, 0, true);
        frame.xor(1, 1, true);
        frame.xor(2, 0, true);
        frame.xor(2, 1, true);
        frame.xor(63, 31, true);
        let lines = frame_to_lines(&frame);

        assert_eq!(lines.len(), 16);
        assert!(lines.iter().all(|line| line.chars().count() == 64));
        assert!(lines[0].starts_with("▀▄█ "));
        assert!(lines[15].ends_with('▄'));
        assert_eq!(lines[7].trim(), "");
    }

    #[test]
    fn test_press_holds_for_a_few_polls() {
        let mut input = TerminalInput::detached();
        press(&mut input, KeyCode::Char('w'), KeyModifiers::NONE);
        for _ in 0..HOLD_TICKS {
            let keypad = input.snapshot();
            assert!(keypad.is_pressed(0x5));
            assert_eq!(keypad.lowest_pressed(), Some(0x5));
        }
        assert!(!input.snapshot().any_pressed());
    }

    #[test]
    fn test_repeat_refreshes_hold() {
        let mut input = TerminalInput::detached();
        press(&mut input, KeyCode::Char('x'), KeyModifiers::NONE);
        input.snapshot();
        input.snapshot();
        press(&mut input, KeyCode::Char('x'), KeyModifiers::NONE);
        for _ in 0..HOLD_TICKS {
            assert!(input.snapshot().is_pressed(0x0));
        }
    }

    #[test]
    fn test_unmapped_and_released_keys_ignored() {
        let mut input = TerminalInput::detached();
        press(&mut input, KeyCode::Char('p'), KeyModifiers::NONE);
        press(&mut input, KeyCode::Enter, KeyModifiers::NONE);
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        input.handle(Event::Key(release));
        assert!(!input.snapshot().any_pressed());
        assert!(!input.quit_requested());
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let mut input = TerminalInput::detached();
        press(&mut input, KeyCode::Esc, KeyModifiers::NONE);
        assert!(input.quit_requested());

        let mut input = TerminalInput::detached();
        press(&mut input, KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!input.quit_requested());
        assert!(input.snapshot().is_pressed(0xB));
        press(&mut input, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(input.quit_requested());
    }
}
