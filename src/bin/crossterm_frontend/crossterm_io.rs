use chip_8_term::emulator::{
    input::{EmulatorInput, InputEvent},
    output::EmulatorOutput,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

/// Reads whatever key and resize events are pending, without blocking.
pub struct CrosstermInput;

impl EmulatorInput for CrosstermInput {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(KeyEvent { kind: KeyEventKind::Release, .. }) => {}
                Event::Key(KeyEvent { code: KeyCode::Esc, .. }) => events.push(InputEvent::Quit),
                Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
                    if modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    events.push(InputEvent::Quit)
                }
                Event::Key(KeyEvent { code, .. }) => {
                    if let Some(key) = key_to_u8(code) {
                        events.push(InputEvent::Key(key));
                    }
                }
                Event::Resize(cols, rows) => events.push(InputEvent::Resize(cols, rows)),
                _ => {}
            }
        }
        Ok(events)
    }
}

/// The terminal, in raw mode on the alternate screen for as long as this lives.
pub struct CrosstermOutput {
    stdout: Stdout,
}

impl CrosstermOutput {
    pub fn new() -> io::Result<CrosstermOutput> {
        terminal::enable_raw_mode()?;
        // Restored by Drop, also when entering the alternate screen fails
        let mut output = CrosstermOutput { stdout: stdout() };
        execute!(output.stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(output)
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.stdout, LeaveAlternateScreen, cursor::Show) {
            log::error!("could not leave the alternate screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("could not disable raw mode: {}", e);
        }
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn put(&mut self, col: u16, row: u16, text: &str) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(col, row), Print(text))
    }

    fn wipe(&mut self) -> io::Result<()> {
        queue!(self.stdout, Clear(ClearType::All))
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

/// The conventional layout, using the left side of a qwerty keyboard.
fn key_to_u8(key: KeyCode) -> Option<u8> {
    let c = match key {
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    let key = match c {
        '1' => 0x1, '2' => 0x2, '3' => 0x3, '4' => 0xC,
        'q' => 0x4, 'w' => 0x5, 'e' => 0x6, 'r' => 0xD,
        'a' => 0x7, 's' => 0x8, 'd' => 0x9, 'f' => 0xE,
        'z' => 0xA, 'x' => 0x0, 'c' => 0xB, 'v' => 0xF,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {

    use super::*;
    use test_case::test_case;

    #[test_case(KeyCode::Char('1') => Some(0x1) ; "one")]
    #[test_case(KeyCode::Char('4') => Some(0xC) ; "four is c")]
    #[test_case(KeyCode::Char('x') => Some(0x0) ; "x is zero")]
    #[test_case(KeyCode::Char('V') => Some(0xF) ; "upper case")]
    #[test_case(KeyCode::Char('p') => None ; "unmapped")]
    #[test_case(KeyCode::Enter => None ; "not a char")]
    fn keymap(key: KeyCode) -> Option<u8> {
        key_to_u8(key)
    }
}
