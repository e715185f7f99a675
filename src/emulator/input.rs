use std::collections::VecDeque;
use std::io;

/// Something that happened on the input device since the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A CHIP-8 key in the range 0..0xF went down.
    Key(u8),
    /// The terminal now has this many columns and rows.
    Resize(u16, u16),
    /// The user asked to stop.
    Quit,
}

/// Represents an input device that is capable of providing keys in the range 0..0xF.
pub trait EmulatorInput {
    /// Drain every event that is available right now, without blocking.
    fn poll(&mut self) -> io::Result<Vec<InputEvent>>;
}

/// An input device that replays a script of events, one batch per poll.
#[derive(Default)]
pub struct DummyInput {
    script: VecDeque<Vec<InputEvent>>,
}

impl DummyInput {
    pub fn new() -> DummyInput {
        DummyInput::default()
    }

    /// Queue events to be returned together by a later poll.
    pub fn push(&mut self, events: Vec<InputEvent>) {
        self.script.push_back(events);
    }
}

impl EmulatorInput for DummyInput {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        Ok(self.script.pop_front().unwrap_or_default())
    }
}
