/// Number of polls a key stays down after it was last seen.
pub const DEBOUNCE_POLLS: u8 = 20;

/// Terminals only report key presses, never releases.
/// The latch keeps every key down until no key has been pressed for
/// `DEBOUNCE_POLLS` polls, then releases all of them at once.
#[derive(Debug, Default)]
pub struct KeyLatch {
    keys: [bool; 16],
    countdown: Option<u8>,
}

impl KeyLatch {
    pub fn new() -> KeyLatch {
        KeyLatch::default()
    }

    /// Start a new poll cycle, releasing every key once the countdown runs out.
    pub fn begin_poll(&mut self) {
        if let Some(remaining) = self.countdown {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                log::trace!("releasing all keys");
                self.keys = [false; 16];
                self.countdown = None;
            } else {
                self.countdown = Some(remaining);
            }
        }
    }

    pub fn press(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = true;
        self.countdown = Some(DEBOUNCE_POLLS);
    }

    pub fn is_down(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// The lowest key that is currently down.
    pub fn first_down(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }
}
