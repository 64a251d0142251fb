use crate::constants::KEY_COUNT;

/// # Keypad
/// A snapshot of the hexadecimal keypad: which of keys 0..F are held down.
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of `key`; keys above 0xF are ignored.
    pub fn press(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = true;
        }
    }

    /// Unset the pressed status of `key`.
    pub fn release(&mut self, key: u8) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = false;
        }
    }

    /// Keys that don't exist are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest-numbered key that is down, if any.
    pub fn lowest_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|k| *k).map(|k| k as u8)
    }

    pub fn any_pressed(&self) -> bool {
        self.keys.iter().any(|k| *k)
    }
}

impl From<[bool; KEY_COUNT]> for Keypad {
    fn from(keys: [bool; KEY_COUNT]) -> Self {
        Keypad { keys }
    }
}
