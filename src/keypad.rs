use crate::error::ErrorDetail;

/// The number of keys in the CHIP-8 keypad.
pub(crate) const KEY_COUNT: usize = 16;

/// An abstraction of the state of each key on the CHIP-8 keypad
/// (pressed / not pressed).
#[derive(Clone, Copy, Debug)]
pub(crate) struct Keypad {
    /// Array holding a boolean for each key (true means pressed, false means not pressed).
    keys_pressed: [bool; KEY_COUNT],
}

impl Keypad {
    /// Constructor that returns a [Keypad] instance with no keys pressed.
    pub(crate) fn new() -> Self {
        Keypad {
            keys_pressed: [false; KEY_COUNT],
        }
    }

    /// Returns true if the specified key is pressed, false if the specified key is not
    /// pressed, and returns an [ErrorDetail::InvalidKey] if the specified key is invalid.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    pub(crate) fn is_key_pressed(&self, key: u8) -> Result<bool, ErrorDetail> {
        match key {
            n if (n as usize) < KEY_COUNT => Ok(self.keys_pressed[n as usize]),
            _ => Err(ErrorDetail::InvalidKey { key }),
        }
    }

    /// Sets the state of the specified key; returns an [ErrorDetail::InvalidKey] if the
    /// specified key is invalid.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    /// * `pressed` - boolean representing key state (true meaning pressed)
    pub(crate) fn set_key_status(&mut self, key: u8, pressed: bool) -> Result<(), ErrorDetail> {
        match key {
            n if (n as usize) < KEY_COUNT => Ok(self.keys_pressed[n as usize] = pressed),
            _ => Err(ErrorDetail::InvalidKey { key }),
        }
    }

    /// Returns a copy of the pressed / not pressed state of every key.
    pub(crate) fn state(&self) -> [bool; KEY_COUNT] {
        self.keys_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_key_pressed_yes() {
        let mut keypad: Keypad = Keypad::new();
        keypad.keys_pressed[0x2] = true;
        assert!(keypad.is_key_pressed(0x2).unwrap());
    }

    #[test]
    fn test_is_key_pressed_no() {
        let keypad: Keypad = Keypad::new();
        assert!(!keypad.is_key_pressed(0x2).unwrap());
    }

    #[test]
    fn test_is_key_pressed_error() {
        let keypad: Keypad = Keypad::new();
        assert_eq!(
            keypad.is_key_pressed(KEY_COUNT as u8).unwrap_err(),
            ErrorDetail::InvalidKey {
                key: KEY_COUNT as u8
            }
        );
    }

    #[test]
    fn test_set_key_status() {
        let mut keypad: Keypad = Keypad::new();
        keypad.set_key_status(0x2, true).unwrap();
        assert!(keypad.keys_pressed[0x2]);
    }

    #[test]
    fn test_set_key_status_error() {
        let mut keypad: Keypad = Keypad::new();
        assert_eq!(
            keypad.set_key_status(KEY_COUNT as u8, true).unwrap_err(),
            ErrorDetail::InvalidKey {
                key: KEY_COUNT as u8
            }
        );
    }

    #[test]
    fn test_state() {
        let mut keypad: Keypad = Keypad::new();
        keypad.set_key_status(0x7, true).unwrap();
        let state: [bool; KEY_COUNT] = keypad.state();
        assert!(state[0x7] && !state[0x6]);
    }
}
