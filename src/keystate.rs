use crate::error::ErrorDetail;

/// The number of keys on the CHIP-8 keypad.
const NUMBER_OF_KEYS: u8 = 16;

/// An abstraction of the state of each key on the CHIP-8 keypad
/// (pressed / not pressed).
///
/// The hosting application feeds key transitions in through
/// [Processor::set_key_status()](crate::Processor::set_key_status); the instruction set
/// queries the state through [is_key_pressed()](KeyState::is_key_pressed) and
/// [first_pressed_key()](KeyState::first_pressed_key), so no part of the core ever blocks
/// waiting on input.
#[derive(Debug)]
pub(crate) struct KeyState {
    /// Array holding a boolean for each key (true means pressed, false means not pressed).
    keys_pressed: [bool; NUMBER_OF_KEYS as usize],
}

impl KeyState {
    /// Constructor that returns a [KeyState] instance with no keys pressed.
    pub(crate) fn new() -> Self {
        KeyState {
            keys_pressed: [false; NUMBER_OF_KEYS as usize],
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
            n if n < NUMBER_OF_KEYS => Ok(self.keys_pressed[n as usize]),
            _ => Err(ErrorDetail::InvalidKey { key }),
        }
    }

    /// Sets the state of the specified key; returns an [ErrorDetail::InvalidKey] if the
    /// specified key is invalid.
    ///
    /// # Arguments
    ///
    /// * `key` - the hex ordinal of the key (valid range 0x0 to 0xF inclusive)
    /// * `status` - boolean representing key state (true meaning pressed)
    pub(crate) fn set_key_status(&mut self, key: u8, status: bool) -> Result<(), ErrorDetail> {
        match key {
            n if n < NUMBER_OF_KEYS => Ok(self.keys_pressed[n as usize] = status),
            _ => Err(ErrorDetail::InvalidKey { key }),
        }
    }

    /// Returns the hex ordinal of the lowest-numbered key currently pressed, or `None` if
    /// no key is pressed.
    pub(crate) fn first_pressed_key(&self) -> Option<u8> {
        self.keys_pressed
            .iter()
            .position(|&pressed| pressed)
            .map(|key| key as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_key_pressed_yes() {
        let mut keys: KeyState = KeyState::new();
        keys.keys_pressed[0x2] = true;
        assert!(keys.is_key_pressed(0x2).unwrap());
    }

    #[test]
    fn test_is_key_pressed_no() {
        let mut keys: KeyState = KeyState::new();
        keys.keys_pressed[0x2] = false;
        assert!(!keys.is_key_pressed(0x2).unwrap());
    }

    #[test]
    fn test_is_key_pressed_error() {
        let keys: KeyState = KeyState::new();
        assert_eq!(
            keys.is_key_pressed(NUMBER_OF_KEYS).unwrap_err(),
            ErrorDetail::InvalidKey {
                key: NUMBER_OF_KEYS
            }
        );
    }

    #[test]
    fn test_set_key_status() {
        let mut keys: KeyState = KeyState::new();
        keys.set_key_status(0x2, true).unwrap();
        assert!(keys.keys_pressed[0x2]);
    }

    #[test]
    fn test_set_key_status_error() {
        let mut keys: KeyState = KeyState::new();
        assert_eq!(
            keys.set_key_status(NUMBER_OF_KEYS, true).unwrap_err(),
            ErrorDetail::InvalidKey {
                key: NUMBER_OF_KEYS
            }
        );
    }

    #[test]
    fn test_first_pressed_key() {
        let mut keys: KeyState = KeyState::new();
        keys.keys_pressed[0x7] = true;
        keys.keys_pressed[0xF] = true;
        assert_eq!(keys.first_pressed_key().unwrap(), 0x7);
    }

    #[test]
    fn test_first_pressed_key_none() {
        let keys: KeyState = KeyState::new();
        assert!(keys.first_pressed_key().is_none());
    }
}
