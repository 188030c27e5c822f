//! Key bindings.
//!
//! | key        | action                  |
//! |------------|-------------------------|
//! | space      | screenshot              |
//! | tab        | start/stop screencast   |
//! | esc        | quit                    |
//! | `1`..`9`   | portra .. edges, rc     |
//! | `0`        | rgv                     |
//! | `q`        | cmv                     |

use cameo_ops::FilterId;

/// What a key press does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Save the next processed frame.
    Screenshot,
    /// Start or stop the screencast.
    ToggleRecording,
    /// Close the window and end the session.
    Quit,
    /// Make a filter active.
    Select(FilterId),
}

/// Filter keys in [`FilterId::ALL`] order.
pub const FILTER_KEYS: [u8; 11] = *b"1234567890q";

impl KeyAction {
    /// Action bound to `key`, if any.
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            32 => Some(Self::Screenshot),
            9 => Some(Self::ToggleRecording),
            27 => Some(Self::Quit),
            _ => FILTER_KEYS
                .iter()
                .position(|&k| k == key)
                .map(|i| Self::Select(FilterId::ALL[i])),
        }
    }
}

/// Key that selects `id`.
pub fn key_for(id: FilterId) -> char {
    let index = FilterId::ALL.iter().position(|&f| f == id).unwrap_or(0);
    FILTER_KEYS[index] as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(KeyAction::from_key(b' '), Some(KeyAction::Screenshot));
        assert_eq!(KeyAction::from_key(b'\t'), Some(KeyAction::ToggleRecording));
        assert_eq!(KeyAction::from_key(27), Some(KeyAction::Quit));
        assert_eq!(KeyAction::from_key(b'1'), Some(KeyAction::Select(FilterId::Portra)));
        assert_eq!(KeyAction::from_key(b'4'), Some(KeyAction::Select(FilterId::Cross)));
        assert_eq!(KeyAction::from_key(b'8'), Some(KeyAction::Select(FilterId::Edges)));
        assert_eq!(KeyAction::from_key(b'9'), Some(KeyAction::Select(FilterId::Rc)));
        assert_eq!(KeyAction::from_key(b'0'), Some(KeyAction::Select(FilterId::Rgv)));
        assert_eq!(KeyAction::from_key(b'q'), Some(KeyAction::Select(FilterId::Cmv)));
        assert_eq!(KeyAction::from_key(b'x'), None);
        assert_eq!(KeyAction::from_key(b'Q'), None);
    }

    #[test]
    fn test_key_for_inverts() {
        for id in FilterId::ALL {
            assert_eq!(KeyAction::from_key(key_for(id) as u8), Some(KeyAction::Select(id)));
        }
    }
}
