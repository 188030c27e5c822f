//! Preview window and key polling.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use cameo_core::Frame;
use cameo_io::{FrameSink, IoResult};
use thiserror::Error;
use tracing::{debug, trace};

/// Space bar.
pub const KEY_SPACE: i32 = 32;
/// Tab.
pub const KEY_TAB: i32 = 9;
/// Escape.
pub const KEY_ESC: i32 = 27;

/// Non-blocking source of key codes.
pub trait KeySource: Send {
    /// Next pressed key, or `None` if nothing was pressed.
    fn poll_key(&mut self) -> Option<i32>;
}

/// Never reports a key.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeys;

impl KeySource for NoKeys {
    fn poll_key(&mut self) -> Option<i32> {
        None
    }
}

/// Bad token in a key script.
#[derive(Debug, Error)]
#[error("unknown key '{0}' (expected space, tab, esc, none, or a single character)")]
pub struct KeyParseError(pub String);

/// Replays a fixed list of polls, one entry per call.
///
/// Scripts are comma separated: `space`, `tab`, `esc`, `none` (an empty
/// poll) or a single character.
///
/// ```rust
/// use cameo_cli::window::{KeySource, ScriptedKeys};
///
/// let mut keys: ScriptedKeys = "2,none,esc".parse().unwrap();
/// assert_eq!(keys.poll_key(), Some('2' as i32));
/// assert_eq!(keys.poll_key(), None);
/// assert_eq!(keys.poll_key(), Some(27));
/// assert_eq!(keys.poll_key(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedKeys {
    polls: VecDeque<Option<i32>>,
}

impl ScriptedKeys {
    /// Script from raw polls.
    pub fn new(polls: impl IntoIterator<Item = Option<i32>>) -> Self {
        Self {
            polls: polls.into_iter().collect(),
        }
    }

    /// Polls left in the script.
    pub fn remaining(&self) -> usize {
        self.polls.len()
    }

    fn parse_token(token: &str) -> Result<Option<i32>, KeyParseError> {
        match token.to_ascii_lowercase().as_str() {
            "space" => Ok(Some(KEY_SPACE)),
            "tab" => Ok(Some(KEY_TAB)),
            "esc" | "escape" => Ok(Some(KEY_ESC)),
            "none" | "-" => Ok(None),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Some(c as i32)),
                    _ => Err(KeyParseError(token.to_string())),
                }
            }
        }
    }
}

impl FromStr for ScriptedKeys {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let polls = s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Self::parse_token)
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { polls })
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self) -> Option<i32> {
        self.polls.pop_front().flatten()
    }
}

/// Named preview window.
///
/// Frames shown while the window exists go to the sink; frames shown
/// after `destroy_window` are dropped.
pub struct WindowManager {
    name: String,
    created: bool,
    sink: Box<dyn FrameSink>,
    keys: Box<dyn KeySource>,
}

impl WindowManager {
    /// Window titled `name` showing frames on `sink` and reading `keys`.
    /// Not created until [`create_window`](Self::create_window).
    pub fn new(name: impl Into<String>, sink: Box<dyn FrameSink>, keys: Box<dyn KeySource>) -> Self {
        Self {
            name: name.into(),
            created: false,
            sink,
            keys,
        }
    }

    /// Window title.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` between create and destroy.
    pub fn is_window_created(&self) -> bool {
        self.created
    }

    /// Opens the window.
    pub fn create_window(&mut self) {
        debug!(window = %self.name, "window created");
        self.created = true;
    }

    /// Closes the window; later frames are dropped.
    pub fn destroy_window(&mut self) {
        debug!(window = %self.name, "window destroyed");
        self.created = false;
    }

    /// Polls one key. Codes are masked to their low byte.
    pub fn process_events(&mut self) -> Option<u8> {
        let code = self.keys.poll_key()?;
        if code == -1 {
            return None;
        }
        let key = (code & 0xFF) as u8;
        trace!(window = %self.name, code, key, "key pressed");
        Some(key)
    }
}

impl FrameSink for WindowManager {
    fn show(&mut self, frame: &Frame) -> IoResult<()> {
        if self.created {
            self.sink.show(frame)
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("name", &self.name)
            .field("created", &self.created)
            .finish_non_exhaustive()
    }
}
