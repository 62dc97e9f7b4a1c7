use std::fmt;

/// Longest message text kept in history, in bytes.
pub const MAX_TEXT_LEN: usize = 511;

/// A message seen in a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub author: String,
    pub text: String,
}

impl Message {
    /// Build a message, truncating `text` to [`MAX_TEXT_LEN`] bytes.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        let mut text = text.into();
        truncate_on_char_boundary(&mut text, MAX_TEXT_LEN);
        Self {
            author: author.into(),
            text,
        }
    }
}

/// Renders the message the way it is echoed back to a channel.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {}", self.author, self.text)
    }
}

/// Shorten `text` to at most `max` bytes without splitting a code point.
pub fn truncate_on_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
