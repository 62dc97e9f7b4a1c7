//! Bounded per-channel message history.
//!
//! Each channel keeps its most recent messages, newest first. Directives
//! search this history and rewrite the entry they match in place at the
//! front of the buffer.

pub mod buffer;
pub mod message;

pub use {
    buffer::{HISTORY_CAPACITY, HistoryBuffer},
    message::{MAX_TEXT_LEN, Message, truncate_on_char_boundary},
};
