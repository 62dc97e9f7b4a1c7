use std::collections::VecDeque;

use crate::message::Message;

/// Number of messages remembered per channel.
pub const HISTORY_CAPACITY: usize = 100;

/// Most-recent-first history of a single channel.
///
/// The buffer never grows past its capacity: recording a message when full
/// drops the oldest entry.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a newly seen message.
    pub fn record(&mut self, message: Message) {
        // Messages built by hand may bypass `Message::new`.
        let message = Message::new(message.author, message.text);
        self.messages.push_front(message);
        self.messages.truncate(self.capacity);
    }

    /// Index of the most recent message satisfying `predicate`.
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&Message) -> bool,
    {
        self.messages.iter().position(predicate)
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    /// Remove the entry at `index` and prepend `replacement` in its place.
    ///
    /// Returns the message as stored, or `None` when `index` is out of range
    /// (the buffer is left untouched in that case).
    pub fn replace(&mut self, index: usize, replacement: Message) -> Option<Message> {
        self.messages.remove(index)?;
        self.record(replacement);
        self.messages.front().cloned()
    }

    pub fn front(&self) -> Option<&Message> {
        self.messages.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
