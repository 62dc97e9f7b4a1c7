use std::collections::VecDeque;

/// Private conversations kept open at once.
pub const MAX_PRIVATE_CONVERSATIONS: usize = 32;

/// Nicks with an open private conversation, least recently used first.
///
/// Channel workers exist only for channels the bot joined, but any nick on
/// the network can open a private conversation, so those are capped.
pub struct PrivateConversations {
    order: VecDeque<String>,
    limit: usize,
}

impl PrivateConversations {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            order: VecDeque::with_capacity(limit + 1),
            limit,
        }
    }

    /// Mark `nick` as just used.
    ///
    /// Returns the nick whose conversation has to be closed to stay within
    /// the limit, if any.
    pub fn touch(&mut self, nick: &str) -> Option<String> {
        if let Some(pos) = self.order.iter().position(|n| n == nick) {
            if let Some(existing) = self.order.remove(pos) {
                self.order.push_back(existing);
            }
            return None;
        }
        self.order.push_back(nick.to_string());
        if self.order.len() > self.limit {
            self.order.pop_front()
        } else {
            None
        }
    }
}

impl Default for PrivateConversations {
    fn default() -> Self {
        Self::new(MAX_PRIVATE_CONVERSATIONS)
    }
}
