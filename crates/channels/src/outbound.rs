use async_trait::async_trait;

use crate::Result;

/// A chat line delivered by the transport.
///
/// `author` is the bare sender name and `text` the message body, with all
/// protocol framing already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub channel: String,
    pub author: String,
    pub text: String,
}

impl InboundMessage {
    pub fn new(
        channel: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            author: author.into(),
            text: text.into(),
        }
    }
}

/// Send replies back to a channel.
///
/// Implementations own line framing: they strip line terminators from
/// `text`, enforce the protocol's length limit, and deliver it.
#[async_trait]
pub trait ChannelOutbound: Send + Sync {
    async fn emit(&self, channel: &str, text: &str) -> Result<()>;
}
