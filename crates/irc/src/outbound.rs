use {
    async_trait::async_trait,
    sedbot_channels::ChannelOutbound,
    sedbot_config::IrcConfig,
    sedbot_history::truncate_on_char_boundary,
    tokio::sync::mpsc::{self, error::TrySendError},
    tracing::debug,
};

use crate::{Error, Result};

/// Longest line sent to the server, excluding the `\r\n` terminator.
pub const MAX_LINE_LEN: usize = 510;

/// Queues lines for the connection's writer task.
///
/// Every line is stripped of embedded `\r`/`\n` and cut to
/// [`MAX_LINE_LEN`] bytes before it is queued; the writer adds the
/// terminator.
pub struct IrcOutbound {
    lines: mpsc::Sender<String>,
}

impl IrcOutbound {
    pub fn new(lines: mpsc::Sender<String>) -> Self {
        Self { lines }
    }

    /// Send a raw protocol line.
    pub async fn send_raw(&self, line: &str) -> Result<()> {
        let line = frame_line(line);
        if line.is_empty() {
            return Ok(());
        }
        self.lines
            .send(line)
            .await
            .map_err(|_| Error::WriterClosed)
    }

    /// Queue a raw protocol line without waiting for room.
    ///
    /// For lines sent from the read loop, which must not stall behind a
    /// slow socket.
    pub fn try_send_raw(&self, line: &str) -> Result<()> {
        let line = frame_line(line);
        if line.is_empty() {
            return Ok(());
        }
        self.lines.try_send(line).map_err(|e| match e {
            TrySendError::Full(_) => Error::QueueFull,
            TrySendError::Closed(_) => Error::WriterClosed,
        })
    }

    pub async fn privmsg(&self, target: &str, text: &str) -> Result<()> {
        self.send_raw(&format!("PRIVMSG {target} :{text}")).await
    }

    /// Send `NICK`.
    pub async fn nick(&self, nick: &str) -> Result<()> {
        self.send_raw(&format!("NICK {nick}")).await
    }

    /// Send the registration sequence and join the configured channels.
    pub async fn register(&self, config: &IrcConfig) -> Result<()> {
        self.send_raw(&format!(
            "USER {} 8 * :{}",
            config.username, config.realname
        ))
        .await?;
        self.nick(&config.nick).await?;
        for channel in &config.channels {
            debug!(%channel, "joining channel");
            self.send_raw(&format!("JOIN {channel}")).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ChannelOutbound for IrcOutbound {
    async fn emit(&self, channel: &str, text: &str) -> sedbot_channels::Result<()> {
        self.privmsg(channel, text)
            .await
            .map_err(|e| sedbot_channels::Error::external(format!("send to {channel}"), e))
    }
}

/// Remove line terminators and enforce the protocol length limit.
fn frame_line(line: &str) -> String {
    let mut framed: String = line.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    truncate_on_char_boundary(&mut framed, MAX_LINE_LEN);
    framed
}
