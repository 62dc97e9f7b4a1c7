//! Offline mode: one channel fed from stdin, replies on stdout.

use std::sync::Arc;

use {
    anyhow::Result,
    async_trait::async_trait,
    sedbot_channels::{ChannelOutbound, ChannelRegistry, InboundMessage},
    tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader},
    tracing::info,
};

pub const DEFAULT_CHANNEL: &str = "#local";

/// Author used for input lines without a `<author>` prefix.
const ANONYMOUS: &str = "you";

struct StdoutOutbound;

#[async_trait]
impl ChannelOutbound for StdoutOutbound {
    async fn emit(&self, _channel: &str, text: &str) -> sedbot_channels::Result<()> {
        let mut stdout = tokio::io::stdout();
        let line = format!("{text}\n");
        stdout
            .write_all(line.as_bytes())
            .await
            .map_err(|e| sedbot_channels::Error::external("write to stdout", e))?;
        stdout
            .flush()
            .await
            .map_err(|e| sedbot_channels::Error::external("flush stdout", e))
    }
}

pub async fn run_local(channel: &str) -> Result<()> {
    info!(%channel, "reading `<author> text` lines from stdin");
    let mut registry = ChannelRegistry::new(Arc::new(StdoutOutbound));
    let fed = feed(BufReader::new(tokio::io::stdin()), channel, &mut registry).await;
    registry.shutdown().await;
    info!(lines = fed?, "input closed");
    Ok(())
}

/// Deliver every non-blank line of `input` to `channel`, waiting for the
/// worker when it falls behind. Returns the number of lines delivered.
async fn feed<R>(input: R, channel: &str, registry: &mut ChannelRegistry) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut fed = 0;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let (author, text) = split_author(&line);
        registry
            .deliver(InboundMessage::new(channel, author, text))
            .await?;
        fed += 1;
    }
    Ok(fed)
}

/// Split `<author> text` into its parts.
fn split_author(line: &str) -> (&str, &str) {
    line.strip_prefix('<')
        .and_then(|rest| rest.split_once("> "))
        .filter(|(author, _)| !author.is_empty() && !author.contains(char::is_whitespace))
        .unwrap_or((ANONYMOUS, line))
}
