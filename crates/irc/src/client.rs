use std::sync::Arc;

use {
    sedbot_channels::{ChannelRegistry, InboundMessage},
    sedbot_config::IrcConfig,
    tokio::{
        io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
        net::{
            TcpStream,
            tcp::{OwnedReadHalf, OwnedWriteHalf},
        },
        sync::mpsc,
        task::JoinHandle,
    },
    tracing::{debug, info, trace, warn},
};

use crate::{
    Error, Result,
    line::{IrcLine, is_channel, parse_line},
    outbound::IrcOutbound,
    private::PrivateConversations,
};

/// Lines that may wait for the socket writer.
const OUTBOUND_QUEUE: usize = 256;

/// Initial capacity of the inbound frame buffer.
const READ_BUFFER: usize = 512;

/// A registered connection to an IRC server.
pub struct IrcClient {
    reader: BufReader<OwnedReadHalf>,
    frame: Vec<u8>,
    outbound: Arc<IrcOutbound>,
    writer: JoinHandle<Result<()>>,
    nick: String,
    private: PrivateConversations,
}

impl IrcClient {
    /// Connect to the configured server, register, and join channels.
    pub async fn connect(config: &IrcConfig) -> Result<Self> {
        let addr = config.address();
        info!(%addr, nick = %config.nick, "connecting to IRC server");
        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|e| Error::external(format!("failed to connect to {addr}"), e))?;
        let (read_half, write_half) = stream.into_split();

        let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE);
        let writer = tokio::spawn(write_lines(write_half, rx));
        let outbound = Arc::new(IrcOutbound::new(tx));
        outbound.register(config).await?;

        Ok(Self {
            reader: BufReader::new(read_half),
            frame: Vec::with_capacity(READ_BUFFER),
            outbound,
            writer,
            nick: config.nick.clone(),
            private: PrivateConversations::default(),
        })
    }

    /// Outbound handle for replies and raw commands.
    pub fn outbound(&self) -> Arc<IrcOutbound> {
        Arc::clone(&self.outbound)
    }

    /// Read from the server until the connection ends, routing chat lines
    /// into `registry`.
    ///
    /// Always ends in an error: [`Error::Disconnected`] when the server
    /// closes the connection, or the underlying I/O failure.
    pub async fn run(mut self, registry: &mut ChannelRegistry) -> Result<()> {
        loop {
            tokio::select! {
                read = self.reader.read_until(b'\n', &mut self.frame) => {
                    if read? == 0 {
                        return Err(Error::Disconnected);
                    }
                    // Clients send whatever encoding they like; undecodable
                    // bytes become U+FFFD instead of ending the session.
                    let line = String::from_utf8_lossy(&self.frame).into_owned();
                    self.frame.clear();
                    self.handle_line(&line, registry).await?;
                },
                written = &mut self.writer => {
                    return match written {
                        Ok(Ok(())) => Err(Error::WriterClosed),
                        Ok(Err(e)) => Err(e),
                        Err(e) => Err(Error::external("writer task failed", e)),
                    };
                },
            }
        }
    }

    async fn handle_line(&mut self, line: &str, registry: &mut ChannelRegistry) -> Result<()> {
        match parse_line(line) {
            IrcLine::Ping(token) => {
                trace!(%token, "answering ping");
                match self.outbound.try_send_raw(&format!("PONG {token}")) {
                    Ok(()) => {},
                    Err(Error::QueueFull) => warn!(%token, "outbound queue full, ping not answered"),
                    Err(e) => return Err(e),
                }
            },
            IrcLine::Welcome => info!(nick = %self.nick, "registered with server"),
            IrcLine::NickInUse => {
                self.nick.push('_');
                warn!(nick = %self.nick, "nick in use, retrying");
                self.outbound.nick(&self.nick).await?;
            },
            IrcLine::Privmsg {
                target,
                author,
                text,
            } => {
                // Private messages get a conversation of their own, keyed
                // and answered by the sender.
                let channel = if is_channel(target) {
                    target
                } else {
                    if let Some(evicted) = self.private.touch(author) {
                        debug!(nick = %evicted, "closing least recently used private conversation");
                        registry.retire(&evicted);
                    }
                    author
                };
                debug!(%channel, %author, %text, "inbound message");
                // Overflow is logged by the registry; the message is dropped.
                let _ = registry.dispatch(InboundMessage::new(channel, author, text));
            },
            IrcLine::Other => trace!(%line, "ignoring line"),
        }
        Ok(())
    }
}

async fn write_lines(
    mut writer: OwnedWriteHalf,
    mut lines: mpsc::Receiver<String>,
) -> Result<()> {
    while let Some(line) = lines.recv().await {
        trace!(%line, "sending line");
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\r\n").await?;
    }
    writer.shutdown().await?;
    Ok(())
}
