use std::sync::Arc;

use {
    sedbot_directive::Command,
    sedbot_history::HistoryBuffer,
    tokio::sync::mpsc,
    tracing::{debug, info, warn},
};

use crate::outbound::{ChannelOutbound, InboundMessage};

/// Sole consumer of one channel's inbox.
///
/// The worker owns the channel's history outright. Messages are handled one
/// at a time in arrival order, and a message's reply is delivered before the
/// next message is taken from the inbox.
pub struct ChannelWorker {
    channel: String,
    history: HistoryBuffer,
    inbox: mpsc::Receiver<InboundMessage>,
    outbound: Arc<dyn ChannelOutbound>,
}

impl ChannelWorker {
    pub fn new(
        channel: impl Into<String>,
        inbox: mpsc::Receiver<InboundMessage>,
        outbound: Arc<dyn ChannelOutbound>,
    ) -> Self {
        Self {
            channel: channel.into(),
            history: HistoryBuffer::new(),
            inbox,
            outbound,
        }
    }

    /// Process messages until every sender for the inbox is dropped.
    pub async fn run(mut self) {
        info!(channel = %self.channel, "channel worker started");
        while let Some(message) = self.inbox.recv().await {
            self.handle(message).await;
        }
        info!(
            channel = %self.channel,
            history = self.history.len(),
            "channel worker stopped"
        );
    }

    async fn handle(&mut self, message: InboundMessage) {
        let InboundMessage { author, text, .. } = message;

        let outcome = Command::classify(&text).and_then(|command| {
            if command != Command::Plain {
                debug!(
                    channel = %self.channel,
                    %author,
                    kind = command.kind(),
                    "applying directive"
                );
            }
            sedbot_directive::apply(&command, &author, &text, &mut self.history)
        });

        let reply = match outcome {
            Ok(None) => return,
            Ok(Some(rewritten)) => rewritten.to_string(),
            Err(e) => {
                debug!(channel = %self.channel, %author, error = %e, "directive rejected");
                format!("<{author}> {e}")
            },
        };

        if let Err(e) = self.outbound.emit(&self.channel, &reply).await {
            warn!(channel = %self.channel, error = %e, "failed to emit reply");
        }
    }
}
