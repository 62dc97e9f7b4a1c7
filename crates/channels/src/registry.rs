use std::{collections::HashMap, sync::Arc};

use {
    tokio::{
        sync::mpsc::{self, error::TrySendError},
        task::JoinHandle,
    },
    tracing::{debug, error, warn},
};

use crate::{
    Error, Result,
    outbound::{ChannelOutbound, InboundMessage},
    worker::ChannelWorker,
};

/// Messages that may wait in one channel's inbox.
pub const QUEUE_CAPACITY: usize = 100;

struct ChannelHandle {
    inbox: mpsc::Sender<InboundMessage>,
    task: JoinHandle<()>,
}

/// Routes inbound messages to per-channel workers.
///
/// Owned by whoever drives the transport; channels are created lazily on
/// their first message and live until the registry is shut down or dropped.
pub struct ChannelRegistry {
    channels: HashMap<String, ChannelHandle>,
    outbound: Arc<dyn ChannelOutbound>,
    queue_capacity: usize,
}

impl ChannelRegistry {
    pub fn new(outbound: Arc<dyn ChannelOutbound>) -> Self {
        Self::with_queue_capacity(outbound, QUEUE_CAPACITY)
    }

    pub fn with_queue_capacity(outbound: Arc<dyn ChannelOutbound>, queue_capacity: usize) -> Self {
        Self {
            channels: HashMap::new(),
            outbound,
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Queue `message` for its channel, starting the channel's worker if this
    /// is the first message seen there.
    ///
    /// Never waits: a full inbox rejects the message with
    /// [`Error::QueueFull`] so one slow channel cannot hold up the others.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, message: InboundMessage) -> Result<()> {
        let channel = message.channel.clone();
        let capacity = self.queue_capacity;

        match self.handle(&channel).inbox.try_send(message) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                warn!(%channel, capacity, "channel inbox full, dropping message");
                Err(Error::QueueFull { channel, capacity })
            },
            Err(TrySendError::Closed(_)) => {
                error!(%channel, "channel worker gone, dropping message");
                Err(Error::WorkerGone { channel })
            },
        }
    }

    /// Like [`dispatch`](Self::dispatch), but waits for inbox space instead
    /// of dropping.
    ///
    /// Only for feeds that may stall on one channel, such as replaying a
    /// single conversation from a file.
    pub async fn deliver(&mut self, message: InboundMessage) -> Result<()> {
        let channel = message.channel.clone();
        let inbox = self.handle(&channel).inbox.clone();
        inbox
            .send(message)
            .await
            .map_err(|_| Error::WorkerGone { channel })
    }

    /// Stop routing to `channel` and let its worker finish what is queued.
    ///
    /// The channel's history goes with it; a later message starts afresh.
    /// Returns `false` if the channel had no worker.
    pub fn retire(&mut self, channel: &str) -> bool {
        match self.channels.remove(channel) {
            Some(handle) => {
                debug!(%channel, "retiring channel");
                // Dropping the inbox ends the worker once it drains; the task
                // is left to finish on its own.
                drop(handle.inbox);
                true
            },
            None => false,
        }
    }

    /// Names of channels that have a worker.
    pub fn channels(&self) -> Vec<&str> {
        self.channels.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Close every inbox and wait for the workers to drain what is queued.
    pub async fn shutdown(self) {
        let tasks: Vec<_> = self
            .channels
            .into_iter()
            .map(|(channel, handle)| {
                drop(handle.inbox);
                (channel, handle.task)
            })
            .collect();
        for (channel, task) in tasks {
            if let Err(e) = task.await {
                warn!(%channel, error = %e, "channel worker ended abnormally");
            }
        }
    }
}

impl ChannelRegistry {
    fn handle(&mut self, channel: &str) -> &ChannelHandle {
        let capacity = self.queue_capacity;
        let outbound = &self.outbound;
        self.channels
            .entry(channel.to_string())
            .or_insert_with(|| spawn_worker(channel, capacity, outbound))
    }
}

fn spawn_worker(
    channel: &str,
    capacity: usize,
    outbound: &Arc<dyn ChannelOutbound>,
) -> ChannelHandle {
    debug!(%channel, capacity, "creating channel");
    let (inbox, rx) = mpsc::channel(capacity);
    let worker = ChannelWorker::new(channel, rx, Arc::clone(outbound));
    let task = tokio::spawn(worker.run());
    ChannelHandle { inbox, task }
}
