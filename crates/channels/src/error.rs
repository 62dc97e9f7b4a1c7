use std::error::Error as StdError;

/// Crate-wide result type for channel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed errors for dispatching and emitting channel messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The channel's inbox is at capacity; the message was not queued.
    #[error("inbox for {channel} is full ({capacity} pending)")]
    QueueFull { channel: String, capacity: usize },

    /// The channel's worker has stopped and can no longer accept messages.
    #[error("worker for {channel} is no longer running")]
    WorkerGone { channel: String },

    /// Wrapped source error from the transport.
    #[error("channel operation failed: {context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    #[must_use]
    pub fn external(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
