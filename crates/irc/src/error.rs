use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The server closed the connection.
    #[error("connection closed by server")]
    Disconnected,

    /// The socket writer task has stopped; nothing more can be sent.
    #[error("outbound writer stopped")]
    WriterClosed,

    /// The outbound queue has no room for a line that must not wait.
    #[error("outbound queue is full")]
    QueueFull,

    #[error("{context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    #[must_use]
    pub fn external(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
