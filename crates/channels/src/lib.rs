//! Per-channel dispatch.
//!
//! Every chat channel gets its own history, bounded inbox, and worker task.
//! The [`ChannelRegistry`] routes inbound messages to those workers and
//! creates them the first time a channel is seen; workers hand replies to a
//! [`ChannelOutbound`] implementation supplied by the transport.

pub mod error;
pub mod outbound;
pub mod registry;
pub mod worker;

pub use {
    error::{Error, Result},
    outbound::{ChannelOutbound, InboundMessage},
    registry::{ChannelRegistry, QUEUE_CAPACITY},
    worker::ChannelWorker,
};
